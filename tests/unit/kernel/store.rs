use super::*;
use crate::kernel::persistence::{EDITOR_CONTENT_KEY, RECENT_FILES_KEY};
use crate::kernel::services::adapters::MemoryStore;
use crate::kernel::NotificationLevel;

fn new_store() -> Store {
    Store::new(WorkspaceConfig::default(), Box::new(MemoryStore::new()))
}

fn store_with_binding(binding: ResponseBinding) -> Store {
    let config = WorkspaceConfig {
        response_binding: binding,
        ..WorkspaceConfig::default()
    };
    Store::new(config, Box::new(MemoryStore::new()))
}

fn open_project(store: &mut Store) {
    let files = vec![
        FileEntity::new("a.sv", "proj/a.sv", "module a; endmodule"),
        FileEntity::new("c.v", "proj/c.v", "module c; endmodule"),
    ];
    let result = store.dispatch(Action::OpenProject { files });
    assert!(result.error.is_none());
}

fn arrived(kind: ArtifactKind, key: &str, payload: &str) -> Action {
    Action::ArtifactArrived(ArtifactMessage {
        kind,
        key: key.to_string(),
        payload: payload.to_string(),
    })
}

fn notice(result: &DispatchResult) -> Option<&Notification> {
    result.effects.iter().find_map(|effect| match effect {
        Effect::Notify(n) => Some(n),
        _ => None,
    })
}

#[test]
fn open_path_only_emits_load() {
    let mut store = new_store();
    let result = store.dispatch(Action::OpenPath("top.sv".into()));

    assert_eq!(result.effects, vec![Effect::LoadFile("top.sv".into())]);
    assert!(!result.state_changed);
    assert!(store.state().workspace.is_empty());
}

#[test]
fn open_single_file_uploads_and_records_recent() {
    let mut store = new_store();

    let result = store.dispatch(Action::OpenSingleFile {
        name: "top.sv".into(),
        content: "module top; endmodule".into(),
    });

    assert!(result.state_changed);
    assert_eq!(
        result.effects[0],
        Effect::UploadFile {
            name: "top.sv".into(),
            content: "module top; endmodule".into(),
        }
    );
    match &result.effects[1] {
        Effect::RecentFilesChanged(files) => assert_eq!(files[0].name, "top.sv"),
        other => panic!("unexpected effect: {other:?}"),
    }
    assert_eq!(store.active_key(), "top.sv");
    assert_eq!(store.active_entry().active_tab_view(), TabView::Code);
    assert_eq!(
        store.storage().get(EDITOR_CONTENT_KEY).as_deref(),
        Some("module top; endmodule")
    );
}

#[test]
fn open_project_activates_first_file() {
    let mut store = new_store();
    open_project(&mut store);

    let ws = &store.state().workspace;
    assert_eq!(ws.project_files().len(), 2);
    assert_eq!(ws.active_file_index(), Some(0));
    assert_eq!(ws.editor_content(), "module a; endmodule");
    assert_eq!(store.state().recent.snapshot()[0].name, "a.sv");
}

#[test]
fn empty_project_warns_and_keeps_state() {
    let mut store = new_store();

    let result = store.dispatch(Action::OpenProject { files: Vec::new() });

    assert_eq!(result.error, Some(WorkspaceError::NoMatchingFiles));
    assert_eq!(notice(&result).unwrap().message, "No Verilog files found");
    assert!(store.state().workspace.is_empty());
}

#[test]
fn switch_updates_key_and_recent_together() {
    let mut store = new_store();
    open_project(&mut store);

    let result = store.dispatch(Action::SwitchActiveFile { index: 1 });

    assert!(result.state_changed);
    assert_eq!(store.active_key(), "c.v");
    assert_eq!(store.state().workspace.editor_content(), "module c; endmodule");
    assert_eq!(store.state().recent.snapshot()[0].name, "c.v");
    assert_eq!(store.state().recent.snapshot()[1].name, "a.sv");
}

#[test]
fn switch_out_of_range_is_an_error_without_effects() {
    let mut store = new_store();
    open_project(&mut store);

    let result = store.dispatch(Action::SwitchActiveFile { index: 5 });

    assert_eq!(
        result.error,
        Some(WorkspaceError::IndexOutOfRange { index: 5, len: 2 })
    );
    assert!(result.effects.is_empty());
    assert_eq!(store.active_key(), "a.sv");
}

#[test]
fn new_file_opens_untitled() {
    let mut store = new_store();
    store.dispatch(Action::NewFile);

    assert_eq!(store.active_key(), UNTITLED_FILE_NAME);
    assert_eq!(store.state().workspace.editor_content(), "");
}

#[test]
fn open_recent_reopens_content() {
    let mut store = new_store();
    store.dispatch(Action::OpenSingleFile {
        name: "top.sv".into(),
        content: "module top;".into(),
    });
    store.dispatch(Action::NewFile);

    let result = store.dispatch(Action::OpenRecent {
        name: "top.sv".into(),
    });

    assert!(result.error.is_none());
    assert_eq!(store.state().workspace.editor_content(), "module top;");
    assert_eq!(store.state().recent.snapshot()[0].name, "top.sv");
}

#[test]
fn open_unknown_recent_is_rejected() {
    let mut store = new_store();

    let result = store.dispatch(Action::OpenRecent {
        name: "gone.sv".into(),
    });

    assert_eq!(
        result.error,
        Some(WorkspaceError::UnknownRecentFile("gone.sv".into()))
    );
    assert_eq!(notice(&result).unwrap().level, NotificationLevel::Warning);
}

#[test]
fn edit_persists_only_on_change() {
    let mut store = new_store();
    store.dispatch(Action::NewFile);

    let result = store.dispatch(Action::EditContent("module m;".into()));
    assert!(result.state_changed);
    assert_eq!(
        store.storage().get(EDITOR_CONTENT_KEY).as_deref(),
        Some("module m;")
    );

    let result = store.dispatch(Action::EditContent("module m;".into()));
    assert!(!result.state_changed);
}

#[test]
fn request_on_empty_editor_warns() {
    let mut store = new_store();
    store.dispatch(Action::NewFile);
    store.dispatch(Action::EditContent("   \n".into()));

    let result = store.dispatch(Action::RequestExplanation);

    let n = notice(&result).unwrap();
    assert_eq!(n.level, NotificationLevel::Warning);
    assert_eq!(n.message, "Editor is empty");
    assert!(store.state().in_flight.is_empty());
}

#[test]
fn request_carries_originating_key() {
    let mut store = new_store();
    open_project(&mut store);

    let result = store.dispatch(Action::RequestTestbench);

    assert_eq!(
        result.effects,
        vec![Effect::RequestTestbench {
            key: "a.sv".into(),
            source: "module a; endmodule".into(),
        }]
    );
    assert!(store.is_loading(ArtifactKind::Testbench));
    assert!(!store.is_loading(ArtifactKind::Explanation));
}

#[test]
fn explanation_arrival_switches_active_tab() {
    let mut store = new_store();
    open_project(&mut store);
    store.dispatch(Action::RequestExplanation);

    store.dispatch(arrived(ArtifactKind::Explanation, "a.sv", "A module."));

    assert!(!store.is_loading(ArtifactKind::Explanation));
    let entry = store.active_entry();
    assert_eq!(entry.explanation(), "A module.");
    assert_eq!(entry.active_tab_view(), TabView::Explanation);
}

#[test]
fn stale_response_lands_on_originating_file() {
    let mut store = store_with_binding(ResponseBinding::Originating);
    open_project(&mut store);
    store.dispatch(Action::RequestExplanation);
    store.dispatch(Action::SwitchActiveFile { index: 1 });

    store.dispatch(arrived(ArtifactKind::Explanation, "a.sv", "about a"));

    let active = store.active_entry().clone();
    assert_eq!(active.explanation(), "");
    assert_eq!(active.active_tab_view(), TabView::Code);
    let origin = store.entry("a.sv").clone();
    assert_eq!(origin.explanation(), "about a");
    assert_eq!(origin.active_tab_view(), TabView::Code);
    assert!(store.state().in_flight.is_empty());
}

#[test]
fn stale_response_lands_on_active_file_with_legacy_binding() {
    let mut store = store_with_binding(ResponseBinding::ActiveAtArrival);
    open_project(&mut store);
    store.dispatch(Action::RequestExplanation);
    store.dispatch(Action::SwitchActiveFile { index: 1 });

    store.dispatch(arrived(ArtifactKind::Explanation, "a.sv", "about a"));

    let active = store.active_entry().clone();
    assert_eq!(active.explanation(), "about a");
    assert_eq!(active.active_tab_view(), TabView::Explanation);
    assert_eq!(store.entry("a.sv").explanation(), "");
    assert!(store.state().in_flight.is_empty());
}

#[test]
fn testbench_arrival_enables_tab_and_reset_disables_it() {
    let mut store = new_store();
    open_project(&mut store);

    let result = store.dispatch(Action::SetActiveTabView {
        view: TabView::Testbench,
    });
    assert_eq!(result.error, Some(WorkspaceError::InvalidTabView));

    store.dispatch(arrived(ArtifactKind::Testbench, "a.sv", "module tb;"));
    assert_eq!(store.active_entry().active_tab_view(), TabView::Testbench);

    store.dispatch(Action::SetActiveTabView {
        view: TabView::Code,
    });
    assert_eq!(store.active_entry().active_tab_view(), TabView::Code);

    store.dispatch(Action::ResetTestbench);
    let entry = store.active_entry();
    assert!(!entry.testbench_enabled());
    assert_eq!(entry.testbench(), "");
}

#[test]
fn artifact_failure_notifies_and_clears_loading() {
    let mut store = new_store();
    open_project(&mut store);
    store.dispatch(Action::RequestTestbench);

    let result = store.dispatch(Action::ArtifactFailed {
        kind: ArtifactKind::Testbench,
        key: "a.sv".into(),
        error: WorkspaceError::BackendRequestFailed("request timed out".into()),
    });

    assert!(!store.is_loading(ArtifactKind::Testbench));
    let n = notice(&result).unwrap();
    assert_eq!(n.level, NotificationLevel::Error);
    assert!(n.message.starts_with("Failed to generate testbench"));
    assert!(!store.active_entry().testbench_enabled());
}

#[test]
fn copy_explanation_needs_text() {
    let mut store = new_store();
    open_project(&mut store);

    let result = store.dispatch(Action::CopyExplanation);
    assert_eq!(notice(&result).unwrap().message, "No explanation to copy");

    store.dispatch(arrived(ArtifactKind::Explanation, "a.sv", "copy me"));
    let result = store.dispatch(Action::CopyExplanation);
    assert_eq!(
        result.effects,
        vec![Effect::SetClipboardText("copy me".into())]
    );
}

#[test]
fn load_failure_warns() {
    let mut store = new_store();

    let result = store.dispatch(Action::LoadFailed {
        path: "notes.txt".into(),
        error: WorkspaceError::InvalidExtension("notes.txt".into()),
    });

    let n = notice(&result).unwrap();
    assert_eq!(n.level, NotificationLevel::Warning);
    assert_eq!(n.message, "Only .v or .sv files are allowed: notes.txt");
}

#[test]
fn clear_all_resets_everything() {
    let mut store = new_store();
    open_project(&mut store);
    store.dispatch(arrived(ArtifactKind::Explanation, "a.sv", "x"));
    store.dispatch(Action::RequestTestbench);

    let result = store.dispatch(Action::ClearAll);

    assert_eq!(
        result.effects,
        vec![
            Effect::ClearBackendSession,
            Effect::RecentFilesChanged(Vec::new())
        ]
    );
    assert!(store.state().workspace.is_empty());
    assert!(store.state().recent.is_empty());
    assert!(store.state().in_flight.is_empty());
    assert!(store.storage().keys().is_empty());
    assert_eq!(store.active_key(), "blank");
    assert!(store.active_entry().is_default());
    assert!(store.entry("a.sv").is_default());
}

#[test]
fn reload_restores_session() {
    let mut store = new_store();
    open_project(&mut store);
    store.dispatch(Action::SwitchActiveFile { index: 1 });
    store.dispatch(Action::EditContent("module c2; endmodule".into()));
    store.dispatch(arrived(ArtifactKind::Explanation, "c.v", "about c"));
    assert!(store.storage().get(RECENT_FILES_KEY).is_some());

    let mut reloaded = Store::new(WorkspaceConfig::default(), store.into_storage());

    let ws = &reloaded.state().workspace;
    assert_eq!(ws.active_file_index(), Some(1));
    assert_eq!(ws.editor_content(), "module c2; endmodule");
    assert_eq!(reloaded.state().recent.snapshot()[0].name, "c.v");
    let entry = reloaded.active_entry();
    assert_eq!(entry.explanation(), "about c");
    assert_eq!(entry.active_tab_view(), TabView::Explanation);
}

#[test]
fn malformed_storage_starts_clean() {
    let mut storage = MemoryStore::new();
    storage.set("projectFiles", "{{{").unwrap();
    storage.set(RECENT_FILES_KEY, "42").unwrap();
    storage.set("artifact-blank", "nope").unwrap();

    let mut store = Store::new(WorkspaceConfig::default(), Box::new(storage));

    assert!(store.state().workspace.is_empty());
    assert!(store.state().recent.is_empty());
    assert!(store.active_entry().is_default());
}

#[test]
fn duplicate_arrival_changes_nothing() {
    let mut store = new_store();
    open_project(&mut store);
    store.dispatch(Action::RequestExplanation);
    let first = store.dispatch(arrived(ArtifactKind::Explanation, "a.sv", "same"));
    assert!(first.state_changed);
    store.dispatch(Action::SetActiveTabView {
        view: TabView::Code,
    });
    let stored = store.active_entry().clone();

    let second = store.dispatch(arrived(ArtifactKind::Explanation, "a.sv", "same"));

    assert!(!second.state_changed);
    assert!(second.effects.is_empty());
    assert_eq!(store.active_entry(), &stored);
    assert!(store.state().in_flight.is_empty());
}
