use super::*;
use crate::kernel::services::adapters::MemoryStore;

#[test]
fn display_key_falls_back_to_blank() {
    assert_eq!(display_key(""), BLANK_KEY);
    assert_eq!(display_key(" \t"), BLANK_KEY);
    assert_eq!(display_key("top.sv"), "top.sv");
}

#[test]
fn tab_view_parse_is_case_insensitive() {
    assert_eq!(TabView::parse("Explanation"), Some(TabView::Explanation));
    assert_eq!(TabView::parse(" testbench "), Some(TabView::Testbench));
    assert_eq!(TabView::parse("waveform"), None);
    assert_eq!(TabView::parse(TabView::Code.as_str()), Some(TabView::Code));
}

#[test]
fn unknown_key_yields_default_entry() {
    let storage = MemoryStore::new();
    let mut cache = ArtifactCache::new();

    let entry = cache.entry("top.sv", &storage);

    assert!(entry.is_default());
    assert_eq!(entry.active_tab_view(), TabView::Code);
    assert!(!entry.testbench_enabled());
}

#[test]
fn explanation_for_active_key_switches_tab() {
    let mut storage = MemoryStore::new();
    let mut cache = ArtifactCache::new();

    let switched = cache.set_explanation("top.sv", "A counter.", "top.sv", &mut storage);

    assert!(switched);
    let entry = cache.entry("top.sv", &storage);
    assert_eq!(entry.explanation(), "A counter.");
    assert_eq!(entry.active_tab_view(), TabView::Explanation);
}

#[test]
fn explanation_for_inactive_key_keeps_tab() {
    let mut storage = MemoryStore::new();
    let mut cache = ArtifactCache::new();

    let switched = cache.set_explanation("a.sv", "A mux.", "c.v", &mut storage);

    assert!(!switched);
    let entry = cache.entry("a.sv", &storage);
    assert_eq!(entry.explanation(), "A mux.");
    assert_eq!(entry.active_tab_view(), TabView::Code);
}

#[test]
fn empty_explanation_does_not_switch_tab() {
    let mut storage = MemoryStore::new();
    let mut cache = ArtifactCache::new();

    assert!(!cache.set_explanation("top.sv", "", "top.sv", &mut storage));
    assert_eq!(cache.entry("top.sv", &storage).active_tab_view(), TabView::Code);
}

#[test]
fn entries_are_independent_per_key() {
    let mut storage = MemoryStore::new();
    let mut cache = ArtifactCache::new();

    cache.set_explanation("a.sv", "about a", "a.sv", &mut storage);
    cache.set_testbench("c.v", "module tb_c;", "c.v", &mut storage);

    let a = cache.entry("a.sv", &storage).clone();
    let c = cache.entry("c.v", &storage).clone();
    assert_eq!(a.explanation(), "about a");
    assert!(!a.testbench_enabled());
    assert_eq!(c.explanation(), "");
    assert_eq!(c.testbench(), "module tb_c;");
    assert_eq!(c.active_tab_view(), TabView::Testbench);
}

#[test]
fn testbench_view_requires_enabled_testbench() {
    let mut storage = MemoryStore::new();
    let mut cache = ArtifactCache::new();

    let err = cache
        .set_active_tab_view("top.sv", TabView::Testbench, &mut storage)
        .unwrap_err();
    assert_eq!(err, WorkspaceError::InvalidTabView);
    assert_eq!(cache.entry("top.sv", &storage).active_tab_view(), TabView::Code);

    cache.set_testbench("top.sv", "module tb;", "other.sv", &mut storage);
    assert_eq!(cache.entry("top.sv", &storage).active_tab_view(), TabView::Code);
    assert_eq!(
        cache.set_active_tab_view("top.sv", TabView::Testbench, &mut storage),
        Ok(true)
    );
    assert_eq!(
        cache.set_active_tab_view("top.sv", TabView::Testbench, &mut storage),
        Ok(false)
    );
}

#[test]
fn reset_testbench_returns_to_code() {
    let mut storage = MemoryStore::new();
    let mut cache = ArtifactCache::new();
    cache.set_explanation("top.sv", "kept", "top.sv", &mut storage);
    cache.set_testbench("top.sv", "module tb;", "top.sv", &mut storage);

    cache.reset_testbench("top.sv", &mut storage);

    let entry = cache.entry("top.sv", &storage);
    assert_eq!(entry.testbench(), "");
    assert!(!entry.testbench_enabled());
    assert_eq!(entry.active_tab_view(), TabView::Code);
    assert_eq!(entry.explanation(), "kept");
}

#[test]
fn entries_survive_a_fresh_cache() {
    let mut storage = MemoryStore::new();
    let mut cache = ArtifactCache::new();
    cache.set_explanation("top.sv", "persisted", "top.sv", &mut storage);

    let mut fresh = ArtifactCache::new();
    let entry = fresh.entry("top.sv", &storage);

    assert_eq!(entry.explanation(), "persisted");
    assert_eq!(entry.active_tab_view(), TabView::Explanation);
    assert!(storage.get(&artifact_storage_key("top.sv")).is_some());
}

#[test]
fn malformed_record_becomes_default() {
    let mut storage = MemoryStore::new();
    storage
        .set(&artifact_storage_key("top.sv"), "[1, 2")
        .unwrap();
    let mut cache = ArtifactCache::new();

    assert!(cache.entry("top.sv", &storage).is_default());
}

#[test]
fn stored_testbench_view_without_testbench_is_sanitized() {
    let mut storage = MemoryStore::new();
    storage
        .set(
            &artifact_storage_key("top.sv"),
            r#"{"testbench":"stale","testbenchEnabled":false,"activeTabView":"testbench"}"#,
        )
        .unwrap();
    let mut cache = ArtifactCache::new();

    let entry = cache.entry("top.sv", &storage);

    assert_eq!(entry.active_tab_view(), TabView::Code);
    assert_eq!(entry.testbench(), "");
}

#[test]
fn clear_drops_memory_entries() {
    let mut storage = MemoryStore::new();
    let mut cache = ArtifactCache::new();
    cache.set_explanation("top.sv", "x", "top.sv", &mut storage);
    assert_eq!(cache.len(), 1);

    cache.clear();

    assert!(cache.is_empty());
    assert!(cache.peek("top.sv").is_none());
}

#[test]
fn repeated_explanation_keeps_chosen_tab() {
    let mut storage = MemoryStore::new();
    let mut cache = ArtifactCache::new();
    assert!(cache.set_explanation("top.sv", "same", "top.sv", &mut storage));
    cache
        .set_active_tab_view("top.sv", TabView::Code, &mut storage)
        .unwrap();

    assert!(!cache.set_explanation("top.sv", "same", "top.sv", &mut storage));

    let entry = cache.entry("top.sv", &storage);
    assert_eq!(entry.explanation(), "same");
    assert_eq!(entry.active_tab_view(), TabView::Code);
}

#[test]
fn repeated_testbench_keeps_chosen_tab() {
    let mut storage = MemoryStore::new();
    let mut cache = ArtifactCache::new();
    assert!(cache.set_testbench("top.sv", "module tb;", "top.sv", &mut storage));
    cache
        .set_active_tab_view("top.sv", TabView::Code, &mut storage)
        .unwrap();

    assert!(!cache.set_testbench("top.sv", "module tb;", "top.sv", &mut storage));
    assert_eq!(cache.entry("top.sv", &storage).active_tab_view(), TabView::Code);

    assert!(cache.set_testbench("top.sv", "module tb2;", "top.sv", &mut storage));
    assert_eq!(cache.entry("top.sv", &storage).active_tab_view(), TabView::Testbench);
}
