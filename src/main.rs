use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::time::{Duration, Instant};

use veriwork::kernel::services::adapters::{
    ensure_data_dir, ensure_settings_file, get_state_file_path, load_settings, AppMessage,
    AsyncRuntime, JsonFileStore, MemoryStore, OfflineBackend,
};
use veriwork::kernel::services::ports::{KeyValueStore, Settings, StorageKind};
use veriwork::kernel::services::{ArtifactBridge, ArtifactReceiver};
use veriwork::kernel::{
    Action, DispatchResult, Document, Effect, NotificationLevel, Store, TabView,
};

mod logging;

const USAGE: &str = "\
usage: veriwork [--state=PATH] [--memory] [--verbose] <command> [args]

commands:
  status                 show the restored workspace
  open <file>            open a single .v/.sv file
  open-folder <dir>      open every .v/.sv file under <dir> as a project
  switch <index>         make project file <index> active
  new                    start an empty untitled.sv
  edit <file>            replace the editor text with the contents of <file>
  recent [name]          list recent files, or reopen <name>
  explain                request an explanation of the editor text
  testbench              request a testbench for the editor text
  reset-testbench        discard the testbench of the active file
  tab <view>             show code, explanation or testbench
  copy-explanation       print the active file's explanation
  clear                  forget everything
  exit                   same as clear";

const COMPLETION_TIMEOUT: Duration = Duration::from_secs(10);
const POLL_INTERVAL: Duration = Duration::from_millis(20);

enum Command {
    Status,
    ListRecent,
    Dispatch(Action),
}

struct Cli {
    state_path: Option<PathBuf>,
    memory: bool,
    verbose: bool,
    command: Command,
}

fn parse_args(args: Vec<String>) -> Result<Cli, String> {
    let mut state_path = None;
    let mut memory = false;
    let mut verbose = false;
    let mut rest = Vec::new();
    for arg in args {
        if let Some(value) = arg.strip_prefix("--state=") {
            state_path = Some(PathBuf::from(value));
        } else if arg == "--memory" {
            memory = true;
        } else if arg == "--verbose" || arg == "-v" {
            verbose = true;
        } else {
            rest.push(arg);
        }
    }

    let mut rest = rest.into_iter();
    let name = rest.next().unwrap_or_else(|| "status".to_string());
    let arg = rest.next();
    let command = match (name.as_str(), arg) {
        ("status", _) => Command::Status,
        ("open", Some(path)) => Command::Dispatch(Action::OpenPath(path.into())),
        ("open-folder", Some(path)) => Command::Dispatch(Action::OpenFolder(path.into())),
        ("switch", Some(index)) => {
            let index = index
                .parse()
                .map_err(|_| format!("invalid index: {}", index))?;
            Command::Dispatch(Action::SwitchActiveFile { index })
        }
        ("new", _) => Command::Dispatch(Action::NewFile),
        ("edit", Some(path)) => {
            let text = std::fs::read_to_string(&path)
                .map_err(|e| format!("cannot read {}: {}", path, e))?;
            Command::Dispatch(Action::EditContent(text))
        }
        ("recent", None) => Command::ListRecent,
        ("recent", Some(name)) => Command::Dispatch(Action::OpenRecent { name }),
        ("explain", _) => Command::Dispatch(Action::RequestExplanation),
        ("testbench", _) => Command::Dispatch(Action::RequestTestbench),
        ("reset-testbench", _) => Command::Dispatch(Action::ResetTestbench),
        ("tab", Some(view)) => {
            let view = TabView::parse(&view).ok_or_else(|| format!("unknown view: {}", view))?;
            Command::Dispatch(Action::SetActiveTabView { view })
        }
        ("copy-explanation", _) => Command::Dispatch(Action::CopyExplanation),
        ("clear", _) | ("exit", _) => Command::Dispatch(Action::ClearAll),
        (other, _) => return Err(format!("unknown or incomplete command: {}", other)),
    };

    Ok(Cli {
        state_path,
        memory,
        verbose,
        command,
    })
}

/// Drives one store: runs effects and feeds completions back until none are outstanding.
struct Session {
    store: Store,
    runtime: AsyncRuntime,
    app_rx: Receiver<AppMessage>,
    artifacts: ArtifactReceiver,
    bridge: ArtifactBridge,
    pending: usize,
    failed: bool,
}

impl Session {
    fn apply(&mut self, action: Action) {
        let result = self.store.dispatch(action);
        self.handle(result);
    }

    fn handle(&mut self, result: DispatchResult) {
        if let Some(error) = &result.error {
            if error.is_programming_error() {
                eprintln!("error: {}", error);
            }
            tracing::debug!(error = %error, "dispatch rejected");
            self.failed = true;
        }
        for effect in result.effects {
            if produces_completion(&effect) {
                self.pending += 1;
            }
            if let Some(effect) = self.runtime.run_effect(effect) {
                show_effect(effect);
            }
        }
    }

    fn wait(&mut self) {
        let deadline = Instant::now() + COMPLETION_TIMEOUT;
        while self.pending > 0 {
            if Instant::now() >= deadline {
                tracing::warn!(pending = self.pending, "gave up waiting for completions");
                eprintln!("warning: {} request(s) still pending", self.pending);
                // Late results have nobody to show them to.
                self.bridge.explanation.detach();
                self.bridge.testbench.detach();
                return;
            }

            for msg in self.artifacts.drain() {
                self.pending = self.pending.saturating_sub(1);
                self.apply(Action::ArtifactArrived(msg));
            }

            match self.app_rx.recv_timeout(POLL_INTERVAL) {
                Ok(msg) => {
                    self.pending = self.pending.saturating_sub(1);
                    self.on_message(msg);
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => return,
            }
        }
    }

    fn on_message(&mut self, msg: AppMessage) {
        match &msg {
            AppMessage::UploadCompleted { preview } => {
                tracing::info!(
                    file = preview.as_ref().map(|p| p.filename.as_str()).unwrap_or("<folder>"),
                    "upload completed"
                );
            }
            AppMessage::BackendFailed { op, error } => {
                tracing::warn!(op = *op, error = %error, "backend call failed");
            }
            AppMessage::SessionCleared => tracing::info!("backend session cleared"),
            _ => {}
        }
        if let Some(action) = msg.into_action() {
            self.apply(action);
        }
    }
}

/// Effects the runtime answers through the message channel or the bridge.
fn produces_completion(effect: &Effect) -> bool {
    matches!(
        effect,
        Effect::LoadFile(_)
            | Effect::LoadFolder(_)
            | Effect::UploadFile { .. }
            | Effect::UploadFolder { .. }
            | Effect::RequestExplanation { .. }
            | Effect::RequestTestbench { .. }
            | Effect::ClearBackendSession
    )
}

fn show_effect(effect: Effect) {
    match effect {
        Effect::Notify(notification) => {
            let level = match notification.level {
                NotificationLevel::Info => "info",
                NotificationLevel::Warning => "warning",
                NotificationLevel::Error => "error",
            };
            eprintln!("{}: {}", level, notification.message);
        }
        Effect::SetClipboardText(text) => println!("{}", text),
        Effect::RecentFilesChanged(files) => {
            tracing::debug!(count = files.len(), "recent files changed");
        }
        other => tracing::debug!(effect = ?other, "unhandled effect"),
    }
}

fn open_storage(cli: &Cli, settings: &Settings) -> std::io::Result<Box<dyn KeyValueStore>> {
    if cli.memory || settings.storage == StorageKind::Memory {
        return Ok(Box::new(MemoryStore::new()));
    }
    let path = match &cli.state_path {
        Some(path) => path.clone(),
        None => {
            ensure_data_dir()?;
            get_state_file_path().ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "Cannot determine data directory",
                )
            })?
        }
    };
    let store = JsonFileStore::open(path)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    Ok(Box::new(store))
}

fn print_status(store: &mut Store) {
    let ws = &store.state().workspace;
    match ws.document() {
        Document::Empty => println!("workspace: empty"),
        Document::Single { name, .. } => {
            let name = if name.is_empty() { "<unnamed>" } else { name.as_str() };
            println!("file: {}", name);
        }
        Document::Project { files, active, .. } => {
            println!("project: {} file(s)", files.len());
            for (i, file) in files.iter().enumerate() {
                let marker = if i == *active { '*' } else { ' ' };
                println!(" {} [{}] {}", marker, i, file.path());
            }
        }
    }
    let lines = ws.editor_content().lines().count();
    let key = store.active_key();
    let recent = store.state().recent.len();

    let entry = store.active_entry();
    println!("key: {}", key);
    println!("lines: {}", lines);
    println!("view: {}", entry.active_tab_view().as_str());
    if !entry.explanation().is_empty() {
        println!("explanation: {} char(s)", entry.explanation().chars().count());
    }
    if entry.testbench_enabled() {
        println!("testbench: {} line(s)", entry.testbench().lines().count());
    }
    println!("recent: {}", recent);
}

fn print_recent(store: &Store) {
    let files = store.state().recent.snapshot();
    if files.is_empty() {
        println!("no recent files");
        return;
    }
    for file in files {
        println!("{}", file.name);
    }
}

fn run(cli: Cli) -> std::io::Result<ExitCode> {
    if let Err(e) = ensure_settings_file() {
        tracing::warn!(error = %e, "cannot create settings file");
    }
    let settings = load_settings().unwrap_or_default();
    let config = settings.workspace_config();
    let normalizer = config.normalizer();

    let storage = open_storage(&cli, &settings)?;
    let store = Store::new(config, storage);

    let bridge = ArtifactBridge::new();
    let artifacts = bridge.attach();
    let (tx, app_rx) = mpsc::channel();
    let runtime = AsyncRuntime::new(tx, Arc::new(OfflineBackend), bridge.clone(), normalizer)?;

    let mut session = Session {
        store,
        runtime,
        app_rx,
        artifacts,
        bridge,
        pending: 0,
        failed: false,
    };

    match cli.command {
        Command::Status => print_status(&mut session.store),
        Command::ListRecent => print_recent(&session.store),
        Command::Dispatch(action) => {
            session.apply(action);
            session.wait();
            print_status(&mut session.store);
        }
    }

    Ok(if session.failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        println!("{}", USAGE);
        return ExitCode::SUCCESS;
    }

    let cli = match parse_args(args) {
        Ok(cli) => cli,
        Err(msg) => {
            eprintln!("{}\n\n{}", msg, USAGE);
            return ExitCode::from(2);
        }
    };

    let _logging = logging::init(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "veriwork failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
