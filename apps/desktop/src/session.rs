//! Interactive session: one event at a time from a single channel.
//!
//! User commands and engine completions both arrive as [`SessionEvent`]s and
//! are handled sequentially, so the controllers never see concurrent writers.
//! The `in_flight` flag is the submit guard: a translate command arriving while
//! a request is outstanding is dropped rather than queued.

use std::{
    path::{Path, PathBuf},
    str::FromStr,
    sync::Arc,
};

use client_core::{
    fetch_catalog, status, PairCatalog, PairSelectionController, SelectionState, StatusMessage,
    TranslationController, TranslationEngine,
};
use shared::{
    domain::{Edge, LanguageId},
    error::TranslatorError,
    protocol::TranslateResponse,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info, warn};

use crate::files;

pub const HELP: &str = "\
commands:
  pairs              list supported language pairs
  source <lang>      select the source language
  target <lang>      select the target language
  swap               swap source and target
  load <path>        load source code from a file
  code <text>        set source code inline
  translate          translate the current source code
  clear              clear source code and result
  export             write the result to translation_<millis>.<target>
  copy               copy the result to the clipboard
  show               print selection, status and result
  quit               exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Raw user text; resolved against the catalog's spelling when executed.
    Source(String),
    Target(String),
    Swap,
    Pairs,
    Load(PathBuf),
    Code(String),
    Translate,
    Clear,
    Export,
    Copy,
    Show,
    Help,
    Quit,
}

impl FromStr for SessionCommand {
    type Err = TranslatorError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let argument = |name: &str| {
            if rest.is_empty() {
                Err(TranslatorError::validation(format!("'{word}' expects {name}")))
            } else {
                Ok(rest)
            }
        };

        match word.to_ascii_lowercase().as_str() {
            "source" | "src" => Ok(Self::Source(argument("a language")?.to_string())),
            "target" | "tgt" => Ok(Self::Target(argument("a language")?.to_string())),
            "swap" => Ok(Self::Swap),
            "pairs" => Ok(Self::Pairs),
            "load" => Ok(Self::Load(PathBuf::from(argument("a file path")?))),
            "code" => Ok(Self::Code(argument("source code")?.to_string())),
            "translate" | "t" => Ok(Self::Translate),
            "clear" => Ok(Self::Clear),
            "export" => Ok(Self::Export),
            "copy" => Ok(Self::Copy),
            "show" | "status" => Ok(Self::Show),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(TranslatorError::validation(format!(
                "unknown command '{other}', type 'help' for a list"
            ))),
        }
    }
}

#[derive(Debug)]
pub enum SessionEvent {
    Input(String),
    InputClosed,
    TranslationResolved(Result<TranslateResponse, TranslatorError>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session<E: TranslationEngine + 'static> {
    engine: Arc<E>,
    selection: PairSelectionController,
    translation: TranslationController,
    source_text: String,
    last_target: Option<LanguageId>,
    in_flight: bool,
    closing: bool,
    status: StatusMessage,
    export_dir: PathBuf,
    events: UnboundedSender<SessionEvent>,
    output: Vec<String>,
}

impl<E: TranslationEngine + 'static> Session<E> {
    /// Loads the catalog, degrading to an empty one when the engine is
    /// unreachable or serves a malformed payload.
    pub async fn connect(
        engine: Arc<E>,
        preferred: Option<&Edge>,
        export_dir: PathBuf,
    ) -> (Self, UnboundedReceiver<SessionEvent>) {
        let (catalog, load_error) = match fetch_catalog(engine.as_ref()).await {
            Ok(catalog) => (catalog, None),
            Err(err) => {
                warn!(error = %err, "could not load supported pairs; continuing with none");
                (PairCatalog::empty(), Some(err))
            }
        };
        Self::new(engine, catalog, load_error, preferred, export_dir)
    }

    pub fn new(
        engine: Arc<E>,
        catalog: PairCatalog,
        load_error: Option<TranslatorError>,
        preferred: Option<&Edge>,
        export_dir: PathBuf,
    ) -> (Self, UnboundedReceiver<SessionEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let status = status::report_catalog(&catalog, load_error.as_ref());
        let mut selection = PairSelectionController::new(Arc::new(catalog));
        selection.init(preferred);

        let mut session = Self {
            engine,
            selection,
            translation: TranslationController::new(),
            source_text: String::new(),
            last_target: None,
            in_flight: false,
            closing: false,
            status: StatusMessage::default(),
            export_dir,
            events,
            output: Vec::new(),
        };
        session.set_status(status);
        if let Some(line) = session.describe_selection() {
            session.output.push(line);
        }
        (session, rx)
    }

    pub fn sender(&self) -> UnboundedSender<SessionEvent> {
        self.events.clone()
    }

    pub fn status(&self) -> &StatusMessage {
        &self.status
    }

    pub fn selection(&self) -> &PairSelectionController {
        &self.selection
    }

    pub fn translation(&self) -> &TranslationController {
        &self.translation
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    /// Mirrors the disabled state of a submit control.
    pub fn submit_enabled(&self) -> bool {
        !self.in_flight
    }

    pub fn take_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output)
    }

    pub async fn handle(&mut self, event: SessionEvent) -> Flow {
        match event {
            SessionEvent::Input(line) => {
                if line.trim().is_empty() {
                    return Flow::Continue;
                }
                match line.parse::<SessionCommand>() {
                    Ok(command) => self.execute(command).await,
                    Err(err) => {
                        self.set_status(status::report_rejection(&err));
                        Flow::Continue
                    }
                }
            }
            SessionEvent::InputClosed => {
                if self.in_flight {
                    debug!("input closed; waiting for outstanding translation");
                    self.closing = true;
                    Flow::Continue
                } else {
                    Flow::Quit
                }
            }
            SessionEvent::TranslationResolved(response) => {
                self.in_flight = false;
                self.translation.resolve(response);
                self.set_status(status::report(self.translation.outcome()));
                self.output.push(self.translation.result().to_string());
                if self.closing {
                    Flow::Quit
                } else {
                    Flow::Continue
                }
            }
        }
    }

    async fn execute(&mut self, command: SessionCommand) -> Flow {
        match command {
            SessionCommand::Source(input) => {
                let source = self.selection.resolve_source(&input);
                match self.selection.set_source(&source) {
                    Ok(()) => self.selection_changed(),
                    Err(err) => self.set_status(status::report_rejection(&err)),
                }
            }
            SessionCommand::Target(input) => {
                let target = self.selection.resolve_target(&input);
                match self.selection.set_target(&target) {
                    Ok(()) => self.selection_changed(),
                    Err(err) => self.set_status(status::report_rejection(&err)),
                }
            }
            SessionCommand::Swap => match self.selection.swap() {
                Ok(None) => self.selection_changed(),
                Ok(Some(advisory)) => {
                    if let Some(line) = self.describe_selection() {
                        self.output.push(line);
                    }
                    self.set_status(status::report_advisory(&advisory));
                }
                Err(err) => self.set_status(status::report_rejection(&err)),
            },
            SessionCommand::Pairs => {
                let listing = self.describe_pairs();
                self.output.extend(listing);
            }
            SessionCommand::Load(path) => self.load(&path).await,
            SessionCommand::Code(text) => {
                self.source_text = text;
                self.set_status(StatusMessage::info(format!(
                    "Source code updated ({} bytes)",
                    self.source_text.len()
                )));
            }
            SessionCommand::Translate => self.translate(),
            SessionCommand::Clear => {
                self.source_text.clear();
                self.translation.clear();
                self.set_status(StatusMessage::default());
            }
            SessionCommand::Export => self.export().await,
            SessionCommand::Copy => self.copy(),
            SessionCommand::Show => self.show(),
            SessionCommand::Help => self.output.push(HELP.to_string()),
            SessionCommand::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    fn translate(&mut self) {
        if self.in_flight {
            debug!("translation in flight; dropping submit");
            return;
        }

        let selection = self.selection.selection();
        let request =
            match self
                .translation
                .begin(self.selection.catalog(), &selection, &self.source_text)
            {
                Ok(request) => request,
                Err(_) => {
                    self.set_status(status::report(self.translation.outcome()));
                    return;
                }
            };

        self.in_flight = true;
        self.last_target = Some(request.target_lang.clone());
        self.set_status(status::report(self.translation.outcome()));

        let engine = Arc::clone(&self.engine);
        let events = self.events.clone();
        tokio::spawn(async move {
            let response = engine.translate(&request).await;
            if events
                .send(SessionEvent::TranslationResolved(response))
                .is_err()
            {
                warn!("session closed before translation resolved");
            }
        });
    }

    async fn load(&mut self, path: &Path) {
        match files::read_source_file(path).await {
            Ok(text) => {
                self.source_text = text;
                let name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                self.set_status(StatusMessage::info(format!("File \"{name}\" loaded")));
            }
            Err(err) => {
                error!(error = %format!("{err:#}"), "source file load failed");
                self.set_status(StatusMessage::error("Failed to read file"));
            }
        }
    }

    async fn export(&mut self) {
        let result = self.translation.result();
        if result.is_empty() {
            self.set_status(status::report_rejection(&TranslatorError::validation(
                "nothing to export, translate some code first",
            )));
            return;
        }

        let target = self
            .last_target
            .clone()
            .or_else(|| self.selection.selection().target)
            .unwrap_or_else(|| LanguageId::new("txt"));
        match files::export_translation(&self.export_dir, &target, result).await {
            Ok(path) => self.set_status(StatusMessage::success(format!(
                "Exported translation to {}",
                path.display()
            ))),
            Err(err) => {
                error!(error = %format!("{err:#}"), "export failed");
                self.set_status(StatusMessage::error("Failed to export translation"));
            }
        }
    }

    fn copy(&mut self) {
        let result = self.translation.result();
        if result.is_empty() {
            self.set_status(status::report_rejection(&TranslatorError::validation(
                "nothing to copy, translate some code first",
            )));
            return;
        }

        match files::copy_to_clipboard(result) {
            Ok(()) => self.set_status(StatusMessage::success("Copied to clipboard!")),
            Err(err) => {
                error!(error = %format!("{err:#}"), "clipboard copy failed");
                self.set_status(StatusMessage::error("Failed to copy to clipboard"));
            }
        }
    }

    fn show(&mut self) {
        if let Some(line) = self.describe_selection() {
            self.output.push(line);
        }
        self.output.push(format!(
            "source: {} bytes{}",
            self.source_text.len(),
            if self.in_flight { " (translating)" } else { "" }
        ));
        if let Some(line) = render_status(&self.status) {
            self.output.push(line);
        }
        if !self.translation.result().is_empty() {
            self.output.push(self.translation.result().to_string());
        }
    }

    fn selection_changed(&mut self) {
        let message = match self.describe_selection() {
            Some(line) => StatusMessage::info(line),
            None => StatusMessage::default(),
        };
        self.set_status(message);
    }

    fn describe_selection(&self) -> Option<String> {
        match self.selection.state() {
            SelectionState::Ready {
                source,
                target: Some(target),
            } => Some(format!("Selected {} -> {}", source.label(), target.label())),
            SelectionState::Ready {
                source,
                target: None,
            } => Some(format!(
                "Selected {} (no target language available)",
                source.label()
            )),
            SelectionState::Uninitialized | SelectionState::Empty => None,
        }
    }

    fn describe_pairs(&self) -> Vec<String> {
        let catalog = self.selection.catalog();
        if catalog.is_empty() {
            return vec!["no language pairs available".to_string()];
        }
        let current = self.selection.current_edge();
        catalog
            .edges()
            .iter()
            .map(|edge| {
                let marker = if current.as_ref() == Some(edge) { "*" } else { " " };
                format!("{marker} {edge}")
            })
            .collect()
    }

    fn set_status(&mut self, message: StatusMessage) {
        if let Some(line) = render_status(&message) {
            info!(severity = %message.severity, status = %message.text, "status");
            self.output.push(line);
        }
        self.status = message;
    }
}

pub fn render_status(message: &StatusMessage) -> Option<String> {
    if message.is_empty() {
        None
    } else {
        Some(format!("[{}] {}", message.severity, message.text))
    }
}

/// Feeds stdin lines into the session channel until EOF.
pub fn spawn_stdin_reader(events: UnboundedSender<SessionEvent>) {
    tokio::spawn(async move {
        use tokio::io::{AsyncBufReadExt, BufReader};

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            let event = match lines.next_line().await {
                Ok(Some(line)) => SessionEvent::Input(line),
                Ok(None) => SessionEvent::InputClosed,
                Err(err) => {
                    warn!(error = %err, "stdin read failed");
                    SessionEvent::InputClosed
                }
            };
            let closed = matches!(event, SessionEvent::InputClosed);
            if events.send(event).is_err() || closed {
                break;
            }
        }
    });
}

pub async fn run<E: TranslationEngine + 'static>(
    mut session: Session<E>,
    mut events: UnboundedReceiver<SessionEvent>,
) {
    spawn_stdin_reader(session.sender());
    for line in session.take_output() {
        println!("{line}");
    }
    while let Some(event) = events.recv().await {
        let flow = session.handle(event).await;
        for line in session.take_output() {
            println!("{line}");
        }
        if flow == Flow::Quit {
            info!("session finished");
            break;
        }
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
