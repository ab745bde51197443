use crate::config::AppConfig;
use crate::coordinator::{ViewCoordinator, ViewFrame};
use crate::engine::{EngineEvent, OutlineEngine, RenderEngine};
use crate::errors::AppError;
use crate::fetch::{self, FetchError, FetchOutcome, FetchTransport};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum AppMode {
    Normal,
    /// The search input has focus.
    Search,
    /// Path prompt standing in for the native file picker.
    PickFile { buffer: String },
    Help,
}

pub type Coordinator = ViewCoordinator<Box<dyn RenderEngine>>;

pub struct AppState {
    pub running: bool,
    pub mode: AppMode,
    pub coordinator: Coordinator,
    pub config: AppConfig,

    // Message for status line
    pub message: Option<String>,

    // Highlighted row of the search result list
    pub result_cursor: usize,

    engine_events: Receiver<EngineEvent>,
    fetch: Option<Receiver<FetchOutcome>>,
}

impl AppState {
    /// Builds the app around the outline engine.
    pub fn new(config: AppConfig) -> Self {
        let (tx, rx) = mpsc::channel();
        let engine = OutlineEngine::new(tx, config.export_dir.clone());
        Self::with_engine(config, Box::new(engine), rx)
    }

    pub fn with_engine(
        config: AppConfig,
        engine: Box<dyn RenderEngine>,
        engine_events: Receiver<EngineEvent>,
    ) -> Self {
        let coordinator = ViewCoordinator::new(engine, config.display_options());
        Self {
            running: true,
            mode: AppMode::Normal,
            coordinator,
            config,
            message: None,
            result_cursor: 0,
            engine_events,
            fetch: None,
        }
    }

    pub fn frame(&self) -> ViewFrame {
        self.coordinator.frame()
    }

    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    /// Starts the startup fetch; the coordinator reports a fetch in flight
    /// until [`AppState::pump_fetch`] sees the outcome.
    pub fn start_fetch<T: FetchTransport>(&mut self, transport: T) {
        self.coordinator.begin_fetch();
        self.fetch = Some(fetch::spawn_fetch(transport));
    }

    pub fn fetch_pending(&self) -> bool {
        self.fetch.is_some()
    }

    pub fn pump_fetch(&mut self) {
        let Some(rx) = &self.fetch else {
            return;
        };
        let outcome = match rx.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => FetchOutcome::Failed(FetchError::Disconnected),
        };
        self.fetch = None;

        match outcome {
            FetchOutcome::Completed(response) => {
                if let Err(err) = self.coordinator.complete_fetch(response) {
                    self.set_message(AppError::from(err).to_string());
                }
            }
            FetchOutcome::Failed(err) => {
                self.coordinator.fail_fetch(&err);
                self.set_message(AppError::from(err).to_string());
            }
        }
    }

    /// Feeds every queued engine callback to the coordinator, in order.
    pub fn pump_engine_events(&mut self) {
        loop {
            match self.engine_events.try_recv() {
                Ok(event) => {
                    debug!(?event, "engine event");
                    self.coordinator.handle_engine_event(event);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    warn!("engine event channel closed");
                    break;
                }
            }
        }
        let results = self.coordinator.search().results().len();
        if self.result_cursor >= results {
            self.result_cursor = results.saturating_sub(1);
        }
    }
}
