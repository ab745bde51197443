//! Composition root tying file acquisition, search, the panel state machine
//! and the readiness gate to one rendering engine.
//!
//! Every input is one method call that runs to completion; the visible state
//! is re-derived from scratch by [`ViewCoordinator::frame`].

pub mod acquisition;
pub mod panel;
pub mod readiness;
pub mod search;

use crate::engine::{
    EngineEvent, ExportError, Generation, RenderEngine, RequestTicket, SurfaceInput,
};
use crate::fetch::{FetchError, FetchResponse};
use crate::model::{DisplayOption, DisplayOptions, ExportFormat, FileSet, SearchItem};
use std::path::PathBuf;
use tracing::{debug, info, warn};

pub use acquisition::{AcquireError, AcquireSource, FileAcquisition, FilePicker};
pub use panel::{derive_panel, BrowseContent, InspectionSelection, Panel, PanelView};
pub use readiness::RenderReadiness;
pub use search::{SearchMode, SearchSession};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentArea {
    Loading,
    Uploader,
    Surface,
}

/// Interactive affordances a frame may offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affordance {
    SearchInput,
    ModelProperties,
    DisplayToggles,
    Export,
    ChangeModel,
    Upload,
    /// The picker, opened from either the uploader or the change-model button.
    FilePicker,
    DropFiles,
    SurfaceInput,
    CloseNodeProperties,
    NodeDocumentation,
    CloseNodeDocumentation,
    CloseModelProperties,
}

/// One consistent snapshot of what is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewFrame {
    pub panel: PanelView,
    pub content: ContentArea,
    pub ready: bool,
}

impl ViewFrame {
    pub fn allows(&self, affordance: Affordance) -> bool {
        let browse_full = self.panel.panel == Panel::Browse(BrowseContent::Full);
        match affordance {
            Affordance::SearchInput => matches!(self.panel.panel, Panel::Browse(_)),
            Affordance::ModelProperties
            | Affordance::DisplayToggles
            | Affordance::Export
            | Affordance::ChangeModel => browse_full,
            Affordance::Upload => self.content == ContentArea::Uploader,
            Affordance::FilePicker => self.content == ContentArea::Uploader || browse_full,
            Affordance::DropFiles => self.content != ContentArea::Loading,
            Affordance::SurfaceInput => self.content == ContentArea::Surface && self.ready,
            Affordance::CloseNodeProperties | Affordance::NodeDocumentation => {
                self.panel.panel == Panel::NodeProperties
            }
            Affordance::CloseNodeDocumentation => self.panel.panel == Panel::NodeDocumentation,
            Affordance::CloseModelProperties => self.panel.model_overlay,
        }
    }
}

pub struct ViewCoordinator<E: RenderEngine> {
    engine: E,
    acquisition: FileAcquisition,
    search: SearchSession,
    options: DisplayOptions,
    selection: InspectionSelection,
    readiness: RenderReadiness,
    pending_documentation: Option<RequestTicket>,
    documentation_sequence: u64,
}

impl<E: RenderEngine> ViewCoordinator<E> {
    pub fn new(engine: E, options: DisplayOptions) -> Self {
        Self {
            engine,
            acquisition: FileAcquisition::default(),
            search: SearchSession::default(),
            options,
            selection: InspectionSelection::default(),
            readiness: RenderReadiness::default(),
            pending_documentation: None,
            documentation_sequence: 0,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn files(&self) -> Option<&FileSet> {
        self.acquisition.files()
    }

    pub fn generation(&self) -> Generation {
        self.acquisition.generation()
    }

    pub fn acquisition(&self) -> &FileAcquisition {
        &self.acquisition
    }

    pub fn search(&self) -> &SearchSession {
        &self.search
    }

    pub fn options(&self) -> DisplayOptions {
        self.options
    }

    pub fn selection(&self) -> &InspectionSelection {
        &self.selection
    }

    pub fn readiness(&self) -> RenderReadiness {
        self.readiness
    }

    pub fn frame(&self) -> ViewFrame {
        let content = if self.readiness.fetch_in_flight() {
            ContentArea::Loading
        } else if self.acquisition.files().is_none() {
            ContentArea::Uploader
        } else {
            ContentArea::Surface
        };
        ViewFrame {
            panel: derive_panel(&self.readiness, &self.selection, self.search.is_active()),
            content,
            ready: self.readiness.is_ready(),
        }
    }

    // --- fetch transport ---

    pub fn begin_fetch(&mut self) {
        info!("fetch started");
        self.readiness.fetch_started();
    }

    /// An empty answer leaves the current FileSet in place.
    pub fn complete_fetch(
        &mut self,
        response: Option<FetchResponse>,
    ) -> Result<Generation, AcquireError> {
        self.readiness.fetch_settled();
        match response {
            Some(response) => self.acquire(AcquireSource::Fetched(response)),
            None => {
                debug!("fetch returned no payload");
                Err(AcquireError::Empty)
            }
        }
    }

    pub fn fail_fetch(&mut self, error: &FetchError) {
        warn!(error = %error, "fetch failed, keeping current file set");
        self.readiness.fetch_settled();
    }

    // --- file acquisition ---

    pub fn acquire(&mut self, source: AcquireSource) -> Result<Generation, AcquireError> {
        let generation = self.acquisition.acquire(source)?;
        self.readiness.rearm();
        self.search.reset();
        self.selection.clear();
        self.pending_documentation = None;
        if let Some(files) = self.acquisition.files() {
            self.engine.load(files, generation, self.options);
        }
        Ok(generation)
    }

    pub fn request_manual_selection(&mut self) {
        self.acquisition.request_manual_selection();
    }

    pub fn choose_file(&mut self, path: PathBuf) -> Option<PathBuf> {
        self.acquisition.choose_file(path)
    }

    pub fn cancel_selection(&mut self) {
        self.acquisition.cancel_selection();
    }

    // --- search ---

    pub fn activate_search(&mut self) {
        self.search.activate();
    }

    pub fn deactivate_search(&mut self) {
        self.search.deactivate();
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        let request = self.search.set_query(text, self.acquisition.generation());
        self.engine.search(request);
    }

    pub fn select_result(&mut self, item: &SearchItem) {
        self.search.select(item);
        self.engine.select(item);
    }

    // --- display options and export ---

    pub fn toggle_option(&mut self, option: DisplayOption) {
        self.options.toggle(option);
        debug!(?option, enabled = self.options.get(option), "display option toggled");
        self.search.reset();
        self.engine.set_display_options(self.options);
    }

    pub fn export(&mut self, format: ExportFormat) -> Result<PathBuf, ExportError> {
        info!(%format, "export requested");
        self.engine.export(format)
    }

    // --- inspection panels ---

    pub fn request_model_properties(&mut self) {
        self.engine.show_model_properties();
    }

    pub fn close_model_properties(&mut self) {
        self.selection.close_model_properties();
    }

    pub fn request_node_documentation(&mut self) {
        let Some(properties) = self.selection.node_properties() else {
            return;
        };
        self.documentation_sequence += 1;
        let ticket = RequestTicket {
            generation: self.acquisition.generation(),
            sequence: self.documentation_sequence,
        };
        self.pending_documentation = Some(ticket);
        self.engine.show_node_documentation(ticket, properties);
    }

    pub fn close_node_properties(&mut self) {
        self.pending_documentation = None;
        self.selection.close_node_properties();
    }

    pub fn close_node_documentation(&mut self) {
        self.selection.close_node_documentation();
    }

    pub fn surface_input(&mut self, input: SurfaceInput) {
        self.engine.surface_input(input);
    }

    // --- engine callbacks ---

    pub fn handle_engine_event(&mut self, event: EngineEvent) {
        let current = self.acquisition.generation();
        match event {
            EngineEvent::Rendered { generation } => {
                if generation != current {
                    debug!(stale = generation.value(), "discarding render of replaced file set");
                } else if self.readiness.mark_rendered() {
                    info!(generation = generation.value(), "first render complete");
                }
            }
            EngineEvent::SearchResults { ticket, result } => {
                if ticket.generation == current {
                    self.search.apply_results(ticket, result);
                } else {
                    debug!(stale = ticket.generation.value(), "discarding search of replaced file set");
                }
            }
            EngineEvent::ModelProperties {
                generation,
                properties,
            } => {
                if generation == current {
                    self.selection.show_model_properties(properties);
                } else {
                    debug!(stale = generation.value(), "discarding model properties");
                }
            }
            EngineEvent::NodeProperties {
                generation,
                properties,
            } => {
                if generation == current {
                    self.pending_documentation = None;
                    self.selection.show_node_properties(properties);
                } else {
                    debug!(stale = generation.value(), "discarding node properties");
                }
            }
            EngineEvent::NodeDocumentation {
                ticket,
                documentation,
            } => {
                if self.pending_documentation == Some(ticket) {
                    self.pending_documentation = None;
                    self.selection.show_node_documentation(documentation);
                } else {
                    debug!(sequence = ticket.sequence, "discarding superseded documentation");
                }
            }
        }
    }
}
