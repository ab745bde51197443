use graph_inspector::coordinator::{AcquireSource, ViewCoordinator};
use graph_inspector::engine::{
    EngineEvent, ExportError, Generation, RenderEngine, RequestTicket, SearchRequest,
    SurfaceInput,
};
use graph_inspector::model::{
    DisplayOptions, ExportFormat, FileHandle, FileSet, NodeRef, Properties, Property,
    SearchItem, SearchItemKind, SearchResult,
};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// What the coordinator asked the engine to do.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCommand {
    Load {
        files: Vec<String>,
        generation: Generation,
        options: DisplayOptions,
    },
    SetDisplayOptions(DisplayOptions),
    Search(SearchRequest),
    Select(String),
    ShowModelProperties,
    ShowNodeDocumentation(RequestTicket),
    Export(ExportFormat),
    Surface(SurfaceInput),
}

pub type CommandLog = Arc<Mutex<Vec<EngineCommand>>>;

/// Engine double that records commands and answers nothing on its own;
/// tests deliver callbacks by hand, in whatever order they need.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    log: CommandLog,
}

impl RecordingEngine {
    pub fn new() -> (Self, CommandLog) {
        let log = CommandLog::default();
        (Self { log: log.clone() }, log)
    }

    fn record(&self, command: EngineCommand) {
        self.log.lock().unwrap().push(command);
    }
}

impl RenderEngine for RecordingEngine {
    fn load(&mut self, files: &FileSet, generation: Generation, options: DisplayOptions) {
        self.record(EngineCommand::Load {
            files: files.names().into_iter().map(str::to_owned).collect(),
            generation,
            options,
        });
    }

    fn set_display_options(&mut self, options: DisplayOptions) {
        self.record(EngineCommand::SetDisplayOptions(options));
    }

    fn search(&mut self, request: SearchRequest) {
        self.record(EngineCommand::Search(request));
    }

    fn select(&mut self, item: &SearchItem) {
        self.record(EngineCommand::Select(item.name.clone()));
    }

    fn show_model_properties(&mut self) {
        self.record(EngineCommand::ShowModelProperties);
    }

    fn show_node_documentation(&mut self, ticket: RequestTicket, _properties: &Properties) {
        self.record(EngineCommand::ShowNodeDocumentation(ticket));
    }

    fn export(&mut self, format: ExportFormat) -> Result<PathBuf, ExportError> {
        self.record(EngineCommand::Export(format));
        Ok(PathBuf::from(format!("graph.{}", format.extension())))
    }

    fn surface_input(&mut self, input: SurfaceInput) {
        self.record(EngineCommand::Surface(input));
    }
}

pub type TestCoordinator = ViewCoordinator<RecordingEngine>;

pub fn coordinator() -> (TestCoordinator, CommandLog) {
    let (engine, log) = RecordingEngine::new();
    (ViewCoordinator::new(engine, DisplayOptions::default()), log)
}

/// The most recent command, if any.
#[allow(dead_code)]
pub fn last_command(log: &CommandLog) -> Option<EngineCommand> {
    log.lock().unwrap().last().cloned()
}

/// Ticket of the most recent search command.
#[allow(dead_code)]
pub fn last_search_ticket(log: &CommandLog) -> Option<RequestTicket> {
    log.lock().unwrap().iter().rev().find_map(|command| match command {
        EngineCommand::Search(request) => Some(request.ticket),
        _ => None,
    })
}

#[allow(dead_code)]
pub fn last_documentation_ticket(log: &CommandLog) -> Option<RequestTicket> {
    log.lock().unwrap().iter().rev().find_map(|command| match command {
        EngineCommand::ShowNodeDocumentation(ticket) => Some(*ticket),
        _ => None,
    })
}

#[allow(dead_code)]
pub fn handle(name: &str, payload: &[u8]) -> FileHandle {
    FileHandle::new(name, payload.to_vec())
}

/// Drops `names` as one FileSet and reports the engine render for it.
#[allow(dead_code)]
pub fn load_and_render(coordinator: &mut TestCoordinator, names: &[&str]) -> Generation {
    let files = names.iter().map(|name| handle(name, b"node n Op")).collect();
    let generation = coordinator
        .acquire(AcquireSource::Dropped(files))
        .unwrap();
    coordinator.handle_engine_event(EngineEvent::Rendered { generation });
    generation
}

#[allow(dead_code)]
pub fn node_properties(name: &str, op: &str) -> Properties {
    Properties {
        properties: vec![Property::new("name", name), Property::new("type", op)],
        groups: Vec::new(),
    }
}

#[allow(dead_code)]
pub fn search_result(text: &str, names: &[&str]) -> SearchResult {
    SearchResult {
        text: text.to_string(),
        items: names
            .iter()
            .enumerate()
            .map(|(index, name)| SearchItem::new(*name, SearchItemKind::Node, NodeRef::new(index)))
            .collect(),
    }
}
