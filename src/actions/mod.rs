mod file;
mod help;
mod panel;
mod search;
mod view;

use crate::app::AppState;
use crate::coordinator::Affordance;
use crate::engine::SurfaceInput;
use crate::model::{DisplayOption, ExportFormat};
use anyhow::Result;
use std::path::PathBuf;
use tracing::debug;

// Re-export all public functions from submodules
pub use file::*;
pub use help::*;
pub use panel::*;
pub use search::*;
pub use view::*;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // Application control
    Quit,

    // File acquisition
    OpenFilePicker,
    TypePickerChar(char),
    BackspacePicker,
    ConfirmFilePicker,
    CancelFilePicker,
    DropFiles(Vec<PathBuf>),

    // Search
    FocusSearch,
    BlurSearch,
    TypeSearchChar(char),
    BackspaceSearch,
    NextResult,
    PreviousResult,
    SelectResult,

    // Browse panel
    ToggleOption(DisplayOption),
    Export(ExportFormat),
    ShowModelProperties,

    // Inspection panels
    CloseModelProperties,
    ShowNodeDocumentation,
    CloseNodeProperties,
    CloseNodeDocumentation,
    Dismiss,

    // Graph surface
    Surface(SurfaceInput),

    // Help
    ShowHelp,
    CloseHelp,
}

impl Action {
    /// The frame affordance an action needs, if any.
    pub fn affordance(&self) -> Option<Affordance> {
        match self {
            Action::FocusSearch
            | Action::TypeSearchChar(_)
            | Action::BackspaceSearch
            | Action::NextResult
            | Action::PreviousResult
            | Action::SelectResult => Some(Affordance::SearchInput),
            Action::ToggleOption(_) => Some(Affordance::DisplayToggles),
            Action::Export(_) => Some(Affordance::Export),
            Action::ShowModelProperties => Some(Affordance::ModelProperties),
            Action::CloseModelProperties => Some(Affordance::CloseModelProperties),
            Action::ShowNodeDocumentation => Some(Affordance::NodeDocumentation),
            Action::CloseNodeProperties => Some(Affordance::CloseNodeProperties),
            Action::CloseNodeDocumentation => Some(Affordance::CloseNodeDocumentation),
            Action::OpenFilePicker => Some(Affordance::FilePicker),
            Action::DropFiles(_) => Some(Affordance::DropFiles),
            Action::Surface(_) => Some(Affordance::SurfaceInput),
            _ => None,
        }
    }
}

pub fn execute_action(action: Action, app: &mut AppState) -> Result<()> {
    let frame = app.frame();
    if let Some(affordance) = action.affordance() {
        if !frame.allows(affordance) {
            debug!(?action, ?affordance, "action not offered by the current frame");
            return Ok(());
        }
    }

    match action {
        Action::Quit => {
            app.running = false;
        }

        // File acquisition
        Action::OpenFilePicker => file::open_file_picker(app),
        Action::TypePickerChar(c) => file::type_picker_char(app, c),
        Action::BackspacePicker => file::backspace_picker(app),
        Action::ConfirmFilePicker => file::confirm_file_picker(app),
        Action::CancelFilePicker => file::cancel_file_picker(app),
        Action::DropFiles(paths) => file::drop_files(app, paths),

        // Search
        Action::FocusSearch => search::focus_search(app),
        Action::BlurSearch => search::blur_search(app),
        Action::TypeSearchChar(c) => search::type_search_char(app, c),
        Action::BackspaceSearch => search::backspace_search(app),
        Action::NextResult => search::next_result(app),
        Action::PreviousResult => search::previous_result(app),
        Action::SelectResult => search::select_result(app),

        // Browse panel
        Action::ToggleOption(option) => view::toggle_option(app, option),
        Action::Export(format) => view::export(app, format),
        Action::ShowModelProperties => panel::show_model_properties(app),

        // Inspection panels
        Action::CloseModelProperties => panel::close_model_properties(app),
        Action::ShowNodeDocumentation => panel::show_node_documentation(app),
        Action::CloseNodeProperties => panel::close_node_properties(app),
        Action::CloseNodeDocumentation => panel::close_node_documentation(app),
        Action::Dismiss => panel::dismiss(app),

        Action::Surface(input) => view::surface_input(app, input),

        // Help
        Action::ShowHelp => help::show_help(app),
        Action::CloseHelp => help::close_help(app),
    }
    Ok(())
}
