use crate::app::AppState;
use crate::engine::SurfaceInput;
use crate::errors::AppError;
use crate::model::{DisplayOption, ExportFormat};

pub fn toggle_option(app: &mut AppState, option: DisplayOption) {
    app.coordinator.toggle_option(option);
    app.result_cursor = 0;
    let state = if app.coordinator.options().get(option) {
        "on"
    } else {
        "off"
    };
    app.set_message(format!("{}: {}", option.label(), state));
}

pub fn export(app: &mut AppState, format: ExportFormat) {
    match app.coordinator.export(format) {
        Ok(path) => app.set_message(format!("Exported {} to {}", format, path.display())),
        Err(err) => app.set_message(AppError::from(err).to_string()),
    }
}

pub fn surface_input(app: &mut AppState, input: SurfaceInput) {
    app.coordinator.surface_input(input);
}
