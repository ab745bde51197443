pub mod aside;
pub mod constants;
pub mod content;
pub mod help;
pub mod overlay;
pub mod status_line;
pub mod text;


use crate::app::{AppMode, AppState};
use crate::coordinator::Panel;
use aside::AsideRenderer;
use constants::ASIDE_WIDTH;
use content::ContentRenderer;
use help::HelpRenderer;
use overlay::ModelPropertiesRenderer;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};
use status_line::StatusLineRenderer;

// Main render function
pub fn render(frame: &mut Frame, app: &AppState) {
    let size = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(size);

    match &app.mode {
        AppMode::Help => HelpRenderer::render(frame, chunks[0]),
        _ => render_view(frame, app, chunks[0]),
    }

    StatusLineRenderer::render(frame, app, chunks[1]);
}

fn render_view(frame: &mut Frame, app: &AppState, area: Rect) {
    let view = app.frame();

    let (content_area, aside_area) = if view.panel.panel == Panel::Hidden {
        (area, None)
    } else {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(ASIDE_WIDTH)])
            .split(area);
        (columns[0], Some(columns[1]))
    };

    ContentRenderer::render(frame, app, view.content, content_area);
    if let Some(aside_area) = aside_area {
        AsideRenderer::render(frame, app, view.panel.panel, aside_area);
    }

    if view.panel.model_overlay {
        if let Some(properties) = app.coordinator.selection().model_properties() {
            ModelPropertiesRenderer::render(frame, properties, area);
        }
    }
}
