use crate::app::AppState;
use crate::coordinator::Panel;

pub fn show_model_properties(app: &mut AppState) {
    app.coordinator.request_model_properties();
}

pub fn close_model_properties(app: &mut AppState) {
    app.coordinator.close_model_properties();
}

pub fn show_node_documentation(app: &mut AppState) {
    app.coordinator.request_node_documentation();
}

pub fn close_node_properties(app: &mut AppState) {
    app.coordinator.close_node_properties();
}

pub fn close_node_documentation(app: &mut AppState) {
    app.coordinator.close_node_documentation();
}

/// Closes whatever sits on top: the model overlay, then the documentation,
/// then the node properties.
pub fn dismiss(app: &mut AppState) {
    let frame = app.frame();
    if frame.panel.model_overlay {
        app.coordinator.close_model_properties();
        return;
    }
    match frame.panel.panel {
        Panel::NodeDocumentation => app.coordinator.close_node_documentation(),
        Panel::NodeProperties => app.coordinator.close_node_properties(),
        Panel::Hidden | Panel::Browse(_) => app.clear_message(),
    }
}
