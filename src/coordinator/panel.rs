use super::readiness::RenderReadiness;
use crate::model::{Documentation, Properties};

/// What the engine has asked us to inspect. Node documentation sits on top
/// of node properties; model properties is an independent overlay.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InspectionSelection {
    node_properties: Option<Properties>,
    node_documentation: Option<Documentation>,
    model_properties: Option<Properties>,
}

impl InspectionSelection {
    pub fn node_properties(&self) -> Option<&Properties> {
        self.node_properties.as_ref()
    }

    pub fn node_documentation(&self) -> Option<&Documentation> {
        self.node_documentation.as_ref()
    }

    pub fn model_properties(&self) -> Option<&Properties> {
        self.model_properties.as_ref()
    }

    /// A newly selected node replaces the old one and drops its documentation.
    pub fn show_node_properties(&mut self, properties: Properties) {
        self.node_properties = Some(properties);
        self.node_documentation = None;
    }

    pub fn show_node_documentation(&mut self, documentation: Documentation) {
        self.node_documentation = Some(documentation);
    }

    pub fn show_model_properties(&mut self, properties: Properties) {
        self.model_properties = Some(properties);
    }

    pub fn close_node_properties(&mut self) {
        self.node_properties = None;
    }

    /// Leaves the node properties in place, so the panel falls back to them.
    pub fn close_node_documentation(&mut self) {
        self.node_documentation = None;
    }

    pub fn close_model_properties(&mut self) {
        self.model_properties = None;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseContent {
    /// Search box, results, model properties, display toggles and export.
    Full,
    /// Only the search box and results, while the query input has focus.
    SearchOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Hidden,
    Browse(BrowseContent),
    NodeDocumentation,
    NodeProperties,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelView {
    pub panel: Panel,
    pub model_overlay: bool,
}

/// Derives the visible inspection surface. Holds no state of its own.
pub fn derive_panel(
    readiness: &RenderReadiness,
    selection: &InspectionSelection,
    search_active: bool,
) -> PanelView {
    let panel = if !readiness.is_ready() {
        Panel::Hidden
    } else if selection.node_documentation.is_some() {
        Panel::NodeDocumentation
    } else if selection.node_properties.is_some() {
        Panel::NodeProperties
    } else if search_active {
        Panel::Browse(BrowseContent::SearchOnly)
    } else {
        Panel::Browse(BrowseContent::Full)
    };

    PanelView {
        panel,
        model_overlay: selection.model_properties.is_some(),
    }
}
