//! Command surface and callbacks of the graph-rendering engine.
//!
//! The coordinator only ever talks to an engine through [`RenderEngine`] and
//! only ever hears back through [`EngineEvent`]s. Every asynchronous answer
//! carries the [`Generation`] or [`RequestTicket`] of the request it answers,
//! so superseded answers can be dropped by value.

pub mod outline;

use crate::model::{
    DisplayOptions, Documentation, ExportFormat, FileSet, Properties, SearchItem, SearchResult,
};
use ratatui::{buffer::Buffer, layout::Rect};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub use outline::OutlineEngine;

/// Identifies one FileSet. Bumped every time the active FileSet is replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    pub fn value(self) -> u64 {
        self.0
    }

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Stamp on an asynchronous request: the FileSet it was issued against and
/// its position among requests of the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket {
    pub generation: Generation,
    pub sequence: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub ticket: RequestTicket,
    pub query: String,
}

/// Pointer-like interaction with the drawn graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceInput {
    Next,
    Previous,
    Activate,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Rendered {
        generation: Generation,
    },
    SearchResults {
        ticket: RequestTicket,
        result: SearchResult,
    },
    ModelProperties {
        generation: Generation,
        properties: Properties,
    },
    NodeProperties {
        generation: Generation,
        properties: Properties,
    },
    NodeDocumentation {
        ticket: RequestTicket,
        documentation: Documentation,
    },
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("{0} export is not supported")]
    Unsupported(ExportFormat),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub trait RenderEngine {
    /// Stage a new FileSet. The engine answers with `Rendered` once drawn.
    fn load(&mut self, files: &FileSet, generation: Generation, options: DisplayOptions);

    fn set_display_options(&mut self, options: DisplayOptions);

    fn search(&mut self, request: SearchRequest);

    fn select(&mut self, item: &SearchItem);

    fn show_model_properties(&mut self);

    fn show_node_documentation(&mut self, ticket: RequestTicket, properties: &Properties);

    /// Writes the drawn graph and returns where it landed.
    fn export(&mut self, format: ExportFormat) -> Result<PathBuf, ExportError>;

    fn surface_input(&mut self, _input: SurfaceInput) {}

    fn render_surface(&self, _area: Rect, _buf: &mut Buffer) {}
}

impl<E: RenderEngine + ?Sized> RenderEngine for Box<E> {
    fn load(&mut self, files: &FileSet, generation: Generation, options: DisplayOptions) {
        (**self).load(files, generation, options)
    }

    fn set_display_options(&mut self, options: DisplayOptions) {
        (**self).set_display_options(options)
    }

    fn search(&mut self, request: SearchRequest) {
        (**self).search(request)
    }

    fn select(&mut self, item: &SearchItem) {
        (**self).select(item)
    }

    fn show_model_properties(&mut self) {
        (**self).show_model_properties()
    }

    fn show_node_documentation(&mut self, ticket: RequestTicket, properties: &Properties) {
        (**self).show_node_documentation(ticket, properties)
    }

    fn export(&mut self, format: ExportFormat) -> Result<PathBuf, ExportError> {
        (**self).export(format)
    }

    fn surface_input(&mut self, input: SurfaceInput) {
        (**self).surface_input(input)
    }

    fn render_surface(&self, area: Rect, buf: &mut Buffer) {
        (**self).render_surface(area, buf)
    }
}
