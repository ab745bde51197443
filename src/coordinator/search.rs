use crate::engine::{Generation, RequestTicket, SearchRequest};
use crate::model::{SearchItem, SearchResult};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchMode {
    #[default]
    Idle,
    Searching,
}

/// Query text, focus mode and the result set of the current search.
#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    query: String,
    mode: SearchMode,
    results: Vec<SearchItem>,
    issued: Option<RequestTicket>,
    sequence: u64,
}

impl SearchSession {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[SearchItem] {
        &self.results
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn is_active(&self) -> bool {
        self.mode == SearchMode::Searching
    }

    pub fn activate(&mut self) {
        self.mode = SearchMode::Searching;
    }

    pub fn deactivate(&mut self) {
        self.mode = SearchMode::Idle;
    }

    /// Records the new query and returns the request to forward to the
    /// engine. Any answer to an earlier request is superseded.
    pub fn set_query(&mut self, text: impl Into<String>, generation: Generation) -> SearchRequest {
        self.query = text.into();
        self.sequence += 1;
        let ticket = RequestTicket {
            generation,
            sequence: self.sequence,
        };
        self.issued = Some(ticket);
        SearchRequest {
            ticket,
            query: self.query.clone(),
        }
    }

    pub fn select(&mut self, item: &SearchItem) {
        self.query = item.name.clone();
    }

    /// Accepts results only for the most recently issued request.
    pub fn apply_results(&mut self, ticket: RequestTicket, result: SearchResult) -> bool {
        if self.issued != Some(ticket) {
            debug!(
                sequence = ticket.sequence,
                text = %result.text,
                "discarding stale search results"
            );
            return false;
        }
        self.results = result.items;
        true
    }

    /// Clears query and results. Focus mode is left alone.
    pub fn reset(&mut self) {
        self.query.clear();
        self.results.clear();
        self.issued = None;
    }
}
