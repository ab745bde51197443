/// Gate combining the fetch transport's in-flight flag with the engine's
/// one-shot render-complete signal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderReadiness {
    fetch_in_flight: bool,
    first_render_complete: bool,
}

impl RenderReadiness {
    pub fn fetch_in_flight(&self) -> bool {
        self.fetch_in_flight
    }

    pub fn first_render_complete(&self) -> bool {
        self.first_render_complete
    }

    pub fn is_ready(&self) -> bool {
        self.first_render_complete && !self.fetch_in_flight
    }

    pub fn fetch_started(&mut self) {
        self.fetch_in_flight = true;
    }

    pub fn fetch_settled(&mut self) {
        self.fetch_in_flight = false;
    }

    /// Re-arms the render signal for a new FileSet.
    pub fn rearm(&mut self) {
        self.first_render_complete = false;
    }

    /// Returns true only on the false to true transition.
    pub fn mark_rendered(&mut self) -> bool {
        let transitioned = !self.first_render_complete;
        self.first_render_complete = true;
        transitioned
    }
}
