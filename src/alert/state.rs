//! Edge-triggered alert state.
//!
//! [`AlertState`] remembers the polarity that was last *acted upon*. It
//! only flips inside [`AlertState::transition`], and only when the freshly
//! evaluated polarity differs, so repeated samples of the same polarity
//! never produce a second edge.

use serde::Serialize;

/// A polarity flip of the aggregate alarm condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Edge {
    /// Normal → alarmed.
    Rising,
    /// Alarmed → normal.
    Falling,
}

/// Session-scoped alarm polarity. Starts normal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlertState {
    alarmed: bool,
}

impl AlertState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_alarmed(&self) -> bool {
        self.alarmed
    }

    /// Commit `currently_alarmed` and report the edge, if any.
    ///
    /// The flip is committed here, before any collaborator is called.
    pub fn transition(&mut self, currently_alarmed: bool) -> Option<Edge> {
        match (self.alarmed, currently_alarmed) {
            (false, true) => {
                self.alarmed = true;
                Some(Edge::Rising)
            }
            (true, false) => {
                self.alarmed = false;
                Some(Edge::Falling)
            }
            _ => None,
        }
    }
}
