//! Append-only alert log: one entry per processed transition.

use chrono::{DateTime, Local};
use serde::Serialize;

use super::state::Edge;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AlertKind {
    Alert,
    Normal,
}

impl From<Edge> for AlertKind {
    fn from(edge: Edge) -> Self {
        match edge {
            Edge::Rising => Self::Alert,
            Edge::Falling => Self::Normal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertLogEntry {
    pub timestamp: DateTime<Local>,
    pub kind: AlertKind,
    pub message: String,
}

/// Session-scoped log. Entries are never mutated or removed.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct AlertLog {
    entries: Vec<AlertLogEntry>,
}

impl AlertLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and return a reference to it.
    pub fn append(&mut self, entry: AlertLogEntry) -> &AlertLogEntry {
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[AlertLogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, kind: AlertKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_by_kind() {
        let mut log = AlertLog::new();
        let now = Local::now();
        log.append(AlertLogEntry {
            timestamp: now,
            kind: Edge::Rising.into(),
            message: "gas".into(),
        });
        log.append(AlertLogEntry {
            timestamp: now,
            kind: Edge::Falling.into(),
            message: "ok".into(),
        });
        assert_eq!(log.len(), 2);
        assert_eq!(log.count(AlertKind::Alert), 1);
        assert_eq!(log.count(AlertKind::Normal), 1);
        assert_eq!(log.entries()[0].message, "gas");
    }
}
