use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded evaluation, as shown in the session's history panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationSnapshot {
    pub recorded_at: DateTime<Utc>,
    pub university: String,
    pub faculty: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_center_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simulated_total: Option<u32>,
    pub outcome_label: String,
}

/// Append-only log of evaluation snapshots for a single session.
///
/// Records are never mutated or removed; insertion order is kept internally
/// and read back most-recent-first.
#[derive(Debug, Default)]
pub struct SessionHistory {
    records: Vec<EvaluationSnapshot>,
}

impl SessionHistory {
    pub fn append(&mut self, snapshot: EvaluationSnapshot) {
        self.records.push(snapshot);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Snapshots in reverse-insertion order.
    pub fn recent_first(&self) -> Vec<EvaluationSnapshot> {
        self.records.iter().rev().cloned().collect()
    }
}

/// Per-session history logs, isolated by session id.
///
/// The evaluator itself is pure; this is the only shared mutable state in the
/// service, so a plain mutex over the map is enough.
#[derive(Debug, Default)]
pub struct SessionHistoryStore {
    sessions: Mutex<HashMap<String, SessionHistory>>,
}

impl SessionHistoryStore {
    pub fn append(&self, session: &str, snapshot: EvaluationSnapshot) {
        let mut sessions = self.sessions.lock().expect("history mutex poisoned");
        sessions
            .entry(session.to_string())
            .or_default()
            .append(snapshot);
    }

    /// Snapshots for a session, most recent first. An unknown session simply
    /// has no history yet.
    pub fn recent_first(&self, session: &str) -> Vec<EvaluationSnapshot> {
        let sessions = self.sessions.lock().expect("history mutex poisoned");
        sessions
            .get(session)
            .map(SessionHistory::recent_first)
            .unwrap_or_default()
    }

    pub fn session_len(&self, session: &str) -> usize {
        let sessions = self.sessions.lock().expect("history mutex poisoned");
        sessions.get(session).map_or(0, SessionHistory::len)
    }
}
