use chrono::Utc;

use crate::admission::history::{EvaluationSnapshot, SessionHistory, SessionHistoryStore};

fn snapshot(faculty: &str, total: f64) -> EvaluationSnapshot {
    EvaluationSnapshot {
        recorded_at: Utc::now(),
        university: "京都大学".to_string(),
        faculty: faculty.to_string(),
        total_center_score: Some(total),
        simulated_total: None,
        outcome_label: "reachable".to_string(),
    }
}

#[test]
fn appends_are_read_back_most_recent_first() {
    let mut history = SessionHistory::default();
    history.append(snapshot("法学部", 187.5));
    history.append(snapshot("文学部", 190.0));
    history.append(snapshot("理学部", 210.25));

    let records = history.recent_first();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].faculty, "理学部");
    assert_eq!(records[1].faculty, "文学部");
    assert_eq!(records[2].faculty, "法学部");
}

#[test]
fn log_length_is_monotonic() {
    let mut history = SessionHistory::default();
    assert!(history.is_empty());

    let mut previous = history.len();
    for index in 0..10 {
        history.append(snapshot("法学部", f64::from(index)));
        assert_eq!(history.len(), previous + 1);
        previous = history.len();
    }
    assert_eq!(history.len(), 10);
}

#[test]
fn store_isolates_sessions() {
    let store = SessionHistoryStore::default();
    store.append("alice", snapshot("法学部", 187.5));
    store.append("alice", snapshot("文学部", 190.0));
    store.append("bob", snapshot("理学部", 210.25));

    assert_eq!(store.session_len("alice"), 2);
    assert_eq!(store.session_len("bob"), 1);
    assert_eq!(store.session_len("carol"), 0);

    let alice = store.recent_first("alice");
    assert_eq!(alice[0].faculty, "文学部");
    assert_eq!(alice[1].faculty, "法学部");
    assert!(store.recent_first("carol").is_empty());
}

#[test]
fn snapshots_round_trip_through_serde() {
    let original = snapshot("法学部", 187.5);
    let encoded = serde_json::to_string(&original).expect("snapshot serializes");
    let decoded: EvaluationSnapshot = serde_json::from_str(&encoded).expect("snapshot parses");
    assert_eq!(decoded.faculty, original.faculty);
    assert_eq!(decoded.total_center_score, original.total_center_score);
}
