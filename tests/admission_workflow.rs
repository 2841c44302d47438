//! End-to-end scenarios for the admission projection workflow, driven through
//! the public service facade and the HTTP router so conversion, gap
//! classification, simulation, and history are validated together.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use admission_sim::admission::{
    admission_router, default_targets, AdmissionService, ConfigRegistry, GapOutcome, RawScores,
    SimulationOutcome, SubjectCategory,
};

fn humanities_raw() -> RawScores {
    RawScores {
        japanese: 160,
        math_1: 70,
        math_2: 70,
        english_reading: 85,
        english_listening: 75,
        social_first: 85,
        social_second: 80,
        science: 80,
        information: 0,
    }
}

fn sciences_raw() -> RawScores {
    RawScores {
        japanese: 140,
        math_1: 90,
        math_2: 95,
        english_reading: 90,
        english_listening: 80,
        social_first: 75,
        social_second: 60,
        science: 175,
        information: 85,
    }
}

#[test]
fn humanities_projection_matches_hand_computed_figures() {
    let service = AdmissionService::new(ConfigRegistry::standard());
    let result = service
        .evaluate("京都大学", "法学部", &humanities_raw(), None, None)
        .expect("registered faculty evaluates");

    // English: 85*1.5 + 75*0.5 = 165; every category weighted at 0.3:
    // 48 + 42 + 49.5 + 49.5 + 24 = 213.
    assert!((result.breakdown.english_base - 165.0).abs() < 1e-9);
    assert!((result.breakdown.total_center_score - 213.0).abs() < 1e-9);
    assert!((result.target_score - 557.55).abs() < 1e-9);
    assert!((result.required_secondary - 344.55).abs() < 1e-9);

    match result.outcome {
        GapOutcome::Reachable { required, progress } => {
            assert!((required - 344.55).abs() < 1e-9);
            assert!((progress - 344.55 / 615.0).abs() < 1e-9);
        }
        other => panic!("expected reachable projection, got {other:?}"),
    }
}

#[test]
fn sciences_track_uses_best_social_subject_and_information_weight() {
    let service = AdmissionService::new(ConfigRegistry::standard());
    let result = service
        .evaluate("京都大学", "理学部", &sciences_raw(), None, None)
        .expect("registered faculty evaluates");

    let social = result
        .breakdown
        .categories
        .iter()
        .find(|category| category.category == SubjectCategory::Social)
        .expect("social category present");
    assert!((social.raw - 75.0).abs() < 1e-9, "max-of-two keeps the best subject");

    let information = result
        .breakdown
        .categories
        .iter()
        .find(|category| category.category == SubjectCategory::Information)
        .expect("information weighted for this faculty");
    assert!((information.converted - 85.0 * 0.25).abs() < 1e-9);
}

#[test]
fn dual_science_input_respects_the_raised_ceiling() {
    let service = AdmissionService::new(ConfigRegistry::standard());

    // 175 is valid for the 200-point dual-science entry...
    service
        .evaluate("京都大学", "理学部", &sciences_raw(), None, None)
        .expect("dual science input accepted");

    // ...but rejected against a single-science humanities faculty.
    let err = service
        .evaluate("京都大学", "法学部", &sciences_raw(), None, None)
        .expect_err("single science ceiling enforced");
    assert!(err.to_string().contains("science"));
}

#[test]
fn evaluation_then_simulation_closes_the_loop() {
    let service = AdmissionService::new(ConfigRegistry::standard());
    let registry = ConfigRegistry::standard();
    let config = registry
        .lookup("京都大学", "法学部")
        .expect("faculty registered");

    let result = service
        .evaluate("京都大学", "法学部", &humanities_raw(), None, None)
        .expect("evaluates");
    let required = result.required_secondary;

    // The default half-ceiling allocation of 615 total points is 307, just
    // under the 344.55 required.
    let defaults = default_targets(config);
    let short = service
        .simulate("京都大学", "法学部", &defaults, required, None)
        .expect("defaults aggregate");
    assert!(matches!(short.outcome, SimulationOutcome::Short { .. }));

    let mut stretched: BTreeMap<String, u32> = defaults;
    stretched.insert("数学".to_string(), 150);
    stretched.insert("英語".to_string(), 120);
    let clears = service
        .simulate("京都大学", "法学部", &stretched, required, None)
        .expect("stretched allocation aggregates");
    match clears.outcome {
        SimulationOutcome::Clears { surplus } => assert!(surplus > 0.0),
        other => panic!("expected stretched allocation to clear, got {other:?}"),
    }
}

#[test]
fn service_resolves_faculty_tables_without_a_second_registry() {
    let service = AdmissionService::new(ConfigRegistry::standard());

    let config = service
        .faculty_config("京都大学", "法学部")
        .expect("registered faculty resolves");
    assert_eq!(config.secondary_max, 615);
    assert_eq!(default_targets(config).len(), config.secondary_subjects.len());

    service
        .faculty_config("京都大学", "医学部")
        .expect_err("unregistered faculty is an error");
}

#[test]
fn session_history_collects_evaluations_in_reverse_order() {
    let service = AdmissionService::new(ConfigRegistry::standard());

    service
        .evaluate(
            "京都大学",
            "法学部",
            &humanities_raw(),
            None,
            Some("shared-terminal"),
        )
        .expect("evaluates");
    service
        .evaluate(
            "大阪大学",
            "文学部",
            &humanities_raw(),
            None,
            Some("shared-terminal"),
        )
        .expect("evaluates");
    service
        .evaluate(
            "京都大学",
            "理学部",
            &sciences_raw(),
            None,
            Some("another-session"),
        )
        .expect("evaluates");

    let records = service.history().recent_first("shared-terminal");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].university, "大阪大学");
    assert_eq!(records[1].university, "京都大学");
    assert_eq!(service.history().session_len("another-session"), 1);
}

#[tokio::test]
async fn http_round_trip_evaluates_and_reads_history() {
    let service = Arc::new(AdmissionService::new(ConfigRegistry::standard()));
    let app = admission_router(service);

    let payload = json!({
        "university": "大阪大学",
        "faculty": "文学部",
        "raw_scores": {
            "japanese": 150,
            "math_1": 60,
            "math_2": 55,
            "english_reading": 80,
            "english_listening": 70,
            "social_first": 70,
            "social_second": 65,
            "science": 60
        },
        "session": "browser-tab"
    });

    let response = app
        .clone()
        .oneshot(
            axum::http::Request::post("/api/v1/admission/evaluate")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(serde_json::to_vec(&payload).unwrap()))
                .unwrap(),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    let body: serde_json::Value = serde_json::from_slice(&bytes).expect("JSON body");
    // Flat-sum english: 80 + 70 = 150.
    assert_eq!(body["breakdown"]["english_base"].as_f64(), Some(150.0));

    let response = app
        .oneshot(
            axum::http::Request::get("/api/v1/admission/history/browser-tab")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    let body: serde_json::Value = serde_json::from_slice(&bytes).expect("JSON body");
    let records = body["records"].as_array().expect("records array");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["faculty"], "文学部");
}
