use std::collections::BTreeMap;
use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::admission::domain::{
    EnglishRule, FacultyConfig, RawScores, SecondarySubject, SocialAggregation, SubjectCategory,
    TrackCategory,
};
use crate::admission::registry::ConfigRegistry;
use crate::admission::router::admission_router;
use crate::admission::service::AdmissionService;

pub(super) const EPSILON: f64 = 1e-9;

/// Flat 0.3-weight humanities table used by the arithmetic tests.
pub(super) fn flat_config() -> FacultyConfig {
    FacultyConfig {
        center_max: 270,
        secondary_max: 615,
        secondary_subjects: vec![
            SecondarySubject {
                name: "国語".to_string(),
                max_points: 150,
            },
            SecondarySubject {
                name: "数学".to_string(),
                max_points: 150,
            },
            SecondarySubject {
                name: "英語".to_string(),
                max_points: 150,
            },
            SecondarySubject {
                name: "地歴".to_string(),
                max_points: 165,
            },
        ],
        weights: flat_weights(0.3),
        pass_score_mean: 557.55,
        english_rule: EnglishRule::FlatSum,
        social_aggregation: SocialAggregation::SumOfTwo,
        track: TrackCategory::Humanities,
        science_input_max: 100,
    }
}

pub(super) fn flat_weights(value: f64) -> BTreeMap<SubjectCategory, f64> {
    SubjectCategory::CORE
        .into_iter()
        .map(|category| (category, value))
        .collect()
}

pub(super) fn sample_raw() -> RawScores {
    RawScores {
        japanese: 160,
        math_1: 70,
        math_2: 70,
        english_reading: 85,
        english_listening: 75,
        social_first: 85,
        social_second: 80,
        science: 0,
        information: 0,
    }
}

pub(super) fn service() -> Arc<AdmissionService> {
    Arc::new(AdmissionService::new(ConfigRegistry::standard()))
}

pub(super) fn router() -> axum::Router {
    admission_router(service())
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    serde_json::from_slice(&bytes).expect("body is JSON")
}
