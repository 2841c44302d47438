//! Admission-score projection: conversion of raw standardized-test scores
//! into university point scales, gap classification against a target, and
//! secondary-exam simulation, plus the session history the UI displays.

pub mod domain;
pub mod evaluation;
pub mod history;
pub mod registry;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    CategoryScore, EnglishRule, EvaluationError, EvaluationResult, FacultyConfig, GapOutcome,
    RawScores, ScoreBreakdown, SecondarySubject, SimulationOutcome, SimulationResult,
    SocialAggregation, SubjectCategory, TrackCategory,
};
pub use evaluation::{default_targets, ScoreEvaluator};
pub use history::{EvaluationSnapshot, SessionHistory, SessionHistoryStore};
pub use registry::{ConfigRegistry, FacultyEntry, UniversityEntry};
pub use router::admission_router;
pub use service::AdmissionService;
