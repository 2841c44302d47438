use std::collections::BTreeMap;

use chrono::Utc;
use tracing::debug;

use super::domain::{
    EvaluationError, EvaluationResult, FacultyConfig, RawScores, SimulationResult,
};
use super::evaluation::ScoreEvaluator;
use super::history::{EvaluationSnapshot, SessionHistoryStore};
use super::registry::{ConfigRegistry, UniversityEntry};

/// Facade composing the config registry, score evaluator, and session
/// history. One instance serves every session; only the history store holds
/// mutable state.
pub struct AdmissionService {
    registry: ConfigRegistry,
    history: SessionHistoryStore,
}

impl AdmissionService {
    pub fn new(registry: ConfigRegistry) -> Self {
        Self {
            registry,
            history: SessionHistoryStore::default(),
        }
    }

    pub fn catalog(&self) -> Vec<UniversityEntry> {
        self.registry.catalog()
    }

    /// Resolve a faculty's scoring table without running an evaluation, so
    /// callers rendering subject lists reuse the service's own registry.
    pub fn faculty_config(
        &self,
        university: &str,
        faculty: &str,
    ) -> Result<&FacultyConfig, EvaluationError> {
        self.registry.lookup(university, faculty)
    }

    /// Run a full evaluation for the given faculty. When `session` is
    /// supplied, a snapshot is appended to that session's history.
    pub fn evaluate(
        &self,
        university: &str,
        faculty: &str,
        raw: &RawScores,
        target_score: Option<f64>,
        session: Option<&str>,
    ) -> Result<EvaluationResult, EvaluationError> {
        let config = self.registry.lookup(university, faculty)?;
        let evaluator = ScoreEvaluator::new(config.clone());
        let result = evaluator.evaluate(raw, target_score)?;

        debug!(
            university,
            faculty,
            total = result.breakdown.total_center_score,
            outcome = result.outcome.label(),
            "evaluation computed"
        );

        if let Some(session) = session {
            self.history.append(
                session,
                EvaluationSnapshot {
                    recorded_at: Utc::now(),
                    university: university.to_string(),
                    faculty: faculty.to_string(),
                    total_center_score: Some(result.breakdown.total_center_score),
                    simulated_total: None,
                    outcome_label: result.outcome.label().to_string(),
                },
            );
        }

        Ok(result)
    }

    /// Aggregate a simulated secondary-exam allocation against a previously
    /// computed `required` gap.
    pub fn simulate(
        &self,
        university: &str,
        faculty: &str,
        targets: &BTreeMap<String, u32>,
        required: f64,
        session: Option<&str>,
    ) -> Result<SimulationResult, EvaluationError> {
        let config = self.registry.lookup(university, faculty)?;
        let evaluator = ScoreEvaluator::new(config.clone());
        let result = evaluator.simulate(targets, required)?;

        if let Some(session) = session {
            self.history.append(
                session,
                EvaluationSnapshot {
                    recorded_at: Utc::now(),
                    university: university.to_string(),
                    faculty: faculty.to_string(),
                    total_center_score: None,
                    simulated_total: Some(result.sim_total),
                    outcome_label: result.outcome.label().to_string(),
                },
            );
        }

        Ok(result)
    }

    pub fn history(&self) -> &SessionHistoryStore {
        &self.history
    }
}
