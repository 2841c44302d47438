mod convert;
mod gap;
mod simulation;

pub use simulation::default_targets;

use std::collections::BTreeMap;

use super::domain::{
    EvaluationError, EvaluationResult, FacultyConfig, RawScores, SimulationResult,
};

/// Stateless evaluator that applies one faculty's scoring rules to raw input.
///
/// Reads only the immutable config and per-call arguments, so instances are
/// freely shareable across sessions without locking.
pub struct ScoreEvaluator {
    config: FacultyConfig,
}

impl ScoreEvaluator {
    pub fn new(config: FacultyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FacultyConfig {
        &self.config
    }

    /// Convert raw scores, compare against the target (the faculty's pass
    /// mean when none is given), and classify the remaining gap.
    pub fn evaluate(
        &self,
        raw: &RawScores,
        target_score: Option<f64>,
    ) -> Result<EvaluationResult, EvaluationError> {
        let breakdown = convert::convert(raw, &self.config)?;
        let target = target_score.unwrap_or(self.config.pass_score_mean);
        let required = target - breakdown.total_center_score;
        let outcome = gap::classify_gap(required, self.config.secondary_max);

        Ok(EvaluationResult {
            breakdown,
            target_score: target,
            required_secondary: required,
            outcome,
        })
    }

    /// Aggregate a simulated secondary-exam allocation against an already
    /// computed `required` gap.
    pub fn simulate(
        &self,
        targets: &BTreeMap<String, u32>,
        required: f64,
    ) -> Result<SimulationResult, EvaluationError> {
        simulation::aggregate(&self.config, targets, required)
    }
}
