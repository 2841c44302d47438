use std::collections::BTreeMap;

use super::super::domain::{EvaluationError, FacultyConfig, SimulationResult};
use super::gap::classify_simulation;

/// Sum a simulated secondary-exam allocation and classify it against the
/// required gap.
///
/// Every configured subject needs a target and every target must respect its
/// subject's ceiling; out-of-range input is rejected, never clamped. Targets
/// naming subjects the faculty does not examine are rejected too, since they
/// indicate the caller is holding a stale subject list.
pub(crate) fn aggregate(
    config: &FacultyConfig,
    targets: &BTreeMap<String, u32>,
    required: f64,
) -> Result<SimulationResult, EvaluationError> {
    for subject in targets.keys() {
        if config.secondary_subject(subject).is_none() {
            return Err(EvaluationError::UnknownSubject {
                subject: subject.clone(),
            });
        }
    }

    let mut sim_total = 0;
    for subject in &config.secondary_subjects {
        let target = targets.get(&subject.name).copied().ok_or_else(|| {
            EvaluationError::MissingSubjectTarget {
                subject: subject.name.clone(),
            }
        })?;
        if target > subject.max_points {
            return Err(EvaluationError::InputOutOfRange {
                field: subject.name.clone(),
                value: target,
                max: subject.max_points,
            });
        }
        sim_total += target;
    }

    let outcome = classify_simulation(sim_total, required);
    Ok(SimulationResult {
        sim_total,
        gap: f64::from(sim_total) - required,
        outcome,
    })
}

/// Starting allocation at half of each subject's ceiling, matching the form's
/// slider defaults.
pub fn default_targets(config: &FacultyConfig) -> BTreeMap<String, u32> {
    config
        .secondary_subjects
        .iter()
        .map(|subject| (subject.name.clone(), subject.max_points / 2))
        .collect()
}
