use super::super::domain::{GapOutcome, SimulationOutcome};

/// Classify the gap between the target and the converted total.
///
/// `required` is `target - total_center_score`. A non-positive gap is a
/// surplus (reported with its magnitude); a gap the secondary exam can cover
/// is reachable, with a clamped progress ratio for display; anything beyond
/// full secondary marks is unreachable.
pub(crate) fn classify_gap(required: f64, secondary_max: u32) -> GapOutcome {
    let ceiling = f64::from(secondary_max);

    if required <= 0.0 {
        GapOutcome::Surplus {
            margin: required.abs(),
        }
    } else if required <= ceiling {
        GapOutcome::Reachable {
            required,
            progress: (required / ceiling).clamp(0.0, 1.0),
        }
    } else {
        GapOutcome::Unreachable {
            shortfall: required - ceiling,
        }
    }
}

/// Classify a simulated secondary total against the required gap.
pub(crate) fn classify_simulation(sim_total: u32, required: f64) -> SimulationOutcome {
    let gap = f64::from(sim_total) - required;
    if gap >= 0.0 {
        SimulationOutcome::Clears { surplus: gap }
    } else {
        SimulationOutcome::Short {
            deficit: gap.abs(),
        }
    }
}
