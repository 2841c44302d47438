use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Subject categories of the standardized ("common") test. Each category is
/// rescaled into the university's point budget by a configured weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectCategory {
    Japanese,
    Math,
    English,
    Social,
    Science,
    Information,
}

impl SubjectCategory {
    pub const fn label(self) -> &'static str {
        match self {
            SubjectCategory::Japanese => "japanese",
            SubjectCategory::Math => "math",
            SubjectCategory::English => "english",
            SubjectCategory::Social => "social",
            SubjectCategory::Science => "science",
            SubjectCategory::Information => "information",
        }
    }

    /// The five categories every faculty table must weight. `Information` is
    /// optional: older tables predate the subject and simply omit it.
    pub const CORE: [SubjectCategory; 5] = [
        SubjectCategory::Japanese,
        SubjectCategory::Math,
        SubjectCategory::English,
        SubjectCategory::Social,
        SubjectCategory::Science,
    ];
}

/// How the reading/listening pair is folded into the english base score.
///
/// `ReadingWeighted` rescales the 100+100 raw pair into a 150+50 composite,
/// reflecting a 3:1 institutional weighting. `FlatSum` keeps the flat 200.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnglishRule {
    ReadingWeighted,
    FlatSum,
}

/// Policy for combining the two social-studies answer slots into one raw total.
/// Stored on the config so behavior never hangs off a display-name match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SocialAggregation {
    /// Both answer subjects count (humanities default).
    SumOfTwo,
    /// Only the best-scoring subject counts.
    MaxOfTwo,
    /// The form collects a single social score; the second slot is ignored.
    SingleSubject,
}

impl SocialAggregation {
    pub const fn label(self) -> &'static str {
        match self {
            SocialAggregation::SumOfTwo => "sum_of_two",
            SocialAggregation::MaxOfTwo => "max_of_two",
            SocialAggregation::SingleSubject => "single_subject",
        }
    }
}

/// University-category tag carried for display and track-specific defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackCategory {
    Humanities,
    Sciences,
}

/// One secondary-exam subject and its point ceiling, in announcement order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondarySubject {
    pub name: String,
    pub max_points: u32,
}

/// Immutable per-faculty scoring rules. Every quirk that varies between
/// faculties (english rule, social aggregation, weights) lives here as data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacultyConfig {
    /// Nominal ceiling of the converted standardized-test score. Display
    /// only; a weighted sum may legitimately land above or below it.
    pub center_max: u32,
    /// Full points of the secondary (written/essay) exam.
    pub secondary_max: u32,
    pub secondary_subjects: Vec<SecondarySubject>,
    pub weights: BTreeMap<SubjectCategory, f64>,
    /// Default target score when the caller supplies none.
    pub pass_score_mean: f64,
    pub english_rule: EnglishRule,
    pub social_aggregation: SocialAggregation,
    pub track: TrackCategory,
    /// Ceiling of the combined science input: 100 for a single subject or a
    /// basic-pair total, 200 for dual-subject science-track entry.
    pub science_input_max: u32,
}

impl FacultyConfig {
    /// Combined full points across both exam stages.
    pub fn grand_max(&self) -> u32 {
        self.center_max + self.secondary_max
    }

    pub fn secondary_subject(&self, name: &str) -> Option<&SecondarySubject> {
        self.secondary_subjects
            .iter()
            .find(|subject| subject.name == name)
    }

    /// The original form highlights science-heavy conversions (weight >= 0.5).
    pub fn emphasizes_science(&self) -> bool {
        self.weights
            .get(&SubjectCategory::Science)
            .is_some_and(|weight| *weight >= 0.5)
    }
}

/// Self-reported raw points per sub-test, exactly as read off the answer
/// sheet. Bounds are validated at the conversion boundary, never clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawScores {
    pub japanese: u32,
    pub math_1: u32,
    pub math_2: u32,
    pub english_reading: u32,
    pub english_listening: u32,
    pub social_first: u32,
    /// Second social answer subject; 0 when the candidate sat only one.
    #[serde(default)]
    pub social_second: u32,
    pub science: u32,
    /// Information subject; ignored unless the faculty weights it.
    #[serde(default)]
    pub information: u32,
}

/// Converted contribution of a single category, kept alongside its inputs so
/// the caller can render a transparent breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: SubjectCategory,
    pub raw: f64,
    pub weight: f64,
    pub converted: f64,
}

/// Full conversion result: per-category scores plus their exact sum.
/// No rounding is applied anywhere before presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub categories: Vec<CategoryScore>,
    /// English composite on its 200-point scale, before weighting.
    pub english_base: f64,
    pub total_center_score: f64,
}

/// Three-way classification of the gap between target and converted score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GapOutcome {
    /// The standardized test alone clears the target.
    Surplus { margin: f64 },
    /// The secondary exam can close the gap; `progress` is
    /// `required / secondary_max` clamped to [0, 1] for display.
    Reachable { required: f64, progress: f64 },
    /// Even a perfect secondary score falls short.
    Unreachable { shortfall: f64 },
}

impl GapOutcome {
    pub const fn label(&self) -> &'static str {
        match self {
            GapOutcome::Surplus { .. } => "surplus",
            GapOutcome::Reachable { .. } => "reachable",
            GapOutcome::Unreachable { .. } => "unreachable",
        }
    }

    pub fn summary(&self) -> String {
        match self {
            GapOutcome::Surplus { margin } => {
                format!("target already cleared with {margin:.2} points to spare")
            }
            GapOutcome::Reachable { required, .. } => {
                format!("{required:.2} more points needed from the secondary exam")
            }
            GapOutcome::Unreachable { shortfall } => {
                format!("target out of reach by {shortfall:.2} points even at full marks")
            }
        }
    }
}

/// Result of evaluating raw scores against a faculty target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub breakdown: ScoreBreakdown,
    pub target_score: f64,
    /// Points still needed from the secondary exam; negative means surplus.
    pub required_secondary: f64,
    pub outcome: GapOutcome,
}

/// Classification of a simulated secondary-exam allocation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SimulationOutcome {
    Clears { surplus: f64 },
    Short { deficit: f64 },
}

impl SimulationOutcome {
    pub const fn label(&self) -> &'static str {
        match self {
            SimulationOutcome::Clears { .. } => "clears",
            SimulationOutcome::Short { .. } => "short",
        }
    }

    pub fn summary(&self) -> String {
        match self {
            SimulationOutcome::Clears { surplus } => {
                format!("allocation reaches the line with +{surplus:.2} to spare")
            }
            SimulationOutcome::Short { deficit } => {
                format!("allocation falls {deficit:.2} points short")
            }
        }
    }
}

/// Result of aggregating a simulated secondary-exam allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub sim_total: u32,
    /// `sim_total - required`; negative when the allocation is short.
    pub gap: f64,
    pub outcome: SimulationOutcome,
}

/// Errors raised by the evaluator. Each one names the offending field or
/// configuration entry so the caller can correct and resubmit.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvaluationError {
    #[error("{field} must lie in 0..={max}, got {value}")]
    InputOutOfRange {
        field: String,
        value: u32,
        max: u32,
    },
    #[error("no faculty '{faculty}' registered under university '{university}'")]
    ConfigurationNotFound { university: String, faculty: String },
    #[error("faculty table is missing a conversion weight for '{}'", category.label())]
    ConfigurationIncomplete { category: SubjectCategory },
    #[error("'{subject}' is not a secondary-exam subject for this faculty")]
    UnknownSubject { subject: String },
    #[error("no simulated target supplied for secondary subject '{subject}'")]
    MissingSubjectTarget { subject: String },
}
