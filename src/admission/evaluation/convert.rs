use super::super::domain::{
    CategoryScore, EnglishRule, EvaluationError, FacultyConfig, RawScores, ScoreBreakdown,
    SocialAggregation, SubjectCategory,
};

// Per-field ceilings of the standardized-test answer sheet. The science
// ceiling comes from the config since dual-subject entry doubles it.
const JAPANESE_MAX: u32 = 200;
const MATH_PART_MAX: u32 = 100;
const ENGLISH_PART_MAX: u32 = 100;
const SOCIAL_PART_MAX: u32 = 100;
const INFORMATION_MAX: u32 = 100;

fn check_bound(field: &str, value: u32, max: u32) -> Result<(), EvaluationError> {
    if value > max {
        return Err(EvaluationError::InputOutOfRange {
            field: field.to_string(),
            value,
            max,
        });
    }
    Ok(())
}

/// Reject any sub-test score outside its sheet maximum before conversion.
/// The converter never clamps; a bad value always surfaces as an error.
pub(crate) fn validate_raw_scores(
    raw: &RawScores,
    config: &FacultyConfig,
) -> Result<(), EvaluationError> {
    check_bound("japanese", raw.japanese, JAPANESE_MAX)?;
    check_bound("math_1", raw.math_1, MATH_PART_MAX)?;
    check_bound("math_2", raw.math_2, MATH_PART_MAX)?;
    check_bound("english_reading", raw.english_reading, ENGLISH_PART_MAX)?;
    check_bound("english_listening", raw.english_listening, ENGLISH_PART_MAX)?;
    check_bound("social_first", raw.social_first, SOCIAL_PART_MAX)?;
    check_bound("social_second", raw.social_second, SOCIAL_PART_MAX)?;
    check_bound("science", raw.science, config.science_input_max)?;
    check_bound("information", raw.information, INFORMATION_MAX)?;
    Ok(())
}

/// Fold the reading/listening pair into the english base score on its
/// 200-point scale. The rule is looked up from the config, never guessed.
pub(crate) fn english_base(raw: &RawScores, rule: EnglishRule) -> f64 {
    match rule {
        EnglishRule::ReadingWeighted => {
            f64::from(raw.english_reading) * 1.5 + f64::from(raw.english_listening) * 0.5
        }
        EnglishRule::FlatSum => f64::from(raw.english_reading + raw.english_listening),
    }
}

fn social_raw(raw: &RawScores, policy: SocialAggregation) -> f64 {
    match policy {
        SocialAggregation::SumOfTwo => f64::from(raw.social_first + raw.social_second),
        SocialAggregation::MaxOfTwo => f64::from(raw.social_first.max(raw.social_second)),
        SocialAggregation::SingleSubject => f64::from(raw.social_first),
    }
}

fn weight_for(
    config: &FacultyConfig,
    category: SubjectCategory,
) -> Result<f64, EvaluationError> {
    config
        .weights
        .get(&category)
        .copied()
        .ok_or(EvaluationError::ConfigurationIncomplete { category })
}

/// Convert validated raw scores into the faculty's point scale.
///
/// Math is the sum of its two component tests; social studies follows the
/// configured aggregation policy; science is taken as-is because the weight
/// already encodes whatever compression the faculty applies. The five core
/// categories always convert, and a missing core weight is a configuration
/// error rather than a silent zero. `Information` joins the sum only when
/// the table carries a weight for it.
pub(crate) fn convert(
    raw: &RawScores,
    config: &FacultyConfig,
) -> Result<ScoreBreakdown, EvaluationError> {
    validate_raw_scores(raw, config)?;

    let english = english_base(raw, config.english_rule);

    let core_totals = [
        (SubjectCategory::Japanese, f64::from(raw.japanese)),
        (SubjectCategory::Math, f64::from(raw.math_1 + raw.math_2)),
        (SubjectCategory::English, english),
        (
            SubjectCategory::Social,
            social_raw(raw, config.social_aggregation),
        ),
        (SubjectCategory::Science, f64::from(raw.science)),
    ];

    let mut categories = Vec::with_capacity(core_totals.len() + 1);
    let mut total = 0.0;

    for (category, raw_total) in core_totals {
        let weight = weight_for(config, category)?;
        let converted = raw_total * weight;
        total += converted;
        categories.push(CategoryScore {
            category,
            raw: raw_total,
            weight,
            converted,
        });
    }

    if let Some(weight) = config.weights.get(&SubjectCategory::Information).copied() {
        let raw_total = f64::from(raw.information);
        let converted = raw_total * weight;
        total += converted;
        categories.push(CategoryScore {
            category: SubjectCategory::Information,
            raw: raw_total,
            weight,
            converted,
        });
    }

    Ok(ScoreBreakdown {
        categories,
        english_base: english,
        total_center_score: total,
    })
}
