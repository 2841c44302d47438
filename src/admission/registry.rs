use std::collections::BTreeMap;

use serde::Serialize;

use super::domain::{
    EnglishRule, EvaluationError, FacultyConfig, SecondarySubject, SocialAggregation,
    SubjectCategory, TrackCategory,
};

/// Immutable registry of scoring rules, keyed university -> faculty/track.
/// Built once at startup and shared read-only for the process lifetime.
#[derive(Debug, Clone)]
pub struct ConfigRegistry {
    universities: BTreeMap<String, BTreeMap<String, FacultyConfig>>,
}

impl ConfigRegistry {
    pub fn lookup(
        &self,
        university: &str,
        faculty: &str,
    ) -> Result<&FacultyConfig, EvaluationError> {
        self.universities
            .get(university)
            .and_then(|faculties| faculties.get(faculty))
            .ok_or_else(|| EvaluationError::ConfigurationNotFound {
                university: university.to_string(),
                faculty: faculty.to_string(),
            })
    }

    /// Catalog view for the UI collaborator's selection form.
    pub fn catalog(&self) -> Vec<UniversityEntry> {
        self.universities
            .iter()
            .map(|(university, faculties)| UniversityEntry {
                university: university.clone(),
                faculties: faculties
                    .iter()
                    .map(|(faculty, config)| FacultyEntry {
                        faculty: faculty.clone(),
                        track: config.track,
                        center_max: config.center_max,
                        secondary_max: config.secondary_max,
                        pass_score_mean: config.pass_score_mean,
                    })
                    .collect(),
            })
            .collect()
    }

    /// Reference table for the supported universities.
    ///
    /// Point figures and conversion weights reproduce the published 2025
    /// tables; entries whose weights were announced per-subject carry the
    /// flat approximation the source data uses. Approximate values are
    /// reproduced as-is, never re-derived.
    pub fn standard() -> Self {
        let mut universities = BTreeMap::new();
        universities.insert("京都大学".to_string(), kyoto_faculties());
        universities.insert("大阪大学".to_string(), osaka_faculties());
        Self { universities }
    }
}

/// One university's faculties as exposed through the catalog endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct UniversityEntry {
    pub university: String,
    pub faculties: Vec<FacultyEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FacultyEntry {
    pub faculty: String,
    pub track: TrackCategory,
    pub center_max: u32,
    pub secondary_max: u32,
    pub pass_score_mean: f64,
}

fn weights(entries: &[(SubjectCategory, f64)]) -> BTreeMap<SubjectCategory, f64> {
    entries.iter().copied().collect()
}

fn subjects(entries: &[(&str, u32)]) -> Vec<SecondarySubject> {
    entries
        .iter()
        .map(|(name, max_points)| SecondarySubject {
            name: (*name).to_string(),
            max_points: *max_points,
        })
        .collect()
}

fn kyoto_faculties() -> BTreeMap<String, FacultyConfig> {
    let mut faculties = BTreeMap::new();

    // 2025 配点: 共テ270 + 二次615 = 885. 900点を一律0.3倍で270点に圧縮。
    faculties.insert(
        "法学部".to_string(),
        FacultyConfig {
            center_max: 270,
            secondary_max: 615,
            secondary_subjects: subjects(&[
                ("国語", 150),
                ("数学", 150),
                ("英語", 150),
                ("地歴", 165),
            ]),
            weights: weights(&[
                (SubjectCategory::Japanese, 0.3),
                (SubjectCategory::Math, 0.3),
                (SubjectCategory::English, 0.3),
                (SubjectCategory::Social, 0.3),
                (SubjectCategory::Science, 0.3),
            ]),
            pass_score_mean: 557.55,
            english_rule: EnglishRule::ReadingWeighted,
            social_aggregation: SocialAggregation::SumOfTwo,
            track: TrackCategory::Humanities,
            science_input_max: 100,
        },
    );

    // 共テ250 + 二次600 = 850. 理科のみ0.5倍、他0.25倍。
    faculties.insert(
        "経済学部（文系）".to_string(),
        FacultyConfig {
            center_max: 250,
            secondary_max: 600,
            secondary_subjects: subjects(&[
                ("国語", 150),
                ("数学", 150),
                ("英語", 150),
                ("地歴", 150),
            ]),
            weights: weights(&[
                (SubjectCategory::Japanese, 0.25),
                (SubjectCategory::Math, 0.25),
                (SubjectCategory::English, 0.25),
                (SubjectCategory::Social, 0.25),
                (SubjectCategory::Science, 0.5),
            ]),
            pass_score_mean: 546.55,
            english_rule: EnglishRule::ReadingWeighted,
            social_aggregation: SocialAggregation::SumOfTwo,
            track: TrackCategory::Humanities,
            science_input_max: 100,
        },
    );

    // 共テ250 + 二次500 = 750.
    faculties.insert(
        "文学部".to_string(),
        FacultyConfig {
            center_max: 250,
            secondary_max: 500,
            secondary_subjects: subjects(&[
                ("国語", 150),
                ("数学", 100),
                ("英語", 150),
                ("地歴", 100),
            ]),
            weights: weights(&[
                (SubjectCategory::Japanese, 0.25),
                (SubjectCategory::Math, 0.25),
                (SubjectCategory::English, 0.25),
                (SubjectCategory::Social, 0.25),
                (SubjectCategory::Science, 0.5),
            ]),
            pass_score_mean: 483.75,
            english_rule: EnglishRule::ReadingWeighted,
            social_aggregation: SocialAggregation::SumOfTwo,
            track: TrackCategory::Humanities,
            science_input_max: 100,
        },
    );

    // 共テ240 + 二次675 = 915. 科目毎の正確な係数は非公表のため一律近似値。
    faculties.insert(
        "教育学部（文系）".to_string(),
        FacultyConfig {
            center_max: 240,
            secondary_max: 675,
            secondary_subjects: subjects(&[
                ("国語", 200),
                ("数学", 150),
                ("英語", 175),
                ("地歴", 150),
            ]),
            weights: weights(&[
                (SubjectCategory::Japanese, 0.25),
                (SubjectCategory::Math, 0.25),
                (SubjectCategory::English, 0.25),
                (SubjectCategory::Social, 0.25),
                (SubjectCategory::Science, 0.5),
            ]),
            pass_score_mean: 566.385,
            english_rule: EnglishRule::ReadingWeighted,
            social_aggregation: SocialAggregation::SumOfTwo,
            track: TrackCategory::Humanities,
            science_input_max: 100,
        },
    );

    // 共テ225 + 二次600 = 825. 5教科バランス型の近似値。
    faculties.insert(
        "総合人間学部（文系）".to_string(),
        FacultyConfig {
            center_max: 225,
            secondary_max: 600,
            secondary_subjects: subjects(&[
                ("国語", 150),
                ("数学", 100),
                ("英語", 200),
                ("地歴", 150),
            ]),
            weights: weights(&[
                (SubjectCategory::Japanese, 0.25),
                (SubjectCategory::Math, 0.25),
                (SubjectCategory::English, 0.25),
                (SubjectCategory::Social, 0.25),
                (SubjectCategory::Science, 0.5),
            ]),
            pass_score_mean: 510.675,
            english_rule: EnglishRule::ReadingWeighted,
            social_aggregation: SocialAggregation::SumOfTwo,
            track: TrackCategory::Humanities,
            science_input_max: 100,
        },
    );

    // 理系: 地歴公民は第1解答科目のみ採用、理科は発展2科目(200点)入力。
    faculties.insert(
        "理学部".to_string(),
        FacultyConfig {
            center_max: 225,
            secondary_max: 975,
            secondary_subjects: subjects(&[
                ("国語", 150),
                ("数学", 300),
                ("理科", 300),
                ("英語", 225),
            ]),
            weights: weights(&[
                (SubjectCategory::Japanese, 0.25),
                (SubjectCategory::Math, 0.25),
                (SubjectCategory::English, 0.25),
                (SubjectCategory::Social, 0.25),
                (SubjectCategory::Science, 0.25),
                (SubjectCategory::Information, 0.25),
            ]),
            pass_score_mean: 755.0,
            english_rule: EnglishRule::ReadingWeighted,
            social_aggregation: SocialAggregation::MaxOfTwo,
            track: TrackCategory::Sciences,
            science_input_max: 200,
        },
    );

    faculties.insert(
        "工学部".to_string(),
        FacultyConfig {
            center_max: 200,
            secondary_max: 800,
            secondary_subjects: subjects(&[
                ("国語", 100),
                ("数学", 250),
                ("理科", 250),
                ("英語", 200),
            ]),
            weights: weights(&[
                (SubjectCategory::Japanese, 0.25),
                (SubjectCategory::Math, 0.2),
                (SubjectCategory::English, 0.2),
                (SubjectCategory::Social, 0.5),
                (SubjectCategory::Science, 0.25),
            ]),
            pass_score_mean: 637.5,
            english_rule: EnglishRule::ReadingWeighted,
            social_aggregation: SocialAggregation::SingleSubject,
            track: TrackCategory::Sciences,
            science_input_max: 200,
        },
    );

    faculties
}

fn osaka_faculties() -> BTreeMap<String, FacultyConfig> {
    let mut faculties = BTreeMap::new();

    // 英語はR+Lをそのまま合算する配点。
    faculties.insert(
        "文学部".to_string(),
        FacultyConfig {
            center_max: 250,
            secondary_max: 400,
            secondary_subjects: subjects(&[("国語", 150), ("外国語", 150), ("地歴", 100)]),
            weights: weights(&[
                (SubjectCategory::Japanese, 0.25),
                (SubjectCategory::Math, 0.25),
                (SubjectCategory::English, 0.25),
                (SubjectCategory::Social, 0.25),
                (SubjectCategory::Science, 0.25),
            ]),
            pass_score_mean: 445.0,
            english_rule: EnglishRule::FlatSum,
            social_aggregation: SocialAggregation::SumOfTwo,
            track: TrackCategory::Humanities,
            science_input_max: 100,
        },
    );

    faculties.insert(
        "基礎工学部".to_string(),
        FacultyConfig {
            center_max: 275,
            secondary_max: 700,
            secondary_subjects: subjects(&[("数学", 250), ("理科", 250), ("外国語", 200)]),
            weights: weights(&[
                (SubjectCategory::Japanese, 0.275),
                (SubjectCategory::Math, 0.3),
                (SubjectCategory::English, 0.3),
                (SubjectCategory::Social, 0.55),
                (SubjectCategory::Science, 0.3),
            ]),
            pass_score_mean: 640.0,
            english_rule: EnglishRule::FlatSum,
            social_aggregation: SocialAggregation::SingleSubject,
            track: TrackCategory::Sciences,
            science_input_max: 200,
        },
    );

    faculties
}
