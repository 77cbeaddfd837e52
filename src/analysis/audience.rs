//! Audience technical level classification.

use crate::models::{AudienceLevel, AudienceProfile, Comment, LevelDistribution};

const BEGINNER_INDICATORS: &[&str] = &[
    "beginner",
    "new to",
    "just started",
    "tutorial",
    "how to",
    "basic",
    "simple",
];

const INTERMEDIATE_INDICATORS: &[&str] = &[
    "implement",
    "production",
    "best practice",
    "experience",
    "recommend",
    "migrate",
];

const ADVANCED_INDICATORS: &[&str] = &[
    "architecture",
    "performance",
    "optimize",
    "scale",
    "enterprise",
    "custom",
    "extend",
];

/// Classify one comment. Beginner phrases win over advanced ones,
/// which win over intermediate ones.
pub fn classify_comment(text: &str) -> Option<AudienceLevel> {
    let lower = text.to_lowercase();
    let matches = |indicators: &[&str]| indicators.iter().any(|i| lower.contains(i));

    if matches(BEGINNER_INDICATORS) {
        Some(AudienceLevel::Beginner)
    } else if matches(ADVANCED_INDICATORS) {
        Some(AudienceLevel::Advanced)
    } else if matches(INTERMEDIATE_INDICATORS) {
        Some(AudienceLevel::Intermediate)
    } else {
        None
    }
}

/// Distribution of audience levels over the classified comments.
///
/// With nothing classified the dominant level is intermediate and all
/// percentages are zero.
pub fn analyze_audience_level(comments: &[Comment]) -> AudienceProfile {
    let (mut beginner, mut intermediate, mut advanced) = (0usize, 0usize, 0usize);

    for level in comments.iter().filter_map(|c| classify_comment(&c.text)) {
        match level {
            AudienceLevel::Beginner => beginner += 1,
            AudienceLevel::Intermediate => intermediate += 1,
            AudienceLevel::Advanced => advanced += 1,
        }
    }

    let total = beginner + intermediate + advanced;
    if total == 0 {
        return AudienceProfile {
            dominant_level: AudienceLevel::Intermediate,
            distribution: LevelDistribution::default(),
            total_classified: 0,
        };
    }

    let pct = |count: usize| count as f64 / total as f64 * 100.0;
    let distribution = LevelDistribution {
        beginner: pct(beginner),
        intermediate: pct(intermediate),
        advanced: pct(advanced),
    };

    // First maximum wins: beginner, then intermediate, then advanced
    let mut dominant_level = AudienceLevel::Beginner;
    let mut best = beginner;
    for (level, count) in [
        (AudienceLevel::Intermediate, intermediate),
        (AudienceLevel::Advanced, advanced),
    ] {
        if count > best {
            dominant_level = level;
            best = count;
        }
    }

    AudienceProfile {
        dominant_level,
        distribution,
        total_classified: total,
    }
}
