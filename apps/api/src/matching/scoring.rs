//! Combines two skill maps and the quality analyses into one bounded score.
//!
//! final = 0.5·base + 0.15·ats + 0.10·completeness + 0.10·action_verbs + 0.15·impact
//!         + high-value bonus − missing-key-skill penalty, clamped to [0, 100].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::matching::keywords::SkillMap;
use crate::matching::vocabulary::HIGH_VALUE_SKILLS;

const BASE_WEIGHT: f64 = 0.5;
const ATS_WEIGHT: f64 = 0.15;
const COMPLETENESS_WEIGHT: f64 = 0.10;
const ACTION_VERBS_WEIGHT: f64 = 0.10;
const QUANTIFIABLE_WEIGHT: f64 = 0.15;

const BONUS_PER_HIGH_VALUE_MATCH: f64 = 3.0;
const MAX_BONUS: f64 = 15.0;
const MAX_PENALTY: f64 = 20.0;

/// The four quality-analyzer scores the calculator consumes, each in [0, 100].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityScores {
    pub ats_score: f64,
    pub completeness_score: f64,
    pub action_verbs_score: f64,
    pub quantifiable_impact_score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub base_score: f64,
    pub ats_score: f64,
    pub completeness_score: f64,
    pub action_verbs_score: f64,
    pub quantifiable_impact_score: f64,
    pub skills_matched_count: usize,
    pub total_jd_skills: usize,
    pub coverage_percentage: f64,
    pub bonus_points: f64,
    pub penalty_points: f64,
    pub high_value_matches: Vec<String>,
    pub missing_key_skills: Vec<String>,
}

/// Output of [`calculate_match_score`]. Keyword lists are sorted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    pub score: f64,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub breakdown: ScoreBreakdown,
}

/// Scores `resume_skills` against the requirements in `jd_skills`.
///
/// A job description without any recognised skills has nothing to satisfy and
/// yields a zero score with an empty breakdown rather than an error.
pub fn calculate_match_score(
    resume_skills: &SkillMap,
    jd_skills: &SkillMap,
    quality: &QualityScores,
) -> MatchScore {
    if jd_skills.is_empty() {
        return MatchScore::default();
    }

    let (matched, missing): (Vec<&str>, Vec<&str>) = jd_skills
        .keywords()
        .partition(|keyword| resume_skills.contains(keyword));

    let jd_total_weight = jd_skills.total_weight();
    let matched_weight: f64 = matched.iter().filter_map(|k| jd_skills.get(k)).sum();

    let base_score = if jd_total_weight > 0.0 {
        matched_weight / jd_total_weight * 100.0
    } else {
        0.0
    };

    let mut final_score = base_score * BASE_WEIGHT
        + quality.ats_score * ATS_WEIGHT
        + quality.completeness_score * COMPLETENESS_WEIGHT
        + quality.action_verbs_score * ACTION_VERBS_WEIGHT
        + quality.quantifiable_impact_score * QUANTIFIABLE_WEIGHT;

    let matched_set: BTreeSet<&str> = matched.iter().copied().collect();
    let high_value_matches: Vec<String> = HIGH_VALUE_SKILLS
        .iter()
        .filter(|skill| matched_set.contains(**skill))
        .map(|skill| skill.to_string())
        .collect();
    let bonus = (high_value_matches.len() as f64 * BONUS_PER_HIGH_VALUE_MATCH).min(MAX_BONUS);
    final_score += bonus;

    let key_skills: Vec<&str> = HIGH_VALUE_SKILLS
        .iter()
        .copied()
        .filter(|skill| jd_skills.contains(skill))
        .collect();
    let missing_key_skills: Vec<String> = key_skills
        .iter()
        .filter(|skill| !matched_set.contains(**skill))
        .map(|skill| skill.to_string())
        .collect();
    let penalty = if key_skills.is_empty() {
        0.0
    } else {
        missing_key_skills.len() as f64 / key_skills.len() as f64 * MAX_PENALTY
    };
    final_score -= penalty;

    let score = round2(final_score.clamp(0.0, 100.0));

    debug!(
        score,
        base_score,
        bonus,
        penalty,
        matched = matched.len(),
        required = jd_skills.len(),
        "calculated match score"
    );

    let breakdown = ScoreBreakdown {
        base_score: round2(base_score),
        ats_score: round2(quality.ats_score),
        completeness_score: round2(quality.completeness_score),
        action_verbs_score: round2(quality.action_verbs_score),
        quantifiable_impact_score: round2(quality.quantifiable_impact_score),
        skills_matched_count: matched.len(),
        total_jd_skills: jd_skills.len(),
        coverage_percentage: round2(matched.len() as f64 / jd_skills.len() as f64 * 100.0),
        bonus_points: bonus,
        penalty_points: round2(penalty),
        high_value_matches,
        missing_key_skills,
    };

    MatchScore {
        score,
        matched: matched.into_iter().map(String::from).collect(),
        missing: missing.into_iter().map(String::from).collect(),
        breakdown,
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
