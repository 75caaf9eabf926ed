//! Resume quality heuristics. Four independent, pure analyzers over raw resume text.

use serde::{Deserialize, Serialize};

use crate::matching::vocabulary::{
    ATS_UNFRIENDLY_ELEMENTS, QUANTIFIABLE_PATTERNS, REQUIRED_SECTIONS, STRONG_VERB_PATTERNS,
    WEAK_VERB_PATTERNS,
};

const ATS_FRIENDLY_THRESHOLD: f64 = 70.0;
const MIN_WORDS: usize = 100;
const MAX_WORDS: usize = 800;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtsAnalysis {
    pub score: f64,
    pub issues: Vec<String>,
    pub is_ats_friendly: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletenessAnalysis {
    pub score: f64,
    pub sections_found: Vec<String>,
    pub missing_sections: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionVerbAnalysis {
    pub score: f64,
    pub strong_verbs: Vec<String>,
    pub weak_verbs: Vec<String>,
    pub total_verbs: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantifiableImpactAnalysis {
    pub score: f64,
    pub quantifiable_metrics: Vec<String>,
    pub count: usize,
}

/// Simulates the layout and length checks applicant tracking systems trip over.
pub fn check_ats_friendliness(text: &str) -> AtsAnalysis {
    let lower = text.to_lowercase();
    let mut score = 100.0_f64;
    let mut issues = Vec::new();

    for element in ATS_UNFRIENDLY_ELEMENTS {
        if lower.contains(element) {
            score -= 10.0;
            issues.push(format!("Contains {element}"));
        }
    }

    let word_count = text.split_whitespace().count();
    if word_count < MIN_WORDS {
        score -= 20.0;
        issues.push("Resume too short".to_string());
    }
    if word_count > MAX_WORDS {
        score -= 10.0;
        issues.push("Resume too long".to_string());
    }

    let score = score.max(0.0);
    AtsAnalysis {
        score,
        issues,
        is_ats_friendly: score >= ATS_FRIENDLY_THRESHOLD,
    }
}

pub fn check_section_completeness(text: &str) -> CompletenessAnalysis {
    let lower = text.to_lowercase();
    let (found, missing): (Vec<&str>, Vec<&str>) = REQUIRED_SECTIONS
        .iter()
        .partition(|section| lower.contains(**section));

    CompletenessAnalysis {
        score: found.len() as f64 / REQUIRED_SECTIONS.len() as f64 * 100.0,
        sections_found: found.into_iter().map(String::from).collect(),
        missing_sections: missing.into_iter().map(String::from).collect(),
    }
}

/// Share of strong verbs among all recognised action verbs. 0 when none are used.
pub fn analyze_action_verbs(text: &str) -> ActionVerbAnalysis {
    let found = |patterns: &[(&'static str, regex::Regex)]| -> Vec<String> {
        patterns
            .iter()
            .filter(|(_, pattern)| pattern.is_match(text))
            .map(|(verb, _)| verb.to_string())
            .collect()
    };

    let strong_verbs = found(STRONG_VERB_PATTERNS.as_slice());
    let weak_verbs = found(WEAK_VERB_PATTERNS.as_slice());
    let total_verbs = strong_verbs.len() + weak_verbs.len();

    let score = if total_verbs > 0 {
        strong_verbs.len() as f64 / total_verbs as f64 * 100.0
    } else {
        0.0
    };

    ActionVerbAnalysis {
        score,
        strong_verbs,
        weak_verbs,
        total_verbs,
    }
}

pub fn check_quantifiable_impact(text: &str) -> QuantifiableImpactAnalysis {
    let lower = text.to_lowercase();
    let quantifiable_metrics: Vec<String> = QUANTIFIABLE_PATTERNS
        .iter()
        .flat_map(|pattern| pattern.captures_iter(&lower))
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .collect();

    let count = quantifiable_metrics.len();
    QuantifiableImpactAnalysis {
        score: (count as f64 * 10.0).min(100.0),
        quantifiable_metrics,
        count,
    }
}
