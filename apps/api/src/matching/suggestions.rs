//! Improvement suggestions derived from a finished analysis.

use crate::matching::quality::{
    ActionVerbAnalysis, AtsAnalysis, CompletenessAnalysis, QuantifiableImpactAnalysis,
};

pub const MAX_SUGGESTIONS: usize = 6;

const MAX_MISSING_KEYWORDS_LISTED: usize = 5;
const MAX_ATS_ISSUES_LISTED: usize = 3;
const STRONG_VERB_TARGET: f64 = 70.0;
const MIN_QUANTIFIED_ACHIEVEMENTS: usize = 3;
const MIN_EXPERIENCE_YEARS: u32 = 2;

/// Everything the suggestion rules look at, borrowed from the analysis.
#[derive(Debug, Clone, Copy)]
pub struct SuggestionContext<'a> {
    pub missing_keywords: &'a [String],
    pub ats: &'a AtsAnalysis,
    pub completeness: &'a CompletenessAnalysis,
    pub action_verbs: &'a ActionVerbAnalysis,
    pub quantifiable_impact: &'a QuantifiableImpactAnalysis,
    pub experience_years: u32,
}

/// Applies the rules in priority order; each rule contributes at most one line.
pub fn generate_suggestions(ctx: &SuggestionContext<'_>) -> Vec<String> {
    let mut suggestions = Vec::new();

    if !ctx.missing_keywords.is_empty() {
        let top: Vec<&str> = ctx
            .missing_keywords
            .iter()
            .take(MAX_MISSING_KEYWORDS_LISTED)
            .map(String::as_str)
            .collect();
        suggestions.push(format!("Add these key skills from JD: {}", top.join(", ")));
    }

    if !ctx.ats.issues.is_empty() {
        let top: Vec<&str> = ctx
            .ats
            .issues
            .iter()
            .take(MAX_ATS_ISSUES_LISTED)
            .map(String::as_str)
            .collect();
        suggestions.push(format!("Fix ATS issues: {}", top.join(", ")));
    }

    if !ctx.completeness.missing_sections.is_empty() {
        suggestions.push(format!(
            "Add missing sections: {}",
            ctx.completeness.missing_sections.join(", ")
        ));
    }

    if ctx.action_verbs.score < STRONG_VERB_TARGET {
        suggestions.push(
            "Use more strong action verbs like 'achieved', 'implemented', 'optimized'".to_string(),
        );
    }

    if ctx.quantifiable_impact.count < MIN_QUANTIFIED_ACHIEVEMENTS {
        suggestions
            .push("Add more quantifiable achievements with numbers and percentages".to_string());
    }

    if ctx.experience_years < MIN_EXPERIENCE_YEARS {
        suggestions.push("Highlight relevant experience and projects".to_string());
    }

    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}
