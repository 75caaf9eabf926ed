//! Match orchestration: runs the quality analyzers, scoring and
//! suggestions together for single-pair matching and multi-resume comparison.
//!
//! Pure and synchronous: callers hand in already-extracted text.

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::keywords::{extract_experience_years, extract_skills, SkillMap};
use crate::matching::quality::{
    analyze_action_verbs, check_ats_friendliness, check_quantifiable_impact,
    check_section_completeness, ActionVerbAnalysis, AtsAnalysis, CompletenessAnalysis,
    QuantifiableImpactAnalysis,
};
use crate::matching::scoring::{calculate_match_score, QualityScores, ScoreBreakdown};
use crate::matching::suggestions::{generate_suggestions, SuggestionContext};

/// Minimum number of resumes a comparison needs.
pub const MIN_COMPARISON_RESUMES: usize = 2;

/// Quantifiable-impact score assumed on the comparison fast path, which skips that analyzer.
pub const COMPARISON_QUANTIFIABLE_IMPACT_SCORE: f64 = 50.0;

/// A named document whose text has already been extracted.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub filename: String,
    pub text: String,
}

impl SourceDocument {
    pub fn new(filename: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            text: text.into(),
        }
    }
}

/// Full single-pair analysis. Built once per request and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub resume: String,
    pub job_description: String,
    pub match_score: f64,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub resume_skills: SkillMap,
    pub jd_skills: SkillMap,
    pub breakdown: ScoreBreakdown,
    pub ats_analysis: AtsAnalysis,
    pub completeness_analysis: CompletenessAnalysis,
    pub action_verbs_analysis: ActionVerbAnalysis,
    pub quantifiable_impact_analysis: QuantifiableImpactAnalysis,
    pub experience_years: u32,
    pub improvement_suggestions: Vec<String>,
    pub session_id: Uuid,
}

/// One resume's summary line inside a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonEntry {
    pub filename: String,
    pub match_score: f64,
    pub matched_keywords_count: usize,
    pub missing_keywords_count: usize,
    pub ats_score: f64,
    pub completeness_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub job_description: String,
    /// Sorted by descending score; equal scores keep input order.
    pub results: Vec<ComparisonEntry>,
    pub best_match: ComparisonEntry,
    pub total_comparisons: usize,
    pub session_id: Uuid,
}

/// Runs every analyzer over the resume and scores it against the job description.
pub fn analyze_match(resume: &SourceDocument, jd: &SourceDocument) -> MatchResult {
    let resume_skills = extract_skills(&resume.text);
    let jd_skills = extract_skills(&jd.text);

    let ats_analysis = check_ats_friendliness(&resume.text);
    let completeness_analysis = check_section_completeness(&resume.text);
    let action_verbs_analysis = analyze_action_verbs(&resume.text);
    let quantifiable_impact_analysis = check_quantifiable_impact(&resume.text);
    let experience_years = extract_experience_years(&resume.text);

    let quality = QualityScores {
        ats_score: ats_analysis.score,
        completeness_score: completeness_analysis.score,
        action_verbs_score: action_verbs_analysis.score,
        quantifiable_impact_score: quantifiable_impact_analysis.score,
    };
    let scored = calculate_match_score(&resume_skills, &jd_skills, &quality);

    let improvement_suggestions = generate_suggestions(&SuggestionContext {
        missing_keywords: &scored.missing,
        ats: &ats_analysis,
        completeness: &completeness_analysis,
        action_verbs: &action_verbs_analysis,
        quantifiable_impact: &quantifiable_impact_analysis,
        experience_years,
    });

    let session_id = Uuid::new_v4();
    debug!(
        "Matched {} against {}: score {} (session {session_id})",
        resume.filename, jd.filename, scored.score
    );

    MatchResult {
        resume: resume.filename.clone(),
        job_description: jd.filename.clone(),
        match_score: scored.score,
        matched_keywords: scored.matched,
        missing_keywords: scored.missing,
        resume_skills,
        jd_skills,
        breakdown: scored.breakdown,
        ats_analysis,
        completeness_analysis,
        action_verbs_analysis,
        quantifiable_impact_analysis,
        experience_years,
        improvement_suggestions,
        session_id,
    }
}

/// Ranks several resumes against one job description.
///
/// The job description is analysed once. Each resume goes through the ATS,
/// completeness and action-verb analyzers; quantifiable impact is pinned to
/// [`COMPARISON_QUANTIFIABLE_IMPACT_SCORE`].
pub fn compare_resumes(
    jd: &SourceDocument,
    resumes: &[SourceDocument],
) -> Result<ComparisonResult, AppError> {
    if resumes.len() < MIN_COMPARISON_RESUMES {
        return Err(AppError::Validation(format!(
            "Please upload at least {MIN_COMPARISON_RESUMES} resumes for comparison"
        )));
    }

    let jd_skills = extract_skills(&jd.text);
    debug!("{} requires {} skills", jd.filename, jd_skills.len());

    let mut results: Vec<ComparisonEntry> = resumes
        .iter()
        .map(|resume| {
            let resume_skills = extract_skills(&resume.text);
            let ats = check_ats_friendliness(&resume.text);
            let completeness = check_section_completeness(&resume.text);
            let action_verbs = analyze_action_verbs(&resume.text);

            let quality = QualityScores {
                ats_score: ats.score,
                completeness_score: completeness.score,
                action_verbs_score: action_verbs.score,
                quantifiable_impact_score: COMPARISON_QUANTIFIABLE_IMPACT_SCORE,
            };
            let scored = calculate_match_score(&resume_skills, &jd_skills, &quality);

            ComparisonEntry {
                filename: resume.filename.clone(),
                match_score: scored.score,
                matched_keywords_count: scored.matched.len(),
                missing_keywords_count: scored.missing.len(),
                ats_score: ats.score,
                completeness_score: completeness.score,
            }
        })
        .collect();

    // Stable sort, so the first entry is the earliest resume holding the top score.
    results.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
    let best_match = results[0].clone();

    let session_id = Uuid::new_v4();
    debug!(
        "Compared {} resumes against {}: best {} ({}) (session {session_id})",
        results.len(),
        jd.filename,
        best_match.filename,
        best_match.match_score
    );

    Ok(ComparisonResult {
        job_description: jd.filename.clone(),
        total_comparisons: results.len(),
        results,
        best_match,
        session_id,
    })
}
