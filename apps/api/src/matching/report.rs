//! Markdown analysis report for a finished match.

use chrono::{DateTime, Utc};

use crate::matching::analyzer::MatchResult;
use crate::matching::suggestions::MAX_SUGGESTIONS;

/// Makes user-supplied text safe inside a single Markdown table cell.
fn table_cell(value: &str) -> String {
    value
        .replace(['\r', '\n'], " ")
        .replace('|', "\\|")
}

/// Renders a match as a downloadable Markdown document.
pub fn render_report(result: &MatchResult, generated_at: DateTime<Utc>) -> String {
    let breakdown = &result.breakdown;
    let mut md = String::from("# Resume Analysis Report\n\n");

    md.push_str("| Field | Value |\n|---|---|\n");
    md.push_str(&format!("| Resume File | {} |\n", table_cell(&result.resume)));
    md.push_str(&format!(
        "| Job Description File | {} |\n",
        table_cell(&result.job_description)
    ));
    md.push_str(&format!("| Overall Match Score | {}% |\n", result.match_score));
    md.push_str(&format!(
        "| Analysis Date | {} |\n\n",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    ));

    md.push_str("## Score Breakdown\n\n| Category | Score |\n|---|---|\n");
    let components = [
        ("Base Score", breakdown.base_score),
        ("ATS Score", breakdown.ats_score),
        ("Completeness Score", breakdown.completeness_score),
        ("Action Verbs Score", breakdown.action_verbs_score),
        ("Quantifiable Impact Score", breakdown.quantifiable_impact_score),
        ("Coverage Percentage", breakdown.coverage_percentage),
    ];
    for (label, score) in components {
        md.push_str(&format!("| {label} | {score}% |\n"));
    }
    md.push_str(&format!("| Bonus Points | +{} |\n", breakdown.bonus_points));
    md.push_str(&format!(
        "| Penalty Points | -{} |\n\n",
        breakdown.penalty_points
    ));

    md.push_str("## Skills Analysis\n\n");
    md.push_str(&format!(
        "- **Matched Skills:** {} skills\n",
        result.matched_keywords.len()
    ));
    md.push_str(&format!(
        "- **Missing Skills:** {} skills\n",
        result.missing_keywords.len()
    ));
    md.push_str(&format!(
        "- **Total JD Skills:** {} skills\n",
        breakdown.total_jd_skills
    ));
    md.push_str(&format!(
        "- **Coverage:** {}%\n",
        breakdown.coverage_percentage
    ));
    if !result.matched_keywords.is_empty() {
        md.push_str(&format!(
            "- **Matched:** {}\n",
            result.matched_keywords.join(", ")
        ));
    }
    if !result.missing_keywords.is_empty() {
        md.push_str(&format!(
            "- **Missing:** {}\n",
            result.missing_keywords.join(", ")
        ));
    }
    md.push('\n');

    md.push_str("## Resume Quality Analysis\n\n| Check | Score |\n|---|---|\n");
    md.push_str(&format!("| ATS Score | {}% |\n", result.ats_analysis.score));
    md.push_str(&format!(
        "| Section Completeness | {}% |\n",
        result.completeness_analysis.score
    ));
    md.push_str(&format!(
        "| Action Verbs Score | {:.2}% |\n",
        result.action_verbs_analysis.score
    ));
    md.push_str(&format!(
        "| Quantifiable Impact | {}% |\n\n",
        result.quantifiable_impact_analysis.score
    ));

    md.push_str("## Improvement Suggestions\n\n");
    if result.improvement_suggestions.is_empty() {
        md.push_str("No specific suggestions available.\n");
    } else {
        for (i, suggestion) in result
            .improvement_suggestions
            .iter()
            .take(MAX_SUGGESTIONS)
            .enumerate()
        {
            md.push_str(&format!("{}. {suggestion}\n", i + 1));
        }
    }

    md
}

/// Attachment filename for a report generated at `generated_at`.
pub fn report_filename(generated_at: DateTime<Utc>) -> String {
    format!(
        "resume_analysis_report_{}.md",
        generated_at.format("%Y%m%d_%H%M%S")
    )
}
