use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Row shape of `analysis_history` as returned by history queries.
#[derive(Debug, Clone, FromRow)]
pub struct AnalysisHistoryRow {
    pub id: i64,
    pub session_id: Uuid,
    pub resume_filename: String,
    pub jd_filename: String,
    pub match_score: f64,
    pub matched_keywords: Json<Vec<String>>,
    pub missing_keywords: Json<Vec<String>>,
    pub improvement_suggestions: Json<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

/// Row shape of `comparison_history`.
#[derive(Debug, Clone, FromRow)]
pub struct ComparisonHistoryRow {
    pub id: i64,
    pub session_id: Uuid,
    pub jd_filename: String,
    pub resume_filenames: Json<Vec<String>>,
    pub scores: Json<Vec<f64>>,
    pub best_match: String,
    pub created_at: DateTime<Utc>,
}

/// A past single-pair analysis, as exposed by the history endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisHistoryEntry {
    pub id: i64,
    pub session_id: Uuid,
    pub resume_filename: String,
    pub jd_filename: String,
    pub match_score: f64,
    pub created_at: DateTime<Utc>,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub improvement_suggestions: Vec<String>,
}

/// A past multi-resume comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonHistoryEntry {
    pub id: i64,
    pub session_id: Uuid,
    pub jd_filename: String,
    pub resume_filenames: Vec<String>,
    pub scores: Vec<f64>,
    pub best_match: String,
    pub created_at: DateTime<Utc>,
}

impl From<AnalysisHistoryRow> for AnalysisHistoryEntry {
    fn from(row: AnalysisHistoryRow) -> Self {
        Self {
            id: row.id,
            session_id: row.session_id,
            resume_filename: row.resume_filename,
            jd_filename: row.jd_filename,
            match_score: row.match_score,
            created_at: row.created_at,
            matched_keywords: row.matched_keywords.0,
            missing_keywords: row.missing_keywords.0,
            improvement_suggestions: row.improvement_suggestions.0,
        }
    }
}

impl From<ComparisonHistoryRow> for ComparisonHistoryEntry {
    fn from(row: ComparisonHistoryRow) -> Self {
        Self {
            id: row.id,
            session_id: row.session_id,
            jd_filename: row.jd_filename,
            resume_filenames: row.resume_filenames.0,
            scores: row.scores.0,
            best_match: row.best_match,
            created_at: row.created_at,
        }
    }
}
