use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::history::HistoryStore;
use crate::matching::analyzer::{ComparisonResult, MatchResult};
use crate::models::history::{
    AnalysisHistoryEntry, AnalysisHistoryRow, ComparisonHistoryEntry, ComparisonHistoryRow,
};

/// Append-only history in PostgreSQL. Tables are created by `db::ensure_schema`.
#[derive(Clone)]
pub struct PgHistoryStore {
    pool: PgPool,
}

impl PgHistoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HistoryStore for PgHistoryStore {
    async fn save_analysis(&self, result: &MatchResult) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO analysis_history
                (session_id, resume_filename, jd_filename, match_score,
                 matched_keywords, missing_keywords, improvement_suggestions,
                 ats_score, completeness_score, action_verbs_score, quantifiable_impact_score)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(result.session_id)
        .bind(&result.resume)
        .bind(&result.job_description)
        .bind(result.match_score)
        .bind(Json(&result.matched_keywords))
        .bind(Json(&result.missing_keywords))
        .bind(Json(&result.improvement_suggestions))
        .bind(result.ats_analysis.score)
        .bind(result.completeness_analysis.score)
        .bind(result.action_verbs_analysis.score)
        .bind(result.quantifiable_impact_analysis.score)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save_comparison(&self, result: &ComparisonResult) -> Result<(), AppError> {
        let filenames: Vec<&str> = result.results.iter().map(|r| r.filename.as_str()).collect();
        let scores: Vec<f64> = result.results.iter().map(|r| r.match_score).collect();

        sqlx::query(
            r#"
            INSERT INTO comparison_history
                (session_id, jd_filename, resume_filenames, scores, best_match)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(result.session_id)
        .bind(&result.job_description)
        .bind(Json(filenames))
        .bind(Json(scores))
        .bind(&result.best_match.filename)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn analysis_history(
        &self,
        session_id: Uuid,
        limit: i64,
    ) -> Result<Vec<AnalysisHistoryEntry>, AppError> {
        let rows = sqlx::query_as::<_, AnalysisHistoryRow>(
            r#"
            SELECT id, session_id, resume_filename, jd_filename, match_score,
                   matched_keywords, missing_keywords, improvement_suggestions, created_at
            FROM analysis_history
            WHERE session_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(session_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(AnalysisHistoryEntry::from).collect())
    }

    async fn comparison_history(
        &self,
        session_id: Uuid,
        limit: i64,
    ) -> Result<Vec<ComparisonHistoryEntry>, AppError> {
        let rows = sqlx::query_as::<_, ComparisonHistoryRow>(
            r#"
            SELECT id, session_id, jd_filename, resume_filenames, scores, best_match, created_at
            FROM comparison_history
            WHERE session_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(session_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(ComparisonHistoryEntry::from).collect())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
