use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::history::HistoryStore;
use crate::matching::analyzer::{ComparisonResult, MatchResult};
use crate::models::history::{AnalysisHistoryEntry, ComparisonHistoryEntry};

/// Process-local history. Used when no `DATABASE_URL` is configured, and in tests.
#[derive(Default)]
pub struct MemoryHistoryStore {
    analyses: RwLock<Vec<AnalysisHistoryEntry>>,
    comparisons: RwLock<Vec<ComparisonHistoryEntry>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Newest-first slice of the entries belonging to `session_id`.
fn newest_for_session<T: Clone>(
    entries: &[T],
    session_id: Uuid,
    limit: i64,
    session_of: impl Fn(&T) -> Uuid,
) -> Vec<T> {
    let limit = usize::try_from(limit).unwrap_or(0);
    entries
        .iter()
        .rev()
        .filter(|e| session_of(e) == session_id)
        .take(limit)
        .cloned()
        .collect()
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn save_analysis(&self, result: &MatchResult) -> Result<(), AppError> {
        let mut analyses = self.analyses.write().await;
        let id = analyses.len() as i64 + 1;
        analyses.push(AnalysisHistoryEntry {
            id,
            session_id: result.session_id,
            resume_filename: result.resume.clone(),
            jd_filename: result.job_description.clone(),
            match_score: result.match_score,
            created_at: Utc::now(),
            matched_keywords: result.matched_keywords.clone(),
            missing_keywords: result.missing_keywords.clone(),
            improvement_suggestions: result.improvement_suggestions.clone(),
        });
        Ok(())
    }

    async fn save_comparison(&self, result: &ComparisonResult) -> Result<(), AppError> {
        let mut comparisons = self.comparisons.write().await;
        let id = comparisons.len() as i64 + 1;
        comparisons.push(ComparisonHistoryEntry {
            id,
            session_id: result.session_id,
            jd_filename: result.job_description.clone(),
            resume_filenames: result.results.iter().map(|r| r.filename.clone()).collect(),
            scores: result.results.iter().map(|r| r.match_score).collect(),
            best_match: result.best_match.filename.clone(),
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn analysis_history(
        &self,
        session_id: Uuid,
        limit: i64,
    ) -> Result<Vec<AnalysisHistoryEntry>, AppError> {
        let analyses = self.analyses.read().await;
        Ok(newest_for_session(&analyses, session_id, limit, |e| {
            e.session_id
        }))
    }

    async fn comparison_history(
        &self,
        session_id: Uuid,
        limit: i64,
    ) -> Result<Vec<ComparisonHistoryEntry>, AppError> {
        let comparisons = self.comparisons.read().await;
        Ok(newest_for_session(&comparisons, session_id, limit, |e| {
            e.session_id
        }))
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
