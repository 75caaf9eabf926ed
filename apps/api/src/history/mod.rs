//! Append-only record of past analyses, keyed by session id.
//!
//! The engine never talks to a database directly; handlers write through the
//! `HistoryStore` held in `AppState`, chosen at startup from config.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::analyzer::{ComparisonResult, MatchResult};
use crate::models::history::{AnalysisHistoryEntry, ComparisonHistoryEntry};

pub mod memory;
pub mod postgres;

pub use memory::MemoryHistoryStore;
pub use postgres::PgHistoryStore;

/// Carried in `AppState` as `Arc<dyn HistoryStore>`.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn save_analysis(&self, result: &MatchResult) -> Result<(), AppError>;

    async fn save_comparison(&self, result: &ComparisonResult) -> Result<(), AppError>;

    /// Newest first, at most `limit` entries.
    async fn analysis_history(
        &self,
        session_id: Uuid,
        limit: i64,
    ) -> Result<Vec<AnalysisHistoryEntry>, AppError>;

    /// Newest first, at most `limit` entries.
    async fn comparison_history(
        &self,
        session_id: Uuid,
        limit: i64,
    ) -> Result<Vec<ComparisonHistoryEntry>, AppError>;

    /// Backend label for logs and the service info endpoint.
    fn backend(&self) -> &'static str;
}
