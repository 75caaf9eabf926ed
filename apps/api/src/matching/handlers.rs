use anyhow::Context;
use axum::{
    extract::{multipart::MultipartError, Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::{extract_text, DocumentKind};
use crate::matching::analyzer::{
    analyze_match, compare_resumes, ComparisonResult, MatchResult, SourceDocument,
    MIN_COMPARISON_RESUMES,
};
use crate::matching::highlight::{highlight_matches, HighlightResult};
use crate::matching::report::{render_report, report_filename};
use crate::models::history::{AnalysisHistoryEntry, ComparisonHistoryEntry};
use crate::state::AppState;

const RESUME_FIELD: &str = "resume";
const RESUMES_FIELD: &str = "resumes";
const JD_FIELD: &str = "jd";

/// A file part of a multipart request, read fully into memory.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub bytes: Bytes,
}

/// Uploads grouped by form field, in the order they arrived.
#[derive(Debug, Default)]
struct UploadForm {
    resumes: Vec<Upload>,
    jds: Vec<Upload>,
}

impl UploadForm {
    async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| multipart_error("Multipart error", e))?
        {
            let name = field.name().unwrap_or_default().to_string();
            let target = match name.as_str() {
                RESUME_FIELD | RESUMES_FIELD => &mut form.resumes,
                JD_FIELD => &mut form.jds,
                _ => {
                    warn!("Ignoring unexpected multipart field '{name}'");
                    continue;
                }
            };

            let filename = field
                .file_name()
                .map(str::to_string)
                .filter(|f| !f.is_empty())
                .ok_or_else(|| AppError::Validation(format!("Field '{name}' must be a file")))?;
            let bytes = field
                .bytes()
                .await
                .map_err(|e| multipart_error("Read error", e))?;

            target.push(Upload { filename, bytes });
        }

        Ok(form)
    }

    fn single_jd(&mut self) -> Result<Upload, AppError> {
        match self.jds.len() {
            1 => Ok(self.jds.remove(0)),
            0 => Err(AppError::Validation("Job description file is required".to_string())),
            _ => Err(AppError::Validation(
                "Only one job description file may be uploaded".to_string(),
            )),
        }
    }

    fn single_resume(&mut self) -> Result<Upload, AppError> {
        match self.resumes.len() {
            1 => Ok(self.resumes.remove(0)),
            0 => Err(AppError::Validation("Resume file is required".to_string())),
            _ => Err(AppError::Validation(
                "Upload a single resume, or use /api/v1/compare for several".to_string(),
            )),
        }
    }
}

/// Rejects any upload whose type is unsupported, before any extraction work starts.
fn validate_file_types<'a>(uploads: impl IntoIterator<Item = &'a Upload>) -> Result<(), AppError> {
    for upload in uploads {
        DocumentKind::from_filename(&upload.filename)
            .map_err(|e| AppError::Validation(e.to_string()))?;
    }
    Ok(())
}

/// Keeps the status axum assigns, so an oversized body is reported as 413.
fn multipart_error(context: &str, e: MultipartError) -> AppError {
    let message = format!("{context}: {}", e.body_text());
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(message)
    } else {
        AppError::Validation(message)
    }
}

/// Runs text extraction on the blocking pool.
async fn extract_document(upload: Upload) -> Result<SourceDocument, AppError> {
    let Upload { filename, bytes } = upload;
    tokio::task::spawn_blocking(move || -> Result<SourceDocument, AppError> {
        let text = extract_text(&filename, &bytes)?;
        Ok(SourceDocument::new(filename, text))
    })
    .await
    .context("Extraction task panicked")?
}

async fn extract_pair(resume: Upload, jd: Upload) -> Result<(SourceDocument, SourceDocument), AppError> {
    validate_file_types([&resume, &jd])?;
    let resume = extract_document(resume).await?;
    let jd = extract_document(jd).await?;
    Ok((resume, jd))
}

/// GET /
pub async fn handle_service_info(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "history_backend": state.history.backend(),
        "supported_file_types": ["pdf", "txt"],
        "features": [
            "weighted keyword matching",
            "ATS-friendliness check",
            "section completeness check",
            "action verb analysis",
            "quantifiable impact analysis",
            "improvement suggestions",
            "multi-resume comparison",
            "keyword highlighting",
            "markdown report download",
            "session history"
        ],
        "endpoints": {
            "match": "POST /api/v1/match",
            "compare": "POST /api/v1/compare",
            "highlight": "POST /api/v1/highlight",
            "report": "POST /api/v1/report",
            "history": "GET /api/v1/history/:session_id"
        }
    }))
}

/// POST /api/v1/match
pub async fn handle_match(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<MatchResult>, AppError> {
    let mut form = UploadForm::read(multipart).await?;
    let resume = form.single_resume()?;
    let jd = form.single_jd()?;
    let (resume, jd) = extract_pair(resume, jd).await?;

    let result = analyze_match(&resume, &jd);
    info!(
        "Matched {} against {}: score {} (session {})",
        result.resume, result.job_description, result.match_score, result.session_id
    );

    if let Err(e) = state.history.save_analysis(&result).await {
        warn!("Failed to record analysis {}: {e}", result.session_id);
    }

    Ok(Json(result))
}

/// POST /api/v1/compare
pub async fn handle_compare(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ComparisonResult>, AppError> {
    let mut form = UploadForm::read(multipart).await?;
    let jd = form.single_jd()?;
    if form.resumes.len() < MIN_COMPARISON_RESUMES {
        return Err(AppError::Validation(format!(
            "At least {MIN_COMPARISON_RESUMES} resumes are required for comparison"
        )));
    }
    validate_file_types(form.resumes.iter().chain(std::iter::once(&jd)))?;

    let jd = extract_document(jd).await?;
    let mut resumes = Vec::with_capacity(form.resumes.len());
    for upload in form.resumes {
        resumes.push(extract_document(upload).await?);
    }

    let result = compare_resumes(&jd, &resumes)?;
    info!(
        "Compared {} resumes against {}: best match {} ({})",
        result.total_comparisons,
        result.job_description,
        result.best_match.filename,
        result.best_match.match_score
    );

    if let Err(e) = state.history.save_comparison(&result).await {
        warn!("Failed to record comparison {}: {e}", result.session_id);
    }

    Ok(Json(result))
}

/// POST /api/v1/highlight
pub async fn handle_highlight(multipart: Multipart) -> Result<Json<HighlightResult>, AppError> {
    let mut form = UploadForm::read(multipart).await?;
    let resume = form.single_resume()?;
    let jd = form.single_jd()?;
    let (resume, jd) = extract_pair(resume, jd).await?;

    Ok(Json(highlight_matches(&resume.text, &jd.text)))
}

/// POST /api/v1/report
/// Renders a previously returned match result as a Markdown download.
pub async fn handle_report(Json(result): Json<MatchResult>) -> impl IntoResponse {
    let now = Utc::now();
    let disposition = format!("attachment; filename=\"{}\"", report_filename(now));
    (
        [
            (header::CONTENT_TYPE, "text/markdown; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        render_report(&result, now),
    )
}

#[derive(Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionHistory {
    pub session_id: Uuid,
    pub analyses: Vec<AnalysisHistoryEntry>,
    pub comparisons: Vec<ComparisonHistoryEntry>,
}

/// GET /api/v1/history/:session_id
pub async fn handle_history(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<SessionHistory>, AppError> {
    let max = state.config.history_limit;
    let limit = params.limit.unwrap_or(max).clamp(1, max.max(1));

    let analyses = state.history.analysis_history(session_id, limit).await?;
    let comparisons = state.history.comparison_history(session_id, limit).await?;

    Ok(Json(SessionHistory {
        session_id,
        analyses,
        comparisons,
    }))
}
