pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::matching::handlers;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(handlers::handle_service_info))
        .route("/health", get(health::health_handler))
        // Matching API
        .route("/api/v1/match", post(handlers::handle_match))
        .route("/api/v1/compare", post(handlers::handle_compare))
        .route("/api/v1/highlight", post(handlers::handle_highlight))
        .route("/api/v1/report", post(handlers::handle_report))
        .route(
            "/api/v1/history/:session_id",
            get(handlers::handle_history),
        )
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::history::MemoryHistoryStore;
    use crate::matching::analyzer::{ComparisonResult, MatchResult};
    use crate::matching::handlers::SessionHistory;

    const BOUNDARY: &str = "resume-matcher-test-boundary";

    const RESUME: &str = "Summary: backend engineer with 6 years of experience.\n\
        Experience: Developed Python services on AWS and Docker. \
        Reduced latency by 40% and led a team of 5 engineers.\n\
        Education: BSc Computer Science.\nSkills: Python, AWS, Docker, PostgreSQL.\n\
        Contact: jane@example.com";

    const JD: &str = "We are hiring a Python engineer with AWS, Docker and Kubernetes experience.";

    fn app() -> Router {
        app_with(Config::default())
    }

    fn app_with(config: Config) -> Router {
        build_router(AppState {
            history: Arc::new(MemoryHistoryStore::new()),
            config,
        })
    }

    fn multipart_body(files: &[(&str, &str, &[u8])]) -> Body {
        let mut body = Vec::new();
        for (field, filename, content) in files {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(content);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        Body::from(body)
    }

    fn upload(uri: &str, files: &[(&str, &str, &str)]) -> Request<Body> {
        let files: Vec<(&str, &str, &[u8])> = files
            .iter()
            .map(|(field, filename, content)| (*field, *filename, content.as_bytes()))
            .collect();
        upload_bytes(uri, &files)
    }

    fn upload_bytes(uri: &str, files: &[(&str, &str, &[u8])]) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(multipart_body(files))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn json_body<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app().oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = json_body(response).await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_service_info_reports_backend() {
        let response = app().oneshot(get_request("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = json_body(response).await;
        assert_eq!(body["history_backend"], "memory");
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let response = app().oneshot(get_request("/nope")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = json_body(response).await;
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_match_then_history() {
        let app = app();
        let response = app
            .clone()
            .oneshot(upload(
                "/api/v1/match",
                &[("resume", "resume.txt", RESUME), ("jd", "jd.txt", JD)],
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let result: MatchResult = json_body(response).await;
        assert_eq!(result.resume, "resume.txt");
        assert_eq!(result.job_description, "jd.txt");
        assert!(result.matched_keywords.contains(&"python".to_string()));
        assert!(result.missing_keywords.contains(&"kubernetes".to_string()));
        assert_eq!(result.experience_years, 6);
        assert!((0.0..=100.0).contains(&result.match_score));

        let response = app
            .oneshot(get_request(&format!(
                "/api/v1/history/{}",
                result.session_id
            )))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let history: SessionHistory = json_body(response).await;
        assert_eq!(history.analyses.len(), 1);
        assert_eq!(history.analyses[0].match_score, result.match_score);
        assert!(history.comparisons.is_empty());
    }

    #[tokio::test]
    async fn test_match_rejects_unsupported_type() {
        let response = app()
            .oneshot(upload(
                "/api/v1/match",
                &[("resume", "resume.docx", RESUME), ("jd", "jd.txt", JD)],
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_upload_over_limit_is_413() {
        let app = app_with(Config {
            max_upload_bytes: 1024,
            ..Config::default()
        });
        let large_resume = RESUME.repeat(20);
        assert!(large_resume.len() > 1024);

        let response = app
            .oneshot(upload(
                "/api/v1/match",
                &[("resume", "resume.txt", large_resume.as_str()), ("jd", "jd.txt", JD)],
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let body: Value = json_body(response).await;
        assert_eq!(body["error"]["code"], "PAYLOAD_TOO_LARGE");
    }

    #[tokio::test]
    async fn test_match_accepts_pdf_resume() {
        let pdf: &[u8] = include_bytes!("../../tests/fixtures/resume.pdf");
        let response = app()
            .oneshot(upload_bytes(
                "/api/v1/match",
                &[("resume", "resume.pdf", pdf), ("jd", "jd.txt", JD.as_bytes())],
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let result: MatchResult = json_body(response).await;
        assert_eq!(result.resume, "resume.pdf");
        assert_eq!(result.experience_years, 5);
        for skill in ["aws", "docker", "python"] {
            assert!(result.matched_keywords.contains(&skill.to_string()));
        }
        assert_eq!(result.missing_keywords, vec!["kubernetes"]);
    }

    #[tokio::test]
    async fn test_match_requires_jd() {
        let response = app()
            .oneshot(upload("/api/v1/match", &[("resume", "resume.txt", RESUME)]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_match_rejects_empty_document() {
        let response = app()
            .oneshot(upload(
                "/api/v1/match",
                &[("resume", "resume.txt", "   "), ("jd", "jd.txt", JD)],
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_compare_needs_two_resumes() {
        let response = app()
            .oneshot(upload(
                "/api/v1/compare",
                &[("resumes", "a.txt", RESUME), ("jd", "jd.txt", JD)],
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_compare_picks_best_match() {
        let response = app()
            .oneshot(upload(
                "/api/v1/compare",
                &[
                    ("resumes", "weak.txt", "Responsible for helping with Excel."),
                    ("resumes", "strong.txt", RESUME),
                    ("jd", "jd.txt", JD),
                ],
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let result: ComparisonResult = json_body(response).await;
        assert_eq!(result.total_comparisons, 2);
        assert_eq!(result.best_match.filename, "strong.txt");
        assert_eq!(result.results[0].filename, "strong.txt");
    }

    #[tokio::test]
    async fn test_compare_aborts_on_bad_upload() {
        let response = app()
            .oneshot(upload(
                "/api/v1/compare",
                &[
                    ("resumes", "a.txt", RESUME),
                    ("resumes", "b.png", RESUME),
                    ("jd", "jd.txt", JD),
                ],
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_highlight_marks_shared_keywords() {
        let response = app()
            .oneshot(upload(
                "/api/v1/highlight",
                &[("resume", "resume.txt", RESUME), ("jd", "jd.txt", JD)],
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = json_body(response).await;
        let highlighted = body["highlighted_jd"].as_str().unwrap();
        assert!(highlighted.contains(r#"<mark class="highlight">Python</mark>"#));
    }

    #[tokio::test]
    async fn test_report_download() {
        let app = app();
        let response = app
            .clone()
            .oneshot(upload(
                "/api/v1/match",
                &[("resume", "resume.txt", RESUME), ("jd", "jd.txt", JD)],
            ))
            .await
            .unwrap();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/report")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(bytes))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("attachment; filename=\"resume_analysis_report_"));
        assert!(disposition.ends_with(".md\""));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let report = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(report.contains("resume.txt"));
    }

    #[tokio::test]
    async fn test_history_for_unknown_session_is_empty() {
        let response = app()
            .oneshot(get_request(&format!(
                "/api/v1/history/{}",
                uuid::Uuid::new_v4()
            )))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let history: SessionHistory = json_body(response).await;
        assert!(history.analyses.is_empty());
        assert!(history.comparisons.is_empty());
    }
}
