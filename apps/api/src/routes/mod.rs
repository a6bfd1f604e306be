pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::jobs::handlers as jobs;
use crate::state::AppState;
use crate::upload::handlers as upload;

/// Multipart bodies above this are refused before reaching the handler.
/// The upload form advertises 5 MB; the extra room covers multipart framing.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume upload flow
        .route(
            "/api/v1/resume/file",
            post(upload::handle_select_file).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/api/v1/resume/upload", post(upload::handle_upload))
        .route("/api/v1/resume/status", get(upload::handle_upload_status))
        .route("/api/v1/resume/parsed", get(upload::handle_parsed_resume))
        // Job posting form
        .route("/api/v1/jobs", post(jobs::handle_submit))
        .route("/api/v1/jobs/validate", post(jobs::handle_validate))
        .route("/api/v1/jobs/preview", post(jobs::handle_preview))
        .route("/api/v1/jobs/submission", get(jobs::handle_submission_status))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::clock::TokioClock;
    use crate::config::{Config, SimulationConfig};
    use crate::storage::{KeyValueStore, MemoryStore, RESUME_CONTENT_KEY, RESUME_FILE_KEY};

    const BOUNDARY: &str = "recruit-test-boundary";

    fn test_config() -> Config {
        Config {
            redis_url: None,
            port: 0,
            rust_log: "info".to_string(),
            simulation: SimulationConfig::default(),
        }
    }

    fn test_app() -> (Router, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(test_config(), store.clone(), Arc::new(TokioClock));
        (build_router(state), store)
    }

    fn multipart_request(file_name: &str, content: &str) -> Request<Body> {
        let body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
             Content-Type: application/pdf\r\n\r\n\
             {content}\r\n\
             --{BOUNDARY}--\r\n"
        );
        Request::builder()
            .method("POST")
            .uri("/api/v1/resume/file")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn valid_job() -> Value {
        json!({
            "title": "Senior Rust Engineer",
            "company": "Acme Inc.",
            "location": "Remote",
            "description": "Own the ingestion pipeline end to end and keep it fast under load.",
            "requirements": "Five years of backend work, production Rust, and a taste for tests.",
            "skills": ["Rust", "SQL", "AWS"],
            "salary": {"min": "80000", "max": "120000"}
        })
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = test_app();
        let response = app.oneshot(empty_request("GET", "/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test(start_paused = true)]
    async fn test_upload_flow_end_to_end() {
        let (app, store) = test_app();

        let response = app
            .clone()
            .oneshot(multipart_request("resume.pdf", "Jane Doe - Rust engineer"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "idle");
        assert_eq!(body["file"]["name"], "resume.pdf");
        assert_eq!(body["view"]["button_label"], "Upload");

        let response = app
            .clone()
            .oneshot(empty_request("GET", "/api/v1/resume/parsed"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .clone()
            .oneshot(empty_request("POST", "/api/v1/resume/upload"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "success");
        assert_eq!(body["progress"], 100);
        assert_eq!(body["view"]["banner"]["title"], "Upload Successful");

        tokio::time::sleep(Duration::from_millis(1100)).await;

        let response = app
            .clone()
            .oneshot(empty_request("GET", "/api/v1/resume/status"))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["parsed"], true);
        assert_eq!(body["view"]["parsed_tab_enabled"], true);

        let response = app
            .oneshot(empty_request("GET", "/api/v1/resume/parsed"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["source"], "sample");

        assert_eq!(
            store.get(RESUME_FILE_KEY).await.unwrap().as_deref(),
            Some("resume.pdf")
        );
        assert_eq!(
            store.get(RESUME_CONTENT_KEY).await.unwrap().as_deref(),
            Some("Jane Doe - Rust engineer")
        );
    }

    #[tokio::test]
    async fn test_upload_without_file_is_rejected() {
        let (app, _) = test_app();
        let response = app
            .oneshot(empty_request("POST", "/api/v1/resume/upload"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_unsupported_format_is_rejected() {
        let (app, _) = test_app();
        let response = app
            .oneshot(multipart_request("notes.txt", "hello"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_file_fails_upload() {
        let (app, _) = test_app();
        app.clone()
            .oneshot(multipart_request("resume.docx", ""))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(empty_request("POST", "/api/v1/resume/upload"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let response = app
            .oneshot(empty_request("GET", "/api/v1/resume/status"))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["status"], "error");
        assert_eq!(body["progress"], 0);
        assert_eq!(body["view"]["banner"]["title"], "Upload Failed");
    }

    #[tokio::test]
    async fn test_validate_applies_update() {
        let (app, _) = test_app();
        let mut draft = valid_job();
        draft["skills"] = json!(["Rust", "SQL"]);

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/jobs/validate",
                json!({"draft": draft, "update": {"field": "add_skill", "value": "Docker"}}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["report"]["is_valid"], true);
        assert_eq!(body["can_submit"], true);
        assert_eq!(body["draft"]["skills"], json!(["Rust", "SQL", "Docker"]));
    }

    #[tokio::test]
    async fn test_validate_reports_field_errors() {
        let (app, _) = test_app();
        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/jobs/validate",
                json!({"draft": {"title": "Dev"}}),
            ))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["report"]["is_valid"], false);
        assert_eq!(body["report"]["errors"][0]["field"], "title");
        assert_eq!(body["submit_label"], "Post Job");
    }

    #[tokio::test]
    async fn test_preview_formats_salary() {
        let (app, _) = test_app();
        let response = app
            .oneshot(json_request("POST", "/api/v1/jobs/preview", valid_job()))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["salary"], "$80,000 - $120,000");
        assert_eq!(body["badges"], json!(["Full Time", "Mid Level"]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_valid_job() {
        let (app, _) = test_app();
        let response = app
            .oneshot(json_request("POST", "/api/v1/jobs", valid_job()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["redirect_to"], "/recruiter/jobs");
        assert_eq!(body["notification"]["title"], "Job posted successfully");
    }

    #[tokio::test]
    async fn test_submit_invalid_job_lists_fields() {
        let (app, _) = test_app();
        let mut job = valid_job();
        job["title"] = json!("Lead");
        let response = app
            .oneshot(json_request("POST", "/api/v1/jobs", job))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "INVALID_JOB_POSTING");
        assert_eq!(body["error"]["fields"][0]["field"], "title");
    }

    #[tokio::test(start_paused = true)]
    async fn test_posting_label_while_submission_pending() {
        let (app, _) = test_app();
        let submission = tokio::spawn(
            app.clone()
                .oneshot(json_request("POST", "/api/v1/jobs", valid_job())),
        );
        tokio::time::sleep(Duration::from_millis(500)).await;

        let response = app
            .clone()
            .oneshot(empty_request("GET", "/api/v1/jobs/submission"))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["submitting"], true);
        assert_eq!(body["submit_label"], "Posting...");

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/jobs/validate",
                json!({"draft": valid_job()}),
            ))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["submitting"], true);
        assert_eq!(body["can_submit"], false);
        assert_eq!(body["submit_label"], "Posting...");

        let response = submission.await.unwrap().unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(empty_request("GET", "/api/v1/jobs/submission"))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["submitting"], false);
        assert_eq!(body["submit_label"], "Post Job");
    }

    #[tokio::test]
    async fn test_large_unsupported_file_is_rejected_by_name() {
        let (app, _) = test_app();
        let content = "x".repeat(2 * 1024 * 1024);
        let response = app
            .clone()
            .oneshot(multipart_request("notes.txt", &content))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("notes.txt"));

        let response = app
            .oneshot(empty_request("GET", "/api/v1/resume/status"))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["status"], "idle");
        assert!(body["file"].is_null());
    }
}
