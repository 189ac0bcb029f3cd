pub mod form;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(form::form_handler))
        .route("/health", get(health::health_handler))
        // Resume API
        .route("/api/v1/resumes", post(handlers::handle_generate))
        .route("/api/v1/resumes/:id/pdf", get(handlers::handle_download))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::generation::store::DocumentStore;
    use crate::layout::PageConfig;
    use crate::llm_client::fake::FakeGenerator;

    const GENERATED: &str = "**Education**\nBS Computer Science: State University, 2024";

    fn test_router(generator: FakeGenerator, capacity: usize) -> (Router, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let dir_path = dir.path().to_string_lossy().into_owned();
        let config = Config::from_lookup(|key| match key {
            "GOOGLE_API_KEY" => Some("test-key".to_string()),
            "RESUME_OUTPUT_DIR" => Some(dir_path.clone()),
            _ => None,
        })
        .unwrap();

        let state = AppState {
            generator: Arc::new(generator),
            documents: DocumentStore::new(capacity),
            page_config: PageConfig::default(),
            config,
        };
        (build_router(state), dir)
    }

    fn generate_request(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/resumes")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (router, _dir) = test_router(FakeGenerator::replying(GENERATED), 4);
        let response = router.oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "resume-builder");
    }

    #[tokio::test]
    async fn test_form_page_is_served() {
        let (router, _dir) = test_router(FakeGenerator::replying(GENERATED), 4);
        let response = router.oneshot(get_request("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("/api/v1/resumes"));
        assert!(html.contains("Resume.pdf"));
        assert!(html.contains(r#"<textarea name="skills""#));
        assert!(html.contains(r#"<textarea name="extracurricular""#));
    }

    #[tokio::test]
    async fn test_generate_then_download() {
        let generator = FakeGenerator::replying(GENERATED);
        let (router, _dir) = test_router(generator.clone(), 4);

        let response = router
            .clone()
            .oneshot(generate_request(json!({
                "personal": {"full_name": "Jane Doe"},
                "skills": "Rust"
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["resume_text"], GENERATED);
        assert_eq!(body["page_count"], 1);
        assert_eq!(
            body["blocks"],
            json!([
                {"kind": "title", "text": "Education"},
                {"kind": "body", "text": "BS Computer Science: State University, 2024"}
            ])
        );
        assert!(generator.calls()[0].0.contains("Full Name: Jane Doe"));

        let url = body["download_url"].as_str().unwrap().to_string();
        let response = router.oneshot(get_request(&url)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Resume.pdf\""
        );
        let pdf = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(pdf.starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn test_generation_failure_is_bad_gateway() {
        let (router, dir) = test_router(FakeGenerator::failing(), 4);
        let response = router.oneshot(generate_request(json!({}))).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "GENERATION_FAILED");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_too_many_entries_is_rejected() {
        let generator = FakeGenerator::replying(GENERATED);
        let (router, _dir) = test_router(generator.clone(), 4);
        let projects: Vec<Value> = (0..6)
            .map(|i| json!({"name": format!("p{i}"), "description": "d"}))
            .collect();

        let response = router
            .oneshot(generate_request(json!({ "projects": projects })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(generator.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_download_is_not_found() {
        let (router, _dir) = test_router(FakeGenerator::replying(GENERATED), 4);
        let uri = format!("/api/v1/resumes/{}/pdf", uuid::Uuid::new_v4());
        let response = router.oneshot(get_request(&uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_evicted_download_is_not_found() {
        let (router, _dir) = test_router(FakeGenerator::replying(GENERATED), 1);

        let first = json_body(
            router
                .clone()
                .oneshot(generate_request(json!({})))
                .await
                .unwrap(),
        )
        .await;
        router
            .clone()
            .oneshot(generate_request(json!({})))
            .await
            .unwrap();

        let url = first["download_url"].as_str().unwrap().to_string();
        let response = router.oneshot(get_request(&url)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
