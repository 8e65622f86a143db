//! API route definitions

use axum::{
    extract::{DefaultBodyLimit, Extension},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::*;

/// Create the API router; request bodies above `max_body_bytes` are rejected with 413
pub fn create_router(state: Arc<AppState>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/mqavalues", post(evaluate_metadata))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(Extension(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;
    use yoda_core::{FormatVocabularies, Vocabulary};
    use yoda_mqa::validator::verdict_report;
    use yoda_mqa::{DocumentValidator, LinkChecker, MetricReport, MqaEngine, MqaError, MqaResult};

    const DOCUMENT: &str = r#"<?xml version="1.0"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:dcat="http://www.w3.org/ns/dcat#"
         xmlns:dct="http://purl.org/dc/terms/">
  <rdf:Description rdf:about="http://example.org/dataset/1">
    <dcat:keyword>air</dcat:keyword>
    <dct:title>Air quality</dct:title>
  </rdf:Description>
</rdf:RDF>"#;

    struct StaticValidator(Result<bool, u16>);

    #[async_trait]
    impl DocumentValidator for StaticValidator {
        async fn validate(&self, _document: &str) -> MqaResult<MetricReport> {
            match self.0 {
                Ok(conforms) => Ok(verdict_report(conforms)),
                Err(status) => Err(MqaError::Validator {
                    status,
                    message: "validator unavailable".to_string(),
                }),
            }
        }
    }

    struct OfflineChecker;

    #[async_trait]
    impl LinkChecker for OfflineChecker {
        async fn head(&self, url: &str) -> MqaResult<u16> {
            Err(MqaError::RemoteStatus { url: url.to_string(), status: 0 })
        }

        async fn fetch_rdf(&self, url: &str) -> MqaResult<String> {
            Err(MqaError::RemoteStatus { url: url.to_string(), status: 0 })
        }
    }

    fn app(validator: StaticValidator, max_body_bytes: usize) -> Router {
        let vocabularies = FormatVocabularies::new(
            Vocabulary::from_identifiers("machine-readable", Vec::<String>::new()),
            Vocabulary::from_identifiers("non-proprietary", Vec::<String>::new()),
        );
        let engine = MqaEngine::new(Arc::new(validator), Arc::new(OfflineChecker), Arc::new(vocabularies));
        create_router(Arc::new(AppState::new(Arc::new(engine))), max_body_bytes)
    }

    fn post_document(body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/mqavalues")
            .header("content-type", "application/rdf+xml")
            .body(body.into())
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_evaluate_document() {
        let response = app(StaticValidator(Ok(true)), 1024 * 1024)
            .oneshot(post_document(DOCUMENT))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["values"]["edp"]["weight"], 30);
        assert_eq!(body["values"]["keyword"]["weight"], 30);
        assert_eq!(body["values"]["others"]["values"][0], "dct:title");
        assert_eq!(body["summary"]["score"], 60);
        assert_eq!(body["summary"]["rate"], "Bad");
    }

    #[tokio::test]
    async fn test_validator_status_is_forwarded() {
        let response = app(StaticValidator(Err(503)), 1024 * 1024)
            .oneshot(post_document(DOCUMENT))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body = json_body(response).await;
        assert!(body["error"].as_str().unwrap().contains("validator unavailable"));
    }

    #[tokio::test]
    async fn test_malformed_document_is_internal_error() {
        let response = app(StaticValidator(Ok(true)), 1024 * 1024)
            .oneshot(post_document("<rdf:RDF"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(json_body(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_oversized_body_rejected() {
        let response = app(StaticValidator(Ok(true)), 64)
            .oneshot(post_document(DOCUMENT))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let body = json_body(response).await;
        assert!(body["error"].as_str().unwrap().contains("length limit exceeded"));
    }

    #[tokio::test]
    async fn test_non_utf8_body_is_internal_error() {
        let response = app(StaticValidator(Ok(true)), 1024)
            .oneshot(post_document(vec![0xffu8, 0xfe, 0x00]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = json_body(response).await;
        assert!(body["error"].as_str().unwrap().contains("not valid UTF-8"));
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = app(StaticValidator(Ok(true)), 1024)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "healthy");
    }
}
