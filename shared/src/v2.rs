//! Structured meal plan generation (v2).
//!
//! The v2 endpoint runs a three stage pipeline over the JSON request body:
//! validate, retrieve supporting context, then generate the plan. The stages
//! are pluggable through [`V2Pipeline`]; none has a concrete implementation
//! yet, so [`PendingPipeline`] answers every request with 501.

use async_trait::async_trait;
use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde_json::Value;
use tracing::{info, warn};

use crate::http::{error_response, json_response};
use crate::{Error, Result};

/// Stages of the structured generation flow.
#[async_trait]
pub trait V2Pipeline: Send + Sync {
    /// Reject malformed or unsupported requests.
    async fn validate_request(&self, body: &Value) -> Result<()>;

    /// Look up knowledge-base context relevant to the request.
    async fn retrieve_context(&self, body: &Value) -> Result<Value>;

    /// Produce the structured plan payload.
    async fn generate_structured_plan(&self, body: &Value, context: &Value) -> Result<Value>;
}

/// Pipeline whose stages are not available yet.
#[derive(Debug, Default, Clone, Copy)]
pub struct PendingPipeline;

#[async_trait]
impl V2Pipeline for PendingPipeline {
    async fn validate_request(&self, _body: &Value) -> Result<()> {
        Err(Error::NotImplemented("v2 request validation".to_string()))
    }

    async fn retrieve_context(&self, _body: &Value) -> Result<Value> {
        Err(Error::NotImplemented("v2 knowledge base retrieval".to_string()))
    }

    async fn generate_structured_plan(&self, _body: &Value, _context: &Value) -> Result<Value> {
        Err(Error::NotImplemented("v2 structured plan generation".to_string()))
    }
}

/// Run the v2 flow for one request.
///
/// Failures never escape: each is reported as an error envelope carrying the
/// error's status code.
pub async fn handle_v2<P>(
    pipeline: &P,
    event: &ApiGatewayProxyRequest,
) -> ApiGatewayProxyResponse
where
    P: V2Pipeline + ?Sized,
{
    match run_pipeline(pipeline, event).await {
        Ok(response) => response,
        Err(e) => {
            warn!("v2 request failed: {}", e);
            error_response(e.status_code(), e.to_string())
        }
    }
}

async fn run_pipeline<P>(
    pipeline: &P,
    event: &ApiGatewayProxyRequest,
) -> Result<ApiGatewayProxyResponse>
where
    P: V2Pipeline + ?Sized,
{
    let body = parse_body(event)?;

    pipeline.validate_request(&body).await?;
    let context = pipeline.retrieve_context(&body).await?;
    let plan = pipeline.generate_structured_plan(&body, &context).await?;

    info!("Generated structured meal plan");
    json_response(200, &plan)
}

fn parse_body(event: &ApiGatewayProxyRequest) -> Result<Value> {
    let raw = event
        .body
        .as_deref()
        .filter(|body| !body.trim().is_empty())
        .ok_or_else(|| Error::Validation("Missing request body".to_string()))?;

    let bytes = if event.is_base64_encoded {
        BASE64
            .decode(raw.trim())
            .map_err(|e| Error::Validation(format!("Invalid base64 request body: {}", e)))?
    } else {
        raw.as_bytes().to_vec()
    };

    serde_json::from_slice(&bytes)
        .map_err(|e| Error::Validation(format!("Invalid request body: {}", e)))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::http::body_text;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Echoes the request and context back as the plan.
    #[derive(Default)]
    pub(crate) struct EchoPipeline {
        pub(crate) calls: AtomicUsize,
    }

    #[async_trait]
    impl V2Pipeline for EchoPipeline {
        async fn validate_request(&self, body: &Value) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if body.get("days").is_none() {
                return Err(Error::Validation("days is required".to_string()));
            }
            Ok(())
        }

        async fn retrieve_context(&self, _body: &Value) -> Result<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(json!(["kb-doc-1"]))
        }

        async fn generate_structured_plan(&self, body: &Value, context: &Value) -> Result<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(json!({"request": body, "context": context}))
        }
    }

    fn event_with_body(body: Option<&str>) -> ApiGatewayProxyRequest {
        ApiGatewayProxyRequest {
            resource: Some("/v2/generate-meal-plan".to_string()),
            body: body.map(String::from),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_runs_all_stages() {
        let pipeline = EchoPipeline::default();
        let response = handle_v2(&pipeline, &event_with_body(Some(r#"{"days": 3}"#))).await;

        assert_eq!(response.status_code, 200);
        assert_eq!(pipeline.calls.load(Ordering::SeqCst), 3);
        let body: Value = serde_json::from_str(body_text(&response)).unwrap();
        assert_eq!(body, json!({"request": {"days": 3}, "context": ["kb-doc-1"]}));
        assert_eq!(response.headers.get("Access-Control-Allow-Origin").unwrap(), "*");
    }

    #[tokio::test]
    async fn test_validation_failure_stops_pipeline() {
        let pipeline = EchoPipeline::default();
        let response = handle_v2(&pipeline, &event_with_body(Some("{}"))).await;

        assert_eq!(response.status_code, 400);
        assert_eq!(pipeline.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_body_is_bad_request() {
        let pipeline = EchoPipeline::default();
        let response = handle_v2(&pipeline, &event_with_body(None)).await;

        assert_eq!(response.status_code, 400);
        assert_eq!(pipeline.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_base64_body_is_decoded() {
        let pipeline = EchoPipeline::default();
        let mut event = event_with_body(Some("eyJkYXlzIjogN30="));
        event.is_base64_encoded = true;

        let response = handle_v2(&pipeline, &event).await;

        assert_eq!(response.status_code, 200);
        assert_eq!(pipeline.calls.load(Ordering::SeqCst), 3);
        let body: Value = serde_json::from_str(body_text(&response)).unwrap();
        assert_eq!(body["request"], json!({"days": 7}));
    }

    #[tokio::test]
    async fn test_invalid_base64_body_is_bad_request() {
        let pipeline = EchoPipeline::default();
        let mut event = event_with_body(Some("not base64!"));
        event.is_base64_encoded = true;

        let response = handle_v2(&pipeline, &event).await;

        assert_eq!(response.status_code, 400);
        assert_eq!(pipeline.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let response = handle_v2(&PendingPipeline, &event_with_body(Some("{not json"))).await;

        assert_eq!(response.status_code, 400);
        let body: Value = serde_json::from_str(body_text(&response)).unwrap();
        assert!(body["error"].as_str().unwrap().contains("Invalid request body"));
    }

    #[tokio::test]
    async fn test_pending_pipeline_not_implemented() {
        let response = handle_v2(&PendingPipeline, &event_with_body(Some("{}"))).await;

        assert_eq!(response.status_code, 501);
    }
}
