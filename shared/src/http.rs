//! HTTP helpers for Lambda functions.

use aws_lambda_events::apigw::ApiGatewayProxyResponse;
use aws_lambda_events::encodings::Body;
use http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue};
use serde::Serialize;

use crate::Result;

/// Header set attached to every response.
pub fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers
}

/// Error payload for failed requests.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Create a JSON response with the given status code and data.
pub fn json_response<T: Serialize + ?Sized>(
    status: u16,
    data: &T,
) -> Result<ApiGatewayProxyResponse> {
    Ok(text_response(status, serde_json::to_string(data)?))
}

/// Create an error response with the given status code and message.
pub fn error_response(status: u16, message: impl Into<String>) -> ApiGatewayProxyResponse {
    let body = ErrorBody {
        error: message.into(),
    };
    json_response(status, &body).unwrap_or_else(|_| {
        text_response(status, r#"{"error":"Internal error"}"#.to_string())
    })
}

fn text_response(status: u16, body: String) -> ApiGatewayProxyResponse {
    ApiGatewayProxyResponse {
        status_code: i64::from(status),
        headers: default_headers(),
        body: Some(Body::Text(body)),
        ..Default::default()
    }
}

/// Text of a response body, empty when there is none.
pub fn body_text(response: &ApiGatewayProxyResponse) -> &str {
    match &response.body {
        Some(Body::Text(text)) => text.as_str(),
        Some(Body::Binary(bytes)) => std::str::from_utf8(bytes).unwrap_or(""),
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayPlan, WeekResponse};
    use serde_json::{json, Value};

    fn sample_week() -> WeekResponse {
        WeekResponse {
            week: vec![DayPlan {
                day: "Monday".to_string(),
                breakfast: json!("Oatmeal with fruits"),
                lunch: json!({"name": "Grilled vegetable bowl", "minutes": 20}),
                snack: json!("Yogurt with nuts"),
                dinner: json!("Paneer stir fry"),
            }],
        }
    }

    #[test]
    fn test_body_round_trips() {
        let payload = sample_week();
        let response = json_response(200, &payload).unwrap();

        assert_eq!(response.status_code, 200);
        let decoded: WeekResponse = serde_json::from_str(body_text(&response)).unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn test_cors_headers_always_present() {
        for response in [
            json_response(200, &sample_week()).unwrap(),
            json_response(201, &json!(null)).unwrap(),
            error_response(501, "nope"),
        ] {
            assert_eq!(
                response.headers.get("Access-Control-Allow-Origin").unwrap(),
                "*"
            );
            assert_eq!(response.headers.get("Content-Type").unwrap(), "application/json");
        }
    }

    #[test]
    fn test_response_serializes_for_api_gateway() {
        let response = json_response(200, &json!({"week": []})).unwrap();
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["statusCode"], json!(200));
        assert_eq!(value["headers"]["access-control-allow-origin"], json!("*"));
        assert_eq!(value["body"], json!(r#"{"week":[]}"#));
    }

    #[test]
    fn test_error_response_body() {
        let response = error_response(400, "Missing request body");
        assert_eq!(response.status_code, 400);
        let body: Value = serde_json::from_str(body_text(&response)).unwrap();
        assert_eq!(body, json!({"error": "Missing request body"}));
    }
}
