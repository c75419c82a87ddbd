//! Response and body helpers shared by the route handlers

use bytes::Bytes;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::Body;
use hyper::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::types::{FolioError, Result};

pub type BoxBody = http_body_util::combinators::BoxBody<Bytes, hyper::Error>;

/// Largest request body accepted by any endpoint
pub const MAX_BODY_BYTES: usize = 10240;

const ALLOW_METHODS: &str = "GET, POST, PUT, OPTIONS";
const ALLOW_HEADERS: &str = "Content-Type, Authorization";

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
    /// Listing to return to when a detail item is missing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
    pub message: String,
}

pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<BoxBody> {
    let json = serde_json::to_string(body).unwrap_or_else(|_| "{}".to_string());

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", ALLOW_METHODS)
        .header("Access-Control-Allow-Headers", ALLOW_HEADERS)
        .header("Cache-Control", "no-store")
        .body(full_body(json))
        .unwrap()
}

pub fn error_response(err: &FolioError) -> Response<BoxBody> {
    json_response(
        err.status_code(),
        &ErrorResponse {
            error: err.to_string(),
            code: err.code(),
            back: None,
        },
    )
}

/// 404 for a missing catalog item, pointing back at its listing
pub fn missing_item_response(what: String, back: &'static str) -> Response<BoxBody> {
    let err = FolioError::NotFound(what);
    json_response(
        err.status_code(),
        &ErrorResponse {
            error: err.to_string(),
            code: err.code(),
            back: Some(back),
        },
    )
}

pub fn success_response(message: impl Into<String>) -> Response<BoxBody> {
    json_response(
        StatusCode::OK,
        &SuccessResponse {
            success: true,
            message: message.into(),
        },
    )
}

pub fn not_found_response(path: &str) -> Response<BoxBody> {
    json_response(
        StatusCode::NOT_FOUND,
        &serde_json::json!({
            "error": "Not Found",
            "code": "NOT_FOUND",
            "path": path,
        }),
    )
}

pub fn method_not_allowed() -> Response<BoxBody> {
    json_response(
        StatusCode::METHOD_NOT_ALLOWED,
        &serde_json::json!({
            "error": "Method not allowed",
            "code": "METHOD_NOT_ALLOWED",
        }),
    )
}

pub fn cors_preflight() -> Response<BoxBody> {
    Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", ALLOW_METHODS)
        .header("Access-Control-Allow-Headers", ALLOW_HEADERS)
        .header("Access-Control-Max-Age", "86400")
        .body(empty_body())
        .unwrap()
}

pub fn full_body(data: impl Into<Bytes>) -> BoxBody {
    Full::new(data.into())
        .map_err(|never| match never {})
        .boxed()
}

pub fn empty_body() -> BoxBody {
    Full::new(Bytes::new())
        .map_err(|never| match never {})
        .boxed()
}

/// Collect a request body, giving up once it exceeds [`MAX_BODY_BYTES`]
pub async fn read_body<B>(body: B) -> Result<Bytes>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let collected = Limited::new(body, MAX_BODY_BYTES)
        .collect()
        .await
        .map_err(|e| {
            if e.downcast_ref::<LengthLimitError>().is_some() {
                FolioError::BadRequest("Request body too large".into())
            } else {
                FolioError::BadRequest(format!("Failed to read body: {}", e))
            }
        })?;

    Ok(collected.to_bytes())
}

/// Decode a JSON request body
pub fn parse_json_body<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body)
        .map_err(|e| FolioError::BadRequest(format!("Invalid JSON body: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Ping {
        value: u32,
    }

    #[test]
    fn test_parse_json_body() {
        let ping: Ping = parse_json_body(br#"{"value": 7}"#).unwrap();
        assert_eq!(ping.value, 7);

        assert!(matches!(
            parse_json_body::<Ping>(b"not json"),
            Err(FolioError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_read_body_within_limit() {
        let body = Full::new(Bytes::from_static(br#"{"value": 1}"#));
        let bytes = read_body(body).await.unwrap();
        assert_eq!(&bytes[..], br#"{"value": 1}"#);
    }

    #[tokio::test]
    async fn test_oversized_body_rejected_while_reading() {
        let body = Full::new(Bytes::from(vec![b' '; MAX_BODY_BYTES + 1]));
        match read_body(body).await {
            Err(FolioError::BadRequest(msg)) => assert_eq!(msg, "Request body too large"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_error_response_status() {
        let resp = error_response(&FolioError::Unavailable("no relay".into()));
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(cors_preflight().status(), StatusCode::NO_CONTENT);
    }
}
