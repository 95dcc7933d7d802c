//! HTTP response building module
//!
//! Provides builders for the response shapes the host emits, decoupled from
//! specific function logic.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Body of the 500 answer when the skill endpoint cannot produce a response.
pub const SKILL_ERROR_BODY: &str = "Error processing the Alexa request";

/// Build 200 plain-text response
pub fn build_text_response(content: &'static str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(200)
        .header("Content-Type", "text/plain; charset=utf-8")
        .body(Full::new(Bytes::from_static(content.as_bytes())))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::from_static(content.as_bytes())))
        })
}

/// Build 200 JSON response
pub fn build_json_response(content: String) -> Response<Full<Bytes>> {
    let body = Bytes::from(content);
    Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .body(Full::new(body.clone()))
        .unwrap_or_else(|e| {
            log_build_error("200 JSON", &e);
            Response::new(Full::new(body))
        })
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("Function not found")))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from("Function not found")))
        })
}

/// Build 413 Payload Too Large response
pub fn build_413_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(413)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("Request body too large")))
        .unwrap_or_else(|e| {
            log_build_error("413", &e);
            Response::new(Full::new(Bytes::from("Request body too large")))
        })
}

/// Build the fixed 500 response for a failed skill invocation
pub fn build_skill_error_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(500)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from_static(SKILL_ERROR_BODY.as_bytes())))
        .unwrap_or_else(|e| {
            log_build_error("500", &e);
            Response::new(Full::new(Bytes::from_static(SKILL_ERROR_BODY.as_bytes())))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
