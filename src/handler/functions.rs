//! Hosted function endpoints
//!
//! The two functions this backend exposes, one `serve_*` entry per endpoint.
//! Everything that can go wrong inside the skill endpoint collapses to the
//! fixed 500 answer; the voice-level apology is the skill's own business and
//! still travels as a 200.

use std::sync::Arc;

use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::Bytes;
use hyper::{Request, Response};

use crate::config::AppState;
use crate::http;
use crate::logger;

/// Mount path of the greeting endpoint
pub const HELLO_WORLD_PATH: &str = "/helloWorld";
/// Mount path of the skill endpoint
pub const ALEXA_SKILL_PATH: &str = "/alexaSkill";

/// Function names as they appear in the invocation log
pub const HELLO_WORLD: &str = "helloWorld";
pub const ALEXA_SKILL: &str = "alexaSkill";

/// Body of the greeting response
pub const HELLO_BODY: &str = "Hello from Firebase!";

/// The greeting endpoint: emit one structured record, answer with the fixed
/// plain-text body.
pub fn serve_hello_world() -> Response<Full<Bytes>> {
    logger::log_structured(HELLO_WORLD, "Hello logs!");
    http::build_text_response(HELLO_BODY)
}

/// The skill endpoint: read the whole request body under the configured size
/// cap, hand it to the skill, serialize whatever comes back.
pub async fn serve_alexa_skill<B>(req: Request<B>, state: &Arc<AppState>) -> Response<Full<Bytes>>
where
    B: hyper::body::Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    // Limited stops reading once the cap is crossed, so an oversized body is
    // rejected instead of buffered whole.
    let max_body_size = state.config.functions.max_body_size;
    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);

    match Limited::new(req.into_body(), limit).collect().await {
        Ok(collected) => alexa_response(&collected.to_bytes(), state),
        Err(err) if err.is::<LengthLimitError>() => {
            logger::log_warning(&format!(
                "Request body too large on {ALEXA_SKILL_PATH} (max: {max_body_size} bytes)"
            ));
            http::build_413_response()
        }
        Err(err) => {
            logger::log_error(&format!("Failed to read skill request body: {err}"));
            http::build_skill_error_response()
        }
    }
}

/// Turn one collected request body into the endpoint's HTTP answer
fn alexa_response(body: &[u8], state: &AppState) -> Response<Full<Bytes>> {
    match state.skill.invoke(body) {
        Ok(envelope) => match serde_json::to_string(&envelope) {
            Ok(json) => http::build_json_response(json),
            Err(err) => {
                logger::log_error(&format!("Failed to serialize skill response: {err}"));
                http::build_skill_error_response()
            }
        },
        Err(err) => {
            logger::log_error(&format!("Alexa invocation failed: {err}"));
            http::build_skill_error_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn make_state() -> Arc<AppState> {
        let config = Config::load_from("missing-test-config").unwrap();
        Arc::new(AppState::new(&config))
    }

    fn skill_request(body: &str) -> Request<Full<Bytes>> {
        Request::builder()
            .method("POST")
            .uri(ALEXA_SKILL_PATH)
            .body(Full::new(Bytes::from(body.to_string())))
            .unwrap()
    }

    async fn body_string(response: Response<Full<Bytes>>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_hello_world_answers_the_fixed_greeting() {
        let response = serve_hello_world();
        assert_eq!(response.status(), 200);
        assert_eq!(body_string(response).await, HELLO_BODY);
    }

    #[tokio::test]
    async fn test_launch_round_trip() {
        let state = make_state();
        let request = skill_request(r#"{"version":"1.0","request":{"type":"LaunchRequest"}}"#);
        let response = serve_alexa_skill(request, &state).await;
        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["Content-Type"], "application/json");

        let value: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(value["version"], "1.0");
        assert_eq!(value["sessionAttributes"], serde_json::json!({}));
        assert_eq!(value["response"]["outputSpeech"]["type"], "PlainText");
        assert_eq!(
            value["response"]["outputSpeech"]["text"],
            "Welcome to My Skill. Ask me for a fact."
        );
        assert_eq!(value["response"]["shouldEndSession"], false);
    }

    #[tokio::test]
    async fn test_get_fact_round_trip() {
        let state = make_state();
        let request = skill_request(
            r#"{"request":{"type":"IntentRequest","intent":{"name":"GetFactIntent"}}}"#,
        );
        let response = serve_alexa_skill(request, &state).await;
        assert_eq!(response.status(), 200);

        let value: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        let text = value["response"]["outputSpeech"]["text"].as_str().unwrap();
        assert!(state.config.skill.facts.iter().any(|fact| fact == text));
        assert!(value["response"].get("reprompt").is_none());
        assert!(value["response"].get("shouldEndSession").is_none());
    }

    #[tokio::test]
    async fn test_stop_round_trip() {
        let state = make_state();
        let request = skill_request(
            r#"{"request":{"type":"IntentRequest","intent":{"name":"AMAZON.StopIntent"}}}"#,
        );
        let response = serve_alexa_skill(request, &state).await;
        assert_eq!(response.status(), 200);

        let value: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(value["response"]["outputSpeech"]["text"], "Goodbye!");
    }

    #[tokio::test]
    async fn test_unhandled_type_still_travels_as_200() {
        let state = make_state();
        let request = skill_request(r#"{"request":{"type":"SessionEndedRequest"}}"#);
        let response = serve_alexa_skill(request, &state).await;
        assert_eq!(response.status(), 200);

        let value: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(
            value["response"]["outputSpeech"]["text"],
            "Sorry, I had trouble connecting to my Firebase brain."
        );
    }

    #[tokio::test]
    async fn test_unparseable_body_gets_the_fixed_500() {
        let state = make_state();
        let response = serve_alexa_skill(skill_request("not json"), &state).await;
        assert_eq!(response.status(), 500);
        assert_eq!(body_string(response).await, http::SKILL_ERROR_BODY);
    }

    #[tokio::test]
    async fn test_empty_body_gets_the_fixed_500() {
        let state = make_state();
        let response = serve_alexa_skill(skill_request(""), &state).await;
        assert_eq!(response.status(), 500);
        assert_eq!(body_string(response).await, http::SKILL_ERROR_BODY);
    }

    #[tokio::test]
    async fn test_envelope_without_a_request_gets_the_fixed_500() {
        let state = make_state();
        let response = serve_alexa_skill(skill_request(r#"{"version":"1.0"}"#), &state).await;
        assert_eq!(response.status(), 500);
        assert_eq!(body_string(response).await, http::SKILL_ERROR_BODY);
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected_with_413() {
        let state = make_state();
        let max = usize::try_from(state.config.functions.max_body_size).unwrap();
        let request = skill_request(&"x".repeat(max + 1));
        let response = serve_alexa_skill(request, &state).await;
        assert_eq!(response.status(), 413);
        assert_eq!(body_string(response).await, "Request body too large");
    }

    #[tokio::test]
    async fn test_body_at_the_cap_is_still_read() {
        let state = make_state();
        let max = usize::try_from(state.config.functions.max_body_size).unwrap();
        let response = serve_alexa_skill(skill_request(&"x".repeat(max)), &state).await;
        // Read in full and handed to the skill, which rejects it as JSON
        assert_eq!(response.status(), 500);
        assert_eq!(body_string(response).await, http::SKILL_ERROR_BODY);
    }
}
