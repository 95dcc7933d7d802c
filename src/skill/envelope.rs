//! Skill wire types
//!
//! Request and response envelopes for the voice platform's skill-invocation
//! protocol. Only the fields this backend derives behavior from are modeled
//! on the request side; serde tolerates and ignores the rest of the platform
//! payload. The response side serializes to the exact field names the
//! platform schema dictates.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Wire value of the launch request type.
pub const LAUNCH_REQUEST_TYPE: &str = "LaunchRequest";
/// Wire value of the intent request type.
pub const INTENT_REQUEST_TYPE: &str = "IntentRequest";

/// Request classification derived from the envelope's `request.type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestType {
    Launch,
    Intent,
    /// Any request type this skill has no handler for
    /// (e.g. `SessionEndedRequest`).
    Other,
}

/// Inbound request envelope, read-only for the duration of one invocation.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestEnvelope {
    pub request: SkillRequest,
}

/// The `request` object of the envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct SkillRequest {
    #[serde(rename = "type")]
    pub request_type: String,
    #[serde(default)]
    pub intent: Option<Intent>,
}

/// A resolved user intent, present on intent requests.
#[derive(Debug, Clone, Deserialize)]
pub struct Intent {
    pub name: String,
}

impl RequestEnvelope {
    /// Classify the envelope by its wire request type.
    pub fn request_type(&self) -> RequestType {
        match self.request.request_type.as_str() {
            LAUNCH_REQUEST_TYPE => RequestType::Launch,
            INTENT_REQUEST_TYPE => RequestType::Intent,
            _ => RequestType::Other,
        }
    }

    /// Intent name, when the envelope carries one.
    pub fn intent_name(&self) -> Option<&str> {
        self.request
            .intent
            .as_ref()
            .map(|intent| intent.name.as_str())
    }
}

/// Outbound response envelope. Built fresh per invocation, serialized once
/// and discarded.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub version: String,
    pub session_attributes: Map<String, Value>,
    pub response: SkillResponse,
}

/// The `response` object of the envelope. `reprompt` and `shouldEndSession`
/// are omitted from the JSON entirely when unset.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub should_end_session: Option<bool>,
}

/// Spoken output in the platform's plain-text form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputSpeech {
    #[serde(rename = "type")]
    pub speech_type: SpeechType,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpeechType {
    PlainText,
}

/// Speech replayed when the user stays silent; implies the session stays
/// open.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

impl OutputSpeech {
    pub fn plain(text: &str) -> Self {
        Self {
            speech_type: SpeechType::PlainText,
            text: text.to_string(),
        }
    }
}
