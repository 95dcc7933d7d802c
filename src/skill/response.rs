//! Response builder
//!
//! Chained `speak`/`reprompt` construction of response envelopes, ending in
//! `build`.

use serde_json::Map;

use super::envelope::{OutputSpeech, Reprompt, ResponseEnvelope, SkillResponse};

/// Envelope version this backend emits.
const ENVELOPE_VERSION: &str = "1.0";

#[derive(Debug, Default)]
pub struct ResponseBuilder {
    output_speech: Option<OutputSpeech>,
    reprompt: Option<Reprompt>,
    should_end_session: Option<bool>,
}

impl ResponseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the spoken output.
    #[must_use]
    pub fn speak(mut self, text: &str) -> Self {
        self.output_speech = Some(OutputSpeech::plain(text));
        self
    }

    /// Set the reprompt speech. A reprompt only makes sense while the session
    /// stays open, so this also marks the session as not ending.
    #[must_use]
    pub fn reprompt(mut self, text: &str) -> Self {
        self.reprompt = Some(Reprompt {
            output_speech: OutputSpeech::plain(text),
        });
        self.should_end_session = Some(false);
        self
    }

    pub fn build(self) -> ResponseEnvelope {
        ResponseEnvelope {
            version: ENVELOPE_VERSION.to_string(),
            session_attributes: Map::new(),
            response: SkillResponse {
                output_speech: self.output_speech,
                reprompt: self.reprompt,
                should_end_session: self.should_end_session,
            },
        }
    }
}
