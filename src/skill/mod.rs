//! Voice-skill dispatch core
//!
//! `Skill` owns the ordered handler registry and the fact catalog. One
//! invocation is: parse the request envelope, walk the handlers in
//! registration order, run the first one whose `can_handle` accepts the
//! envelope. Faults inside a handler resolve to the apology response, so a
//! parseable envelope always comes back with a valid voice response.

mod envelope;
mod facts;
mod handlers;
mod response;

use std::fmt;

use rand::Rng;

use crate::logger;

pub use envelope::{RequestEnvelope, ResponseEnvelope};
pub use facts::{FactCatalog, DEFAULT_FACTS};
pub use handlers::{apology_response, SkillHandler};

/// Fault surfaced by [`Skill::invoke`] when no voice response can be
/// produced. The transport layer maps it to its error status.
#[derive(Debug)]
pub enum SkillError {
    /// The request body is not a parseable request envelope.
    Parse(serde_json::Error),
}

impl fmt::Display for SkillError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "failed to parse request envelope: {err}"),
        }
    }
}

impl std::error::Error for SkillError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
        }
    }
}

/// The assembled skill: ordered handlers plus the fact catalog.
#[derive(Debug, Clone)]
pub struct Skill {
    handlers: Vec<SkillHandler>,
    catalog: FactCatalog,
}

impl Skill {
    pub fn builder() -> SkillBuilder {
        SkillBuilder::new()
    }

    /// One full invocation: parse the raw request body and dispatch it.
    pub fn invoke(&self, body: &[u8]) -> Result<ResponseEnvelope, SkillError> {
        let envelope: RequestEnvelope =
            serde_json::from_slice(body).map_err(SkillError::Parse)?;
        Ok(self.dispatch(&envelope, &mut rand::thread_rng()))
    }

    /// First-match dispatch over the registered handlers.
    pub fn dispatch<R: Rng + ?Sized>(
        &self,
        envelope: &RequestEnvelope,
        rng: &mut R,
    ) -> ResponseEnvelope {
        for handler in &self.handlers {
            if !handler.can_handle(envelope) {
                continue;
            }
            match handler.handle(envelope, &self.catalog, rng) {
                Ok(response) => return response,
                Err(err) => {
                    logger::log_error(&format!("{handler} failed: {err}"));
                    return apology_response();
                }
            }
        }
        // Reachable only when the catch-all was not registered.
        logger::log_error(&format!(
            "No handler registered for request type '{}'",
            envelope.request.request_type
        ));
        apology_response()
    }
}

/// Builds a [`Skill`]; handler order is dispatch precedence.
#[derive(Debug, Default)]
pub struct SkillBuilder {
    handlers: Vec<SkillHandler>,
    catalog: FactCatalog,
}

impl SkillBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn add_handler(mut self, handler: SkillHandler) -> Self {
        self.handlers.push(handler);
        self
    }

    #[must_use]
    pub fn with_catalog(mut self, catalog: FactCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn build(self) -> Skill {
        Skill {
            handlers: self.handlers,
            catalog: self.catalog,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::handlers::{
        APOLOGY_SPEECH, CANCEL_INTENT, GET_FACT_INTENT, GOODBYE_SPEECH, STOP_INTENT,
        WELCOME_SPEECH,
    };
    use super::*;

    fn make_skill() -> Skill {
        Skill::builder()
            .add_handler(SkillHandler::Launch)
            .add_handler(SkillHandler::GetFact)
            .add_handler(SkillHandler::CancelOrStop)
            .add_handler(SkillHandler::Error)
            .build()
    }

    fn launch_envelope() -> RequestEnvelope {
        serde_json::from_str(r#"{"request":{"type":"LaunchRequest"}}"#).unwrap()
    }

    fn intent_envelope(name: &str) -> RequestEnvelope {
        serde_json::from_str(&format!(
            r#"{{"request":{{"type":"IntentRequest","intent":{{"name":"{name}"}}}}}}"#
        ))
        .unwrap()
    }

    fn spoken_text(envelope: &ResponseEnvelope) -> &str {
        envelope
            .response
            .output_speech
            .as_ref()
            .expect("response should carry spoken text")
            .text
            .as_str()
    }

    #[test]
    fn test_launch_speaks_welcome_with_reprompt() {
        let skill = make_skill();
        let mut rng = StdRng::seed_from_u64(1);
        let response = skill.dispatch(&launch_envelope(), &mut rng);
        assert_eq!(spoken_text(&response), WELCOME_SPEECH);
        let reprompt = response.response.reprompt.as_ref().unwrap();
        assert_eq!(reprompt.output_speech.text, WELCOME_SPEECH);
        assert_eq!(response.response.should_end_session, Some(false));
    }

    #[test]
    fn test_get_fact_speaks_a_catalog_entry() {
        let skill = make_skill();
        let mut rng = StdRng::seed_from_u64(2);
        let response = skill.dispatch(&intent_envelope(GET_FACT_INTENT), &mut rng);
        assert!(DEFAULT_FACTS.contains(&spoken_text(&response)));
        assert!(response.response.reprompt.is_none());
        assert!(response.response.should_end_session.is_none());
    }

    #[test]
    fn test_repeated_invocations_reach_every_fact() {
        let skill = make_skill();
        let envelope = intent_envelope(GET_FACT_INTENT);
        let mut rng = StdRng::seed_from_u64(3);
        let mut seen = HashSet::new();
        for _ in 0..1000 {
            let response = skill.dispatch(&envelope, &mut rng);
            seen.insert(spoken_text(&response).to_string());
        }
        assert_eq!(seen.len(), DEFAULT_FACTS.len());
    }

    #[test]
    fn test_cancel_and_stop_both_say_goodbye() {
        let skill = make_skill();
        let mut rng = StdRng::seed_from_u64(4);
        for name in [CANCEL_INTENT, STOP_INTENT] {
            let response = skill.dispatch(&intent_envelope(name), &mut rng);
            assert_eq!(spoken_text(&response), GOODBYE_SPEECH);
            assert!(response.response.reprompt.is_none());
        }
    }

    #[test]
    fn test_unhandled_request_type_gets_the_apology() {
        let skill = make_skill();
        let mut rng = StdRng::seed_from_u64(5);
        let envelope: RequestEnvelope =
            serde_json::from_str(r#"{"request":{"type":"SessionEndedRequest"}}"#).unwrap();
        let response = skill.dispatch(&envelope, &mut rng);
        assert_eq!(spoken_text(&response), APOLOGY_SPEECH);
    }

    #[test]
    fn test_unknown_intent_gets_the_apology() {
        let skill = make_skill();
        let mut rng = StdRng::seed_from_u64(6);
        let response = skill.dispatch(&intent_envelope("WeatherIntent"), &mut rng);
        assert_eq!(spoken_text(&response), APOLOGY_SPEECH);
    }

    #[test]
    fn test_handler_fault_is_recovered_with_the_apology() {
        // An empty catalog makes GetFact fail; dispatch must still answer.
        let skill = Skill::builder()
            .with_catalog(FactCatalog::new(Vec::new()))
            .add_handler(SkillHandler::GetFact)
            .add_handler(SkillHandler::Error)
            .build();
        let mut rng = StdRng::seed_from_u64(7);
        let response = skill.dispatch(&intent_envelope(GET_FACT_INTENT), &mut rng);
        assert_eq!(spoken_text(&response), APOLOGY_SPEECH);
    }

    #[test]
    fn test_dispatch_without_a_catch_all_still_answers() {
        let skill = Skill::builder().add_handler(SkillHandler::Launch).build();
        let mut rng = StdRng::seed_from_u64(8);
        let response = skill.dispatch(&intent_envelope(GET_FACT_INTENT), &mut rng);
        assert_eq!(spoken_text(&response), APOLOGY_SPEECH);
    }

    #[test]
    fn test_registration_order_decides_precedence() {
        // A catch-all registered first shadows everything behind it.
        let skill = Skill::builder()
            .add_handler(SkillHandler::Error)
            .add_handler(SkillHandler::Launch)
            .build();
        let mut rng = StdRng::seed_from_u64(9);
        let response = skill.dispatch(&launch_envelope(), &mut rng);
        assert_eq!(spoken_text(&response), APOLOGY_SPEECH);
    }

    #[test]
    fn test_invoke_parses_and_dispatches() {
        let skill = make_skill();
        let body = br#"{"version":"1.0","request":{"type":"LaunchRequest","requestId":"r-1"}}"#;
        let response = skill.invoke(body).unwrap();
        assert_eq!(spoken_text(&response), WELCOME_SPEECH);
    }

    #[test]
    fn test_invoke_rejects_invalid_json() {
        let skill = make_skill();
        let err = skill.invoke(b"not json").unwrap_err();
        assert!(matches!(err, SkillError::Parse(_)));
    }

    #[test]
    fn test_invoke_rejects_a_body_without_a_request() {
        let skill = make_skill();
        let err = skill.invoke(br#"{"version":"1.0"}"#).unwrap_err();
        assert!(matches!(err, SkillError::Parse(_)));
    }
}
