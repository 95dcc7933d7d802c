//! Request handlers
//!
//! The fixed set of handlers this skill registers, modeled as a flat enum
//! with the `can_handle`/`handle` capability pair. Registration order decides
//! dispatch precedence; the `Error` variant matches everything and goes last
//! as the catch-all.

use std::fmt;

use rand::Rng;

use crate::logger;

use super::envelope::{RequestEnvelope, RequestType, ResponseEnvelope};
use super::facts::FactCatalog;
use super::response::ResponseBuilder;

/// Intent name the fact skill answers.
pub const GET_FACT_INTENT: &str = "GetFactIntent";
/// Built-in intent names that close the session.
pub const CANCEL_INTENT: &str = "AMAZON.CancelIntent";
pub const STOP_INTENT: &str = "AMAZON.StopIntent";

/// Spoken on launch, and replayed as the reprompt.
pub const WELCOME_SPEECH: &str = "Welcome to My Skill. Ask me for a fact.";
/// Spoken for cancel and stop.
pub const GOODBYE_SPEECH: &str = "Goodbye!";
/// Spoken whenever the skill cannot produce a real answer.
pub const APOLOGY_SPEECH: &str = "Sorry, I had trouble connecting to my Firebase brain.";

/// A registered request handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillHandler {
    Launch,
    GetFact,
    CancelOrStop,
    /// Catch-all; accepts any envelope.
    Error,
}

/// Fault raised while a handler runs. Dispatch recovers it with the apology
/// response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerError {
    EmptyCatalog,
}

impl SkillHandler {
    /// Whether this handler accepts the envelope.
    pub fn can_handle(&self, envelope: &RequestEnvelope) -> bool {
        match self {
            Self::Launch => envelope.request_type() == RequestType::Launch,
            Self::GetFact => {
                envelope.request_type() == RequestType::Intent
                    && envelope.intent_name() == Some(GET_FACT_INTENT)
            }
            Self::CancelOrStop => {
                envelope.request_type() == RequestType::Intent
                    && matches!(envelope.intent_name(), Some(CANCEL_INTENT | STOP_INTENT))
            }
            Self::Error => true,
        }
    }

    /// Produce the response envelope for an accepted request.
    pub fn handle<R: Rng + ?Sized>(
        &self,
        envelope: &RequestEnvelope,
        catalog: &FactCatalog,
        rng: &mut R,
    ) -> Result<ResponseEnvelope, HandlerError> {
        match self {
            Self::Launch => Ok(ResponseBuilder::new()
                .speak(WELCOME_SPEECH)
                .reprompt(WELCOME_SPEECH)
                .build()),
            Self::GetFact => {
                let fact = catalog.pick(rng).ok_or(HandlerError::EmptyCatalog)?;
                Ok(ResponseBuilder::new().speak(fact).build())
            }
            Self::CancelOrStop => Ok(ResponseBuilder::new().speak(GOODBYE_SPEECH).build()),
            Self::Error => {
                logger::log_error(&format!(
                    "Request type '{}' fell through to the error handler",
                    envelope.request.request_type
                ));
                Ok(apology_response())
            }
        }
    }
}

/// The fixed apology envelope, shared by the catch-all handler and the
/// dispatch fault path.
pub fn apology_response() -> ResponseEnvelope {
    ResponseBuilder::new().speak(APOLOGY_SPEECH).build()
}

impl fmt::Display for SkillHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Launch => write!(f, "LaunchRequestHandler"),
            Self::GetFact => write!(f, "GetFactIntentHandler"),
            Self::CancelOrStop => write!(f, "CancelAndStopIntentHandler"),
            Self::Error => write!(f, "ErrorHandler"),
        }
    }
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCatalog => write!(f, "fact catalog is empty"),
        }
    }
}

impl std::error::Error for HandlerError {}
