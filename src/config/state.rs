// Application state module
// Owns everything an invocation needs, assembled once at startup

use crate::skill::{FactCatalog, Skill, SkillHandler};

use super::types::Config;

/// Application state shared by every connection
pub struct AppState {
    pub config: Config,
    pub skill: Skill,
}

impl AppState {
    /// Assemble the state from a validated configuration. Handler
    /// registration order is dispatch precedence; the catch-all goes last.
    pub fn new(config: &Config) -> Self {
        let catalog = FactCatalog::new(config.skill.facts.clone());
        let skill = Skill::builder()
            .with_catalog(catalog)
            .add_handler(SkillHandler::Launch)
            .add_handler(SkillHandler::GetFact)
            .add_handler(SkillHandler::CancelOrStop)
            .add_handler(SkillHandler::Error)
            .build();

        Self {
            config: config.clone(),
            skill,
        }
    }
}
