// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

use crate::skill::DEFAULT_FACTS;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub functions: FunctionsConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub skill: SkillConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Function-hosting configuration
#[derive(Debug, Deserialize, Clone)]
pub struct FunctionsConfig {
    /// Upper bound on concurrently served instances
    pub max_instances: u64,
    /// Largest request body an invocation will read, in bytes
    pub max_body_size: u64,
    /// Seconds one instance (connection) may stay open before the host
    /// reclaims its slot
    pub instance_timeout: u64,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    /// Write one log line per function invocation
    pub access_log: bool,
    /// Invocation log format (json or plain)
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Invocation log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_log_format() -> String {
    "json".to_string()
}

/// Skill content configuration
#[derive(Debug, Deserialize, Clone)]
pub struct SkillConfig {
    /// Facts the skill draws from
    #[serde(default = "default_facts")]
    pub facts: Vec<String>,
}

fn default_facts() -> Vec<String> {
    DEFAULT_FACTS.iter().map(ToString::to_string).collect()
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self {
            facts: default_facts(),
        }
    }
}
