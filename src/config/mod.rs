// Configuration module entry point
// Manages host configuration and shared application state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::Config;

impl Config {
    /// Load configuration from specified file path (without extension)
    /// Default config file is "config.toml" when no path specified
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("SKILL"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("functions.max_instances", 10)?
            .set_default("functions.max_body_size", 10_485_760)? // 10MB
            .set_default("functions.instance_timeout", 60)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the default `config.*` search path
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Reject configurations the host cannot serve
    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.functions.max_instances == 0 {
            return Err(config::ConfigError::Message(
                "functions.max_instances must be at least 1".to_string(),
            ));
        }
        if self.functions.instance_timeout == 0 {
            return Err(config::ConfigError::Message(
                "functions.instance_timeout must be at least 1 second".to_string(),
            ));
        }
        if self.skill.facts.is_empty() {
            return Err(config::ConfigError::Message(
                "skill.facts must contain at least one fact".to_string(),
            ));
        }
        if self.skill.facts.iter().any(|fact| fact.trim().is_empty()) {
            return Err(config::ConfigError::Message(
                "skill.facts entries must not be blank".to_string(),
            ));
        }
        Ok(())
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skill::DEFAULT_FACTS;

    fn defaults() -> Config {
        // No file by that name, so only defaults apply
        Config::load_from("missing-test-config").unwrap()
    }

    #[test]
    fn test_defaults_when_no_file_is_present() {
        let config = defaults();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert!(config.server.workers.is_none());
        assert_eq!(config.functions.max_instances, 10);
        assert_eq!(config.functions.max_body_size, 10_485_760);
        assert_eq!(config.functions.instance_timeout, 60);
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.access_log);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.skill.facts, DEFAULT_FACTS);
    }

    #[test]
    fn test_zero_max_instances_is_rejected() {
        let mut config = defaults();
        config.functions.max_instances = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_instance_timeout_is_rejected() {
        let mut config = defaults();
        config.functions.instance_timeout = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_fact_catalog_is_rejected() {
        let mut config = defaults();
        config.skill.facts.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_fact_is_rejected() {
        let mut config = defaults();
        config.skill.facts.push("   ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_socket_addr_combines_host_and_port() {
        let config = defaults();
        let addr = config.get_socket_addr().unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn test_invalid_host_is_reported() {
        let mut config = defaults();
        config.server.host = "not a host".to_string();
        assert!(config.get_socket_addr().is_err());
    }
}
