use serde::{Deserialize, Serialize};

use crate::api::middleware::error_handling::ErrorHandlingConfig;

/// Deployment environment; production suppresses internal detail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Production,
    Development,
    Test,
}

impl Default for Environment {
    /// Production unless built with debug assertions
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Environment::Development
        } else {
            Environment::Production
        }
    }
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    /// Lenient parse: anything unrecognized is development
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            "test" => Environment::Test,
            _ => Environment::Development,
        }
    }
}

/// Log output format for the binary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {value} - {reason}")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub listen_addr: String,
    pub log_format: String,
    pub trust_proxy_headers: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            environment: std::env::var("APP_ENV")
                .or_else(|_| std::env::var("ENVIRONMENT"))
                .map(|value| Environment::parse(&value))
                .unwrap_or_default(),
            listen_addr: std::env::var("LISTEN_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            log_format: std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
            trust_proxy_headers: std::env::var("TRUST_PROXY_HEADERS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(false),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.listen_addr.parse::<std::net::SocketAddr>().is_err() {
            return Err(ConfigError::Invalid {
                key: "LISTEN_ADDR".to_string(),
                value: self.listen_addr.clone(),
                reason: "expected host:port".to_string(),
            });
        }

        self.parsed_log_format()?;

        Ok(())
    }

    pub fn parsed_log_format(&self) -> Result<LogFormat, ConfigError> {
        match self.log_format.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::Invalid {
                key: "LOG_FORMAT".to_string(),
                value: self.log_format.clone(),
                reason: "expected pretty or json".to_string(),
            }),
        }
    }

    /// Error boundary settings derived from this configuration
    pub fn error_handling(&self) -> ErrorHandlingConfig {
        ErrorHandlingConfig::new()
            .with_environment(self.environment)
            .with_proxy_headers(self.trust_proxy_headers)
    }
}
