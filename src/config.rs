/// Configuration Module
///
/// Provides configuration management for the registration flow client.
/// Handles loading of the YAML configuration file and environment variable
/// overrides. Every section carries defaults so the client starts without a file.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use config::{Config as ConfigFile, Environment, File};

/// Application metadata configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Application {
    /// Name of the application
    #[serde(default = "default_application_name")]
    pub name: String,
}

/// Registration service endpoint configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Base URL of the registration service
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path of the phone lookup endpoint
    #[serde(default = "default_check_user_path")]
    pub check_user_path: String,
    /// Path of the email registration endpoint
    #[serde(default = "default_register_email_path")]
    pub register_email_path: String,
    /// Request timeout in seconds; unset leaves the HTTP client default
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

/// Stage flow presentation configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FlowConfig {
    /// Time the leaving panel needs to fade out before the swap, in milliseconds
    #[serde(default = "default_transition_settle_ms")]
    pub transition_settle_ms: u64,
}

/// User-visible messages
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Messages {
    #[serde(default = "default_empty_phone")]
    pub empty_phone: String,
    #[serde(default = "default_invalid_email")]
    pub invalid_email: String,
    /// Shown when a lookup fails without a server message
    #[serde(default = "default_lookup_failed")]
    pub lookup_failed: String,
    /// Shown when a registration fails without a server message
    #[serde(default = "default_register_failed")]
    pub register_failed: String,
    #[serde(default = "default_connection_error")]
    pub connection_error: String,
    #[serde(default = "default_phone_not_verified")]
    pub phone_not_verified: String,
}

/// Control labels
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Labels {
    #[serde(default = "default_check_idle")]
    pub check_idle: String,
    #[serde(default = "default_check_busy")]
    pub check_busy: String,
    #[serde(default = "default_submit_idle")]
    pub submit_idle: String,
    #[serde(default = "default_submit_busy")]
    pub submit_busy: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogConfig {
    /// Filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Application configuration settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub application: Application,
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub flow: FlowConfig,
    #[serde(default)]
    pub messages: Messages,
    #[serde(default)]
    pub labels: Labels,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    ParseError(String),
    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl Config {
    /// Creates a new Config instance by loading and merging configuration from multiple sources.
    ///
    /// # Configuration Sources
    /// Configuration is loaded in the following order (later sources override earlier ones):
    /// 1. Base configuration (`config/application.yml`, optional)
    /// 2. Environment variables (prefixed with `APP`, nested with `__`,
    ///    e.g. `APP__SERVICE__BASE_URL`)
    ///
    /// # Errors
    /// Returns a `ConfigError` if values cannot be parsed or fail validation.
    pub fn new() -> Result<Self, ConfigError> {
        Self::load("config/application")
    }

    /// Loads configuration from the given file stem plus the `APP` environment.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let builder = ConfigFile::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("APP").separator("__"));

        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.service.base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue("service.base_url is empty".into()));
        }
        if self.service.request_timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue(
                "service.request_timeout_secs must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Returns the settle delay of a panel transition.
    pub fn transition_settle(&self) -> Duration {
        Duration::from_millis(self.flow.transition_settle_ms)
    }
}

impl Default for Application {
    fn default() -> Self {
        Self {
            name: default_application_name(),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            check_user_path: default_check_user_path(),
            register_email_path: default_register_email_path(),
            request_timeout_secs: None,
        }
    }
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            transition_settle_ms: default_transition_settle_ms(),
        }
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            empty_phone: default_empty_phone(),
            invalid_email: default_invalid_email(),
            lookup_failed: default_lookup_failed(),
            register_failed: default_register_failed(),
            connection_error: default_connection_error(),
            phone_not_verified: default_phone_not_verified(),
        }
    }
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            check_idle: default_check_idle(),
            check_busy: default_check_busy(),
            submit_idle: default_submit_idle(),
            submit_busy: default_submit_busy(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_application_name() -> String {
    "registration-flow".into()
}

fn default_base_url() -> String {
    "http://localhost:8000".into()
}

fn default_check_user_path() -> String {
    "/api/check_user".into()
}

fn default_register_email_path() -> String {
    "/api/register_email".into()
}

fn default_transition_settle_ms() -> u64 {
    300
}

fn default_empty_phone() -> String {
    "Por favor, escribe un número.".into()
}

fn default_invalid_email() -> String {
    "Por favor, escribe un email válido.".into()
}

fn default_lookup_failed() -> String {
    "Error al buscar el número.".into()
}

fn default_register_failed() -> String {
    "Error al registrar el email.".into()
}

fn default_connection_error() -> String {
    "Error de conexión.".into()
}

fn default_phone_not_verified() -> String {
    "Primero verifica tu número.".into()
}

fn default_check_idle() -> String {
    "Continuar".into()
}

fn default_check_busy() -> String {
    "Buscando...".into()
}

fn default_submit_idle() -> String {
    "Enviar".into()
}

fn default_submit_busy() -> String {
    "Enviando...".into()
}

fn default_log_level() -> String {
    "info".into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = Config::load("config/does-not-exist").unwrap();
        assert_eq!(config.service.check_user_path, "/api/check_user");
        assert_eq!(config.service.register_email_path, "/api/register_email");
        assert_eq!(config.service.request_timeout_secs, None);
        assert_eq!(config.transition_settle(), Duration::from_millis(300));
        assert_eq!(config.messages.connection_error, "Error de conexión.");
        assert_eq!(config.labels.check_busy, "Buscando...");
    }

    #[test]
    fn test_bundled_file_matches_defaults() {
        let config = Config::load(concat!(env!("CARGO_MANIFEST_DIR"), "/config/application")).unwrap();
        assert_eq!(config.messages, Messages::default());
        assert_eq!(config.labels, Labels::default());
        assert_eq!(config.service.base_url, "http://localhost:8000");
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default();
        config.service.request_timeout_secs = Some(0);
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue(_))));
    }
}
