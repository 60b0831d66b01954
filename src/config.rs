//! Configuration loading and constants.
//!
//! Configuration is read once from the process environment at startup and
//! never mutated afterwards. `AppConfig` is the root configuration struct;
//! the constants below define defaults, the recognized parameter set, and
//! the fixed response strings.

use std::env;

// =============================================================================
// Defaults
// =============================================================================

/// Default bearer token when API_TOKEN is not set
pub const DEFAULT_API_TOKEN: &str = "carlos89-api-token";

/// Default listen port when PORT is not set
pub const DEFAULT_PORT: u16 = 5000;

/// Default environment label when ENVIRONMENT is not set
pub const DEFAULT_ENVIRONMENT: &str = "production";

/// Listen address; the service always binds all interfaces
pub const LISTEN_HOST: &str = "0.0.0.0";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "tollgate=info,tower_http=info";

/// Log filter used when DEBUG=true and RUST_LOG is not set
pub const DEBUG_LOG_FILTER: &str = "tollgate=debug,tower_http=debug";

// =============================================================================
// Request / Response Contract
// =============================================================================

/// Required prefix of the Authorization header value
pub const BEARER_PREFIX: &str = "Bearer ";

/// Recognized query parameter names, in declaration order.
///
/// Requests may carry any other query parameters; those are counted but not
/// individually extracted. Extending the recognized set only requires adding
/// a name here.
pub const RECOGNIZED_PARAMS: [&str; 10] = [
    "param1", "param2", "param3", "param4", "param5", "param6", "param7", "param8", "param9",
    "param10",
];

/// Fixed message returned on successful processing
pub const SUCCESS_MESSAGE: &str = "Request processed successfully";

/// Placeholder used in `processed_data` when `param1` is absent
pub const UNKNOWN_PARAM: &str = "unknown";

/// Static uptime description returned by the health endpoint
pub const UPTIME_MESSAGE: &str = "Service is up and running";

// =============================================================================
// Configuration
// =============================================================================

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable text output (default)
    Text,
    /// Structured JSON output
    Json,
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bearer token that `/api/process` requests must present
    pub api_token: String,
    /// TCP port to listen on
    pub port: u16,
    /// Debug mode; lowers the default log filter to debug level
    pub debug: bool,
    /// Environment label reported by the health endpoint
    pub environment: String,
    /// Log output format
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load configuration from process environment variables.
    ///
    /// Recognized variables: `API_TOKEN`, `PORT`, `DEBUG`, `ENVIRONMENT`,
    /// `LOG_FORMAT`. Missing variables fall back to defaults; unparseable
    /// values are a startup error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source.
    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_token = lookup("API_TOKEN").unwrap_or_else(|| DEFAULT_API_TOKEN.to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|e| ConfigError::InvalidPort(raw, e))?,
            None => DEFAULT_PORT,
        };

        let debug = lookup("DEBUG")
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());

        let log_format = match lookup("LOG_FORMAT") {
            None => LogFormat::Text,
            Some(raw) => match raw.to_ascii_lowercase().as_str() {
                "text" => LogFormat::Text,
                "json" => LogFormat::Json,
                _ => return Err(ConfigError::InvalidLogFormat(raw)),
            },
        };

        Ok(Self {
            api_token,
            port,
            debug,
            environment,
            log_format,
        })
    }

    /// Socket address string the server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", LISTEN_HOST, self.port)
    }

    /// Default log filter, honoring the debug flag.
    pub fn default_log_filter(&self) -> &'static str {
        if self.debug {
            DEBUG_LOG_FILTER
        } else {
            DEFAULT_LOG_FILTER
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid PORT value '{0}': {1}")]
    InvalidPort(String, std::num::ParseIntError),
    #[error("Invalid LOG_FORMAT value '{0}': expected \"text\" or \"json\"")]
    InvalidLogFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let config = load(&[]).unwrap();
        assert_eq!(config.api_token, DEFAULT_API_TOKEN);
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(!config.debug);
        assert_eq!(config.environment, DEFAULT_ENVIRONMENT);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = load(&[
            ("API_TOKEN", "secret"),
            ("PORT", "8080"),
            ("DEBUG", "TRUE"),
            ("ENVIRONMENT", "staging"),
            ("LOG_FORMAT", "json"),
        ])
        .unwrap();
        assert_eq!(config.api_token, "secret");
        assert_eq!(config.port, 8080);
        assert!(config.debug);
        assert_eq!(config.environment, "staging");
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn debug_accepts_only_true() {
        assert!(!load(&[("DEBUG", "1")]).unwrap().debug);
        assert!(!load(&[("DEBUG", "yes")]).unwrap().debug);
        assert!(load(&[("DEBUG", "true")]).unwrap().debug);
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = load(&[("PORT", "not-a-port")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort(_, _)));
    }

    #[test]
    fn invalid_log_format_is_rejected() {
        let err = load(&[("LOG_FORMAT", "xml")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLogFormat(_)));
    }

    #[test]
    fn debug_flag_selects_debug_filter() {
        let config = load(&[("DEBUG", "true")]).unwrap();
        assert_eq!(config.default_log_filter(), DEBUG_LOG_FILTER);
        let config = load(&[]).unwrap();
        assert_eq!(config.default_log_filter(), DEFAULT_LOG_FILTER);
    }
}
