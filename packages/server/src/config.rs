//! Server configuration
//!
//! Every setting has a default and can be overridden through the
//! environment. Values that fail to parse are logged and replaced by the
//! default so a typo never keeps the server from starting; `validate()`
//! catches settings that parse but cannot work.

use axum::http::HeaderValue;
use std::net::IpAddr;
use std::path::PathBuf;
use thiserror::Error;
use trivia_core::QUESTIONS_PER_PAGE;

pub const ENV_PORT: &str = "TRIVIA_SERVER_PORT";
pub const ENV_BIND_ADDRESS: &str = "TRIVIA_BIND_ADDRESS";
pub const ENV_DB_PATH: &str = "TRIVIA_DB_PATH";
pub const ENV_CORS_ALLOW_ORIGIN: &str = "CORS_ALLOW_ORIGIN";
pub const ENV_QUESTIONS_PER_PAGE: &str = "TRIVIA_QUESTIONS_PER_PAGE";
pub const ENV_QUIZ_SEED: &str = "TRIVIA_QUIZ_SEED";
pub const ENV_SEED_CATEGORIES: &str = "TRIVIA_SEED_CATEGORIES";

pub const DEFAULT_PORT: u16 = 3001;

/// Configuration errors reported by [`ServerConfig::validate`]
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Port must be non-zero")]
    InvalidPort,

    #[error("Questions per page must be at least 1")]
    InvalidPageSize,

    #[error("Invalid CORS origin '{0}'")]
    InvalidCorsOrigin(String),
}

/// Runtime settings for `trivia-server`
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    pub bind_address: IpAddr,
    pub database_path: PathBuf,
    /// `None` allows any origin
    pub cors_allow_origin: Option<String>,
    pub questions_per_page: usize,
    /// Fixed quiz seed; `None` draws from OS entropy
    pub quiz_seed: Option<u64>,
    /// Insert the default categories into an empty database at startup
    pub seed_categories: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind_address: IpAddr::from([127, 0, 0, 1]),
            database_path: default_database_path(),
            cors_allow_origin: None,
            questions_per_page: QUESTIONS_PER_PAGE,
            quiz_seed: None,
            seed_categories: true,
        }
    }
}

/// `~/.trivia/database/trivia.db`, or `trivia.db` in the working directory
/// when there is no home directory
pub fn default_database_path() -> PathBuf {
    match dirs::home_dir() {
        Some(home) => home.join(".trivia").join("database").join("trivia.db"),
        None => PathBuf::from("trivia.db"),
    }
}

impl ServerConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which returns the raw value of
    /// a variable if it is set
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            port: parse_or(&lookup, ENV_PORT, defaults.port),
            bind_address: parse_or(&lookup, ENV_BIND_ADDRESS, defaults.bind_address),
            database_path: lookup(ENV_DB_PATH)
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),
            cors_allow_origin: lookup(ENV_CORS_ALLOW_ORIGIN)
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty()),
            questions_per_page: parse_or(
                &lookup,
                ENV_QUESTIONS_PER_PAGE,
                defaults.questions_per_page,
            ),
            quiz_seed: lookup(ENV_QUIZ_SEED).and_then(|raw| match raw.trim().parse() {
                Ok(seed) => Some(seed),
                Err(_) => {
                    tracing::warn!("Ignoring unparseable {}='{}'", ENV_QUIZ_SEED, raw);
                    None
                }
            }),
            seed_categories: lookup(ENV_SEED_CATEGORIES)
                .map(|raw| parse_flag(ENV_SEED_CATEGORIES, &raw, defaults.seed_categories))
                .unwrap_or(defaults.seed_categories),
        }
    }

    /// Check settings that parsed but cannot be used
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidPort);
        }

        if self.questions_per_page == 0 {
            return Err(ConfigError::InvalidPageSize);
        }

        if let Some(origin) = &self.cors_allow_origin {
            HeaderValue::from_str(origin)
                .map_err(|_| ConfigError::InvalidCorsOrigin(origin.clone()))?;
        }

        Ok(())
    }

    /// `bind_address:port`
    pub fn socket_address(&self) -> std::net::SocketAddr {
        std::net::SocketAddr::new(self.bind_address, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + std::fmt::Debug,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring unparseable {}='{}', using {:?}", key, raw, default);
            default
        }),
        None => default,
    }
}

fn parse_flag(key: &str, raw: &str, default: bool) -> bool {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => {
            tracing::warn!("Ignoring unparseable {}='{}', using {}", key, raw, default);
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = config_from(&[]);
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.port, 3001);
        assert_eq!(config.questions_per_page, 10);
        assert!(config.seed_categories);
        assert!(config.cors_allow_origin.is_none());
        assert!(config.database_path.ends_with("trivia.db"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides_from_environment() {
        let config = config_from(&[
            (ENV_PORT, "8080"),
            (ENV_BIND_ADDRESS, "0.0.0.0"),
            (ENV_DB_PATH, "/tmp/quiz.db"),
            (ENV_CORS_ALLOW_ORIGIN, "http://localhost:3000"),
            (ENV_QUESTIONS_PER_PAGE, "25"),
            (ENV_QUIZ_SEED, "42"),
            (ENV_SEED_CATEGORIES, "false"),
        ]);

        assert_eq!(config.port, 8080);
        assert_eq!(config.bind_address, IpAddr::from([0, 0, 0, 0]));
        assert_eq!(config.database_path, PathBuf::from("/tmp/quiz.db"));
        assert_eq!(
            config.cors_allow_origin.as_deref(),
            Some("http://localhost:3000")
        );
        assert_eq!(config.questions_per_page, 25);
        assert_eq!(config.quiz_seed, Some(42));
        assert!(!config.seed_categories);
        assert_eq!(config.socket_address().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn test_unparseable_values_fall_back_to_defaults() {
        let config = config_from(&[
            (ENV_PORT, "not-a-port"),
            (ENV_BIND_ADDRESS, "localhost"),
            (ENV_QUESTIONS_PER_PAGE, "-3"),
            (ENV_QUIZ_SEED, "abc"),
            (ENV_SEED_CATEGORIES, "maybe"),
            (ENV_CORS_ALLOW_ORIGIN, "   "),
        ]);

        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn test_validate_rejects_unusable_settings() {
        let zero_port = ServerConfig {
            port: 0,
            ..ServerConfig::default()
        };
        assert_eq!(zero_port.validate(), Err(ConfigError::InvalidPort));

        let zero_page = config_from(&[(ENV_QUESTIONS_PER_PAGE, "0")]);
        assert_eq!(zero_page.validate(), Err(ConfigError::InvalidPageSize));

        let bad_origin = ServerConfig {
            cors_allow_origin: Some("http://bad\norigin".to_string()),
            ..ServerConfig::default()
        };
        assert!(matches!(
            bad_origin.validate(),
            Err(ConfigError::InvalidCorsOrigin(_))
        ));
    }
}
