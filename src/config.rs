// src/config.rs

use std::env;

use dotenvy::dotenv;
use url::Url;

use crate::error::ConfigError;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the quiz REST API, e.g. `https://portal.example.edu/api`.
    pub api_base_url: Url,
    /// Bearer token of the signed-in user.
    pub api_token: Option<String>,
    pub request_timeout_secs: u64,
    pub rust_log: String,
    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_base_url = lookup("API_BASE_URL").ok_or(ConfigError::Missing("API_BASE_URL"))?;
        let api_base_url = Url::parse(&raw_base_url).map_err(|e| ConfigError::Invalid {
            key: "API_BASE_URL",
            reason: e.to_string(),
        })?;
        if api_base_url.cannot_be_a_base() {
            return Err(ConfigError::Invalid {
                key: "API_BASE_URL",
                reason: "must be an absolute http(s) url".to_string(),
            });
        }

        let api_token = lookup("API_TOKEN").filter(|t| !t.trim().is_empty());

        let request_timeout_secs = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "REQUEST_TIMEOUT_SECS",
                        reason: format!("expected a positive integer, got {raw:?}"),
                    });
                }
            },
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        let rust_log = lookup("RUST_LOG").unwrap_or_else(|| "info".to_string());

        let log_dir = lookup("LOG_DIR").unwrap_or_else(|| "logs".to_string());

        Ok(Self {
            api_base_url,
            api_token,
            request_timeout_secs,
            rust_log,
            log_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_optional_keys_are_absent() {
        let config =
            Config::from_lookup(lookup_from(&[("API_BASE_URL", "http://localhost:8080/api")]))
                .unwrap();

        assert_eq!(config.api_base_url.as_str(), "http://localhost:8080/api");
        assert_eq!(config.api_token, None);
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.log_dir, "logs");
    }

    #[test]
    fn missing_base_url_is_reported() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("API_BASE_URL")));
    }

    #[test]
    fn rejects_bad_timeout_and_url() {
        let err = Config::from_lookup(lookup_from(&[
            ("API_BASE_URL", "http://localhost"),
            ("REQUEST_TIMEOUT_SECS", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "REQUEST_TIMEOUT_SECS",
                ..
            }
        ));

        let err = Config::from_lookup(lookup_from(&[("API_BASE_URL", "not a url")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "API_BASE_URL", .. }));
    }

    #[test]
    fn blank_token_is_treated_as_absent() {
        let config = Config::from_lookup(lookup_from(&[
            ("API_BASE_URL", "https://portal.example.edu/api"),
            ("API_TOKEN", "  "),
            ("RUST_LOG", "debug"),
        ]))
        .unwrap();
        assert_eq!(config.api_token, None);
        assert_eq!(config.rust_log, "debug");
    }
}
