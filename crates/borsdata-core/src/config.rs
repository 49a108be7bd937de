use std::fmt::{Debug, Formatter};

use crate::error::ClientError;
use crate::http_client::DEFAULT_TIMEOUT_MS;
use crate::retry::RetryConfig;

pub const DEFAULT_BASE_URL: &str = "https://apiservice.borsdata.se/v1";

pub const API_KEY_ENV: &str = "BORSDATA_API_KEY";
pub const BASE_URL_ENV: &str = "BORSDATA_BASE_URL";
pub const RETRY_ENV: &str = "BORSDATA_RETRY";
pub const MAX_ATTEMPTS_ENV: &str = "BORSDATA_MAX_ATTEMPTS";

/// API key sent as the `authKey` query parameter. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Result<Self, ClientError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ClientError::configuration("API key cannot be empty"));
        }
        Ok(Self(value))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl Debug for ApiKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Client configuration: credential, endpoint root, retry and timeout.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: ApiKey,
    pub base_url: String,
    pub retry: RetryConfig,
    pub timeout_ms: u64,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Result<Self, ClientError> {
        Ok(Self {
            api_key: ApiKey::new(api_key)?,
            base_url: String::from(DEFAULT_BASE_URL),
            retry: RetryConfig::default(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        })
    }

    /// Build from `BORSDATA_*` environment variables.
    ///
    /// `BORSDATA_API_KEY` is required. `BORSDATA_RETRY=0|false|off` disables
    /// retries and `BORSDATA_MAX_ATTEMPTS` overrides the attempt budget.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`ClientConfig::from_env`] over an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_ENV).ok_or_else(|| {
            ClientError::configuration(format!(
                "API key required; provide it explicitly or set {API_KEY_ENV}"
            ))
        })?;
        let mut config = Self::new(api_key)?;

        if let Some(base_url) = lookup(BASE_URL_ENV) {
            config = config.with_base_url(base_url);
        }

        if let Some(flag) = lookup(RETRY_ENV) {
            if matches!(
                flag.trim().to_ascii_lowercase().as_str(),
                "0" | "false" | "off" | "no"
            ) {
                config = config.with_retry(RetryConfig::no_retry());
            }
        }

        if let Some(raw) = lookup(MAX_ATTEMPTS_ENV) {
            let max_attempts = raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|attempts| *attempts > 0)
                .ok_or_else(|| {
                    ClientError::configuration(format!(
                        "{MAX_ATTEMPTS_ENV} must be a positive integer, got '{raw}'"
                    ))
                })?;
            config = config.with_max_attempts(max_attempts);
        }

        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.retry.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn api_key_is_redacted_in_debug_output() {
        let config = ClientConfig::new("secret-key").expect("valid config");
        let rendered = format!("{config:?}");

        assert!(!rendered.contains("secret-key"));
        assert!(rendered.contains("ApiKey(***)"));
    }

    #[test]
    fn missing_api_key_is_a_configuration_error() {
        let err = ClientConfig::from_lookup(lookup_from(&[])).expect_err("must fail");
        assert!(matches!(err, ClientError::Configuration { .. }));
        assert!(err.to_string().contains(API_KEY_ENV));
    }

    #[test]
    fn env_overrides_retry_settings() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            (API_KEY_ENV, "abc"),
            (RETRY_ENV, "false"),
            (BASE_URL_ENV, "http://localhost:8080/v1/"),
        ]))
        .expect("valid config");

        assert!(!config.retry.enabled);
        assert_eq!(config.base_url, "http://localhost:8080/v1");

        let config = ClientConfig::from_lookup(lookup_from(&[
            (API_KEY_ENV, "abc"),
            (MAX_ATTEMPTS_ENV, "3"),
        ]))
        .expect("valid config");
        assert!(config.retry.enabled);
        assert_eq!(config.retry.max_attempts, 3);
    }

    #[test]
    fn invalid_max_attempts_is_rejected() {
        let err = ClientConfig::from_lookup(lookup_from(&[
            (API_KEY_ENV, "abc"),
            (MAX_ATTEMPTS_ENV, "many"),
        ]))
        .expect_err("must fail");
        assert!(matches!(err, ClientError::Configuration { .. }));
    }

    #[test]
    fn zero_max_attempts_is_rejected() {
        let err = ClientConfig::from_lookup(lookup_from(&[
            (API_KEY_ENV, "abc"),
            (MAX_ATTEMPTS_ENV, "0"),
        ]))
        .expect_err("must fail");
        assert!(matches!(err, ClientError::Configuration { .. }));
        assert!(err.to_string().contains("positive integer"));
    }
}
