use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{ApiKey, ClientConfig};
use crate::error::ClientError;
use crate::http_client::{HttpClient, HttpRequest};
use crate::retry::{RateLimitPolicy, RetryConfig, RetryDecision, RetryPolicy, RetryState};

/// Name of the query parameter carrying the API key.
pub const AUTH_PARAM: &str = "authKey";

/// Ordered query parameters with unique keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(&'static str, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, replacing any previous value.
    pub fn insert(&mut self, key: &'static str, value: impl ToString) {
        let value = value.to_string();
        match self.0.iter_mut().find(|(existing, _)| *existing == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn with(mut self, key: &'static str, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    /// Set `key` only when a value is present; absent values are omitted.
    pub fn with_opt<T: ToString>(mut self, key: &'static str, value: Option<T>) -> Self {
        if let Some(value) = value {
            self.insert(key, value);
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(existing, _)| *existing == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|(key, _)| *key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn encode(&self) -> String {
        self.0
            .iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Issues one authenticated GET per call and classifies the outcome.
pub struct Transport {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
    api_key: ApiKey,
    retry: RetryConfig,
    policy: Arc<dyn RetryPolicy>,
    timeout_ms: u64,
}

impl Transport {
    pub fn new(config: ClientConfig, http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            base_url: config.base_url,
            api_key: config.api_key,
            retry: config.retry,
            policy: Arc::new(RateLimitPolicy),
            timeout_ms: config.timeout_ms,
        }
    }

    /// Replace the retryability predicate.
    pub fn with_policy(mut self, policy: Arc<dyn RetryPolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// GET `path` and decode the JSON body, retrying per the retry policy.
    pub async fn get(&self, path: &str, params: &QueryParams) -> Result<Value, ClientError> {
        let url = self.url_for(path, params);
        let mut state = RetryState::new(&self.retry);

        loop {
            debug!(
                path,
                attempt = state.attempts() + 1,
                params = ?params.keys().collect::<Vec<_>>(),
                "issuing borsdata request"
            );

            let error = match self.attempt(&url).await {
                Ok(body) => return Ok(body),
                Err(error) => error,
            };

            match state.on_failure(&error, self.policy.as_ref()) {
                RetryDecision::RetryAfter(delay) => {
                    warn!(
                        path,
                        attempt = state.attempts(),
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        "rate limit exceeded; retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                RetryDecision::GiveUp => {
                    debug!(
                        path,
                        attempts = state.attempts(),
                        code = error.code(),
                        "request failed"
                    );
                    return Err(error);
                }
            }
        }
    }

    async fn attempt(&self, url: &str) -> Result<Value, ClientError> {
        let request = HttpRequest::get(url)
            .with_header("accept", "application/json")
            .with_timeout_ms(self.timeout_ms);

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(ClientError::transport)?;

        if !response.is_success() {
            return Err(ClientError::api(response.status, response.body));
        }

        serde_json::from_str(&response.body).map_err(ClientError::decode)
    }

    fn url_for(&self, path: &str, params: &QueryParams) -> String {
        let mut query = params.clone();
        query.insert(AUTH_PARAM, self.api_key.expose());
        format!("{}{}?{}", self.base_url, path, query.encode())
    }
}
