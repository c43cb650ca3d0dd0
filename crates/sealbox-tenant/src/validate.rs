//! Outbound provider-key validation probes.
//!
//! A candidate key is tried against the vendor's cheapest authenticated
//! endpoint before the caller decides whether to store it. Timeout,
//! transport failure, and an explicit authentication rejection all
//! uniformly count as "key invalid"; a probe never surfaces an error.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use sealbox_core::models::provider::Provider;

/// Per-probe request timeout.
const PROBE_TIMEOUT: Duration = Duration::from_secs(6);

/// Base URLs for the vendor probe endpoints; overridable for tests.
#[derive(Debug, Clone)]
pub struct ProbeEndpoints {
    pub openai: String,
    pub anthropic: String,
    pub gemini: String,
}

impl Default for ProbeEndpoints {
    fn default() -> Self {
        Self {
            openai: "https://api.openai.com".into(),
            anthropic: "https://api.anthropic.com".into(),
            gemini: "https://generativelanguage.googleapis.com".into(),
        }
    }
}

/// Probes vendor APIs to check whether a key is usable.
pub struct KeyValidator {
    http: Client,
    endpoints: ProbeEndpoints,
}

impl KeyValidator {
    pub fn new() -> Self {
        Self::with_endpoints(ProbeEndpoints::default())
    }

    pub fn with_endpoints(endpoints: ProbeEndpoints) -> Self {
        Self {
            http: Client::builder()
                .timeout(PROBE_TIMEOUT)
                .build()
                .unwrap_or_else(|_| Client::new()),
            endpoints,
        }
    }

    /// `true` iff the vendor accepted the key within the probe timeout.
    pub async fn validate(&self, provider: Provider, key: &str) -> bool {
        let valid = match provider {
            Provider::OpenAi => self.probe_openai(key).await,
            Provider::Anthropic => self.probe_anthropic(key).await,
            Provider::Gemini => self.probe_gemini(key).await,
        };
        tracing::debug!(provider = provider.as_str(), valid, "provider key probed");
        valid
    }

    async fn probe_openai(&self, key: &str) -> bool {
        let url = format!("{}/v1/models", self.endpoints.openai);
        match self.http.get(url).bearer_auth(key).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    async fn probe_anthropic(&self, key: &str) -> bool {
        let url = format!("{}/v1/messages", self.endpoints.anthropic);
        let body = serde_json::json!({
            "model": "claude-3-haiku-20240307",
            "max_tokens": 1,
            "messages": [{ "role": "user", "content": "Hi" }],
        });
        match self
            .http
            .post(url)
            .header("x-api-key", key)
            .header("anthropic-version", "2023-06-01")
            .json(&body)
            .send()
            .await
        {
            // Anything but an authentication rejection counts as a
            // usable key (the probe body itself may be refused).
            Ok(response) => {
                response.status() != StatusCode::UNAUTHORIZED
                    && response.status() != StatusCode::FORBIDDEN
            }
            Err(_) => false,
        }
    }

    async fn probe_gemini(&self, key: &str) -> bool {
        let url = format!("{}/v1beta/models?key={key}", self.endpoints.gemini);
        match self.http.get(url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

impl Default for KeyValidator {
    fn default() -> Self {
        Self::new()
    }
}
