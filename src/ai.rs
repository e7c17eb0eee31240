// SPDX-License-Identifier: PMPL-1.0-or-later
//! Text-completion collaborator for AI-assisted WCAG checks.
//!
//! The service is expected to return free-form text that usually embeds a
//! JSON object; the router extracts and validates it. The token is read
//! from an environment variable and never logged or serialized.

use crate::error::{Result, SitegaugeError};
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send a prompt and return the raw completion text.
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// HTTP completion client posting `{"prompt": ...}` to a configured endpoint.
pub struct HttpCompletionClient {
    client: reqwest::Client,
    endpoint: String,
    token: Option<String>,
}

impl HttpCompletionClient {
    pub fn new(config: &crate::config::AiConfig) -> Result<Self> {
        let endpoint = config
            .endpoint
            .clone()
            .ok_or_else(|| SitegaugeError::Config("no AI endpoint configured".to_string()))?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            endpoint,
            token: std::env::var(&config.api_key_env).ok(),
        })
    }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let mut request = self.client.post(&self.endpoint).json(&json!({ "prompt": prompt }));

        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }

        let resp = request.send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SitegaugeError::Completion(format!("HTTP {}", status)));
        }

        let body = resp.text().await?;
        // Services that wrap the text in {"completion": ...} are unwrapped;
        // anything else is passed through as-is.
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(&body) {
            if let Some(text) = value.get("completion").and_then(|v| v.as_str()) {
                return Ok(text.to_string());
            }
        }
        Ok(body)
    }
}

/// Client used when no endpoint is configured: every call fails, which the
/// router degrades to a `not-checked` result.
pub struct DisabledCompletionClient;

#[async_trait]
impl CompletionClient for DisabledCompletionClient {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        Err(SitegaugeError::Completion(
            "no completion endpoint configured".to_string(),
        ))
    }
}
