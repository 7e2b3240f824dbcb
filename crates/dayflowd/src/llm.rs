//! Generative-model capability client.
//!
//! Talks to a local Ollama-style chat endpoint. Structured callers use
//! `complete_json` (the backend is asked for a single JSON object); the
//! question path uses `complete_text`. Transport or status failures come
//! back as errors - it is the caller's job to degrade to its fallback
//! value, never to surface them.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info};

use crate::config::LlmConfig;

#[derive(Debug, Clone, Serialize)]
struct ChatApiRequest {
    model: String,
    messages: Vec<ChatApiMessage>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChatApiMessage {
    role: String,
    content: String,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatApiResponse {
    message: ChatApiMessage,
}

/// Client for the local generative backend.
#[derive(Debug, Clone)]
pub struct LlmClient {
    http_client: reqwest::Client,
    base_url: String,
    model: String,
}

impl LlmClient {
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            http_client: reqwest::Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .unwrap_or_default(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// One structured call: the backend is constrained to JSON output.
    pub async fn complete_json(&self, instructions: &str, user_text: &str) -> Result<String> {
        self.call(instructions, user_text, Some("json".to_string()))
            .await
    }

    /// One free-text call.
    pub async fn complete_text(&self, instructions: &str, user_text: &str) -> Result<String> {
        self.call(instructions, user_text, None).await
    }

    async fn call(
        &self,
        instructions: &str,
        user_text: &str,
        format: Option<String>,
    ) -> Result<String> {
        let url = format!("{}/api/chat", self.base_url);

        let request = ChatApiRequest {
            model: self.model.clone(),
            messages: vec![
                ChatApiMessage {
                    role: "system".to_string(),
                    content: instructions.to_string(),
                },
                ChatApiMessage {
                    role: "user".to_string(),
                    content: user_text.to_string(),
                },
            ],
            stream: false,
            format,
        };

        info!(
            "[>]  LLM call [{}] ({} prompt chars)",
            self.model,
            instructions.len() + user_text.len()
        );

        let response = self
            .http_client
            .post(&url)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to model backend")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("[-]  Model backend error {}: {}", status, error_text);
            anyhow::bail!("model backend returned {}: {}", status, error_text);
        }

        let chat_response: ChatApiResponse = response
            .json()
            .await
            .context("Failed to parse model backend response")?;

        info!(
            "[<]  LLM response ({} chars)",
            chat_response.message.content.len()
        );

        Ok(chat_response.message.content)
    }

    /// Check whether the backend answers at all.
    pub async fn is_available(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);
        self.http_client
            .get(&url)
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }
}

/// Extract the JSON object from text that may have prose around it.
pub fn extract_json(text: &str) -> &str {
    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
        if start < end {
            return &text[start..=end];
        }
    }
    text
}
