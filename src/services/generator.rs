// src/services/generator.rs
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::config::{GeminiConfig, Secret};
use crate::error::ProviderError;

/// Anything that turns a prompt into text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// Google Gemini `generateContent`.
pub struct GeminiGenerator {
    client: Client,
    api_key: Secret,
    model: String,
    base_url: String,
}

impl GeminiGenerator {
    pub fn new(client: Client, config: &GeminiConfig) -> Self {
        Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        // Key goes in a header so it never ends up in a logged URL.
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", self.api_key.expose())
            .json(&body)
            .send()
            .await?;

        let bytes = ProviderError::check(response).await?.bytes().await?;
        let parsed: GenerateContentResponse = serde_json::from_slice(&bytes)
            .map_err(|e| ProviderError::Format(e.to_string()))?;

        let text = parsed.text()?;
        tracing::info!(model = %self.model, "Generated response: {}", text);
        Ok(text)
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    fn text(self) -> Result<String, ProviderError> {
        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::Format("response has no candidates".to_string()))?;

        let text: String = candidate
            .content
            .map(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|p| p.text)
            .collect();

        if text.trim().is_empty() {
            return Err(ProviderError::EmptyOutput("text"));
        }
        Ok(text)
    }
}
