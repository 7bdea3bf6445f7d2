// src/services/synthesizer.rs
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;

use crate::config::{Secret, TtsConfig};
use crate::error::ProviderError;

/// Anything that turns text into encoded audio bytes.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, ProviderError>;
}

/// Picks the speech provider named in the config.
pub fn from_config(client: Client, config: &TtsConfig) -> Arc<dyn SpeechSynthesizer> {
    match config {
        TtsConfig::Deepgram {
            api_key,
            model,
            base_url,
        } => Arc::new(DeepgramSynthesizer {
            client,
            api_key: api_key.clone(),
            model: model.clone(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }),
        TtsConfig::ElevenLabs {
            api_key,
            voice_id,
            model,
            output_format,
            base_url,
        } => Arc::new(ElevenLabsSynthesizer {
            client,
            api_key: api_key.clone(),
            voice_id: voice_id.clone(),
            model: model.clone(),
            output_format: output_format.clone(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }),
    }
}

async fn read_audio(response: reqwest::Response) -> Result<Vec<u8>, ProviderError> {
    let audio = ProviderError::check(response).await?.bytes().await?.to_vec();
    if audio.is_empty() {
        return Err(ProviderError::EmptyOutput("audio"));
    }
    Ok(audio)
}

fn preview(text: &str) -> String {
    text.chars().take(50).collect()
}

/// Deepgram Aura text-to-speech.
pub struct DeepgramSynthesizer {
    client: Client,
    api_key: Secret,
    model: String,
    base_url: String,
}

#[async_trait]
impl SpeechSynthesizer for DeepgramSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, ProviderError> {
        tracing::info!("Generating speech for: {}...", preview(text));

        let response = self
            .client
            .post(format!("{}/v1/speak", self.base_url))
            .query(&[("model", self.model.as_str())])
            .header("Authorization", format!("Token {}", self.api_key.expose()))
            .json(&serde_json::json!({ "text": text }))
            .send()
            .await?;

        let audio = read_audio(response).await?;
        tracing::info!(
            "Deepgram TTS: {} bytes of audio (model={})",
            audio.len(),
            self.model
        );
        Ok(audio)
    }
}

/// ElevenLabs text-to-speech.
pub struct ElevenLabsSynthesizer {
    client: Client,
    api_key: Secret,
    voice_id: String,
    model: String,
    output_format: String,
    base_url: String,
}

#[async_trait]
impl SpeechSynthesizer for ElevenLabsSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, ProviderError> {
        tracing::info!("Generating speech for: {}...", preview(text));

        let body = serde_json::json!({
            "text": text,
            "model_id": self.model,
            "voice_settings": {
                "stability": 0.0,
                "similarity_boost": 1.0,
                "style": 0.0,
                "use_speaker_boost": true,
                "speed": 1.0,
            },
        });

        let response = self
            .client
            .post(format!(
                "{}/v1/text-to-speech/{}",
                self.base_url, self.voice_id
            ))
            .query(&[("output_format", self.output_format.as_str())])
            .header("xi-api-key", self.api_key.expose())
            .json(&body)
            .send()
            .await?;

        let audio = read_audio(response).await?;
        tracing::info!(
            "ElevenLabs TTS: {} bytes of audio (voice={}, model={})",
            audio.len(),
            self.voice_id,
            self.model
        );
        Ok(audio)
    }
}
