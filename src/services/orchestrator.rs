// src/services/orchestrator.rs
use std::{future::Future, sync::Arc, time::Duration};

use base64::{Engine as _, engine::general_purpose::STANDARD};

use super::{generator::TextGenerator, persona::Persona, synthesizer::SpeechSynthesizer};
use crate::error::{AppError, ProviderError};
use crate::message::ChatResponse;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Runs one chat turn: prompt, text generation, speech synthesis.
///
/// Holds no per-request state, so one instance is shared by every request.
/// Provider failures are absorbed here and never reach the caller as errors.
pub struct ChatOrchestrator {
    persona: Persona,
    generator: Arc<dyn TextGenerator>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    generation_timeout: Duration,
    synthesis_timeout: Duration,
    speak_degraded_text: bool,
}

impl ChatOrchestrator {
    pub fn new(
        persona: Persona,
        generator: Arc<dyn TextGenerator>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
    ) -> Self {
        Self {
            persona,
            generator,
            synthesizer,
            generation_timeout: DEFAULT_TIMEOUT,
            synthesis_timeout: DEFAULT_TIMEOUT,
            speak_degraded_text: false,
        }
    }

    pub fn with_timeouts(mut self, generation: Duration, synthesis: Duration) -> Self {
        self.generation_timeout = generation;
        self.synthesis_timeout = synthesis;
        self
    }

    /// Also voice the fallback text when generation failed.
    pub fn speak_degraded_text(mut self, enabled: bool) -> Self {
        self.speak_degraded_text = enabled;
        self
    }

    pub async fn handle_chat(&self, message: Option<&str>) -> Result<ChatResponse, AppError> {
        let message = validate(message)?;
        let prompt = self.persona.build_prompt(message)?;

        let generated = with_timeout(self.generation_timeout, self.generator.generate(&prompt))
            .await
            .and_then(|text| {
                if text.trim().is_empty() {
                    Err(ProviderError::EmptyOutput("text"))
                } else {
                    Ok(text)
                }
            });

        let (text, degraded) = match generated {
            Ok(text) => (text, false),
            Err(e) => {
                tracing::error!("Text generation failed: {}", e);
                (self.persona.degraded_text(&e.to_string()), true)
            }
        };

        let audio = if degraded && !self.speak_degraded_text {
            tracing::debug!("Skipping speech synthesis for degraded text");
            String::new()
        } else {
            self.speak(&text).await
        };

        Ok(ChatResponse { text, audio })
    }

    async fn speak(&self, text: &str) -> String {
        match with_timeout(self.synthesis_timeout, self.synthesizer.synthesize(text)).await {
            Ok(audio) => encode_audio(audio),
            Err(e) => {
                tracing::warn!("TTS error, continuing without audio: {}", e);
                String::new()
            }
        }
    }
}

fn validate(message: Option<&str>) -> Result<&str, AppError> {
    let message = message.ok_or_else(|| AppError::BadRequest("message is required".to_string()))?;
    let trimmed = message.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest("Message cannot be empty".to_string()));
    }
    Ok(trimmed)
}

async fn with_timeout<T>(
    limit: Duration,
    call: impl Future<Output = Result<T, ProviderError>>,
) -> Result<T, ProviderError> {
    tokio::time::timeout(limit, call)
        .await
        .unwrap_or(Err(ProviderError::Timeout(limit)))
}

/// Takes the buffer by value so it is freed as soon as it is encoded.
fn encode_audio(audio: Vec<u8>) -> String {
    STANDARD.encode(audio)
}
