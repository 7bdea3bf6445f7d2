#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use loki_voice_backend::error::ProviderError;
use loki_voice_backend::services::generator::TextGenerator;
use loki_voice_backend::services::orchestrator::ChatOrchestrator;
use loki_voice_backend::services::persona::Persona;
use loki_voice_backend::services::synthesizer::SpeechSynthesizer;
use std::sync::Mutex;

pub enum Behaviour<T> {
    Succeed(T),
    Fail(&'static str),
    Hang,
    Panic,
}

pub struct MockGenerator {
    behaviour: Behaviour<String>,
    pub calls: AtomicUsize,
    pub prompts: Mutex<Vec<String>>,
}

impl MockGenerator {
    pub fn new(behaviour: Behaviour<String>) -> Arc<Self> {
        Arc::new(Self {
            behaviour,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn replying(text: &str) -> Arc<Self> {
        Self::new(Behaviour::Succeed(text.to_string()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.behaviour {
            Behaviour::Succeed(text) => Ok(text.clone()),
            Behaviour::Fail(reason) => Err(ProviderError::Format(reason.to_string())),
            Behaviour::Hang => {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok("too late".to_string())
            }
            Behaviour::Panic => panic!("generator exploded"),
        }
    }
}

pub struct MockSynthesizer {
    behaviour: Behaviour<Vec<u8>>,
    pub calls: AtomicUsize,
    pub texts: Mutex<Vec<String>>,
}

impl MockSynthesizer {
    pub fn new(behaviour: Behaviour<Vec<u8>>) -> Arc<Self> {
        Arc::new(Self {
            behaviour,
            calls: AtomicUsize::new(0),
            texts: Mutex::new(Vec::new()),
        })
    }

    pub fn returning(bytes: &[u8]) -> Arc<Self> {
        Self::new(Behaviour::Succeed(bytes.to_vec()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.texts.lock().unwrap().push(text.to_string());
        match &self.behaviour {
            Behaviour::Succeed(bytes) => Ok(bytes.clone()),
            Behaviour::Fail(reason) => Err(ProviderError::Format(reason.to_string())),
            Behaviour::Hang => {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(vec![1])
            }
            Behaviour::Panic => panic!("synthesizer exploded"),
        }
    }
}

pub fn orchestrator(
    generator: &Arc<MockGenerator>,
    synthesizer: &Arc<MockSynthesizer>,
) -> ChatOrchestrator {
    ChatOrchestrator::new(
        Persona::new("You are Loki."),
        generator.clone(),
        synthesizer.clone(),
    )
    .with_timeouts(Duration::from_millis(200), Duration::from_millis(200))
}
