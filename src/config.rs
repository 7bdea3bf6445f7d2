// src/config.rs
use std::{fmt, path::PathBuf, str::FromStr, time::Duration};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("unknown TTS provider {0:?} (expected \"deepgram\" or \"elevenlabs\")")]
    UnknownProvider(String),

    #[error("cannot read persona file {path}: {source}")]
    Persona {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A credential that never shows up in logs or debug output.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Secret,
    pub model: String,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub enum TtsConfig {
    Deepgram {
        api_key: Secret,
        model: String,
        base_url: String,
    },
    ElevenLabs {
        api_key: Secret,
        voice_id: String,
        model: String,
        output_format: String,
        base_url: String,
    },
}

#[derive(Debug, Clone)]
pub struct PersonaConfig {
    pub file: PathBuf,
    pub user_label: String,
    pub assistant_label: String,
    pub fallback: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub service_name: String,
    pub gemini: GeminiConfig,
    pub tts: TtsConfig,
    pub persona: PersonaConfig,
    pub generation_timeout: Duration,
    pub synthesis_timeout: Duration,
    pub speak_degraded_text: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env { lookup };

        let gemini = GeminiConfig {
            api_key: env.secret("GEMINI_API_KEY")?,
            model: env.or("GEMINI_MODEL", "gemini-2.0-flash"),
            base_url: env.or("GEMINI_BASE_URL", "https://generativelanguage.googleapis.com"),
        };

        let provider = env.or("TTS_PROVIDER", "deepgram").to_lowercase();
        let tts = match provider.as_str() {
            "deepgram" => TtsConfig::Deepgram {
                api_key: env.secret("DEEPGRAM_API_KEY")?,
                model: env.or("DEEPGRAM_MODEL", "aura-orpheus-en"),
                base_url: env.or("DEEPGRAM_BASE_URL", "https://api.deepgram.com"),
            },
            "elevenlabs" => TtsConfig::ElevenLabs {
                api_key: env.secret("ELEVENLABS_API_KEY")?,
                voice_id: env.or("ELEVENLABS_VOICE_ID", "EJHTrkzEnXcKGK7b449B"),
                model: env.or("ELEVENLABS_MODEL", "eleven_multilingual_v2"),
                output_format: env.or("ELEVENLABS_OUTPUT_FORMAT", "mp3_22050_32"),
                base_url: env.or("ELEVENLABS_BASE_URL", "https://api.elevenlabs.io"),
            },
            _ => return Err(ConfigError::UnknownProvider(provider)),
        };

        let persona = PersonaConfig {
            file: PathBuf::from(env.or("PERSONA_FILE", "persona/loki.txt")),
            user_label: env.or("PERSONA_USER_LABEL", "Mortal"),
            assistant_label: env.or("PERSONA_ASSISTANT_LABEL", "Loki"),
            fallback: env.or("PERSONA_FALLBACK", "Even gods face... technical difficulties."),
        };

        Ok(Self {
            host: env.or("HOST", "0.0.0.0"),
            port: env.parse("PORT", 8000)?,
            service_name: env.or("SERVICE_NAME", "Loki Voice Assistant API"),
            gemini,
            tts,
            persona,
            generation_timeout: Duration::from_secs(env.parse("GENERATION_TIMEOUT_SECS", 30)?),
            synthesis_timeout: Duration::from_secs(env.parse("SYNTHESIS_TIMEOUT_SECS", 30)?),
            speak_degraded_text: env.parse("SPEAK_DEGRADED_TEXT", false)?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

struct Env<F> {
    lookup: F,
}

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    fn secret(&self, key: &'static str) -> Result<Secret, ConfigError> {
        self.get(key).map(Secret).ok_or(ConfigError::Missing(key))
    }

    fn parse<T>(&self, key: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        match self.get(key) {
            None => Ok(default),
            Some(value) => value.parse().map_err(|e: T::Err| ConfigError::Invalid {
                key,
                reason: e.to_string(),
                value,
            }),
        }
    }
}
