// src/services/persona.rs
use crate::config::{ConfigError, PersonaConfig};
use crate::error::AppError;

/// The character the model is asked to play.
#[derive(Debug, Clone)]
pub struct Persona {
    pub system_prompt: String,
    pub user_label: String,
    pub assistant_label: String,
    /// In-character prefix used when the text provider fails.
    pub fallback: String,
}

impl Persona {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_label: "Mortal".to_string(),
            assistant_label: "Loki".to_string(),
            fallback: "Even gods face... technical difficulties.".to_string(),
        }
    }

    /// Reads the persona block from disk and applies the configured labels.
    pub fn load(config: &PersonaConfig) -> Result<Self, ConfigError> {
        let system_prompt =
            std::fs::read_to_string(&config.file).map_err(|source| ConfigError::Persona {
                path: config.file.clone(),
                source,
            })?;

        Ok(Self {
            system_prompt,
            user_label: config.user_label.clone(),
            assistant_label: config.assistant_label.clone(),
            fallback: config.fallback.clone(),
        })
    }

    pub fn build_prompt(&self, user_message: &str) -> Result<String, AppError> {
        build_prompt(
            &self.system_prompt,
            &self.user_label,
            &self.assistant_label,
            user_message,
        )
    }

    /// The in-character text returned in place of a generated reply.
    pub fn degraded_text(&self, reason: &str) -> String {
        format!("{} {}", self.fallback, reason)
    }
}

/// Persona block, then the labelled user turn, then the assistant cue.
pub fn build_prompt(
    system_persona: &str,
    user_label: &str,
    assistant_label: &str,
    user_message: &str,
) -> Result<String, AppError> {
    if user_message.trim().is_empty() {
        return Err(AppError::BadRequest("Message cannot be empty".to_string()));
    }

    Ok(format!(
        "{}\n\n{}: {}\n\n{}:",
        system_persona, user_label, user_message, assistant_label
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn prompt_is_persona_then_user_then_cue() {
        let persona = Persona::new("You are Loki.");
        let prompt = persona.build_prompt("Tell me about Asgard").unwrap();
        assert_eq!(prompt, "You are Loki.\n\nMortal: Tell me about Asgard\n\nLoki:");
    }

    #[test]
    fn prompt_is_deterministic() {
        let persona = Persona::new("persona");
        assert_eq!(
            persona.build_prompt("same").unwrap(),
            persona.build_prompt("same").unwrap()
        );
    }

    #[test]
    fn empty_message_is_rejected() {
        assert!(matches!(
            build_prompt("p", "U", "A", ""),
            Err(AppError::BadRequest(_))
        ));
        assert!(build_prompt("p", "U", "A", "  \n ").is_err());
    }

    #[test]
    fn degraded_text_keeps_reason() {
        let persona = Persona::new("p");
        assert_eq!(
            persona.degraded_text("quota exceeded"),
            "Even gods face... technical difficulties. quota exceeded"
        );
    }

    #[test]
    fn load_reads_file_and_labels() {
        let path = std::env::temp_dir().join(format!("persona-test-{}.txt", std::process::id()));
        {
            let mut file = std::fs::File::create(&path).unwrap();
            write!(file, "You are Hela.").unwrap();
        }
        let config = PersonaConfig {
            file: path.clone(),
            user_label: "Asgardian".to_string(),
            assistant_label: "Hela".to_string(),
            fallback: "Even Hel has outages.".to_string(),
        };

        let persona = Persona::load(&config).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(
            persona.build_prompt("hi").unwrap(),
            "You are Hela.\n\nAsgardian: hi\n\nHela:"
        );
        assert_eq!(persona.fallback, "Even Hel has outages.");
    }

    #[test]
    fn load_reports_missing_file() {
        let config = PersonaConfig {
            file: "/definitely/not/here/persona.txt".into(),
            user_label: "U".to_string(),
            assistant_label: "A".to_string(),
            fallback: "F".to_string(),
        };
        assert!(matches!(
            Persona::load(&config),
            Err(ConfigError::Persona { .. })
        ));
    }
}
