//! Built-in configuration presets.
//!
//! A preset bundles a matching pair of transcription and processing
//! profiles for a known provider setup. Applying one overwrites the
//! provider-shaped fields (endpoints, dialects, models) and clears the
//! API keys; the user supplies their own afterwards.

use crate::config::{
    DEFAULT_SYSTEM_PROMPT, ProcessingDialect, ProcessingProfile, TranscriptionDialect,
    TranscriptionProfile,
};
use crate::settings::Settings;

/// A named provider setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Groq for both transcription and text processing.
    GroqEverywhere,
    /// OpenAI for both stages.
    OpenAiCombo,
    /// Self-hosted whisper server plus local Ollama.
    LocalSetup,
}

impl Preset {
    pub fn all() -> &'static [Preset] {
        &[Preset::GroqEverywhere, Preset::OpenAiCombo, Preset::LocalSetup]
    }

    pub fn id(&self) -> &'static str {
        match self {
            Preset::GroqEverywhere => "groq-everywhere",
            Preset::OpenAiCombo => "openai-combo",
            Preset::LocalSetup => "local-setup",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Preset::GroqEverywhere => "Groq Everywhere",
            Preset::OpenAiCombo => "OpenAI Combo",
            Preset::LocalSetup => "Local Setup",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Preset::GroqEverywhere => "Use Groq for both transcription and text processing",
            Preset::OpenAiCombo => "Use OpenAI for both transcription and text processing",
            Preset::LocalSetup => "Use a local whisper server and Ollama for privacy",
        }
    }

    pub fn find(id: &str) -> Option<Preset> {
        Preset::all().iter().copied().find(|p| p.id() == id)
    }

    /// Overwrite the profile pair in `settings` with this preset's setup.
    pub fn apply(&self, settings: &mut Settings) {
        let (transcription, processing) = self.profiles();
        settings.transcription = transcription;
        settings.processing = processing;
    }

    fn profiles(&self) -> (TranscriptionProfile, ProcessingProfile) {
        match self {
            Preset::GroqEverywhere => (
                TranscriptionProfile {
                    endpoint: "https://api.groq.com/openai/v1/audio/transcriptions".into(),
                    dialect: TranscriptionDialect::OpenAi,
                    model: "whisper-large-v3".into(),
                    api_key: String::new(),
                    prompt: String::new(),
                },
                ProcessingProfile {
                    dialect: ProcessingDialect::OpenAi,
                    endpoint: "https://api.groq.com/openai/v1/chat/completions".into(),
                    model: "gemma2-9b-it".into(),
                    api_key: String::new(),
                    temperature: Some(0.7),
                    enabled: true,
                    system_prompt: DEFAULT_SYSTEM_PROMPT.into(),
                },
            ),
            Preset::OpenAiCombo => (
                TranscriptionProfile {
                    endpoint: "https://api.openai.com/v1/audio/transcriptions".into(),
                    dialect: TranscriptionDialect::OpenAi,
                    model: "whisper-1".into(),
                    api_key: String::new(),
                    prompt: String::new(),
                },
                ProcessingProfile {
                    dialect: ProcessingDialect::OpenAi,
                    endpoint: "https://api.openai.com/v1/chat/completions".into(),
                    model: "gpt-4o-mini".into(),
                    api_key: String::new(),
                    temperature: Some(0.5),
                    enabled: true,
                    system_prompt: DEFAULT_SYSTEM_PROMPT.into(),
                },
            ),
            Preset::LocalSetup => (
                TranscriptionProfile {
                    endpoint: "http://localhost:9000/asr".into(),
                    dialect: TranscriptionDialect::Local,
                    model: "whisper-large-v3-turbo".into(),
                    api_key: String::new(),
                    prompt: String::new(),
                },
                ProcessingProfile {
                    dialect: ProcessingDialect::Ollama,
                    endpoint: "http://localhost:11434/api/generate".into(),
                    model: "qwen2.5-coder:14b".into(),
                    api_key: String::new(),
                    temperature: Some(0.3),
                    enabled: true,
                    system_prompt: DEFAULT_SYSTEM_PROMPT.into(),
                },
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_by_id() {
        assert_eq!(Preset::find("openai-combo"), Some(Preset::OpenAiCombo));
        assert_eq!(Preset::find("nope"), None);
    }

    #[test]
    fn apply_overwrites_profiles_and_clears_keys() {
        let mut settings = Settings::default();
        settings.transcription.api_key = "old-key".into();
        Preset::GroqEverywhere.apply(&mut settings);
        assert_eq!(settings.transcription.dialect, TranscriptionDialect::OpenAi);
        assert!(settings.transcription.endpoint.contains("groq.com"));
        assert!(settings.transcription.api_key.is_empty());
        assert_eq!(settings.processing.dialect, ProcessingDialect::OpenAi);
    }
}
