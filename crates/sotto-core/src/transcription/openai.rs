//! OpenAI-compatible `/audio/transcriptions` dialect (OpenAI, Groq,
//! and other hosted whisper offerings sharing the format).

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};

use super::{TranscriptionBackend, probe_error};
use crate::audio::AudioArtifact;
use crate::config::TranscriptionProfile;
use crate::error::{Error, Result};
use crate::normalize::normalize_body;

pub struct OpenAiTranscriptionBackend;

#[async_trait]
impl TranscriptionBackend for OpenAiTranscriptionBackend {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn transcribe(
        &self,
        client: &reqwest::Client,
        audio: &AudioArtifact,
        profile: &TranscriptionProfile,
    ) -> Result<String> {
        let part = Part::bytes(audio.data().to_vec())
            .file_name(audio.file_name())
            .mime_str(audio.mime_type())?;
        // JSON responses parse reliably across providers; plain text
        // does not.
        let mut form = Form::new()
            .part("file", part)
            .text("model", profile.model.clone())
            .text("response_format", "json");
        if !profile.prompt.is_empty() {
            form = form.text("prompt", profile.prompt.clone());
        }

        let response = client
            .post(&profile.endpoint)
            .header(AUTHORIZATION, format!("Bearer {}", profile.api_key))
            .multipart(form)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Error::from_response(response).await);
        }
        let body = response.text().await?;
        Ok(normalize_body(&body))
    }

    /// Probes `<base>/models` instead of the upload route: several
    /// providers reject idle requests against `/audio/transcriptions`
    /// while the real POST goes through fine.
    async fn test_connection(
        &self,
        client: &reqwest::Client,
        profile: &TranscriptionProfile,
    ) -> Result<()> {
        let mut request = client.get(models_url(&profile.endpoint));
        if !profile.api_key.is_empty() {
            request = request.header(AUTHORIZATION, format!("Bearer {}", profile.api_key));
        }
        let response = request.send().await.map_err(probe_error)?;
        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::InvalidApiKey);
        }
        if !response.status().is_success() {
            return Err(Error::Probe(format!(
                "Server status: {}",
                response.status().as_u16()
            )));
        }
        Ok(())
    }
}

fn models_url(endpoint: &str) -> String {
    let base = endpoint
        .split("/audio/transcriptions")
        .next()
        .unwrap_or(endpoint);
    format!("{base}/models")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn models_url_strips_the_upload_path() {
        assert_eq!(
            models_url("https://api.openai.com/v1/audio/transcriptions"),
            "https://api.openai.com/v1/models"
        );
        assert_eq!(
            models_url("https://api.groq.com/openai/v1"),
            "https://api.groq.com/openai/v1/models"
        );
    }
}
