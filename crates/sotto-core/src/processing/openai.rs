//! OpenAI-compatible chat completions dialect.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde_json::{Value, json};

use super::{ProcessOutcome, ProcessingBackend, USER_TEXT_PREFIX};
use crate::config::ProcessingProfile;
use crate::error::{Error, Result};
use crate::normalize::normalize_body;
use crate::transcription::probe_error;

/// Temperature sent when the profile leaves it unset.
const DEFAULT_TEMPERATURE: f64 = 0.3;

pub struct OpenAiChatBackend;

#[async_trait]
impl ProcessingBackend for OpenAiChatBackend {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn process(
        &self,
        client: &reqwest::Client,
        text: &str,
        profile: &ProcessingProfile,
    ) -> Result<ProcessOutcome> {
        let response = client
            .post(&profile.endpoint)
            .header(AUTHORIZATION, format!("Bearer {}", profile.api_key))
            .json(&build_body(profile, text))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Error::from_response(response).await);
        }
        let body = response.text().await?;
        Ok(ProcessOutcome::from_normalized(normalize_body(&body)))
    }

    async fn test_connection(
        &self,
        client: &reqwest::Client,
        profile: &ProcessingProfile,
    ) -> Result<()> {
        let response = client
            .get(models_url(&profile.endpoint))
            .header(AUTHORIZATION, format!("Bearer {}", profile.api_key))
            .send()
            .await
            .map_err(probe_error)?;
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

pub(crate) fn build_body(profile: &ProcessingProfile, text: &str) -> Value {
    json!({
        "model": profile.model,
        "messages": [
            { "role": "system", "content": profile.system_prompt },
            { "role": "user", "content": format!("{USER_TEXT_PREFIX}{text}") }
        ],
        "temperature": profile.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    })
}

fn models_url(endpoint: &str) -> String {
    let base = endpoint.split("/chat/completions").next().unwrap_or(endpoint);
    format!("{base}/models")
}
