//! Custom dialect for unknown servers. The body carries `prompt`,
//! `system` AND a `messages` array at once so that both completion-style
//! and chat-style implementations find what they expect; the bearer
//! header is only attached when a key is configured.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde_json::{Value, json};

use super::{ProcessOutcome, ProcessingBackend};
use crate::config::ProcessingProfile;
use crate::error::{Error, Result};
use crate::normalize::normalize_body;

pub struct CustomBackend;

#[async_trait]
impl ProcessingBackend for CustomBackend {
    fn name(&self) -> &'static str {
        "custom"
    }

    async fn process(
        &self,
        client: &reqwest::Client,
        text: &str,
        profile: &ProcessingProfile,
    ) -> Result<ProcessOutcome> {
        let mut request = client
            .post(&profile.endpoint)
            .json(&build_body(profile, text));
        if !profile.api_key.is_empty() {
            request = request.header(AUTHORIZATION, format!("Bearer {}", profile.api_key));
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(Error::from_response(response).await);
        }
        let body = response.text().await?;
        Ok(ProcessOutcome::from_normalized(normalize_body(&body)))
    }

    /// There is no route a custom server is known to answer.
    async fn test_connection(
        &self,
        _client: &reqwest::Client,
        _profile: &ProcessingProfile,
    ) -> Result<()> {
        Ok(())
    }
}

pub(crate) fn build_body(profile: &ProcessingProfile, text: &str) -> Value {
    json!({
        "model": profile.model,
        "prompt": text,
        "system": profile.system_prompt,
        "messages": [
            { "role": "system", "content": profile.system_prompt },
            { "role": "user", "content": text }
        ]
    })
}
