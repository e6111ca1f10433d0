//! Ollama dialect. The endpoint path decides the request shape: a
//! `/api/chat` route gets a messages body, anything else gets the
//! generate body with the system prompt split out. No auth header; the
//! service is assumed local.

use async_trait::async_trait;
use serde_json::{Value, json};

use super::{ProcessOutcome, ProcessingBackend, USER_TEXT_PREFIX};
use crate::config::ProcessingProfile;
use crate::error::{Error, Result};
use crate::normalize::normalize_body;
use crate::transcription::probe_error;

pub struct OllamaBackend;

#[async_trait]
impl ProcessingBackend for OllamaBackend {
    fn name(&self) -> &'static str {
        "ollama"
    }

    async fn process(
        &self,
        client: &reqwest::Client,
        text: &str,
        profile: &ProcessingProfile,
    ) -> Result<ProcessOutcome> {
        let response = client
            .post(&profile.endpoint)
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
            .get(tags_url(&profile.endpoint)?)
            .send()
            .await
            .map_err(probe_error)?;
        if !response.status().is_success() {
            return Err(Error::Probe(format!(
                "Ollama status: {}",
                response.status().as_u16()
            )));
        }
        Ok(())
    }
}

pub(crate) fn build_body(profile: &ProcessingProfile, text: &str) -> Value {
    if profile.endpoint.contains("/api/chat") {
        json!({
            "model": profile.model,
            "messages": [
                { "role": "system", "content": profile.system_prompt },
                { "role": "user", "content": text }
            ],
            "stream": false
        })
    } else {
        json!({
            "model": profile.model,
            "system": profile.system_prompt,
            "prompt": format!("{USER_TEXT_PREFIX}{text}"),
            "stream": false
        })
    }
}

/// The probe hits `<origin>/api/tags`, Ollama's model listing.
fn tags_url(endpoint: &str) -> Result<String> {
    let origin = reqwest::Url::parse(endpoint)
        .map_err(|e| Error::Probe(format!("Invalid endpoint URL: {e}")))?
        .origin()
        .ascii_serialization();
    Ok(format!("{origin}/api/tags"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(endpoint: &str) -> ProcessingProfile {
        ProcessingProfile {
            endpoint: endpoint.to_string(),
            model: "qwen2.5-coder:14b".to_string(),
            system_prompt: "clean this up".to_string(),
            ..ProcessingProfile::default()
        }
    }

    #[test]
    fn generate_route_gets_prompt_body() {
        let body = build_body(&profile("http://localhost:11434/api/generate"), "hi there");
        assert_eq!(body["prompt"], "Raw Transcribed Text: hi there");
        assert_eq!(body["system"], "clean this up");
        assert_eq!(body["stream"], false);
        assert!(body.get("messages").is_none());
    }

    #[test]
    fn chat_route_gets_messages_body() {
        let body = build_body(&profile("http://localhost:11434/api/chat"), "hi there");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "hi there");
        assert!(body.get("prompt").is_none());
    }

    #[test]
    fn tags_url_uses_the_origin() {
        assert_eq!(
            tags_url("http://localhost:11434/api/generate").unwrap(),
            "http://localhost:11434/api/tags"
        );
        assert!(tags_url("not a url").is_err());
    }
}
