//! Self-hosted whisper server dialect.
//!
//! Local server implementations disagree on the multipart field name for
//! the audio payload: whisper-asr-webservice wants `audio_file`, several
//! faster-whisper frontends want `file`. The upload tries `audio_file`
//! first and retries once with `file` on any failure; the error surfaced
//! to the caller is the second attempt's.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

use super::{TranscriptionBackend, probe_error};
use crate::audio::AudioArtifact;
use crate::config::TranscriptionProfile;
use crate::error::{Error, Result};
use crate::normalize::normalize_body;

pub struct LocalWhisperBackend;

#[async_trait]
impl TranscriptionBackend for LocalWhisperBackend {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn transcribe(
        &self,
        client: &reqwest::Client,
        audio: &AudioArtifact,
        profile: &TranscriptionProfile,
    ) -> Result<String> {
        match upload(client, audio, profile, "audio_file").await {
            Ok(text) => Ok(text),
            Err(first) => {
                tracing::warn!("upload with field 'audio_file' failed ({first}), retrying with 'file'");
                upload(client, audio, profile, "file").await
            }
        }
    }

    async fn test_connection(
        &self,
        client: &reqwest::Client,
        profile: &TranscriptionProfile,
    ) -> Result<()> {
        let response = client
            .get(root_url(&profile.endpoint))
            .send()
            .await
            .map_err(probe_error)?;
        if !response.status().is_success() {
            return Err(Error::Probe(format!(
                "Server returned status {}",
                response.status().as_u16()
            )));
        }
        Ok(())
    }
}

async fn upload(
    client: &reqwest::Client,
    audio: &AudioArtifact,
    profile: &TranscriptionProfile,
    field_name: &str,
) -> Result<String> {
    let part = Part::bytes(audio.data().to_vec())
        .file_name(audio.file_name())
        .mime_str(audio.mime_type())?;
    let form = Form::new()
        .part(field_name.to_string(), part)
        .text("task", "transcribe")
        .text("language", "auto")
        .text("output", "txt");

    let response = client
        .post(&profile.endpoint)
        .multipart(form)
        .send()
        .await?;
    if !response.status().is_success() {
        return Err(Error::from_response(response).await);
    }
    let body = response.text().await?;
    Ok(normalize_body(&body))
}

/// The probe targets the server root: `http://host:9000/asr` answers
/// uploads, `http://host:9000/` answers health checks.
fn root_url(endpoint: &str) -> String {
    match endpoint.strip_suffix("/asr") {
        Some(base) => format!("{base}/"),
        None => endpoint.to_string(),
    }
}
