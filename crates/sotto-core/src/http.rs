//! Shared HTTP client for all dialect backends.

use once_cell::sync::OnceCell;
use std::time::Duration;

use crate::error::Result;

/// Timeout applied to every pipeline request.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

static CLIENT: OnceCell<reqwest::Client> = OnceCell::new();

/// Get the process-wide reqwest client (connection pooling across stages).
pub fn client() -> Result<reqwest::Client> {
    let client = CLIENT.get_or_try_init(|| {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
    })?;
    Ok(client.clone())
}
