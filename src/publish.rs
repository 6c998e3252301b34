//! Output collaborators: artifact storage and status posting.
//!
//! Thin, stateless wrappers around the outside world. The pipeline hands
//! them finished bytes; they carry no decision logic of their own.

use std::fs;
use std::path::PathBuf;

use tracing::info;

use crate::config::MastodonConfig;
use crate::error::{Result, WeatherBotError};

/// Where finished artifacts (card image, index page) end up.
pub trait ArtifactStore {
    fn put(&self, key: &str, content_type: &str, bytes: &[u8]) -> Result<()>;
}

/// Artifact store over a local directory.
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    #[must_use]
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }
}

impl ArtifactStore for DirStore {
    fn put(&self, key: &str, content_type: &str, bytes: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        let path = self.root.join(key);
        fs::write(&path, bytes)?;
        info!("stored {content_type} artifact at {}", path.display());
        Ok(())
    }
}

/// Posts the day's status to a Mastodon-compatible endpoint.
pub struct StatusPoster {
    client: reqwest::Client,
    server: String,
    access_token: String,
}

impl StatusPoster {
    #[must_use]
    pub fn new(client: reqwest::Client, config: &MastodonConfig) -> Self {
        Self {
            client,
            server: config.server.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone(),
        }
    }

    /// Post one unlisted status.
    pub async fn post(&self, status: &str) -> Result<()> {
        let url = format!("{}/api/v1/statuses", self.server);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .form(&[("status", status), ("visibility", "unlisted")])
            .send()
            .await
            .map_err(|e| WeatherBotError::fetch(format!("status post failed: {e}")))?;

        let http_status = response.status();
        if !http_status.is_success() {
            return Err(WeatherBotError::fetch(format!(
                "status post returned {http_status}"
            )));
        }

        let posted: serde_json::Value = response
            .json()
            .await
            .map_err(|e| WeatherBotError::parse(format!("status post response: {e}")))?;
        if let Some(status_url) = posted.get("url").and_then(|v| v.as_str()) {
            info!("posted status at {status_url}");
        }
        Ok(())
    }
}
