//! Configuration for the weather bot.
//!
//! Loads a TOML file layered with `NANIWA_`-prefixed environment variables.
//! Everything has a sensible default except the posting credentials, which
//! are optional: without them a run renders and stores the artifacts but
//! posts nothing (rehearsal mode).

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::WeatherBotError;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BotConfig {
    pub feed: FeedConfig,
    pub publish: PublishConfig,
    pub logging: LoggingConfig,
    pub run: RunConfig,
}

/// Feed fetch and publisher filter settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Fixed JMA regular feed URL
    #[serde(default = "default_feed_url")]
    pub url: String,
    /// Exact entry title to match
    #[serde(default = "default_feed_title")]
    pub title: String,
    /// Exact publishing office to match
    #[serde(default = "default_feed_author")]
    pub author: String,
}

/// Artifact storage and status posting settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishConfig {
    /// Directory the card image and index page are written into
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// Public base URL the index page and posted link point at
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Mastodon-compatible posting endpoint; omit to skip posting
    pub mastodon: Option<MastodonConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MastodonConfig {
    pub server: String,
    pub access_token: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Per-run overrides
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RunConfig {
    /// Fixed run instant for rehearsal runs; current time when absent
    pub now_override: Option<DateTime<Utc>>,
}

fn default_feed_url() -> String {
    "https://www.data.jma.go.jp/developer/xml/feed/regular_l.xml".to_string()
}

fn default_feed_title() -> String {
    "府県天気予報".to_string()
}

fn default_feed_author() -> String {
    "大阪管区気象台".to_string()
}

fn default_output_dir() -> String {
    "out".to_string()
}

fn default_base_url() -> String {
    "https://naniwa-weather.example.com".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: default_feed_url(),
            title: default_feed_title(),
            author: default_feed_author(),
        }
    }
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            base_url: default_base_url(),
            mastodon: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl BotConfig {
    /// Load configuration from an optional file plus environment overrides.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(
                File::from(path.to_path_buf())
                    .required(true)
                    .format(config::FileFormat::Toml),
            );
        } else {
            let default_path = Path::new("config.toml");
            if default_path.exists() {
                builder = builder.add_source(
                    File::from(default_path.to_path_buf())
                        .required(false)
                        .format(config::FileFormat::Toml),
                );
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("NANIWA")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "failed to build configuration")?;

        let config: BotConfig = settings
            .try_deserialize()
            .with_context(|| "failed to deserialize configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.feed.url.is_empty() {
            return Err(WeatherBotError::config("feed.url cannot be empty").into());
        }
        if self.feed.title.is_empty() || self.feed.author.is_empty() {
            return Err(
                WeatherBotError::config("feed.title and feed.author cannot be empty").into(),
            );
        }
        if self.publish.output_dir.is_empty() {
            return Err(WeatherBotError::config("publish.output_dir cannot be empty").into());
        }
        if let Some(mastodon) = &self.publish.mastodon {
            if mastodon.server.is_empty() || mastodon.access_token.is_empty() {
                return Err(WeatherBotError::config(
                    "publish.mastodon requires both server and access_token",
                )
                .into());
            }
        }
        Ok(())
    }
}
