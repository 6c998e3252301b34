//! JMA Atom feed resolution.
//!
//! Fetches the regular prefectural-forecast feed and picks the entry published
//! by the configured office, strictly inside a given time window.

use chrono::{DateTime, Utc};
use quick_xml::de::from_str;
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::FeedConfig;
use crate::error::{Result, WeatherBotError};

/// One published-forecast-document announcement from the feed.
#[derive(Debug, Clone)]
pub struct FeedEntry {
    pub title: String,
    pub author: String,
    pub link: String,
    pub updated: DateTime<Utc>,
}

/// Atom feed structure for deserialization
#[derive(Debug, Deserialize)]
struct AtomFeed {
    #[serde(rename = "entry", default)]
    entries: Vec<AtomEntry>,
}

#[derive(Debug, Deserialize)]
struct AtomEntry {
    #[serde(rename = "title")]
    title: String,
    #[serde(rename = "link")]
    link: AtomLink,
    #[serde(rename = "author")]
    author: AtomAuthor,
    #[serde(rename = "updated")]
    updated: String,
}

#[derive(Debug, Deserialize)]
struct AtomLink {
    #[serde(rename = "@href")]
    href: String,
}

#[derive(Debug, Deserialize)]
struct AtomAuthor {
    #[serde(rename = "name")]
    name: String,
}

/// Parse the Atom feed markup into entries.
pub fn parse_feed(xml: &str) -> Result<Vec<FeedEntry>> {
    let feed: AtomFeed =
        from_str(xml).map_err(|e| WeatherBotError::parse(format!("malformed feed: {e}")))?;

    feed.entries
        .into_iter()
        .map(|entry| {
            let updated = DateTime::parse_from_rfc3339(&entry.updated)
                .map_err(|e| {
                    WeatherBotError::parse(format!(
                        "bad entry timestamp {:?}: {e}",
                        entry.updated
                    ))
                })?
                .with_timezone(&Utc);
            Ok(FeedEntry {
                title: entry.title,
                author: entry.author.name,
                link: entry.link.href,
                updated,
            })
        })
        .collect()
}

/// Resolves the forecast document link for one run.
pub struct FeedResolver {
    client: reqwest::Client,
    feed_url: String,
    title: String,
    author: String,
}

impl FeedResolver {
    #[must_use]
    pub fn new(client: reqwest::Client, config: &FeedConfig) -> Self {
        Self {
            client,
            feed_url: config.url.clone(),
            title: config.title.clone(),
            author: config.author.clone(),
        }
    }

    /// Fetch the feed and return the document link for the entry whose
    /// timestamp falls strictly inside `(start, end)`.
    pub async fn resolve(
        &self,
        window: (DateTime<Utc>, DateTime<Utc>),
    ) -> Result<String> {
        info!("fetching forecast feed from {}", self.feed_url);

        let response = self
            .client
            .get(&self.feed_url)
            .send()
            .await
            .map_err(|e| WeatherBotError::fetch(format!("feed request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherBotError::fetch(format!(
                "feed request returned {status}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| WeatherBotError::fetch(format!("feed body read failed: {e}")))?;

        let entries = parse_feed(&body)?;
        debug!("feed contained {} entries", entries.len());

        self.pick(&entries, window).map(|entry| entry.link.clone())
    }

    /// Pick the first entry matching publisher title and author whose
    /// timestamp is strictly inside the window. Entries at exactly the window
    /// boundaries never match.
    pub fn pick<'a>(
        &self,
        entries: &'a [FeedEntry],
        (start, end): (DateTime<Utc>, DateTime<Utc>),
    ) -> Result<&'a FeedEntry> {
        entries
            .iter()
            .find(|entry| {
                entry.title == self.title
                    && entry.author == self.author
                    && start < entry.updated
                    && entry.updated < end
            })
            .ok_or_else(|| {
                WeatherBotError::not_found(format!(
                    "no entry titled {:?} by {:?} updated in ({start}, {end})",
                    self.title, self.author
                ))
            })
    }
}
