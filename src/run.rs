//! The run driver: one full fetch → extract → compose → render → publish
//! cycle. Fully sequential and fail-fast; any error aborts the run with no
//! partial posting.

use anyhow::{Context, Result};
use chrono::Utc;
use chrono_tz::Asia::Tokyo;
use tracing::info;

use crate::card::{CardRenderer, EmbeddedAssets, IconSpec};
use crate::config::BotConfig;
use crate::extract;
use crate::feed::FeedResolver;
use crate::index_page::render_index;
use crate::mode::DaySlot;
use crate::publish::{ArtifactStore, DirStore, StatusPoster};
use crate::report_text::compose_text;

pub async fn run(config: &BotConfig) -> Result<()> {
    let now = config.run.now_override.unwrap_or_else(Utc::now);
    let local = now.with_timezone(&Tokyo);
    let slot = DaySlot::select(&local);
    info!("run start at {local}, reporting {slot:?}");

    let client = reqwest::Client::new();

    let resolver = FeedResolver::new(client.clone(), &config.feed);
    let link = resolver
        .resolve(slot.feed_window(now))
        .await
        .context("failed to resolve forecast document link")?;

    let report = extract::fetch_report(&client, &link)
        .await
        .with_context(|| format!("failed to fetch forecast document {link}"))?;

    let summary = extract::extract_day(&report, slot)
        .with_context(|| format!("failed to extract day-slot {:?}", slot.ref_id()))?;
    info!(
        "forecast: {} / low {} / high {}",
        summary.segment.base.weather.text, summary.low, summary.high
    );

    let serial = now.timestamp();
    let day_label = slot.day_label(local.date_naive());

    let mut text = compose_text(&summary, &day_label);
    text.push_str(&format!(
        "\n{}/index.html?{serial}",
        config.publish.base_url
    ));

    let icon_spec = IconSpec::from_summary(&summary);
    let renderer = CardRenderer::new(EmbeddedAssets);
    let card = renderer
        .render(&icon_spec)
        .context("failed to render weather card")?;

    let index = render_index(
        slot.reported_day(local.date_naive()),
        serial,
        &config.publish.base_url,
    );

    let store = DirStore::new(config.publish.output_dir.as_str());
    store.put("weather.png", "image/png", &card)?;
    store.put("index.html", "text/html", index.as_bytes())?;

    match &config.publish.mastodon {
        Some(mastodon) => {
            StatusPoster::new(client, mastodon)
                .post(&text)
                .await
                .context("failed to post status")?;
        }
        None => info!("posting unconfigured, skipping status:\n{text}"),
    }

    info!("run complete");
    Ok(())
}
