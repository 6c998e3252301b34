//! `naniwa-weather` - daily Osaka weather bot
//!
//! Fetches the JMA prefectural forecast, rewrites it into Kansai dialect,
//! renders a small weather card image, and hands both to the posting and
//! storage collaborators.

pub mod card;
pub mod config;
pub mod dialect;
pub mod error;
pub mod extract;
pub mod feed;
pub mod index_page;
pub mod jma;
pub mod mode;
pub mod publish;
pub mod report_text;
pub mod run;

// Re-export core types for public API
pub use card::{AssetSource, CardRenderer, EmbeddedAssets, IconSpec};
pub use config::BotConfig;
pub use dialect::to_dialect;
pub use error::{Result, WeatherBotError};
pub use extract::{extract_day, DaySummary};
pub use feed::{FeedEntry, FeedResolver};
pub use mode::DaySlot;
pub use report_text::compose_text;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
