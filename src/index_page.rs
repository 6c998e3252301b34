//! OG index page generation.
//!
//! Renders the small HTML page that social cards point at: OG meta tags for
//! the day's title and card image, with a serial query parameter to defeat
//! link-preview caches.

use chrono::{Datelike, NaiveDate};

const WEEKDAYS: [&str; 7] = ["日", "月", "火", "水", "木", "金", "土"];

/// Japanese day heading, e.g. 3月1日(金).
#[must_use]
pub fn day_heading(day: NaiveDate) -> String {
    let weekday = WEEKDAYS[day.weekday().num_days_from_sunday() as usize];
    format!("{}月{}日({weekday})", day.month(), day.day())
}

/// Render the index page for one run.
#[must_use]
pub fn render_index(day: NaiveDate, serial: i64, base_url: &str) -> String {
    let heading = day_heading(day);
    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8" />
    <meta property="og:title" content="大阪の天気 {heading}" />
    <meta property="og:type" content="article" />
    <meta property="og:url" content="{base_url}/index.html?{serial}" />
    <meta property="og:image" content="{base_url}/weather.png?{serial}" />
    <meta name="twitter:card" content="summary_large_image">
    <title>大阪の天気 {heading}</title>
  </head>
  <body>
    <img src="{base_url}/weather.png" />
  </body>
</html>
"#
    )
}
