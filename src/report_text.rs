//! Forecast text composition.
//!
//! Builds the multi-line status message from the extracted day summary,
//! stitching the Base/Temporary/Becoming sub-statements into one dialect
//! sentence plus temperature lines and the fixed hashtag.

use std::iter;

use crate::dialect::to_dialect;
use crate::extract::DaySummary;
use crate::jma::WeatherInfo;

/// Time modifiers containing one of these keep the sentence flowing: no
/// closing particle before them and no topic particle after.
const SOFT_MARKERS: [&str; 2] = ["時々", "後"];

const HASHTAG: &str = "#naniwa_weather";

fn is_soft(modifier: &str) -> bool {
    SOFT_MARKERS.iter().any(|marker| modifier.contains(marker))
}

fn sub_statements(summary: &DaySummary) -> impl Iterator<Item = &WeatherInfo> {
    let segment = &summary.segment;
    iter::once(&segment.base)
        .chain(segment.temporary.iter())
        .chain(segment.becoming.iter())
}

/// Compose the full status message for one day-slot.
#[must_use]
pub fn compose_text(summary: &DaySummary, day_label: &str) -> String {
    let mut body = String::new();

    for info in sub_statements(summary) {
        if !info.time_modifier.is_empty() {
            if !is_soft(&info.time_modifier) {
                body.push_str(&to_dialect("や。"));
            }
            body.push_str(&to_dialect(&info.time_modifier));
            if !is_soft(&info.time_modifier) {
                body.push_str(&to_dialect("は"));
            }
        }
        body.push_str(&to_dialect(&info.weather.text));
    }
    body.push_str(&to_dialect("や。"));

    if let Some(sub_area) = &summary.segment.sub_area {
        if !sub_area.sentence.is_empty() {
            body.push_str(&to_dialect("なんか"));
            body.push_str(&to_dialect(&sub_area.sentence));
            body.push_str(&to_dialect("らしいで"));
        }
    }

    let low = summary.low_value();
    let high = summary.high_value();

    format!(
        "大阪の{day_label}の天気は基本{body}\nいっちゃん低い温度は {low}\nいっちゃん高い温度は {high}やで\n{HASHTAG}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jma::{SubArea, Weather, WeatherForecastPart};

    fn weather(modifier: &str, text: &str) -> WeatherInfo {
        WeatherInfo {
            time_modifier: modifier.to_string(),
            weather: Weather {
                weather_type: "天気".to_string(),
                text: text.to_string(),
            },
        }
    }

    fn summary(segment: WeatherForecastPart, low: &str, high: &str) -> DaySummary {
        DaySummary {
            segment,
            low: low.to_string(),
            high: high.to_string(),
        }
    }

    fn plain_segment(base: WeatherInfo) -> WeatherForecastPart {
        WeatherForecastPart {
            ref_id: "1".to_string(),
            sentence: String::new(),
            base,
            temporary: Vec::new(),
            becoming: Vec::new(),
            sub_area: None,
        }
    }

    #[test]
    fn test_base_only_message_matches_template() {
        let summary = summary(plain_segment(weather("", "晴れ")), "18度", "27度");
        let text = compose_text(&summary, "today (3月1日)");
        assert_eq!(
            text,
            "大阪のtoday (3月1日)の天気は基本☀や。\nいっちゃん低い温度は 18\nいっちゃん高い温度は 27やで\n#naniwa_weather"
        );
    }

    #[test]
    fn test_soft_modifier_flows_without_particles() {
        let mut segment = plain_segment(weather("", "くもり"));
        segment.becoming = vec![weather("後", "雨")];
        let summary = summary(segment, "10度", "15度");

        let text = compose_text(&summary, "今日(3月1日)");
        // 後 is itself rewritten by the dialect rules, but gets no や。/は
        // around it.
        assert!(text.contains("基本☁からの☔や。"));
    }

    #[test]
    fn test_hard_modifier_gets_closing_and_topic_particles() {
        let mut segment = plain_segment(weather("", "晴れ"));
        segment.temporary = vec![weather("未明", "雨")];
        let summary = summary(segment, "10度", "15度");

        let text = compose_text(&summary, "今日(3月1日)");
        assert!(text.contains("基本☀や。夜おそぉには☔や。"));
    }

    #[test]
    fn test_sub_area_note_is_appended_in_dialect() {
        let mut segment = plain_segment(weather("", "晴れ"));
        segment.sub_area = Some(SubArea {
            sentence: "山地では雪".to_string(),
        });
        let summary = summary(segment, "0度", "5度");

        let text = compose_text(&summary, "今日(3月1日)");
        assert!(text.contains("や。なんか山のほうらへんは⛄らしいで"));
    }

    #[test]
    fn test_temperature_unit_is_stripped() {
        let summary = summary(plain_segment(weather("", "雨")), "3度", "9度");
        let text = compose_text(&summary, "明日(3月2日)");
        let lines: Vec<&str> = text.lines().collect();
        // the unit marker is dropped from the values; the label's 温度 keeps
        // its own 度
        assert_eq!(lines[1], "いっちゃん低い温度は 3");
        assert_eq!(lines[2], "いっちゃん高い温度は 9やで");
        assert!(!text.contains("3度"));
        assert!(!text.contains("9度"));
    }

    #[test]
    fn test_hashtag_is_last_line() {
        let summary = summary(plain_segment(weather("", "雪")), "0度", "2度");
        let text = compose_text(&summary, "今日(1月10日)");
        assert_eq!(text.lines().last(), Some("#naniwa_weather"));
    }
}
