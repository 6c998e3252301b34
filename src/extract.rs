//! Forecast extraction: reduce a parsed report to the one day-slot view the
//! rest of the pipeline consumes.

use tracing::{debug, info};

use crate::error::{Result, WeatherBotError};
use crate::jma::{parse_report, MeteorologicalInfos, Report, WeatherForecastPart};
use crate::mode::DaySlot;

/// The type tag marking a point-location forecast block, which carries the
/// temperature time series.
const POINT_FORECAST_TYPE: &str = "地点予報";

/// Reduced per-run view of one forecast document. Constructed once,
/// immutable afterwards.
#[derive(Debug, Clone)]
pub struct DaySummary {
    pub segment: WeatherForecastPart,
    /// Low temperature display text, unit marker still attached (e.g. 18度).
    pub low: String,
    /// High temperature display text, unit marker still attached.
    pub high: String,
}

impl DaySummary {
    /// Low temperature with the trailing unit marker stripped.
    #[must_use]
    pub fn low_value(&self) -> String {
        strip_degree(&self.low)
    }

    /// High temperature with the trailing unit marker stripped.
    #[must_use]
    pub fn high_value(&self) -> String {
        strip_degree(&self.high)
    }
}

/// Strip the textual 度 unit marker from a temperature display string.
#[must_use]
pub fn strip_degree(text: &str) -> String {
    text.replace("度", "")
}

/// Fetch and parse the forecast document behind a feed link.
pub async fn fetch_report(client: &reqwest::Client, url: &str) -> Result<Report> {
    info!("fetching forecast document from {url}");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| WeatherBotError::fetch(format!("document request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(WeatherBotError::fetch(format!(
            "document request returned {status}"
        )));
    }

    let body = response
        .text()
        .await
        .map_err(|e| WeatherBotError::fetch(format!("document body read failed: {e}")))?;

    parse_report(&body)
}

/// Pick the day-slot segment and its temperatures out of a parsed report.
pub fn extract_day(report: &Report, slot: DaySlot) -> Result<DaySummary> {
    let segment = find_segment(report, slot)?;
    debug!("selected segment refID={}", segment.ref_id);

    let point = report
        .body
        .meteorological_infos
        .iter()
        .find(|info| info.info_type == POINT_FORECAST_TYPE)
        .ok_or_else(|| {
            WeatherBotError::missing_temperature(format!(
                "no {POINT_FORECAST_TYPE} block in document"
            ))
        })?;

    let low = temperature_by_define(point, slot.low_define())?;
    let high = temperature_by_define(point, slot.high_define())?;

    Ok(DaySummary {
        segment: segment.clone(),
        low,
        high,
    })
}

/// First segment in the leading forecast block whose refID matches the slot.
fn find_segment(report: &Report, slot: DaySlot) -> Result<&WeatherForecastPart> {
    report
        .body
        .meteorological_infos
        .first()
        .and_then(|info| info.items().next())
        .and_then(|item| item.kinds.first())
        .and_then(|kind| kind.property.as_ref())
        .and_then(|property| property.detail_forecast.as_ref())
        .and_then(|forecast| {
            forecast
                .parts
                .iter()
                .find(|part| part.ref_id == slot.ref_id())
        })
        .ok_or_else(|| {
            WeatherBotError::missing_segment(format!(
                "no forecast segment with refID {:?}",
                slot.ref_id()
            ))
        })
}

/// Look up the temperature named by a TimeDefine. The define's timeId is a
/// 1-based index into the point block's Kind list.
fn temperature_by_define(point: &MeteorologicalInfos, name: &str) -> Result<String> {
    let define = point
        .time_defines()
        .find(|define| define.name == name)
        .ok_or_else(|| {
            WeatherBotError::missing_temperature(format!("no TimeDefine named {name:?}"))
        })?;

    let index: usize = define.time_id.parse().map_err(|_| {
        WeatherBotError::parse(format!(
            "TimeDefine {name:?} has non-numeric timeId {:?}",
            define.time_id
        ))
    })?;

    point
        .items()
        .next()
        .and_then(|item| item.kinds.get(index.wrapping_sub(1)))
        .and_then(|kind| kind.property.as_ref())
        .and_then(|property| property.temperature_part.as_ref())
        .and_then(|part| part.temperature.as_ref())
        .map(|temperature| temperature.description.clone())
        .ok_or_else(|| {
            WeatherBotError::missing_temperature(format!(
                "no temperature record at timeId {index} for {name:?}"
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::OSAKA_REPORT_XML;

    fn report() -> Report {
        parse_report(OSAKA_REPORT_XML).unwrap()
    }

    #[test]
    fn test_extract_today() {
        let summary = extract_day(&report(), DaySlot::Today).unwrap();
        assert_eq!(summary.segment.ref_id, "1");
        assert_eq!(summary.segment.base.weather.text, "晴れ");
        assert_eq!(summary.low, "18度");
        assert_eq!(summary.high, "27度");
    }

    #[test]
    fn test_extract_tomorrow() {
        let summary = extract_day(&report(), DaySlot::Tomorrow).unwrap();
        assert_eq!(summary.segment.ref_id, "2");
        assert_eq!(summary.segment.base.weather.text, "くもり");
        assert_eq!(summary.low, "18度");
        assert_eq!(summary.high, "20度");
    }

    #[test]
    fn test_slot_selection_ignores_document_order() {
        // Tomorrow's part listed before today's; slot "1" must still win.
        let xml = OSAKA_REPORT_XML.replace("refID=\"1\"", "refID=\"x\"");
        let xml = xml.replace("refID=\"2\"", "refID=\"1\"");
        let xml = xml.replace("refID=\"x\"", "refID=\"2\"");
        let swapped = parse_report(&xml).unwrap();

        let summary = extract_day(&swapped, DaySlot::Today).unwrap();
        assert_eq!(summary.segment.ref_id, "1");
        assert_eq!(summary.segment.base.weather.text, "くもり");
    }

    #[test]
    fn test_missing_segment() {
        let xml = OSAKA_REPORT_XML.replace("refID=\"2\"", "refID=\"9\"");
        let report = parse_report(&xml).unwrap();
        let result = extract_day(&report, DaySlot::Tomorrow);
        assert!(matches!(result, Err(WeatherBotError::MissingSegment(_))));
    }

    #[test]
    fn test_missing_time_define_name() {
        let xml = OSAKA_REPORT_XML.replace("明日朝", "明朝");
        let report = parse_report(&xml).unwrap();
        let result = extract_day(&report, DaySlot::Today);
        assert!(matches!(
            result,
            Err(WeatherBotError::MissingTemperature(_))
        ));
    }

    #[test]
    fn test_non_numeric_time_id_is_a_parse_error() {
        // timeId 3 only occurs in the point-forecast block (明日日中).
        let xml = OSAKA_REPORT_XML.replace("timeId=\"3\"", "timeId=\"iii\"");
        let report = parse_report(&xml).unwrap();
        let result = extract_day(&report, DaySlot::Tomorrow);
        assert!(matches!(result, Err(WeatherBotError::Parse(_))));
    }

    #[test]
    fn test_strip_degree() {
        assert_eq!(strip_degree("26度"), "26");
        assert_eq!(strip_degree("5"), "5");
    }
}
