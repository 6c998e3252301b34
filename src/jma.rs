//! JMA prefectural forecast document model.
//!
//! Serde structs mirroring the nested report XML. Leaf weather and
//! temperature elements live in the `jmx_eb` (element basis) namespace;
//! quick-xml matches elements by local name, so the prefix is not part of
//! the rename.

use quick_xml::de::from_str;
use serde::Deserialize;

use crate::error::{Result, WeatherBotError};

#[derive(Debug, Deserialize)]
pub struct Report {
    #[serde(rename = "Control")]
    pub control: Control,
    #[serde(rename = "Head")]
    pub head: Head,
    #[serde(rename = "Body")]
    pub body: Body,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Control {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "DateTime")]
    pub date_time: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "EditorialOffice")]
    pub editorial_office: String,
    #[serde(rename = "PublishingOffice")]
    pub publishing_office: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Head {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "ReportDateTime")]
    pub report_date_time: String,
    #[serde(rename = "TargetDateTime")]
    pub target_date_time: String,
    #[serde(rename = "InfoType")]
    pub info_type: String,
    #[serde(rename = "InfoKind")]
    pub info_kind: String,
}

#[derive(Debug, Deserialize)]
pub struct Body {
    #[serde(rename = "MeteorologicalInfos", default)]
    pub meteorological_infos: Vec<MeteorologicalInfos>,
}

/// One `MeteorologicalInfos` block, tagged with a forecast type such as
/// 区域予報 (area forecast) or 地点予報 (point-location forecast).
#[derive(Debug, Deserialize)]
pub struct MeteorologicalInfos {
    #[serde(rename = "@type")]
    pub info_type: String,
    #[serde(rename = "TimeSeriesInfo", default)]
    pub time_series: Vec<TimeSeriesInfo>,
}

impl MeteorologicalInfos {
    /// All time-defines across the block's time series, in document order.
    pub fn time_defines(&self) -> impl Iterator<Item = &TimeDefine> {
        self.time_series
            .iter()
            .flat_map(|series| series.time_defines.defines.iter())
    }

    /// All items across the block's time series, in document order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.time_series.iter().flat_map(|series| series.items.iter())
    }
}

#[derive(Debug, Deserialize)]
pub struct TimeSeriesInfo {
    #[serde(rename = "TimeDefines", default)]
    pub time_defines: TimeDefines,
    #[serde(rename = "Item", default)]
    pub items: Vec<Item>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TimeDefines {
    #[serde(rename = "TimeDefine", default)]
    pub defines: Vec<TimeDefine>,
}

/// Maps a numeric slot id to a human-readable time-of-day name.
#[derive(Debug, Deserialize)]
pub struct TimeDefine {
    #[serde(rename = "@timeId")]
    pub time_id: String,
    #[serde(rename = "Name", default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct Item {
    #[serde(rename = "Kind", default)]
    pub kinds: Vec<Kind>,
}

#[derive(Debug, Deserialize)]
pub struct Kind {
    #[serde(rename = "Property")]
    pub property: Option<Property>,
}

#[derive(Debug, Deserialize)]
pub struct Property {
    #[serde(rename = "Type", default)]
    pub property_type: String,
    #[serde(rename = "DetailForecast")]
    pub detail_forecast: Option<DetailForecast>,
    #[serde(rename = "TemperaturePart")]
    pub temperature_part: Option<TemperaturePart>,
}

#[derive(Debug, Deserialize)]
pub struct DetailForecast {
    #[serde(rename = "WeatherForecastPart", default)]
    pub parts: Vec<WeatherForecastPart>,
}

/// One day-slot forecast segment. `ref_id` "1" is today, "2" is tomorrow.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherForecastPart {
    #[serde(rename = "@refID")]
    pub ref_id: String,
    #[serde(rename = "Sentence", default)]
    pub sentence: String,
    #[serde(rename = "Base")]
    pub base: WeatherInfo,
    #[serde(rename = "Temporary", default)]
    pub temporary: Vec<WeatherInfo>,
    #[serde(rename = "Becoming", default)]
    pub becoming: Vec<WeatherInfo>,
    #[serde(rename = "SubArea")]
    pub sub_area: Option<SubArea>,
}

/// One sub-statement: optional time modifier plus a condition phrase. The
/// weather leaf itself is mandatory; only the modifier may be absent.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherInfo {
    #[serde(rename = "TimeModifier", default)]
    pub time_modifier: String,
    // local name; also matches the document's jmx_eb:Weather
    #[serde(rename = "Weather")]
    pub weather: Weather,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Weather {
    #[serde(rename = "@type", default)]
    pub weather_type: String,
    #[serde(rename = "$text")]
    pub text: String,
}

/// Free-text regional caveat appended to the main forecast sentence.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SubArea {
    #[serde(rename = "Sentence")]
    pub sentence: String,
}

#[derive(Debug, Deserialize)]
pub struct TemperaturePart {
    // local name; also matches the document's jmx_eb:Temperature
    #[serde(rename = "Temperature")]
    pub temperature: Option<Temperature>,
}

/// Temperature leaf. `description` is display text with a trailing unit
/// marker (e.g. "26度") that consumers strip textually, never parsed here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Temperature {
    #[serde(rename = "@refID")]
    pub ref_id: String,
    #[serde(rename = "@type")]
    pub temperature_type: String,
    #[serde(rename = "@description")]
    pub description: String,
    #[serde(rename = "$text")]
    pub value: String,
}

/// Parse a forecast document into the report model.
pub fn parse_report(xml: &str) -> Result<Report> {
    from_str(xml).map_err(|e| WeatherBotError::parse(format!("malformed forecast document: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::OSAKA_REPORT_XML;

    #[test]
    fn test_parse_report_structure() {
        let report = parse_report(OSAKA_REPORT_XML).unwrap();
        assert_eq!(report.control.title, "府県天気予報");
        assert_eq!(report.control.publishing_office, "大阪管区気象台");
        assert_eq!(report.body.meteorological_infos.len(), 2);

        let area = &report.body.meteorological_infos[0];
        assert_eq!(area.info_type, "区域予報");
        let item = area.items().next().unwrap();
        let property = item.kinds[0].property.as_ref().unwrap();
        let parts = &property.detail_forecast.as_ref().unwrap().parts;
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].ref_id, "1");
        assert_eq!(parts[0].base.weather.text, "晴れ");
        assert_eq!(parts[1].ref_id, "2");
    }

    #[test]
    fn test_parse_report_point_forecast_block() {
        let report = parse_report(OSAKA_REPORT_XML).unwrap();
        let point = &report.body.meteorological_infos[1];
        assert_eq!(point.info_type, "地点予報");

        let names: Vec<&str> = point.time_defines().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["今日日中", "明日朝", "明日日中"]);

        let item = point.items().next().unwrap();
        let first_temp = item.kinds[0]
            .property
            .as_ref()
            .unwrap()
            .temperature_part
            .as_ref()
            .unwrap()
            .temperature
            .as_ref()
            .unwrap();
        assert_eq!(first_temp.description, "27度");
        assert_eq!(first_temp.value, "27");
    }

    #[test]
    fn test_namespaced_leaves_match_by_local_name() {
        let info: WeatherInfo =
            from_str(r#"<Base><jmx_eb:Weather type="天気">晴れ</jmx_eb:Weather></Base>"#).unwrap();
        assert_eq!(info.weather.text, "晴れ");
        assert_eq!(info.weather.weather_type, "天気");

        let part: TemperaturePart = from_str(
            r#"<TemperaturePart><jmx_eb:Temperature type="最高気温" refID="1" description="27度">27</jmx_eb:Temperature></TemperaturePart>"#,
        )
        .unwrap();
        let temperature = part.temperature.unwrap();
        assert_eq!(temperature.description, "27度");
        assert_eq!(temperature.value, "27");
    }

    #[test]
    fn test_missing_weather_leaf_is_rejected() {
        let result: std::result::Result<WeatherInfo, _> =
            from_str("<Base><TimeModifier>後</TimeModifier></Base>");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_report_rejects_bad_markup() {
        let result = parse_report("<Report><Body></Report>");
        assert!(matches!(result, Err(WeatherBotError::Parse(_))));
    }
}
