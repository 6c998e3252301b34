//! Error types for the `naniwa-weather` pipeline

use thiserror::Error;

/// Main error type for the weather bot pipeline
#[derive(Error, Debug)]
pub enum WeatherBotError {
    /// Network or HTTP status failure while fetching the feed or a document
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Malformed feed or forecast markup, or a non-numeric id field
    #[error("parse error: {0}")]
    Parse(String),

    /// No feed entry matched the publisher filter and time window
    #[error("no matching feed entry: {0}")]
    NotFound(String),

    /// Document parsed but the requested day-slot segment is absent
    #[error("forecast segment missing: {0}")]
    MissingSegment(String),

    /// Document parsed but a required temperature time-define is absent
    #[error("temperature missing: {0}")]
    MissingTemperature(String),

    /// Weather condition name has no icon mapping
    #[error("unsupported weather condition: {0}")]
    UnsupportedCondition(String),

    /// Font or icon asset could not be read
    #[error("asset load error: {0}")]
    AssetLoad(String),

    /// Image or text serialization failure
    #[error("encode error: {0}")]
    Encode(String),

    /// Configuration-related errors
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl WeatherBotError {
    pub fn fetch<S: Into<String>>(message: S) -> Self {
        Self::Fetch(message.into())
    }

    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn missing_segment<S: Into<String>>(message: S) -> Self {
        Self::MissingSegment(message.into())
    }

    pub fn missing_temperature<S: Into<String>>(message: S) -> Self {
        Self::MissingTemperature(message.into())
    }

    pub fn unsupported_condition<S: Into<String>>(message: S) -> Self {
        Self::UnsupportedCondition(message.into())
    }

    pub fn asset_load<S: Into<String>>(message: S) -> Self {
        Self::AssetLoad(message.into())
    }

    pub fn encode<S: Into<String>>(message: S) -> Self {
        Self::Encode(message.into())
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }
}

/// Core result type used throughout the crate
pub type Result<T> = std::result::Result<T, WeatherBotError>;
