//! Weather card rendering.
//!
//! Composites a fixed 300×175 canvas: one or two condition icons, an optional
//! connector phrase between them, and a colored temperature caption, encoded
//! as PNG. Font and icons come from an injected read-only asset source.

use std::io::Cursor;

use ab_glyph::{FontVec, PxScale};
use image::imageops::FilterType;
use image::{ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use rust_embed::RustEmbed;
use tracing::debug;

use crate::error::{Result, WeatherBotError};
use crate::extract::DaySummary;

pub const CARD_WIDTH: u32 = 300;
pub const CARD_HEIGHT: u32 = 175;

const BACKGROUND: Rgba<u8> = Rgba([0, 200, 255, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

const ICON_HEIGHT: u32 = 100;
const ORIGIN_X: i64 = 25;
const ORIGIN_Y: i64 = 20;
const CONNECTOR_DROP: i64 = 50;
const CAPTION_GAP: i64 = 10;

const CAPTION_PT: f32 = 36.0;
const CONNECTOR_PT: f32 = 24.0;

const FONT_ASSET: &str = "DejaVuSans.ttf";

/// What to draw on the card, derived from a day summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSpec {
    pub first: String,
    pub second: Option<String>,
    pub third: Option<String>,
    pub low: String,
    pub high: String,
}

impl IconSpec {
    /// Derive the icon chain from the summary's weather text, split on
    /// whitespace. A two-token-or-less base falls back to the first Becoming
    /// statement for the second icon; its modifier doubles as the connector
    /// phrase when it is one of the flowing forms.
    #[must_use]
    pub fn from_summary(summary: &DaySummary) -> Self {
        let segment = &summary.segment;
        let tokens: Vec<&str> = segment.base.weather.text.split_whitespace().collect();

        let mut spec = Self {
            first: tokens.first().copied().unwrap_or_default().to_string(),
            second: None,
            third: None,
            low: summary.low_value(),
            high: summary.high_value(),
        };

        if tokens.len() > 2 {
            spec.second = Some(tokens[1].to_string());
            spec.third = Some(tokens[2].to_string());
        } else if let Some(becoming) = segment.becoming.first() {
            let connector = match becoming.time_modifier.as_str() {
                "後" | "時々" => becoming.time_modifier.clone(),
                _ => "後".to_string(),
            };
            spec.second = Some(connector);
            spec.third = Some(becoming.weather.text.clone());
        }

        spec
    }
}

/// Read-only provider of font and icon assets.
pub trait AssetSource {
    fn open(&self, name: &str) -> Result<Vec<u8>>;
}

#[derive(RustEmbed)]
#[folder = "assets/"]
struct Assets;

/// Asset source over the crate's embedded bundle.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbeddedAssets;

impl AssetSource for EmbeddedAssets {
    fn open(&self, name: &str) -> Result<Vec<u8>> {
        Assets::get(name)
            .map(|file| file.data.into_owned())
            .ok_or_else(|| WeatherBotError::asset_load(format!("no embedded asset {name:?}")))
    }
}

fn icon_asset(condition: &str) -> Result<&'static str> {
    match condition {
        "晴れ" => Ok("sun.png"),
        "雨" => Ok("rain.png"),
        "雪" => Ok("snow.png"),
        "くもり" => Ok("cloud.png"),
        "雷" => Ok("thunder.png"),
        other => Err(WeatherBotError::unsupported_condition(format!(
            "weather condition {other:?} has no icon"
        ))),
    }
}

/// Renders weather cards from an asset source.
pub struct CardRenderer<A: AssetSource> {
    assets: A,
}

impl<A: AssetSource> CardRenderer<A> {
    pub fn new(assets: A) -> Self {
        Self { assets }
    }

    fn font(&self) -> Result<FontVec> {
        let bytes = self.assets.open(FONT_ASSET)?;
        FontVec::try_from_vec(bytes)
            .map_err(|_| WeatherBotError::asset_load(format!("invalid font asset {FONT_ASSET:?}")))
    }

    fn icon(&self, condition: &str) -> Result<RgbaImage> {
        let name = icon_asset(condition)?;
        let bytes = self.assets.open(name)?;
        let decoded = image::load_from_memory(&bytes)
            .map_err(|e| WeatherBotError::asset_load(format!("undecodable icon {name:?}: {e}")))?;

        let width = decoded.width() * ICON_HEIGHT / decoded.height().max(1);
        Ok(decoded
            .resize_exact(width.max(1), ICON_HEIGHT, FilterType::Lanczos3)
            .to_rgba8())
    }

    /// Render the card and encode it losslessly. Any failure yields an error
    /// and no partial image.
    pub fn render(&self, spec: &IconSpec) -> Result<Vec<u8>> {
        debug!(?spec, "rendering weather card");
        let font = self.font()?;
        let mut canvas = RgbaImage::from_pixel(CARD_WIDTH, CARD_HEIGHT, BACKGROUND);

        let first = self.icon(&spec.first)?;
        image::imageops::overlay(&mut canvas, &first, ORIGIN_X, ORIGIN_Y);
        let mut next_x = ORIGIN_X + i64::from(first.width());
        let mut chain_bottom = ORIGIN_Y + i64::from(first.height());

        if let (Some(connector), Some(third)) = (&spec.second, &spec.third) {
            let scale = PxScale::from(CONNECTOR_PT);
            draw_text_mut(
                &mut canvas,
                WHITE,
                next_x as i32,
                (ORIGIN_Y + CONNECTOR_DROP) as i32,
                scale,
                &font,
                connector,
            );
            let (connector_width, _) = text_size(scale, &font, connector);
            next_x += i64::from(connector_width);

            let third_icon = self.icon(third)?;
            image::imageops::overlay(&mut canvas, &third_icon, next_x, ORIGIN_Y);
            chain_bottom = chain_bottom.max(ORIGIN_Y + i64::from(third_icon.height()));
        }

        Self::draw_caption(&mut canvas, &font, ORIGIN_X, chain_bottom, spec);

        let mut buffer = Vec::new();
        canvas
            .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .map_err(|e| WeatherBotError::encode(format!("PNG encoding failed: {e}")))?;
        Ok(buffer)
    }

    /// Temperature caption: four colored runs below the icon chain.
    fn draw_caption(canvas: &mut RgbaImage, font: &FontVec, x: i64, y: i64, spec: &IconSpec) {
        let scale = PxScale::from(CAPTION_PT);
        let high = format!("{}\u{b0}", spec.high);
        let low = format!("{}\u{b0}", spec.low);

        let mut pen_x = x;
        let runs: [(&str, Rgba<u8>, i64); 4] = [
            ("H:", WHITE, 0),
            (&high, RED, CAPTION_GAP),
            ("L:", WHITE, 0),
            (&low, BLUE, 0),
        ];
        for (text, color, trailing_gap) in runs {
            draw_text_mut(canvas, color, pen_x as i32, y as i32, scale, font, text);
            let (width, _) = text_size(scale, font, text);
            pen_x += i64::from(width) + trailing_gap;
        }
    }
}
