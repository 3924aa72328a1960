//! Colour theme for rendered charts.
//!
//! Themes are TOML documents. The default theme is embedded in the binary so
//! rendering works without any files on disk; [`ChartTheme::from_toml_str`]
//! parses alternatives through the same `config` pipeline.

use config::{Config, File, FileFormat};
use plotters::style::RGBColor;
use serde::Deserialize;

const DEFAULT_THEME_SRC: &str = r##"
[series]
bar   = "#1f77b4"
line  = "#1f77b4"
box   = "#1f77b4"
edge  = "black"

[split]
quick = "#ff7f0e"
long  = "#1f77b4"

[canvas]
background = "white"
text       = "black"
"##;

// ---------------------------------------------------------------------------
// Raw (serde) types — mirror the TOML structure
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawSeries {
    bar: String,
    line: String,
    #[serde(rename = "box")]
    boxplot: String,
    edge: String,
}

#[derive(Debug, Deserialize)]
struct RawSplit {
    quick: String,
    long: String,
}

#[derive(Debug, Deserialize)]
struct RawCanvas {
    background: String,
    text: String,
}

#[derive(Debug, Deserialize)]
struct RawTheme {
    series: RawSeries,
    split: RawSplit,
    canvas: RawCanvas,
}

// ---------------------------------------------------------------------------
// Public theme type
// ---------------------------------------------------------------------------

/// Resolved chart colours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartTheme {
    pub bar: RGBColor,
    pub line: RGBColor,
    pub boxplot: RGBColor,
    /// Outline drawn around histogram bins.
    pub edge: RGBColor,
    pub quick: RGBColor,
    pub long: RGBColor,
    pub background: RGBColor,
    pub text: RGBColor,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self::load_default()
    }
}

impl ChartTheme {
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_default() -> Self {
        Self::from_toml_str(DEFAULT_THEME_SRC).expect("embedded default chart theme must be valid")
    }

    /// Parse a theme from a TOML string. Every colour must resolve.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        let raw: RawTheme = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        Ok(Self {
            bar: color(&raw.series.bar)?,
            line: color(&raw.series.line)?,
            boxplot: color(&raw.series.boxplot)?,
            edge: color(&raw.series.edge)?,
            quick: color(&raw.split.quick)?,
            long: color(&raw.split.long)?,
            background: color(&raw.canvas.background)?,
            text: color(&raw.canvas.text)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn color(s: &str) -> anyhow::Result<RGBColor> {
    parse_color(s).ok_or_else(|| anyhow::anyhow!("unrecognised colour {s:?}"))
}

/// Parse a colour name or `#rrggbb` into an [`RGBColor`].
fn parse_color(s: &str) -> Option<RGBColor> {
    match s.to_ascii_lowercase().as_str() {
        "black" => Some(RGBColor(0, 0, 0)),
        "white" => Some(RGBColor(255, 255, 255)),
        "red" => Some(RGBColor(214, 39, 40)),
        "green" => Some(RGBColor(44, 160, 44)),
        "blue" => Some(RGBColor(31, 119, 180)),
        "orange" => Some(RGBColor(255, 127, 14)),
        "gray" | "grey" => Some(RGBColor(127, 127, 127)),
        s if s.starts_with('#') && s.len() == 7 && s.is_ascii() => {
            let r = u8::from_str_radix(&s[1..3], 16).ok()?;
            let g = u8::from_str_radix(&s[3..5], 16).ok()?;
            let b = u8::from_str_radix(&s[5..7], 16).ok()?;
            Some(RGBColor(r, g, b))
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
