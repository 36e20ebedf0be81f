use bon::Builder;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Color representation for gauge elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::new(0xff, 0xff, 0xff);
    pub const GRAY: Color = Color::new(0x80, 0x80, 0x80);
    pub const LIGHT_GRAY: Color = Color::new(0xb4, 0xb4, 0xb4);
    pub const RED: Color = Color::new(0xff, 0x00, 0x00);
    pub const LIME_GREEN: Color = Color::new(0x32, 0xcd, 0x32);
    pub const GOLD: Color = Color::new(0xff, 0xd7, 0x00);
    pub const ORANGE: Color = Color::new(0xff, 0xa5, 0x00);
    pub const YELLOW: Color = Color::new(0xff, 0xff, 0x00);
    pub const SKY: Color = Color::new(60, 120, 200);
    pub const GROUND: Color = Color::new(140, 90, 50);
    pub const BAR_BLUE: Color = Color::new(60, 120, 255);
    pub const BAR_NEGATIVE: Color = Color::new(255, 120, 60);
    pub const TRACK: Color = Color::new(30, 30, 30);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Load any instrument configuration from a JSON document. Missing fields
/// take their defaults.
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T> {
    Ok(serde_json::from_str(json)?)
}

// ============================================================================
// AIRSPEED
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AirspeedUnit {
    #[default]
    Knots,
    KilometersPerHour,
    MilesPerHour,
}

impl AirspeedUnit {
    pub const fn label(self) -> &'static str {
        match self {
            AirspeedUnit::Knots => "KNOTS",
            AirspeedUnit::KilometersPerHour => "KM/H",
            AirspeedUnit::MilesPerHour => "MPH",
        }
    }
}

/// V-speeds and scale layout of an airspeed indicator, in display units.
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[serde(default)]
pub struct AirspeedConfig {
    #[builder(default)]
    pub unit: AirspeedUnit,
    /// Bottom of the scale; slower speeds are considered unreliable.
    #[builder(default = 40.0)]
    pub start_speed: f64,
    /// Stall speed in landing configuration (bottom of the white arc).
    #[builder(default = 40.0)]
    pub vso: f64,
    /// Maximum flap extended speed (top of the white arc).
    #[builder(default = 85.0)]
    pub vfe: f64,
    /// Clean stall speed (bottom of the green arc).
    #[builder(default = 50.0)]
    pub vs1: f64,
    /// Maximum structural cruising speed.
    #[builder(default = 130.0)]
    pub vno: f64,
    /// Never exceed speed, top of the scale.
    #[builder(default = 160.0)]
    pub vne: f64,
    #[builder(default = 5)]
    pub tick_step: u32,
    #[builder(default = 20)]
    pub label_step: u32,
    #[builder(default = true)]
    pub show_unit_text: bool,
}

impl Default for AirspeedConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

// ============================================================================
// VERTICAL SPEED
// ============================================================================

#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[serde(default)]
pub struct VsiConfig {
    #[builder(default = -2000.0)]
    pub min_fpm: f64,
    #[builder(default = 2000.0)]
    pub max_fpm: f64,
    /// Compass angle of `min_fpm`.
    #[builder(default = 115.0)]
    pub start_angle: f64,
    /// Clockwise sweep from `start_angle` to `max_fpm`.
    #[builder(default = 310.0)]
    pub sweep_degrees: f64,
    #[builder(default = 100)]
    pub tick_step: u32,
    #[builder(default = 500)]
    pub major_step: u32,
}

impl Default for VsiConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

// ============================================================================
// HEADING
// ============================================================================

#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadingConfig {
    #[builder(default = true)]
    pub show_digital_readout: bool,
    #[builder(default = true)]
    pub show_heading_bug: bool,
    #[builder(default = Color::ORANGE)]
    pub heading_bug_color: Color,
}

impl Default for HeadingConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

// ============================================================================
// ATTITUDE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[serde(default)]
pub struct AttitudeConfig {
    /// Horizon travel per degree of pitch, in surface units.
    #[builder(default = 2.2)]
    pub pixels_per_pitch_degree: f64,
    /// Pitch beyond this is pinned so the horizon stays in view.
    #[builder(default = 30.0)]
    pub pitch_clamp_degrees: f64,
    #[builder(default = Color::SKY)]
    pub sky_color: Color,
    #[builder(default = Color::GROUND)]
    pub ground_color: Color,
    #[builder(default = true)]
    pub show_pitch_ladder: bool,
}

impl Default for AttitudeConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

// ============================================================================
// PROGRESS BAR
// ============================================================================

#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressBarConfig {
    #[builder(default = Color::BAR_BLUE)]
    pub bar_color: Color,
    #[builder(default = Color::BAR_NEGATIVE)]
    pub negative_bar_color: Color,
    #[builder(default = Color::GRAY)]
    pub border_color: Color,
    #[builder(default = Color::TRACK)]
    pub track_color: Color,
    #[builder(default = true)]
    pub show_zero_line: bool,
    #[builder(default = Color::LIGHT_GRAY)]
    pub zero_line_color: Color,
    /// Decimals shown in the label.
    #[builder(default = 0)]
    pub decimals: usize,
    /// `false` shows "value / max".
    #[builder(default = true)]
    pub show_value_only: bool,
    #[builder(into, default = String::new())]
    pub unit_suffix: String,
}

impl Default for ProgressBarConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builder_defaults_match_reference_aircraft() {
        let config = AirspeedConfig::default();
        assert_eq!(config.start_speed, 40.0);
        assert_eq!(config.vne, 160.0);
        assert_eq!(config.unit.label(), "KNOTS");
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let config: AirspeedConfig =
            from_json(r#"{ "unit": "miles_per_hour", "vne": 200.0 }"#).expect("valid json");
        assert_eq!(
            config,
            AirspeedConfig::builder()
                .unit(AirspeedUnit::MilesPerHour)
                .vne(200.0)
                .build()
        );
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let result: Result<VsiConfig> = from_json(r#"{ "min_fpm": "low" }"#);
        assert!(matches!(result, Err(crate::GaugeError::Config(_))));
    }
}
