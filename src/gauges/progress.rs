use crate::config::{Color, ProgressBarConfig};
use crate::error::{ensure_finite, Result};
use crate::surface::{Align, Point, Rect, Surface};

use super::{round_half_away, update_if_changed, Widget};

/// Filled part of the bar as fractions of the track width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarFill {
    pub from: f64,
    pub to: f64,
    pub color: Color,
}

impl BarFill {
    pub fn width(&self) -> f64 {
        self.to - self.from
    }
}

/// Horizontal bar for a signed or unsigned value. A range that crosses zero
/// fills outwards from zero.
#[derive(Debug, Clone)]
pub struct ValueProgressBar {
    minimum: f64,
    maximum: f64,
    value: f64,
    config: ProgressBarConfig,
}

impl Default for ValueProgressBar {
    fn default() -> Self {
        Self::new(ProgressBarConfig::default())
    }
}

impl ValueProgressBar {
    pub fn new(config: ProgressBarConfig) -> Self {
        Self {
            minimum: 0.0,
            maximum: 100.0,
            value: 0.0,
            config,
        }
    }

    pub fn config(&self) -> &ProgressBarConfig {
        &self.config
    }

    pub fn minimum(&self) -> f64 {
        self.minimum
    }

    pub fn maximum(&self) -> f64 {
        self.maximum
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Raising the minimum past the maximum drags the maximum along.
    pub fn set_minimum(&mut self, minimum: f64) -> Result<bool> {
        self.minimum = ensure_finite("bar minimum", minimum)?;
        if self.maximum < self.minimum {
            self.maximum = self.minimum;
        }
        if self.value < self.minimum {
            self.value = self.minimum;
        }
        Ok(true)
    }

    /// Lowering the maximum below the minimum drags the minimum along.
    pub fn set_maximum(&mut self, maximum: f64) -> Result<bool> {
        self.maximum = ensure_finite("bar maximum", maximum)?;
        if self.maximum < self.minimum {
            self.minimum = self.maximum;
        }
        if self.value > self.maximum {
            self.value = self.maximum;
        }
        Ok(true)
    }

    pub fn set_value(&mut self, value: f64) -> Result<bool> {
        let value = ensure_finite("bar value", value)?;
        let clamped = value.max(self.minimum).min(self.maximum);
        Ok(update_if_changed(&mut self.value, clamped, f64::EPSILON))
    }

    /// Fraction of the track at `value`; `None` for an empty range.
    pub fn position(&self, value: f64) -> Option<f64> {
        if self.maximum <= self.minimum {
            return None;
        }
        let t = (value - self.minimum) / (self.maximum - self.minimum);
        Some(t.clamp(0.0, 1.0))
    }

    pub fn crosses_zero(&self) -> bool {
        self.minimum < 0.0 && self.maximum > 0.0
    }

    pub fn zero_position(&self) -> Option<f64> {
        if self.crosses_zero() {
            self.position(0.0)
        } else {
            None
        }
    }

    pub fn fill(&self) -> Option<BarFill> {
        let at_value = self.position(self.value)?;
        let c = &self.config;
        let fill = match self.zero_position() {
            Some(zero) if self.value >= 0.0 => BarFill {
                from: zero,
                to: at_value,
                color: c.bar_color,
            },
            Some(zero) => BarFill {
                from: at_value,
                to: zero,
                color: c.negative_bar_color,
            },
            None => BarFill {
                from: 0.0,
                to: at_value,
                color: if self.maximum <= 0.0 { c.negative_bar_color } else { c.bar_color },
            },
        };
        Some(fill)
    }

    pub fn label(&self) -> String {
        let c = &self.config;
        let decimals = c.decimals;
        let suffix = if c.unit_suffix.trim().is_empty() { "" } else { c.unit_suffix.as_str() };
        let value = format!("{:.decimals$}{suffix}", round_half_away(self.value, decimals));
        if c.show_value_only {
            value
        } else {
            let maximum = round_half_away(self.maximum, decimals);
            format!("{value} / {maximum:.decimals$}{suffix}")
        }
    }
}

impl Widget for ValueProgressBar {
    fn paint(&self, surface: &mut dyn Surface, bounds: Rect) {
        if bounds.width <= 2.0 || bounds.height <= 2.0 {
            return;
        }
        let track = Rect::new(bounds.left + 1.0, bounds.top + 1.0, bounds.width - 2.0, bounds.height - 2.0);
        let c = &self.config;
        surface.fill_rect(track, c.track_color);
        surface.stroke_rect(track, 1.0, c.border_color);

        let Some(fill) = self.fill() else {
            return;
        };
        let x_of = |t: f64| track.left + t * track.width;

        if let (Some(zero), true) = (self.zero_position(), c.show_zero_line) {
            let x = x_of(zero);
            surface.line(
                Point::new(x, track.top + 2.0),
                Point::new(x, track.bottom() - 2.0),
                1.0,
                c.zero_line_color,
            );
        }
        let filled = Rect::from_ltrb(x_of(fill.from), track.top, x_of(fill.to), track.bottom());
        if filled.width > 0.5 {
            surface.fill_rect(filled, fill.color);
        }

        let middle = Point::new(track.left + track.width / 2.0, track.top + track.height / 2.0);
        surface.text(middle, &self.label(), track.height * 0.5, Align::Center, Color::WHITE);
    }
}
