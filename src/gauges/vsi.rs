use crate::config::{Color, VsiConfig};
use crate::error::{ensure_finite, Result};
use crate::scale::AngularScale;
use crate::surface::{Align, Rect, Surface};

use super::{draw_bezel, draw_hub, draw_needle, draw_ticks, update_if_changed, Dial, Tick, Widget};

/// Vertical speed indicator, in feet per minute.
///
/// With the default configuration -2000 sits at 115° (about 4 o'clock),
/// zero at 9 o'clock and +2000 at 65°, the scale wrapping through north.
#[derive(Debug, Clone, Default)]
pub struct VerticalSpeedIndicator {
    vertical_speed_fpm: f64,
    config: VsiConfig,
}

impl VerticalSpeedIndicator {
    pub fn new(config: VsiConfig) -> Self {
        Self {
            vertical_speed_fpm: 0.0,
            config,
        }
    }

    pub fn config(&self) -> &VsiConfig {
        &self.config
    }

    pub fn vertical_speed_fpm(&self) -> f64 {
        self.vertical_speed_fpm
    }

    pub fn set_vertical_speed_fpm(&mut self, fpm: f64) -> Result<bool> {
        let fpm = ensure_finite("vertical speed", fpm)?;
        Ok(update_if_changed(&mut self.vertical_speed_fpm, fpm, f64::EPSILON))
    }

    pub fn scale(&self) -> AngularScale {
        let c = &self.config;
        AngularScale::bounded(c.min_fpm, c.max_fpm, c.start_angle, c.sweep_degrees)
    }

    pub fn needle_angle(&self) -> f64 {
        self.scale().value_to_angle(self.vertical_speed_fpm)
    }

    /// Minor ticks every `tick_step`, major ones every `major_step`. Major
    /// ticks other than zero are labelled in hundreds of ft/min.
    pub fn ticks(&self) -> Vec<Tick> {
        let c = &self.config;
        let scale = self.scale();
        if scale.is_degenerate() || c.tick_step == 0 {
            return Vec::new();
        }
        let step = c.tick_step as i64;
        let first = (c.min_fpm / step as f64).ceil() as i64 * step;
        let last = (c.max_fpm / step as f64).floor() as i64 * step;

        (first..=last)
            .step_by(step as usize)
            .map(|fpm| {
                let major = c.major_step != 0 && fpm % c.major_step as i64 == 0;
                Tick {
                    value: fpm as f64,
                    angle: scale.value_to_angle(fpm as f64),
                    major,
                    label: (major && fpm != 0).then(|| (fpm.abs() / 100).to_string()),
                }
            })
            .collect()
    }
}

impl Widget for VerticalSpeedIndicator {
    fn paint(&self, surface: &mut dyn Surface, bounds: Rect) {
        let dial = Dial::fit(bounds);
        let r = dial.radius;
        draw_bezel(surface, &dial);

        let ticks = self.ticks();
        draw_ticks(surface, &dial, &ticks, 0.9, 0.78, 0.84);
        for tick in &ticks {
            if let Some(label) = &tick.label {
                surface.text(dial.at(tick.angle, 0.62), label, r * 0.13, Align::Center, Color::WHITE);
            }
        }

        let zero = dial.at(self.scale().value_to_angle(0.0), 0.55);
        surface.text(zero.offset(0.0, -r * 0.12), "UP", r * 0.11, Align::Center, Color::WHITE);
        surface.text(zero.offset(0.0, r * 0.12), "DN", r * 0.11, Align::Center, Color::WHITE);

        let c = dial.center;
        surface.text(c.offset(0.0, -r * 0.08), "VERTICAL", r * 0.11, Align::Center, Color::WHITE);
        surface.text(c.offset(0.0, r * 0.02), "SPEED", r * 0.11, Align::Center, Color::WHITE);
        surface.text(c.offset(0.0, r * 0.13), "100 FEET", r * 0.09, Align::Center, Color::WHITE);
        surface.text(c.offset(0.0, r * 0.22), "PER MINUTE", r * 0.09, Align::Center, Color::WHITE);

        draw_needle(surface, &dial, self.needle_angle(), 0.82, 0.15, r * 0.03, Color::WHITE);
        draw_hub(surface, &dial, 0.05, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn zero_sits_at_nine_oclock() {
        let vsi = VerticalSpeedIndicator::default();
        assert_abs_diff_eq!(vsi.needle_angle(), 270.0, epsilon = 1e-9);
    }

    #[test]
    fn climb_beyond_scale_is_pinned() {
        let mut vsi = VerticalSpeedIndicator::default();
        vsi.set_vertical_speed_fpm(3500.0).unwrap();
        assert_abs_diff_eq!(vsi.needle_angle(), 65.0, epsilon = 1e-9);
        vsi.set_vertical_speed_fpm(-9000.0).unwrap();
        assert_abs_diff_eq!(vsi.needle_angle(), 115.0, epsilon = 1e-9);
    }

    #[test]
    fn labels_in_hundreds_without_zero() {
        let vsi = VerticalSpeedIndicator::default();
        let ticks = vsi.ticks();
        assert_eq!(ticks.len(), 41);
        let labels: Vec<_> = ticks.into_iter().filter_map(|t| t.label).collect();
        assert_eq!(labels, ["20", "15", "10", "5", "5", "10", "15", "20"]);
    }
}
