use crate::config::Color;
use crate::error::{ensure_finite, Result};
use crate::scale::AngularScale;
use crate::surface::{Align, Point, Rect, Surface};

use super::{compass_card, draw_bezel, draw_hub, draw_ticks, update_if_changed, Dial, Tick, Widget};

/// Automatic direction finder: fixed card, needle pointing at the beacon.
#[derive(Debug, Clone, Default)]
pub struct AdfIndicator {
    bearing_degrees: f64,
}

impl AdfIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bearing_degrees(&self) -> f64 {
        self.bearing_degrees
    }

    /// Relative bearing to the station, wrapped into `[0, 360)`.
    pub fn set_bearing_degrees(&mut self, bearing: f64) -> Result<bool> {
        let bearing = AngularScale::compass().clamp_value(ensure_finite("bearing", bearing)?);
        Ok(update_if_changed(&mut self.bearing_degrees, bearing, f32::EPSILON as f64))
    }

    pub fn needle_angle(&self) -> f64 {
        AngularScale::compass().value_to_angle(self.bearing_degrees)
    }

    pub fn card_marks(&self) -> Vec<Tick> {
        compass_card(|deg| deg.to_string())
    }

    /// Arrow outline: tip, right shoulder, right tail, left tail, left
    /// shoulder, turned to the bearing.
    pub fn arrow_polygon(&self, dial: &Dial) -> [Point; 5] {
        let (c, r) = (dial.center, dial.radius);
        let length = r * 0.75;
        let (half_width, half_tail) = (r * 0.06, r * 0.03);
        [
            c.offset(0.0, -length),
            c.offset(half_width, 0.0),
            c.offset(half_tail, length * 0.25),
            c.offset(-half_tail, length * 0.25),
            c.offset(-half_width, 0.0),
        ]
        .map(|p| p.rotated_about(c, self.needle_angle()))
    }
}

impl Widget for AdfIndicator {
    fn paint(&self, surface: &mut dyn Surface, bounds: Rect) {
        let dial = Dial::fit(bounds);
        let r = dial.radius;
        draw_bezel(surface, &dial);

        let marks = self.card_marks();
        draw_ticks(surface, &dial, &marks, 0.9, 0.78, 0.83);
        for mark in &marks {
            if let Some(label) = &mark.label {
                surface.text(dial.at(mark.angle, 0.65), label, r * 0.15, Align::Center, Color::WHITE);
            }
        }

        let arrow = self.arrow_polygon(&dial);
        surface.fill_polygon(&arrow, Color::YELLOW);
        for (i, from) in arrow.iter().enumerate() {
            surface.line(*from, arrow[(i + 1) % arrow.len()], 1.0, Color::BLACK);
        }
        draw_hub(surface, &dial, 0.06, false);
    }
}
