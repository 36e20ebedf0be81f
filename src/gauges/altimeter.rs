use crate::config::Color;
use crate::error::{ensure_finite, Result};
use crate::scale::AngularScale;
use crate::surface::{Align, Rect, Surface};

use super::{draw_bezel, draw_hub, draw_needle, draw_ticks, update_if_changed, Dial, Tick, Widget};

/// Long needle: one revolution per 1000 ft.
const HUNDREDS: AngularScale = AngularScale::cyclic(1000.0);
/// Short needle: one revolution per 10000 ft.
const THOUSANDS: AngularScale = AngularScale::cyclic(10000.0);

/// Two-needle pressure altimeter.
#[derive(Debug, Clone, Default)]
pub struct Altimeter {
    altitude_feet: f64,
}

impl Altimeter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn altitude_feet(&self) -> f64 {
        self.altitude_feet
    }

    pub fn set_altitude_feet(&mut self, altitude: f64) -> Result<bool> {
        let altitude = ensure_finite("altitude", altitude)?;
        Ok(update_if_changed(&mut self.altitude_feet, altitude, f64::EPSILON))
    }

    /// The dial has no negative side; below sea level reads zero.
    pub fn displayed_altitude(&self) -> f64 {
        self.altitude_feet.max(0.0)
    }

    pub fn hundreds_angle(&self) -> f64 {
        HUNDREDS.value_to_angle(self.displayed_altitude())
    }

    pub fn thousands_angle(&self) -> f64 {
        THOUSANDS.value_to_angle(self.displayed_altitude())
    }

    /// Fifty 20 ft graduations; every fifth one (100 ft) is major and the
    /// thousands digits sit on every tenth.
    pub fn ticks(&self) -> Vec<Tick> {
        (0..50)
            .map(|i| Tick {
                value: i as f64 * 20.0,
                angle: i as f64 * 7.2,
                major: i % 5 == 0,
                label: (i % 5 == 0).then(|| (i / 5).to_string()),
            })
            .collect()
    }
}

impl Widget for Altimeter {
    fn paint(&self, surface: &mut dyn Surface, bounds: Rect) {
        let dial = Dial::fit(bounds);
        let r = dial.radius;
        draw_bezel(surface, &dial);

        let ticks = self.ticks();
        draw_ticks(surface, &dial, &ticks, 0.9, 0.8, 0.85);
        for tick in &ticks {
            if let Some(label) = &tick.label {
                surface.text(dial.at(tick.angle, 0.65), label, r * 0.25, Align::Center, Color::WHITE);
            }
        }
        surface.text(dial.center.offset(0.0, -r * 0.35), "ALT", r * 0.12, Align::Center, Color::WHITE);

        draw_needle(surface, &dial, self.thousands_angle(), 0.50, 0.0, r * 0.07, Color::WHITE);
        draw_needle(surface, &dial, self.hundreds_angle(), 0.80, 0.0, r * 0.03, Color::WHITE);
        draw_hub(surface, &dial, 0.06, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn needles_track_their_own_period() {
        let mut alt = Altimeter::new();
        alt.set_altitude_feet(2500.0).unwrap();
        assert_abs_diff_eq!(alt.hundreds_angle(), 180.0, epsilon = 1e-9);
        assert_abs_diff_eq!(alt.thousands_angle(), 90.0, epsilon = 1e-9);

        alt.set_altitude_feet(12_000.0).unwrap();
        assert_abs_diff_eq!(alt.hundreds_angle(), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(alt.thousands_angle(), 72.0, epsilon = 1e-9);
    }

    #[test]
    fn below_sea_level_reads_zero() {
        let mut alt = Altimeter::new();
        alt.set_altitude_feet(-150.0).unwrap();
        assert_eq!(alt.hundreds_angle(), 0.0);
        assert_eq!(alt.thousands_angle(), 0.0);
    }

    #[test]
    fn unchanged_altitude_needs_no_redraw() {
        let mut alt = Altimeter::new();
        assert!(alt.set_altitude_feet(100.0).unwrap());
        assert!(!alt.set_altitude_feet(100.0).unwrap());
    }

    #[test]
    fn digits_every_thirty_six_degrees() {
        let alt = Altimeter::new();
        let labelled: Vec<_> = alt
            .ticks()
            .into_iter()
            .filter(|t| t.label.is_some())
            .map(|t| t.angle)
            .collect();
        assert_eq!(labelled.len(), 10);
        assert_abs_diff_eq!(labelled[3], 108.0, epsilon = 1e-9);
    }
}
