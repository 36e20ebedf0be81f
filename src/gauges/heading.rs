use crate::config::{Color, HeadingConfig};
use crate::error::{ensure_finite, Result};
use crate::scale::{wrap_degrees, AngularScale};
use crate::surface::{Align, Point, Rect, Surface};

use super::{compass_card, draw_bezel, draw_radial_tick, update_if_changed, Dial, Tick, Widget};

/// Directional gyro with a rotating compass card and a heading bug.
#[derive(Debug, Clone, Default)]
pub struct HeadingIndicator {
    heading_degrees: f64,
    bug_heading_degrees: f64,
    config: HeadingConfig,
}

impl HeadingIndicator {
    pub fn new(config: HeadingConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &HeadingConfig {
        &self.config
    }

    pub fn heading_degrees(&self) -> f64 {
        self.heading_degrees
    }

    pub fn bug_heading_degrees(&self) -> f64 {
        self.bug_heading_degrees
    }

    /// Wraps into `[0, 360)`; returns whether the card moved.
    pub fn set_heading_degrees(&mut self, heading: f64) -> Result<bool> {
        let heading = AngularScale::compass().clamp_value(ensure_finite("heading", heading)?);
        Ok(update_if_changed(&mut self.heading_degrees, heading, f32::EPSILON as f64))
    }

    pub fn set_bug_heading_degrees(&mut self, bug: f64) -> Result<bool> {
        let bug = AngularScale::compass().clamp_value(ensure_finite("heading bug", bug)?);
        Ok(update_if_changed(&mut self.bug_heading_degrees, bug, f32::EPSILON as f64))
    }

    /// The card turns opposite to the heading so the current heading is on top.
    pub fn card_rotation(&self) -> f64 {
        -self.heading_degrees
    }

    /// Screen compass angle of a card direction.
    pub fn card_angle(&self, direction: f64) -> f64 {
        wrap_degrees(direction + self.card_rotation())
    }

    pub fn bug_angle(&self) -> f64 {
        self.card_angle(self.bug_heading_degrees)
    }

    /// Card graduations in card coordinates; labels in DG style (3, 6, 12 ...).
    pub fn card_marks(&self) -> Vec<Tick> {
        compass_card(|deg| (deg / 10).to_string())
    }

    /// Three-digit readout; north reads 360.
    pub fn readout(&self) -> String {
        let mut heading = self.heading_degrees.round() as i64;
        if heading == 0 {
            heading = 360;
        }
        format!("{heading:03}")
    }

    fn paint_bug(&self, surface: &mut dyn Surface, dial: &Dial, card_radius: f64) {
        let angle = self.bug_angle();
        let color = self.config.heading_bug_color;
        let tip = dial.at(angle, card_radius * 1.02);
        let (w, h) = (dial.radius * card_radius * 0.07, dial.radius * card_radius * 0.10);
        let triangle = [tip, tip.offset(-w, h), tip.offset(w, h)].map(|p| p.rotated_about(tip, angle));
        surface.fill_polygon(&triangle, color);
        let inner = dial.at(angle, card_radius * 0.90);
        surface.line(tip.offset(0.0, h).rotated_about(tip, angle), inner, (dial.radius * card_radius * 0.02).max(2.0), color);
    }
}

impl Widget for HeadingIndicator {
    fn paint(&self, surface: &mut dyn Surface, bounds: Rect) {
        let dial = Dial::fit(bounds);
        let r = dial.radius;
        let card = 0.82;
        draw_bezel(surface, &dial);

        surface.stroke_circle(dial.center, r * card, 2.0, Color::WHITE);
        for mark in self.card_marks() {
            let angle = self.card_angle(mark.angle);
            let (inner, thickness) = if mark.major { (card * 0.86, 2.0) } else { (card * 0.91, 1.0) };
            draw_radial_tick(surface, &dial, angle, inner, card, thickness, Color::WHITE);
            if let Some(label) = &mark.label {
                surface.text(dial.at(angle, card * 0.72), label, r * card * 0.14, Align::Center, Color::WHITE);
            }
        }
        if self.config.show_heading_bug {
            self.paint_bug(surface, &dial, card);
        }

        // fixed lubber index at 12 o'clock
        let top = dial.at(0.0, 0.90);
        surface.fill_polygon(
            &[top, top.offset(-r * 0.04, r * 0.07), top.offset(r * 0.04, r * 0.07)],
            Color::WHITE,
        );

        paint_aircraft(surface, &dial);

        if self.config.show_digital_readout {
            surface.text(dial.center.offset(0.0, r * 0.42), &self.readout(), r * 0.12, Align::Center, Color::WHITE);
        }
    }
}

fn paint_aircraft(surface: &mut dyn Surface, dial: &Dial) {
    let (c, r) = (dial.center, dial.radius);
    let body = r * 0.32;
    let (wing, tail) = (r * 0.45 / 2.0, r * 0.18 / 2.0);
    let pen = (r * 0.025).max(2.0);
    surface.line(c.offset(0.0, body * 0.35), c.offset(0.0, -body), pen, Color::WHITE);
    surface.line(c.offset(-wing, 0.0), c.offset(wing, 0.0), pen, Color::WHITE);
    surface.line(
        Point::new(c.x - tail, c.y + body * 0.28),
        Point::new(c.x + tail, c.y + body * 0.28),
        pen,
        Color::WHITE,
    );
    surface.fill_circle(c, r * 0.05, Color::GRAY);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn heading_wraps() {
        let mut hi = HeadingIndicator::default();
        hi.set_heading_degrees(-90.0).unwrap();
        assert_abs_diff_eq!(hi.heading_degrees(), 270.0, epsilon = 1e-9);
        hi.set_heading_degrees(725.0).unwrap();
        assert_abs_diff_eq!(hi.heading_degrees(), 5.0, epsilon = 1e-9);
    }

    #[test]
    fn current_heading_is_on_top() {
        let mut hi = HeadingIndicator::default();
        hi.set_heading_degrees(90.0).unwrap();
        assert_abs_diff_eq!(hi.card_angle(90.0), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(hi.card_angle(0.0), 270.0, epsilon = 1e-9);
    }

    #[test]
    fn bug_moves_with_the_card() {
        let mut hi = HeadingIndicator::default();
        hi.set_bug_heading_degrees(120.0).unwrap();
        hi.set_heading_degrees(100.0).unwrap();
        assert_abs_diff_eq!(hi.bug_angle(), 20.0, epsilon = 1e-9);
    }

    #[test]
    fn readout_shows_north_as_360() {
        let mut hi = HeadingIndicator::default();
        assert_eq!(hi.readout(), "360");
        hi.set_heading_degrees(359.7).unwrap();
        assert_eq!(hi.readout(), "360");
        hi.set_heading_degrees(7.2).unwrap();
        assert_eq!(hi.readout(), "007");
    }

    #[test]
    fn sub_epsilon_change_is_ignored() {
        let mut hi = HeadingIndicator::default();
        assert!(hi.set_heading_degrees(45.0).unwrap());
        assert!(!hi.set_heading_degrees(45.0 + 360.0).unwrap());
    }
}
