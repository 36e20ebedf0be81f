use crate::config::{AttitudeConfig, Color};
use crate::error::{ensure_finite, Result};
use crate::scale::wrap_degrees;
use crate::surface::{Align, Point, Rect, Surface};

use super::{draw_bezel, draw_radial_tick, Dial, Widget};

/// Horizon window radius, as a fraction of the dial.
const WINDOW: f64 = 0.82;
/// Outer edge of the fixed roll scale.
const ROLL_SCALE: f64 = 0.90;

/// Fold a roll angle into `[-180, 180]`. The remainder keeps the sign of
/// the input, so -540 folds to -180 and 540 to 180.
pub fn normalize_roll(degrees: f64) -> f64 {
    let mut roll = degrees % 360.0;
    if roll > 180.0 {
        roll -= 360.0;
    }
    if roll < -180.0 {
        roll += 360.0;
    }
    roll
}

/// One line of the pitch ladder, in world coordinates relative to the horizon.
#[derive(Debug, Clone, PartialEq)]
pub struct LadderRung {
    pub pitch: i32,
    /// Vertical offset from the horizon in pixels; negative is up.
    pub y_offset: f64,
    /// Half the rung length as a fraction of the horizon window radius.
    pub half_width_fraction: f64,
    pub major: bool,
    pub label: Option<String>,
}

/// A fixed graduation of the roll scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RollMark {
    /// Bank angle, 0 at the top, positive to the right.
    pub angle: f64,
    /// Inner end of the mark as a fraction of the roll scale radius.
    pub inner_fraction: f64,
}

/// Artificial horizon.
#[derive(Debug, Clone, Default)]
pub struct AttitudeIndicator {
    pitch_degrees: f64,
    roll_degrees: f64,
    config: AttitudeConfig,
}

impl AttitudeIndicator {
    pub fn new(config: AttitudeConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &AttitudeConfig {
        &self.config
    }

    pub fn pitch_degrees(&self) -> f64 {
        self.pitch_degrees
    }

    pub fn roll_degrees(&self) -> f64 {
        self.roll_degrees
    }

    /// Positive is nose up. Stored unclamped.
    pub fn set_pitch_degrees(&mut self, pitch: f64) -> Result<bool> {
        self.pitch_degrees = ensure_finite("pitch", pitch)?;
        Ok(true)
    }

    /// Positive is right wing down.
    pub fn set_roll_degrees(&mut self, roll: f64) -> Result<bool> {
        self.roll_degrees = normalize_roll(ensure_finite("roll", roll)?);
        Ok(true)
    }

    pub fn displayed_pitch(&self) -> f64 {
        let limit = self.config.pitch_clamp_degrees.abs();
        self.pitch_degrees.max(-limit).min(limit)
    }

    /// Pixels the horizon moves down from the centre; nose up moves it down.
    pub fn horizon_offset(&self) -> f64 {
        self.displayed_pitch() * self.config.pixels_per_pitch_degree
    }

    /// The world turns opposite to the aircraft.
    pub fn world_rotation(&self) -> f64 {
        -self.roll_degrees
    }

    /// Map a point of the moving world (origin on the horizon, centred) to
    /// the screen: shift by the pitch, then rotate by the world rotation.
    pub fn world_to_screen(&self, center: Point, world: Point) -> Point {
        let shifted = Point::new(center.x + world.x, center.y + world.y + self.horizon_offset());
        shifted.rotated_about(center, self.world_rotation())
    }

    /// Rungs every 5° from -30 to +30 excluding the horizon; the 10° ones
    /// are long and labelled.
    pub fn pitch_ladder(&self) -> Vec<LadderRung> {
        (-30..=30)
            .step_by(5)
            .filter(|deg| *deg != 0)
            .map(|deg: i32| {
                let major = deg % 10 == 0;
                LadderRung {
                    pitch: deg,
                    y_offset: -(deg as f64) * self.config.pixels_per_pitch_degree,
                    half_width_fraction: if major { 0.35 } else { 0.22 },
                    major,
                    label: major.then(|| deg.abs().to_string()),
                }
            })
            .collect()
    }

    pub fn roll_marks(&self) -> Vec<RollMark> {
        let mut marks = Vec::new();
        for (angle, inner_fraction) in [(5.0, 0.94), (10.0, 0.92), (15.0, 0.92), (45.0, 0.89), (90.0, 0.89)] {
            marks.push(RollMark { angle, inner_fraction });
            marks.push(RollMark {
                angle: -angle,
                inner_fraction,
            });
        }
        for angle in [-60.0, -30.0, 30.0, 60.0] {
            marks.push(RollMark {
                angle,
                inner_fraction: 0.92,
            });
        }
        marks
    }

    fn paint_world(&self, surface: &mut dyn Surface, dial: &Dial) {
        let window = dial.radius * WINDOW;
        let big = window * 4.0;
        let to_screen = |x: f64, y: f64| self.world_to_screen(dial.center, Point::new(x, y));

        let sky = [to_screen(-big, -big), to_screen(big, -big), to_screen(big, 0.0), to_screen(-big, 0.0)];
        let ground = [to_screen(-big, 0.0), to_screen(big, 0.0), to_screen(big, big), to_screen(-big, big)];
        surface.fill_polygon(&sky, self.config.sky_color);
        surface.fill_polygon(&ground, self.config.ground_color);
        surface.line(to_screen(-big, 0.0), to_screen(big, 0.0), (window * 0.02).max(2.0), Color::WHITE);

        if !self.config.show_pitch_ladder {
            return;
        }
        let gap = window * 0.06;
        for rung in self.pitch_ladder() {
            let half = window * rung.half_width_fraction;
            let y = rung.y_offset;
            let thickness = if rung.major { 2.0 } else { 1.0 };
            surface.line(to_screen(-half, y), to_screen(half, y), thickness, Color::WHITE);
            if let Some(label) = &rung.label {
                let size = window * 0.10;
                surface.text(to_screen(-half - gap, y), label, size, Align::Right, Color::WHITE);
                surface.text(to_screen(half + gap, y), label, size, Align::Left, Color::WHITE);
            }
        }
    }
}

impl Widget for AttitudeIndicator {
    fn paint(&self, surface: &mut dyn Surface, bounds: Rect) {
        let dial = Dial::fit(bounds);
        let r = dial.radius;
        draw_bezel(surface, &dial);

        surface.clip_circle(dial.center, r * WINDOW);
        self.paint_world(surface, &dial);
        surface.reset_clip();

        for mark in self.roll_marks() {
            let angle = wrap_degrees(mark.angle);
            draw_radial_tick(surface, &dial, angle, ROLL_SCALE * mark.inner_fraction, ROLL_SCALE, 2.0, Color::WHITE);
        }

        // fixed aircraft, seen from behind
        let c = dial.center;
        let pen = (r * 0.03).max(2.0);
        let (wing, tail) = (r * 0.52 / 2.0, r * 0.18 / 2.0);
        surface.line(c.offset(-wing, r * 0.05), c.offset(wing, r * 0.05), pen, Color::WHITE);
        surface.line(c.offset(0.0, -r * 0.12), c.offset(0.0, r * 0.22), pen, Color::WHITE);
        surface.line(c.offset(-tail, r * 0.18), c.offset(tail, r * 0.18), pen, Color::WHITE);
        surface.fill_circle(c, r * 0.05, Color::GRAY);

        let tip = c.offset(0.0, -r * 0.88);
        surface.fill_polygon(
            &[tip, tip.offset(-r * 0.05, r * 0.06), tip.offset(r * 0.05, r * 0.06)],
            Color::WHITE,
        );
    }
}
