//! Instruments built on the dial scale mapper.
//!
//! Every instrument keeps its own current value, reports through its setters
//! whether the host needs to redraw, and paints itself statelessly onto a
//! [`Surface`]. Geometry is exposed separately from painting so hosts and
//! tests can query angles without drawing.

mod adf;
mod airspeed;
mod altimeter;
mod attitude;
mod axis_track;
mod heading;
mod progress;
mod vsi;

pub use adf::AdfIndicator;
pub use airspeed::{AirspeedIndicator, ZoneRing};
pub use altimeter::Altimeter;
pub use attitude::{normalize_roll, AttitudeIndicator, LadderRung, RollMark};
pub use heading::HeadingIndicator;
pub use progress::{BarFill, ValueProgressBar};
pub use vsi::VerticalSpeedIndicator;

use crate::config::Color;
use crate::scale::{self, AngularScale, ArcSpan, Zone};
use crate::surface::{Point, Rect, Surface};

/// Anything that can paint itself into a rectangle of the host's surface.
pub trait Widget {
    fn paint(&self, surface: &mut dyn Surface, bounds: Rect);
}

// ============================================================================
// DIAL GEOMETRY
// ============================================================================

/// The round face of an instrument: the largest circle centred in the bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dial {
    pub center: Point,
    pub radius: f64,
}

impl Dial {
    pub fn new(width: f64, height: f64) -> Self {
        Self::fit(Rect::new(0.0, 0.0, width, height))
    }

    pub fn fit(bounds: Rect) -> Self {
        Self {
            center: Point::new(bounds.left + bounds.width / 2.0, bounds.top + bounds.height / 2.0),
            radius: bounds.width.min(bounds.height) / 2.0,
        }
    }

    /// Point at a compass angle, `fraction` of the radius out from the centre.
    pub fn at(&self, compass: f64, fraction: f64) -> Point {
        let (x, y) = scale::polar(self.center.x, self.center.y, compass, self.radius * fraction);
        Point::new(x, y)
    }
}

/// A scale graduation.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub value: f64,
    /// Compass angle on the dial.
    pub angle: f64,
    pub major: bool,
    pub label: Option<String>,
}

// ============================================================================
// SHARED PAINTING
// ============================================================================

pub(crate) fn draw_bezel(surface: &mut dyn Surface, dial: &Dial) {
    surface.fill_circle(dial.center, dial.radius, Color::BLACK);
    surface.stroke_circle(dial.center, dial.radius - 2.0, 4.0, Color::GRAY);
}

pub(crate) fn draw_hub(surface: &mut dyn Surface, dial: &Dial, fraction: f64, outlined: bool) {
    let radius = dial.radius * fraction;
    surface.fill_circle(dial.center, radius, Color::GRAY);
    if outlined {
        surface.stroke_circle(dial.center, radius, 1.0, Color::WHITE);
    }
}

pub(crate) fn draw_radial_tick(
    surface: &mut dyn Surface,
    dial: &Dial,
    compass: f64,
    inner: f64,
    outer: f64,
    thickness: f64,
    color: Color,
) {
    surface.line(dial.at(compass, inner), dial.at(compass, outer), thickness, color);
}

/// Straight needle from a short tail behind the hub out to `length`.
pub(crate) fn draw_needle(
    surface: &mut dyn Surface,
    dial: &Dial,
    compass: f64,
    length: f64,
    tail: f64,
    thickness: f64,
    color: Color,
) {
    let tail_point = dial.at(compass + 180.0, tail);
    surface.line(tail_point, dial.at(compass, length), thickness, color);
}

/// Paint a clamped zone arc; returns the arc drawn, if any.
pub(crate) fn draw_zone(
    surface: &mut dyn Surface,
    dial: &Dial,
    scale: &AngularScale,
    zone: &Zone,
    ring: f64,
    thickness: f64,
) -> Option<ArcSpan> {
    let arc = scale.zone_to_arc(zone)?;
    surface.arc(dial.center, dial.radius * ring, arc.start_angle, arc.sweep, thickness, zone.color);
    Some(arc)
}

pub(crate) fn draw_ticks(surface: &mut dyn Surface, dial: &Dial, ticks: &[Tick], outer: f64, major_inner: f64, minor_inner: f64) {
    for tick in ticks {
        let (inner, thickness) = if tick.major { (major_inner, 2.0) } else { (minor_inner, 1.0) };
        draw_radial_tick(surface, dial, tick.angle, inner, outer, thickness, Color::WHITE);
    }
}

/// N/E/S/W at the cardinal points, `other` for every other 30° mark.
pub(crate) fn cardinal_label(degrees: i32, other: impl FnOnce(i32) -> String) -> String {
    match degrees {
        0 => "N".to_string(),
        90 => "E".to_string(),
        180 => "S".to_string(),
        270 => "W".to_string(),
        _ => other(degrees),
    }
}

/// Compass-card graduations every 5°, major and labelled every 30°.
pub(crate) fn compass_card(label: impl Fn(i32) -> String) -> Vec<Tick> {
    (0..360)
        .step_by(5)
        .map(|deg| {
            let major = deg % 30 == 0;
            Tick {
                value: deg as f64,
                angle: deg as f64,
                major,
                label: major.then(|| cardinal_label(deg, &label)),
            }
        })
        .collect()
}

/// Round to `decimals` places, halves away from zero (86.5 reads 87).
pub(crate) fn round_half_away(value: f64, decimals: usize) -> f64 {
    let factor = 10f64.powi(decimals.min(15) as i32);
    (value * factor).round() / factor
}

/// Store `value` in `slot` when it differs by more than `epsilon`.
pub(crate) fn update_if_changed(slot: &mut f64, value: f64, epsilon: f64) -> bool {
    if (*slot - value).abs() > epsilon {
        *slot = value;
        true
    } else {
        false
    }
}
