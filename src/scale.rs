//! Value-to-angle mapping shared by every dial.
//!
//! Angles are compass angles unless stated otherwise: 0° points at 12 o'clock
//! and angles grow clockwise. Arc-drawing backends usually want the "drawing"
//! convention instead, where 0° sits at 3 o'clock; [`compass_to_drawing`]
//! converts between the two.
//!
//! Non-finite values are a precondition violation here. Instrument setters
//! reject them before they can reach a scale.

use serde::{Deserialize, Serialize};

use crate::config::Color;

const FULL_TURN: f64 = 360.0;

// ============================================================================
// ANGLE HELPERS
// ============================================================================

/// Reduce an angle into `[0, 360)`.
pub fn wrap_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(FULL_TURN);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if wrapped >= FULL_TURN {
        0.0
    } else {
        wrapped
    }
}

/// Compass angle to drawing angle (0° at 3 o'clock, clockwise).
pub fn compass_to_drawing(compass: f64) -> f64 {
    wrap_degrees(compass - 90.0)
}

/// Clockwise distance from `from` to `to`, in `[0, 360)`.
pub fn clockwise_sweep(from: f64, to: f64) -> f64 {
    wrap_degrees(to - from)
}

/// Point on a circle of `radius` around `(cx, cy)` at a compass angle.
pub fn polar(cx: f64, cy: f64, compass: f64, radius: f64) -> (f64, f64) {
    let rad = compass.to_radians();
    (cx + radius * rad.sin(), cy - radius * rad.cos())
}

fn clamp_to(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

// ============================================================================
// SCALE
// ============================================================================

/// How a physical range maps onto a dial.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AngularScale {
    /// A bounded arc: values outside `[value_min, value_max]` are pinned to
    /// the nearest end.
    Bounded {
        value_min: f64,
        value_max: f64,
        start_angle: f64,
        sweep_degrees: f64,
    },
    /// A full circle that wraps every `period` units.
    Cyclic { period: f64 },
}

impl AngularScale {
    pub const fn bounded(value_min: f64, value_max: f64, start_angle: f64, sweep_degrees: f64) -> Self {
        Self::Bounded {
            value_min,
            value_max,
            start_angle,
            sweep_degrees,
        }
    }

    /// Compass card: one unit per degree.
    pub const fn compass() -> Self {
        Self::Cyclic { period: FULL_TURN }
    }

    pub const fn cyclic(period: f64) -> Self {
        Self::Cyclic { period }
    }

    /// `true` when the scale cannot map values to distinct angles.
    pub fn is_degenerate(&self) -> bool {
        match *self {
            Self::Bounded {
                value_min,
                value_max,
                ..
            } => !(value_max > value_min),
            Self::Cyclic { period } => !(period > 0.0),
        }
    }

    /// The value interval zones are clamped to.
    pub fn value_range(&self) -> (f64, f64) {
        match *self {
            Self::Bounded {
                value_min,
                value_max,
                ..
            } => (value_min, value_max),
            Self::Cyclic { period } => (0.0, period),
        }
    }

    /// The value the needle actually shows: clamped for bounded scales,
    /// wrapped into `[0, period)` for cyclic ones.
    pub fn clamp_value(&self, value: f64) -> f64 {
        if self.is_degenerate() {
            return self.value_range().0;
        }
        match *self {
            Self::Bounded {
                value_min,
                value_max,
                ..
            } => clamp_to(value, value_min, value_max),
            Self::Cyclic { period } => {
                let reduced = value.rem_euclid(period);
                if reduced >= period {
                    0.0
                } else {
                    reduced
                }
            }
        }
    }

    /// Compass angle in `[0, 360)` for `value`.
    pub fn value_to_angle(&self, value: f64) -> f64 {
        match *self {
            Self::Bounded {
                value_min,
                value_max,
                start_angle,
                sweep_degrees,
            } => {
                if self.is_degenerate() {
                    tracing::trace!(value_min, value_max, "degenerate scale, pinning to start angle");
                    return wrap_degrees(start_angle);
                }
                let clamped = clamp_to(value, value_min, value_max);
                let t = (clamped - value_min) / (value_max - value_min);
                wrap_degrees(start_angle + t * sweep_degrees)
            }
            Self::Cyclic { period } => {
                if self.is_degenerate() {
                    tracing::trace!(period, "degenerate cyclic scale");
                    return 0.0;
                }
                wrap_degrees(self.clamp_value(value) / period * FULL_TURN)
            }
        }
    }

    /// Whether the clamped span `[from, to]` goes all the way round the dial.
    fn covers_full_turn(&self, from: f64, to: f64) -> bool {
        match *self {
            Self::Bounded {
                value_min,
                value_max,
                sweep_degrees,
                ..
            } => sweep_degrees.abs() >= FULL_TURN && from <= value_min && to >= value_max,
            Self::Cyclic { period } => to - from >= period,
        }
    }

    /// Clamped arc for a zone, or `None` when nothing of it lies on the scale
    /// or the arc has no length.
    pub fn zone_to_arc(&self, zone: &Zone) -> Option<ArcSpan> {
        if self.is_degenerate() {
            return None;
        }
        let (min, max) = self.value_range();
        let from = clamp_to(zone.from_value, min, max);
        let to = clamp_to(zone.to_value, min, max);
        if !(to > from) {
            return None;
        }

        let start_compass = self.value_to_angle(from);
        let end_compass = self.value_to_angle(to);
        let mut sweep = clockwise_sweep(start_compass, end_compass);
        if sweep == 0.0 {
            if !self.covers_full_turn(from, to) {
                return None;
            }
            sweep = FULL_TURN;
        }

        Some(ArcSpan {
            start_compass,
            end_compass,
            start_angle: compass_to_drawing(start_compass),
            sweep,
        })
    }
}

// ============================================================================
// ZONES
// ============================================================================

/// A colored band on a scale, e.g. the green arc of an airspeed indicator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub from_value: f64,
    pub to_value: f64,
    pub color: Color,
}

impl Zone {
    pub const fn new(from_value: f64, to_value: f64, color: Color) -> Self {
        Self {
            from_value,
            to_value,
            color,
        }
    }
}

/// Arc parameters ready for a drawing backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSpan {
    /// Compass angle of the clamped start value.
    pub start_compass: f64,
    /// Compass angle of the clamped end value.
    pub end_compass: f64,
    /// Start in drawing convention (0° at 3 o'clock).
    pub start_angle: f64,
    /// Clockwise sweep in degrees, `(0, 360]`.
    pub sweep: f64,
}
