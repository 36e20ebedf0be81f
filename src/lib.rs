//! Flight-instrument dials and axis calibration.
//!
//! The crate computes everything a host needs to draw a panel of round
//! aircraft instruments and a joystick calibration strip: needle angles,
//! clamped zone arcs, tick layouts, and normalized axis output. Drawing goes
//! through the [`Surface`] trait, so any 2D backend can host the widgets.
//!
//! ```
//! use flight_gauges::{AirspeedIndicator, Rect, Scene, Widget};
//!
//! let mut asi = AirspeedIndicator::default();
//! if asi.set_indicated_speed(100.0)? {
//!     let mut scene = Scene::new();
//!     asi.paint(&mut scene, Rect::new(0.0, 0.0, 240.0, 240.0));
//!     assert!(!scene.commands().is_empty());
//! }
//! assert_eq!(asi.needle_angle(), 180.0);
//! # Ok::<(), flight_gauges::GaugeError>(())
//! ```

// ============================================================================
// MODULES
// ============================================================================

pub mod calibration;
pub mod config;
pub mod error;
pub mod gauges;
pub mod scale;
pub mod surface;

// ============================================================================
// PUBLIC API
// ============================================================================

pub use calibration::{
    AxisCalibration, AxisCommand, AxisEvent, CalibrationPoint, CalibrationProfile, ObservedRange,
};
pub use config::{
    from_json, AirspeedConfig, AirspeedUnit, AttitudeConfig, Color, HeadingConfig, ProgressBarConfig,
    VsiConfig,
};
pub use error::{GaugeError, Result};
pub use gauges::{
    normalize_roll, AdfIndicator, AirspeedIndicator, Altimeter, AttitudeIndicator, BarFill, Dial,
    HeadingIndicator, LadderRung, RollMark, Tick, ValueProgressBar, VerticalSpeedIndicator, Widget,
    ZoneRing,
};
pub use scale::{AngularScale, ArcSpan, Zone};
pub use surface::{Align, DrawCommand, Point, Rect, Scene, Surface};
