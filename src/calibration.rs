//! Axis calibration: turns raw, unbounded hardware samples into a
//! normalized `[-1, +1]` value.
//!
//! The engine learns the observed range of an axis on its own and lets the
//! user pin three calibration points (min, center, max). Normalization is
//! piecewise linear around the center so that potentiometers whose
//! min-to-center and center-to-max travel differ still read symmetric.
//!
//! Calibration points are not checked against each other when they are set.
//! A reversed axis (`max < min`) is handled at normalization time; a center
//! outside the min/max span is accepted as-is.

use std::sync::mpsc::{channel, Receiver, Sender};

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, Result};

/// Spans narrower than this cannot be normalized.
pub const MIN_SPAN: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalibrationPoint {
    Min,
    Center,
    Max,
}

impl CalibrationPoint {
    pub const ALL: [CalibrationPoint; 3] = [Self::Min, Self::Center, Self::Max];

    /// Short marker label for the calibration track.
    pub const fn label(self) -> &'static str {
        match self {
            CalibrationPoint::Min => "MIN",
            CalibrationPoint::Center => "C",
            CalibrationPoint::Max => "MAX",
        }
    }
}

/// Auto-learned bounds of the raw input. `min <= max` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObservedRange {
    pub min: f64,
    pub max: f64,
}

impl ObservedRange {
    fn seeded(value: f64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    fn widen(&mut self, value: f64) {
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Serializable calibration state of one axis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalibrationProfile {
    pub current_value: f64,
    pub observed: Option<ObservedRange>,
    pub cal_min: Option<f64>,
    pub cal_center: Option<f64>,
    pub cal_max: Option<f64>,
}

impl CalibrationProfile {
    pub fn point(&self, point: CalibrationPoint) -> Option<f64> {
        match point {
            CalibrationPoint::Min => self.cal_min,
            CalibrationPoint::Center => self.cal_center,
            CalibrationPoint::Max => self.cal_max,
        }
    }

    fn point_mut(&mut self, point: CalibrationPoint) -> &mut Option<f64> {
        match point {
            CalibrationPoint::Min => &mut self.cal_min,
            CalibrationPoint::Center => &mut self.cal_center,
            CalibrationPoint::Max => &mut self.cal_max,
        }
    }

    /// `true` once all three calibration points are set.
    pub fn is_calibrated(&self) -> bool {
        self.cal_min.is_some() && self.cal_center.is_some() && self.cal_max.is_some()
    }

    /// Map a raw value into `[-1, +1]`, or `None` when the calibration is
    /// incomplete or too narrow.
    pub fn normalize(&self, raw: f64) -> Option<f64> {
        if !raw.is_finite() {
            return None;
        }
        let (mut min, ctr, mut max) = (self.cal_min?, self.cal_center?, self.cal_max?);

        // Some pots run backwards; the center is left where the user put it.
        if max < min {
            std::mem::swap(&mut min, &mut max);
        }

        if max - min < MIN_SPAN {
            tracing::trace!(min, max, "calibration span too narrow");
            return None;
        }

        if raw >= ctr {
            let denom = max - ctr;
            if denom < MIN_SPAN {
                return None;
            }
            Some(((raw - ctr) / denom).min(1.0))
        } else {
            let denom = ctr - min;
            if denom < MIN_SPAN {
                return None;
            }
            Some((-(ctr - raw) / denom).max(-1.0))
        }
    }
}

/// Notifications for the hosting control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisEvent {
    RedrawRequested,
    CalibrationChanged(CalibrationPoint),
}

/// Input for an axis, as pushed from a hardware reader or from buttons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisCommand {
    Sample(f64),
    SetPoint(CalibrationPoint),
    ResetObserved,
}

/// Calibration engine for one axis.
#[derive(Debug, Default)]
pub struct AxisCalibration {
    name: String,
    profile: CalibrationProfile,
    subscribers: Vec<Sender<AxisEvent>>,
}

impl AxisCalibration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Resume from a previously saved profile.
    pub fn from_profile(name: impl Into<String>, profile: CalibrationProfile) -> Self {
        Self {
            name: name.into(),
            profile,
            subscribers: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.emit(AxisEvent::RedrawRequested);
    }

    pub fn profile(&self) -> &CalibrationProfile {
        &self.profile
    }

    pub fn current_value(&self) -> f64 {
        self.profile.current_value
    }

    pub fn observed(&self) -> Option<ObservedRange> {
        self.profile.observed
    }

    pub fn calibration_point(&self, point: CalibrationPoint) -> Option<f64> {
        self.profile.point(point)
    }

    /// Receive redraw and calibration-changed notifications.
    pub fn subscribe(&mut self) -> Receiver<AxisEvent> {
        let (sender, receiver) = channel();
        self.subscribers.push(sender);
        receiver
    }

    fn emit(&mut self, event: AxisEvent) {
        self.subscribers.retain(|s| s.send(event).is_ok());
    }

    /// Record a raw sample and widen the observed range.
    pub fn observe(&mut self, raw: f64) -> Result<()> {
        let raw = ensure_finite("axis sample", raw)?;
        self.profile.current_value = raw;
        self.profile.observed = Some(match self.profile.observed {
            Some(mut range) => {
                range.widen(raw);
                range
            }
            None => ObservedRange::seeded(raw),
        });
        self.emit(AxisEvent::RedrawRequested);
        Ok(())
    }

    /// Pin the current sample as one of the calibration points.
    pub fn set_calibration_point(&mut self, point: CalibrationPoint) {
        let value = self.profile.current_value;
        *self.profile.point_mut(point) = Some(value);
        tracing::debug!(axis = %self.name, ?point, value, "calibration point set");
        self.emit(AxisEvent::RedrawRequested);
        self.emit(AxisEvent::CalibrationChanged(point));
    }

    /// Forget the observed range so it can be learned again. Calibration
    /// points are kept.
    pub fn reset_observed(&mut self) {
        self.profile.observed = None;
        tracing::debug!(axis = %self.name, "observed range reset");
        self.emit(AxisEvent::RedrawRequested);
    }

    pub fn is_calibrated(&self) -> bool {
        self.profile.is_calibrated()
    }

    pub fn normalize(&self, raw: f64) -> Option<f64> {
        self.profile.normalize(raw)
    }

    pub fn normalized_current(&self) -> Option<f64> {
        self.normalize(self.profile.current_value)
    }

    /// Whether the observed range is wide enough to lay out the track.
    pub fn has_usable_range(&self) -> bool {
        self.profile
            .observed
            .is_some_and(|range| range.max > range.min)
    }

    /// Position of `value` along the observed range in `[0, 1]`; the middle
    /// of the track while the range is still unknown.
    pub fn track_position(&self, value: f64) -> f64 {
        match self.profile.observed {
            Some(range) if range.max > range.min => {
                ((value - range.min) / range.span()).clamp(0.0, 1.0)
            }
            _ => 0.5,
        }
    }

    /// One-line status text shown under the calibration track.
    pub fn readout(&self) -> String {
        let raw = format_trimmed(self.profile.current_value);
        match self.profile.observed {
            Some(range) if range.max > range.min => format!(
                "Raw: {raw}   ObsMin: {}   ObsMax: {}",
                format_trimmed(range.min),
                format_trimmed(range.max)
            ),
            _ => format!("Raw: {raw}   (move axis to discover range)"),
        }
    }

    pub fn apply(&mut self, command: AxisCommand) -> Result<()> {
        match command {
            AxisCommand::Sample(raw) => self.observe(raw)?,
            AxisCommand::SetPoint(point) => self.set_calibration_point(point),
            AxisCommand::ResetObserved => self.reset_observed(),
        }
        Ok(())
    }

    /// Apply everything queued on `receiver` without blocking. Rejected
    /// samples are skipped; the number of rejected commands is returned.
    pub fn apply_pending(&mut self, receiver: &Receiver<AxisCommand>) -> usize {
        let mut rejected = 0;
        while let Ok(command) = receiver.try_recv() {
            if self.apply(command).is_err() {
                rejected += 1;
            }
        }
        rejected
    }
}

/// At most two decimals, trailing zeros dropped.
fn format_trimmed(value: f64) -> String {
    let text = format!("{value:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}
