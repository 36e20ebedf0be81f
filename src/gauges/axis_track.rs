use crate::calibration::{AxisCalibration, CalibrationPoint};
use crate::config::Color;
use crate::surface::{Align, Point, Rect, Surface};

use super::Widget;

const LABEL_HEIGHT: f64 = 18.0;
const TRACK_BACKGROUND: Color = Color::new(25, 25, 25);

fn marker_color(point: CalibrationPoint) -> Color {
    match point {
        CalibrationPoint::Center => Color::YELLOW,
        CalibrationPoint::Min | CalibrationPoint::Max => Color::ORANGE,
    }
}

/// Where the track sits inside the control: below the name label and
/// above the room left for the readout and buttons.
pub(crate) fn track_rect(bounds: Rect) -> Rect {
    let top = bounds.top + LABEL_HEIGHT + 8.0;
    let bottom = bounds.bottom() - 40.0;
    Rect::new(bounds.left + 10.0, top, bounds.width - 20.0, (bottom - top).max(16.0))
}

impl Widget for AxisCalibration {
    fn paint(&self, surface: &mut dyn Surface, bounds: Rect) {
        surface.text(
            Point::new(bounds.left + 10.0, bounds.top + LABEL_HEIGHT / 2.0),
            self.name(),
            12.0,
            Align::Left,
            Color::WHITE,
        );

        let track = track_rect(bounds);
        surface.fill_rect(track, TRACK_BACKGROUND);
        surface.stroke_rect(track, 1.0, Color::GRAY);

        let x_of = |value: f64| track.left + self.track_position(value) * track.width;
        let current = x_of(self.current_value());
        surface.fill_rect(
            Rect::from_ltrb(track.left, track.top, current, track.bottom()),
            Color::BAR_BLUE,
        );

        for point in CalibrationPoint::ALL {
            let Some(value) = self.calibration_point(point) else {
                continue;
            };
            let x = x_of(value);
            let color = marker_color(point);
            surface.line(Point::new(x, track.top), Point::new(x, track.bottom()), 2.0, color);
            surface.text(Point::new(x, track.top - 8.0), point.label(), 10.0, Align::Center, color);
        }

        surface.line(
            Point::new(current, track.top - 2.0),
            Point::new(current, track.bottom() + 2.0),
            2.0,
            Color::WHITE,
        );
        surface.text(
            Point::new(bounds.left + 10.0, track.bottom() + 12.0),
            &self.readout(),
            11.0,
            Align::Left,
            Color::WHITE,
        );
    }
}
