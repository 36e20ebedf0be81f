//! The drawing surface instruments paint through.
//!
//! Instruments only compute geometry; a host supplies a [`Surface`] that turns
//! the calls into pixels. [`Scene`] is a retained implementation that records
//! the calls as [`DrawCommand`]s so they can be replayed later or inspected.

use crate::config::Color;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Rotate around `origin` by a clockwise angle in degrees (screen
    /// coordinates, y pointing down).
    pub fn rotated_about(self, origin: Point, degrees: f64) -> Point {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let (dx, dy) = (self.x - origin.x, self.y - origin.y);
        Point::new(origin.x + dx * cos - dy * sin, origin.y + dx * sin + dy * cos)
    }

    pub fn offset(self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn from_ltrb(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Text anchoring relative to the given point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Drawing backend. Arc angles use the drawing convention (0° at 3 o'clock,
/// clockwise), every other angle is already resolved into points.
pub trait Surface {
    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, sweep: f64, thickness: f64, color: Color);
    fn line(&mut self, from: Point, to: Point, thickness: f64, color: Color);
    fn fill_polygon(&mut self, points: &[Point], color: Color);
    fn fill_circle(&mut self, center: Point, radius: f64, color: Color);
    fn stroke_circle(&mut self, center: Point, radius: f64, thickness: f64, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn stroke_rect(&mut self, rect: Rect, thickness: f64, color: Color);
    fn text(&mut self, at: Point, text: &str, size: f64, align: Align, color: Color);
    /// Restrict following calls to a circle until [`Surface::reset_clip`].
    fn clip_circle(&mut self, center: Point, radius: f64);
    fn reset_clip(&mut self);
}

// ============================================================================
// RETAINED MODE
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Arc {
        center: Point,
        radius: f64,
        start_angle: f64,
        sweep: f64,
        thickness: f64,
        color: Color,
    },
    Line {
        from: Point,
        to: Point,
        thickness: f64,
        color: Color,
    },
    Polygon {
        points: Vec<Point>,
        color: Color,
    },
    Circle {
        center: Point,
        radius: f64,
        filled: bool,
        thickness: f64,
        color: Color,
    },
    Rect {
        rect: Rect,
        filled: bool,
        thickness: f64,
        color: Color,
    },
    Text {
        at: Point,
        text: String,
        size: f64,
        align: Align,
        color: Color,
    },
    ClipCircle {
        center: Point,
        radius: f64,
    },
    ResetClip,
}

#[derive(Debug, Default, Clone)]
pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Replay the recorded commands onto another surface.
    pub fn render(&self, target: &mut dyn Surface) {
        for command in &self.commands {
            match command {
                DrawCommand::Arc {
                    center,
                    radius,
                    start_angle,
                    sweep,
                    thickness,
                    color,
                } => target.arc(*center, *radius, *start_angle, *sweep, *thickness, *color),
                DrawCommand::Line {
                    from,
                    to,
                    thickness,
                    color,
                } => target.line(*from, *to, *thickness, *color),
                DrawCommand::Polygon { points, color } => target.fill_polygon(points, *color),
                DrawCommand::Circle {
                    center,
                    radius,
                    filled,
                    thickness,
                    color,
                } => {
                    if *filled {
                        target.fill_circle(*center, *radius, *color);
                    } else {
                        target.stroke_circle(*center, *radius, *thickness, *color);
                    }
                }
                DrawCommand::Rect {
                    rect,
                    filled,
                    thickness,
                    color,
                } => {
                    if *filled {
                        target.fill_rect(*rect, *color);
                    } else {
                        target.stroke_rect(*rect, *thickness, *color);
                    }
                }
                DrawCommand::Text {
                    at,
                    text,
                    size,
                    align,
                    color,
                } => target.text(*at, text, *size, *align, *color),
                DrawCommand::ClipCircle { center, radius } => target.clip_circle(*center, *radius),
                DrawCommand::ResetClip => target.reset_clip(),
            }
        }
    }

    /// All text drawn, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn arcs(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Arc { .. }))
    }
}

impl Surface for Scene {
    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, sweep: f64, thickness: f64, color: Color) {
        self.add_command(DrawCommand::Arc {
            center,
            radius,
            start_angle,
            sweep,
            thickness,
            color,
        });
    }

    fn line(&mut self, from: Point, to: Point, thickness: f64, color: Color) {
        self.add_command(DrawCommand::Line {
            from,
            to,
            thickness,
            color,
        });
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color) {
        self.add_command(DrawCommand::Polygon {
            points: points.to_vec(),
            color,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        self.add_command(DrawCommand::Circle {
            center,
            radius,
            filled: true,
            thickness: 0.0,
            color,
        });
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, thickness: f64, color: Color) {
        self.add_command(DrawCommand::Circle {
            center,
            radius,
            filled: false,
            thickness,
            color,
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.add_command(DrawCommand::Rect {
            rect,
            filled: true,
            thickness: 0.0,
            color,
        });
    }

    fn stroke_rect(&mut self, rect: Rect, thickness: f64, color: Color) {
        self.add_command(DrawCommand::Rect {
            rect,
            filled: false,
            thickness,
            color,
        });
    }

    fn text(&mut self, at: Point, text: &str, size: f64, align: Align, color: Color) {
        self.add_command(DrawCommand::Text {
            at,
            text: text.to_string(),
            size,
            align,
            color,
        });
    }

    fn clip_circle(&mut self, center: Point, radius: f64) {
        self.add_command(DrawCommand::ClipCircle { center, radius });
    }

    fn reset_clip(&mut self) {
        self.add_command(DrawCommand::ResetClip);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use pretty_assertions::assert_eq;

    #[test]
    fn rotation_is_clockwise_on_screen() {
        let up = Point::new(0.0, -10.0);
        let right = up.rotated_about(Point::new(0.0, 0.0), 90.0);
        assert_abs_diff_eq!(right.x, 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(right.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn replay_reproduces_commands() {
        let mut scene = Scene::new();
        scene.line(Point::new(0.0, 0.0), Point::new(1.0, 1.0), 2.0, Color::WHITE);
        scene.fill_circle(Point::new(5.0, 5.0), 3.0, Color::GRAY);
        scene.text(Point::new(1.0, 2.0), "ALT", 12.0, Align::Center, Color::WHITE);

        let mut copy = Scene::new();
        scene.render(&mut copy);
        assert_eq!(copy.commands(), scene.commands());
        assert_eq!(copy.texts(), vec!["ALT"]);
    }
}
