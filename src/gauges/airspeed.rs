use crate::config::{AirspeedConfig, Color};
use crate::error::{ensure_finite, Result};
use crate::scale::{AngularScale, ArcSpan, Zone};
use crate::surface::{Align, Rect, Surface};

use super::{
    draw_bezel, draw_hub, draw_needle, draw_radial_tick, draw_ticks, draw_zone, round_half_away, Dial, Tick, Widget,
};

const START_ANGLE: f64 = 30.0;
const SWEEP: f64 = 300.0;

/// Which concentric ring a zone is painted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneRing {
    /// Flap range, just inside the main arcs.
    Inner,
    /// Normal and caution ranges.
    Outer,
}

impl ZoneRing {
    pub const fn radius_fraction(self) -> f64 {
        match self {
            ZoneRing::Inner => 0.80,
            ZoneRing::Outer => 0.86,
        }
    }
}

/// Airspeed indicator with white, green and yellow arcs and a red VNE line.
#[derive(Debug, Clone, Default)]
pub struct AirspeedIndicator {
    indicated_speed: f64,
    config: AirspeedConfig,
}

impl AirspeedIndicator {
    pub fn new(config: AirspeedConfig) -> Self {
        Self {
            indicated_speed: 0.0,
            config,
        }
    }

    pub fn config(&self) -> &AirspeedConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: AirspeedConfig) {
        self.config = config;
    }

    pub fn indicated_speed(&self) -> f64 {
        self.indicated_speed
    }

    /// Speed in the configured unit. Always asks for a redraw.
    pub fn set_indicated_speed(&mut self, speed: f64) -> Result<bool> {
        self.indicated_speed = ensure_finite("indicated airspeed", speed)?;
        Ok(true)
    }

    /// Scale from the start speed (30°, about 1 o'clock) to VNE (330°).
    pub fn scale(&self) -> AngularScale {
        AngularScale::bounded(self.config.start_speed, self.config.vne, START_ANGLE, SWEEP)
    }

    pub fn needle_angle(&self) -> f64 {
        self.scale().value_to_angle(self.indicated_speed)
    }

    pub fn vne_angle(&self) -> f64 {
        self.scale().value_to_angle(self.config.vne)
    }

    pub fn zones(&self) -> [(Zone, ZoneRing); 3] {
        let c = &self.config;
        [
            (Zone::new(c.vso, c.vfe, Color::WHITE), ZoneRing::Inner),
            (Zone::new(c.vs1, c.vno, Color::LIME_GREEN), ZoneRing::Outer),
            (Zone::new(c.vno, c.vne, Color::GOLD), ZoneRing::Outer),
        ]
    }

    /// Zones that survive clamping, in paint order.
    pub fn zone_arcs(&self) -> Vec<(ArcSpan, Color, ZoneRing)> {
        let scale = self.scale();
        self.zones()
            .iter()
            .filter_map(|(zone, ring)| scale.zone_to_arc(zone).map(|arc| (arc, zone.color, *ring)))
            .collect()
    }

    /// Graduations on whole multiples of the tick step; empty when the
    /// scale is degenerate.
    pub fn ticks(&self) -> Vec<Tick> {
        let c = &self.config;
        let scale = self.scale();
        if scale.is_degenerate() || c.tick_step == 0 {
            return Vec::new();
        }
        let step = c.tick_step as i64;
        let first = (c.start_speed / step as f64).ceil() as i64 * step;
        let last = (c.vne / step as f64).floor() as i64 * step;

        (first..=last)
            .step_by(step as usize)
            .map(|speed| {
                let labelled = c.label_step != 0 && speed % c.label_step as i64 == 0;
                Tick {
                    value: speed as f64,
                    angle: scale.value_to_angle(speed as f64),
                    major: speed % 10 == 0,
                    label: labelled.then(|| speed.to_string()),
                }
            })
            .collect()
    }

    pub fn readout(&self) -> String {
        format!("{:.0}", round_half_away(self.indicated_speed, 0))
    }
}

impl Widget for AirspeedIndicator {
    fn paint(&self, surface: &mut dyn Surface, bounds: Rect) {
        let dial = Dial::fit(bounds);
        let r = dial.radius;
        draw_bezel(surface, &dial);

        let scale = self.scale();
        let thickness = (r * 0.055).max(6.0);
        for (zone, ring) in self.zones() {
            draw_zone(surface, &dial, &scale, &zone, ring.radius_fraction(), thickness);
        }
        draw_radial_tick(surface, &dial, self.vne_angle(), 0.80, 0.92, (r * 0.03).max(3.0), Color::RED);

        let ticks = self.ticks();
        draw_ticks(surface, &dial, &ticks, 0.88, 0.65, 0.81);
        for tick in &ticks {
            if let Some(label) = &tick.label {
                surface.text(dial.at(tick.angle, 0.55), label, r * 0.12, Align::Center, Color::WHITE);
            }
        }

        draw_needle(surface, &dial, self.needle_angle(), 0.78, 0.12, (r * 0.025).max(2.0), Color::WHITE);
        draw_hub(surface, &dial, 0.055, true);

        let below = |fraction: f64| dial.center.offset(0.0, r * fraction);
        if self.config.show_unit_text {
            surface.text(below(0.28), self.config.unit.label(), r * 0.12, Align::Center, Color::WHITE);
        }
        surface.text(below(0.40), &self.readout(), r * 0.09, Align::Center, Color::WHITE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Scene;
    use approx::assert_abs_diff_eq;

    #[test]
    fn needle_is_pinned_to_scale_ends() {
        let mut asi = AirspeedIndicator::default();
        asi.set_indicated_speed(0.0).unwrap();
        assert_abs_diff_eq!(asi.needle_angle(), 30.0, epsilon = 1e-9);
        asi.set_indicated_speed(400.0).unwrap();
        assert_abs_diff_eq!(asi.needle_angle(), 330.0, epsilon = 1e-9);
    }

    #[test]
    fn ticks_round_to_the_step() {
        let asi = AirspeedIndicator::new(AirspeedConfig::builder().start_speed(42.0).vne(61.0).build());
        let values: Vec<_> = asi.ticks().iter().map(|t| t.value).collect();
        assert_eq!(values, [45.0, 50.0, 55.0, 60.0]);
        let labels: Vec<_> = asi.ticks().into_iter().filter_map(|t| t.label).collect();
        assert_eq!(labels, ["60"]);
    }

    #[test]
    fn degenerate_scale_has_no_ticks() {
        let asi = AirspeedIndicator::new(AirspeedConfig::builder().start_speed(160.0).vne(160.0).build());
        assert!(asi.ticks().is_empty());
        assert!(asi.zone_arcs().is_empty());
        assert_eq!(asi.needle_angle(), 30.0);
    }

    #[test]
    fn readout_rounds_half_knots_up() {
        let mut asi = AirspeedIndicator::default();
        asi.set_indicated_speed(86.5).unwrap();
        assert_eq!(asi.readout(), "87");
        asi.set_indicated_speed(120.49).unwrap();
        assert_eq!(asi.readout(), "120");
    }

    #[test]
    fn paint_shows_unit_and_readout() {
        let mut asi = AirspeedIndicator::default();
        asi.set_indicated_speed(87.4).unwrap();
        let mut scene = Scene::new();
        asi.paint(&mut scene, Rect::new(0.0, 0.0, 220.0, 220.0));
        let texts = scene.texts();
        assert!(texts.contains(&"KNOTS"));
        assert!(texts.contains(&"87"));
        assert_eq!(scene.arcs().count(), 3);
    }
}
