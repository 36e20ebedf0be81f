use approx::assert_abs_diff_eq;
use flight_gauges::{
    from_json, AdfIndicator, AirspeedConfig, AirspeedIndicator, Altimeter, AttitudeIndicator,
    AxisCalibration, Color, DrawCommand, HeadingConfig, HeadingIndicator, ProgressBarConfig, Rect,
    Scene, ValueProgressBar, VerticalSpeedIndicator, Widget, ZoneRing,
};
use pretty_assertions::assert_eq;

const BOUNDS: Rect = Rect::new(0.0, 0.0, 240.0, 240.0);

fn paint(widget: &dyn Widget, bounds: Rect) -> Scene {
    let mut scene = Scene::new();
    widget.paint(&mut scene, bounds);
    scene
}

#[test]
fn every_instrument_paints_onto_a_scene() {
    let panel: Vec<Box<dyn Widget>> = vec![
        Box::new(AirspeedIndicator::default()),
        Box::new(Altimeter::new()),
        Box::new(VerticalSpeedIndicator::default()),
        Box::new(HeadingIndicator::default()),
        Box::new(AttitudeIndicator::default()),
        Box::new(AdfIndicator::new()),
        Box::new(ValueProgressBar::default()),
        Box::new(AxisCalibration::new("Aileron")),
    ];
    for widget in &panel {
        let scene = paint(widget.as_ref(), BOUNDS);
        assert!(!scene.commands().is_empty());

        let mut replay = Scene::new();
        scene.render(&mut replay);
        assert_eq!(replay.commands(), scene.commands());
    }
}

#[test]
fn airspeed_arcs_follow_the_configured_speeds() {
    let asi = AirspeedIndicator::default();
    let arcs = asi.zone_arcs();
    assert_eq!(arcs.len(), 3);

    let (green, color, ring) = arcs[1];
    assert_eq!(color, Color::LIME_GREEN);
    assert_eq!(ring, ZoneRing::Outer);
    assert_abs_diff_eq!(green.start_angle, 325.0, epsilon = 1e-9);
    assert_abs_diff_eq!(green.sweep, 200.0, epsilon = 1e-9);
}

#[test]
fn airspeed_config_from_json() {
    let config: AirspeedConfig = from_json(r#"{ "unit": "kilometers_per_hour", "vne": 250.0, "vno": 200.0 }"#).unwrap();
    let mut asi = AirspeedIndicator::new(config);
    asi.set_indicated_speed(145.0).unwrap();

    assert_abs_diff_eq!(asi.needle_angle(), 30.0 + 300.0 * 105.0 / 210.0, epsilon = 1e-9);
    assert_abs_diff_eq!(asi.vne_angle(), 330.0, epsilon = 1e-9);
    let scene = paint(&asi, BOUNDS);
    assert!(scene.texts().contains(&"KM/H"));
}

#[test]
fn heading_indicator_without_extras() {
    let config = HeadingConfig::builder()
        .show_digital_readout(false)
        .show_heading_bug(false)
        .build();
    let mut hi = HeadingIndicator::new(config);
    hi.set_heading_degrees(90.0).unwrap();

    let scene = paint(&hi, BOUNDS);
    assert!(!scene.texts().contains(&"090"));
    assert!(!scene
        .commands()
        .iter()
        .any(|c| matches!(c, DrawCommand::Polygon { color, .. } if *color == Color::ORANGE)));
}

#[test]
fn heading_readout_is_drawn() {
    let mut hi = HeadingIndicator::default();
    hi.set_heading_degrees(90.4).unwrap();
    let scene = paint(&hi, BOUNDS);
    assert!(scene.texts().contains(&"090"));
    assert!(scene.texts().contains(&"N"));
}

#[test]
fn progress_bar_paints_fill_zero_line_and_label() {
    let config = ProgressBarConfig::builder().unit_suffix(" kt").build();
    let mut bar = ValueProgressBar::new(config);
    bar.set_minimum(-50.0).unwrap();
    bar.set_maximum(50.0).unwrap();
    bar.set_value(-20.0).unwrap();

    let scene = paint(&bar, Rect::new(0.0, 0.0, 202.0, 24.0));
    assert_eq!(scene.texts(), vec!["-20 kt"]);

    let fill = scene
        .commands()
        .iter()
        .find_map(|c| match c {
            DrawCommand::Rect { rect, filled: true, color, .. } if *color == Color::BAR_NEGATIVE => Some(*rect),
            _ => None,
        })
        .expect("negative fill");
    assert_abs_diff_eq!(fill.left, 61.0, epsilon = 1e-9);
    assert_abs_diff_eq!(fill.width, 40.0, epsilon = 1e-9);
    assert!(scene.commands().iter().any(|c| matches!(c, DrawCommand::Line { .. })));
}

#[test]
fn progress_bar_with_empty_range_draws_only_the_track() {
    let mut bar = ValueProgressBar::default();
    bar.set_maximum(0.0).unwrap();
    let scene = paint(&bar, Rect::new(0.0, 0.0, 200.0, 24.0));
    assert_eq!(scene.commands().len(), 2);
    assert!(scene.texts().is_empty());
}

#[test]
fn attitude_setters_normalize_roll() {
    let mut ai = AttitudeIndicator::default();
    ai.set_roll_degrees(350.0).unwrap();
    assert_abs_diff_eq!(ai.roll_degrees(), -10.0, epsilon = 1e-9);
    assert_abs_diff_eq!(ai.world_rotation(), 10.0, epsilon = 1e-9);
    assert!(ai.set_pitch_degrees(f64::NAN).is_err());
}

#[test]
fn altimeter_and_vsi_reject_non_finite_input() {
    let mut alt = Altimeter::new();
    alt.set_altitude_feet(3500.0).unwrap();
    assert!(alt.set_altitude_feet(f64::INFINITY).is_err());
    assert_eq!(alt.altitude_feet(), 3500.0);

    let mut vsi = VerticalSpeedIndicator::default();
    assert!(vsi.set_vertical_speed_fpm(f64::NAN).is_err());
    assert_eq!(vsi.vertical_speed_fpm(), 0.0);
}
