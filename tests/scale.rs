use approx::assert_abs_diff_eq;
use flight_gauges::{AngularScale, Color, Zone};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const AIRSPEED: AngularScale = AngularScale::bounded(40.0, 160.0, 30.0, 300.0);
const VSI: AngularScale = AngularScale::bounded(-2000.0, 2000.0, 115.0, 310.0);

fn rng() -> StdRng {
    StdRng::seed_from_u64(0x5eed_da1)
}

#[test]
fn angles_always_land_on_the_circle() {
    let mut rng = rng();
    for _ in 0..2_000 {
        let value = rng.random_range(-1.0e6..1.0e6);
        for scale in [AIRSPEED, VSI, AngularScale::compass(), AngularScale::cyclic(1000.0)] {
            let angle = scale.value_to_angle(value);
            assert!((0.0..360.0).contains(&angle), "{scale:?} mapped {value} to {angle}");
        }
    }
}

#[test]
fn out_of_range_values_pin_to_the_ends() {
    let mut rng = rng();
    for _ in 0..500 {
        let low = rng.random_range(-1.0e5..40.0);
        let high = rng.random_range(160.0..1.0e5);
        assert_abs_diff_eq!(AIRSPEED.value_to_angle(low), 30.0, epsilon = 1e-9);
        assert_abs_diff_eq!(AIRSPEED.value_to_angle(high), 330.0, epsilon = 1e-9);
    }
}

#[test]
fn bounded_mapping_is_monotonic_along_the_sweep() {
    let mut rng = rng();
    let mut values: Vec<f64> = (0..200).map(|_| rng.random_range(40.0..160.0)).collect();
    values.sort_by(f64::total_cmp);
    // airspeed never wraps, so angles increase with the value
    let angles: Vec<f64> = values.iter().map(|v| AIRSPEED.value_to_angle(*v)).collect();
    assert!(angles.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn cyclic_scale_repeats_every_period() {
    let mut rng = rng();
    let scale = AngularScale::compass();
    for _ in 0..500 {
        let value = rng.random_range(-720.0..720.0);
        let turns = rng.random_range(-5..5) as f64;
        assert_abs_diff_eq!(
            scale.value_to_angle(value),
            scale.value_to_angle(value + turns * 360.0),
            epsilon = 1e-6
        );
    }
}

#[test]
fn zone_outside_the_scale_renders_nothing() {
    assert_eq!(AIRSPEED.zone_to_arc(&Zone::new(200.0, 210.0, Color::RED)), None);
    assert_eq!(AIRSPEED.zone_to_arc(&Zone::new(0.0, 30.0, Color::RED)), None);
    assert_eq!(AIRSPEED.zone_to_arc(&Zone::new(130.0, 90.0, Color::RED)), None);
}

#[test]
fn zone_partly_outside_is_trimmed() {
    let arc = AIRSPEED
        .zone_to_arc(&Zone::new(130.0, 400.0, Color::GOLD))
        .expect("overlaps the scale");
    assert_abs_diff_eq!(arc.start_compass, 255.0, epsilon = 1e-9);
    assert_abs_diff_eq!(arc.end_compass, 330.0, epsilon = 1e-9);
    assert_abs_diff_eq!(arc.sweep, 75.0, epsilon = 1e-9);
    assert_abs_diff_eq!(arc.start_angle, 165.0, epsilon = 1e-9);
}

#[test]
fn zone_sweeps_stay_within_the_scale_sweep() {
    let mut rng = rng();
    for _ in 0..500 {
        let a: f64 = rng.random_range(-3000.0..3000.0);
        let b: f64 = rng.random_range(-3000.0..3000.0);
        if let Some(arc) = VSI.zone_to_arc(&Zone::new(a.min(b), a.max(b), Color::WHITE)) {
            assert!(arc.sweep > 0.0 && arc.sweep <= 310.0 + 1e-9, "sweep {}", arc.sweep);
        }
    }
}
