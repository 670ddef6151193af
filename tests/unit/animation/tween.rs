use super::*;

#[test]
fn samples_hold_before_start_and_after_end() {
    let t = Tween::new(0.0, 10.0, Millis(100), Millis(200), Ease::Linear);
    assert_eq!(t.sample(Millis(0)), 0.0);
    assert_eq!(t.sample(Millis(100)), 0.0);
    assert_eq!(t.sample(Millis(200)), 5.0);
    assert_eq!(t.sample(Millis(300)), 10.0);
    assert_eq!(t.sample(Millis(10_000)), 10.0);
    assert!(!t.is_finished(Millis(299)));
    assert!(t.is_finished(Millis(300)));
}

#[test]
fn zero_duration_jumps_at_start() {
    let t = Tween::new(1.0, 2.0, Millis(50), Millis::ZERO, Ease::InOutCubic);
    assert_eq!(t.sample(Millis(49)), 1.0);
    assert_eq!(t.sample(Millis(50)), 2.0);
    assert!(t.is_finished(Millis(50)));
}

#[test]
fn hold_is_constant() {
    let t = Tween::hold(Point::new(3.0, 4.0));
    assert_eq!(t.sample(Millis(0)), Point::new(3.0, 4.0));
    assert_eq!(t.sample(Millis(99)), Point::new(3.0, 4.0));
    assert!(t.is_finished(Millis(0)));
}

#[test]
fn eased_points_follow_the_curve() {
    let t = Tween::new(
        Point::new(0.0, 0.0),
        Point::new(100.0, 50.0),
        Millis(0),
        Millis(1000),
        Ease::InOutCubic,
    );
    let quarter = t.sample(Millis(250));
    assert!((quarter.x - 6.25).abs() < 1e-9);
    assert!((quarter.y - 3.125).abs() < 1e-9);
    let mid = t.sample(Millis(500));
    assert!((mid.x - 50.0).abs() < 1e-9);
}

#[test]
fn colors_interpolate_per_channel() {
    let a = Color::rgb(0, 100, 200);
    let b = Color::rgb(100, 100, 0);
    assert_eq!(Color::lerp(&a, &b, 0.5), Color::rgb(50, 100, 100));
}

#[test]
fn retarget_starts_from_current_value() {
    let t = Tween::new(0.0, 1.0, Millis(0), Millis(100), Ease::Linear);
    let r = t.retarget(Millis(50), 0.0, Millis(50), Millis(100), Ease::Linear);
    assert_eq!(r.from, 0.5);
    assert_eq!(r.sample(Millis(150)), 0.0);
}
