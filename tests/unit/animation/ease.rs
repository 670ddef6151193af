use super::*;

const ALL: [Ease; 8] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::InCubic,
    Ease::OutCubic,
    Ease::InOutCubic,
    Ease::Css,
];

#[test]
fn endpoints_are_stable() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0, "{ease:?}");
        assert_eq!(ease.apply(1.0), 1.0, "{ease:?}");
        assert_eq!(ease.apply(-3.0), 0.0, "{ease:?}");
        assert_eq!(ease.apply(7.0), 1.0, "{ease:?}");
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b, "{ease:?}");
        assert!(b < c, "{ease:?}");
    }
}

#[test]
fn in_out_cubic_is_slow_fast_slow() {
    let e = Ease::InOutCubic;
    assert!((e.apply(0.5) - 0.5).abs() < 1e-12);
    assert!(e.apply(0.1) < 0.1);
    assert!(e.apply(0.9) > 0.9);
}

#[test]
fn css_ease_matches_known_samples() {
    // Known values for cubic-bezier(0.25, 0.1, 0.25, 1.0).
    assert!((Ease::Css.apply(0.5) - 0.8024).abs() < 1e-3);
    assert!((Ease::Css.apply(0.25) - 0.4085).abs() < 1e-3);
}

#[test]
fn serde_uses_snake_case() {
    assert_eq!(
        serde_json::to_string(&Ease::InOutCubic).unwrap(),
        "\"in_out_cubic\""
    );
    let back: Ease = serde_json::from_str("\"css\"").unwrap();
    assert_eq!(back, Ease::Css);
}
