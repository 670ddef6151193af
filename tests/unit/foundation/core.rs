use super::*;

#[test]
fn millis_arithmetic_saturates() {
    assert_eq!(Millis(5).since(Millis(9)), Millis::ZERO);
    assert_eq!(Millis(9).since(Millis(5)), Millis(4));
    assert_eq!(Millis(u64::MAX).saturating_add(Millis(1)), Millis(u64::MAX));
    assert_eq!(Millis(1000).scaled(1.5), Millis(1500));
}

#[test]
fn color_hex_roundtrip() {
    let c = Color::from_hex("#58CDFF").unwrap();
    assert_eq!(c, Color::rgb(0x58, 0xCD, 0xFF));
    assert_eq!(c.to_hex(), "#58CDFF");

    let translucent = Color::from_hex("ffffff80").unwrap();
    assert_eq!(translucent.a, 0x80);
    assert_eq!(translucent.to_hex(), "#FFFFFF80");
}

#[test]
fn color_rejects_garbage() {
    assert!(Color::from_hex("#12345").is_err());
    assert!(Color::from_hex("#GGGGGG").is_err());
    assert!(Color::from_hex("#ÿÿÿ").is_err());
}

#[test]
fn color_serializes_as_string() {
    let json = serde_json::to_string(&Color::rgb(1, 2, 3)).unwrap();
    assert_eq!(json, "\"#010203\"");
    let back: Color = serde_json::from_str(&json).unwrap();
    assert_eq!(back, Color::rgb(1, 2, 3));
}

#[test]
fn viz_id_parses_case_insensitively() {
    assert_eq!("PACK".parse::<VizId>().unwrap(), VizId::Pack);
    assert_eq!(" grid ".parse::<VizId>().unwrap(), VizId::Grid);
    assert!("bars".parse::<VizId>().is_err());
    assert_eq!(serde_json::to_string(&VizId::Grid).unwrap(), "\"grid\"");
}

#[test]
fn direction_follows_section_order() {
    assert_eq!(Direction::between(7, 8), Direction::Forward);
    assert_eq!(Direction::between(8, 7), Direction::Reverse);
    assert_eq!(Direction::Forward.reversed(), Direction::Reverse);
    assert_eq!(
        serde_json::to_string(&Direction::Reverse).unwrap(),
        r#""reverse""#
    );
}
