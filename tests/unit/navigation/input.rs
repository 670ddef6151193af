use super::*;

#[test]
fn wheel_and_arrows_map_to_steps() {
    assert_eq!(InputEvent::Wheel { delta_y: 120.0 }.step(), Some(Step::Next));
    assert_eq!(InputEvent::Wheel { delta_y: -3.0 }.step(), Some(Step::Previous));
    assert_eq!(InputEvent::Wheel { delta_y: 0.0 }.step(), None);
    assert_eq!(InputEvent::Key(Key::ArrowDown).step(), Some(Step::Next));
    assert_eq!(InputEvent::Key(Key::Other).step(), None);
    assert_eq!(InputEvent::IndicatorClick(3).step(), None);
}

#[test]
fn parses_key_names() {
    assert_eq!("ArrowUp".parse::<Key>().unwrap(), Key::ArrowUp);
    assert_eq!("PageDown".parse::<Key>().unwrap(), Key::Other);
    assert!("".parse::<Key>().is_err());
}
