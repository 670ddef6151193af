use super::*;

#[test]
fn parse_recognizes_the_three_mechanisms() {
    assert_eq!(Mechanism::parse("Behaviour"), Mechanism::Behaviour);
    assert_eq!(Mechanism::parse(" Demographic "), Mechanism::Demographic);
    assert_eq!(Mechanism::parse("Physiological"), Mechanism::Physiological);
    let other = Mechanism::parse("Genetic");
    assert!(!other.is_recognized());
    assert_eq!(other.to_string(), "Genetic");
}

#[test]
fn palettes_are_analogous_but_distinct() {
    let pack = Palette::packing();
    let grid = Palette::grid();
    for m in [
        Mechanism::Behaviour,
        Mechanism::Demographic,
        Mechanism::Physiological,
    ] {
        assert_ne!(pack.fill(&m), grid.fill(&m));
    }
    assert_eq!(pack.fill(&Mechanism::Behaviour).to_hex(), "#58CDFF");
    assert_eq!(grid.fill(&Mechanism::Physiological).to_hex(), "#EE5EBE");
    assert_eq!(
        pack.fill(&Mechanism::Other(String::new())),
        pack.fallback
    );
}
