use super::*;

fn row(binomial: &str, group: &str, mech: &str, ty: &str) -> StudyRecord {
    StudyRecord {
        species_binomial: binomial.to_string(),
        species_group: group.to_string(),
        mechanism: mech.to_string(),
        study_type: ty.to_string(),
        title: None,
        year: None,
    }
}

#[test]
fn parses_dataset_column_names() {
    let json = r#"[
        {"SpeciesBinomial": "Panthera leo", "SpeciesGrouped": "Mammalia",
         "CompMech": "Behaviour", "Type": "Heatwave", "Year": 2004},
        {"SpeciesBinomial": "", "SpeciesGrouped": "Birds", "CompMech": "Behaviour"}
    ]"#;
    let ds = Dataset::from_json_str(json).unwrap();
    assert_eq!(ds.len(), 1);
    assert_eq!(ds.records()[0].year, Some(2004));
    assert_eq!(ds.records()[0].mechanism(), Mechanism::Behaviour);
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = Dataset::from_json_str("{").unwrap_err();
    assert!(matches!(err, MorphError::Serde(_)));
}

#[test]
fn species_groups_keep_first_appearance_and_dedupe() {
    let ds = Dataset::new(vec![
        row("a", "Birds", "Behaviour", "T1"),
        row("b", "Fish", "Demographic", "T1"),
        row("c", "Birds", "Genetic", "T2"),
        row("a", "Fish", "Physiological", "T2"),
    ]);
    let groups = ds.species_groups();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].name, "Birds");
    let birds: Vec<_> = groups[0].items.iter().map(|i| i.binomial.as_str()).collect();
    assert_eq!(birds, ["a", "c"]);
    assert_eq!(groups[1].items.len(), 1);
    assert_eq!(groups[1].items[0].binomial, "b");
}

#[test]
fn type_bands_drop_unrecognized_and_dedupe_globally() {
    let ds = Dataset::new(vec![
        row("a", "Birds", "Behaviour", "Heat"),
        row("b", "Birds", "Genetic", "Heat"),
        row("c", "Fish", "Demographic", "Heat"),
        row("d", "Fish", "Behaviour", "Heat"),
        row("a", "Fish", "Demographic", "Cold"),
        row("e", "Fish", "Physiological", "Cold"),
    ]);
    let bands = ds.type_bands();
    assert_eq!(bands.len(), 2);
    assert_eq!(bands[0].study_type, "Heat");
    assert_eq!(bands[0].len(), 3);
    assert_eq!(bands[0].by_mechanism[0].0, Mechanism::Behaviour);
    let behaviour: Vec<_> = bands[0].by_mechanism[0]
        .1
        .iter()
        .map(|i| i.binomial.as_str())
        .collect();
    assert_eq!(behaviour, ["a", "d"]);
    assert_eq!(bands[1].study_type, "Cold");
    assert_eq!(bands[1].len(), 1);
}
