use super::*;

fn dataset() -> Dataset {
    Dataset::from_json_str(
        r#"[
            {"SpeciesBinomial": "Panthera leo", "SpeciesGrouped": "Mammalia", "CompMech": "Behaviour", "Type": "Observational"},
            {"SpeciesBinomial": "Parus major", "SpeciesGrouped": "Birds", "CompMech": "Physiological", "Type": "Experimental"},
            {"SpeciesBinomial": "Quercus robur", "SpeciesGrouped": "Angiospermae", "CompMech": "Genetic", "Type": "Observational"}
        ]"#,
    )
    .unwrap()
}

#[test]
fn new_story_renders_hosted_visualizations() {
    let story = Story::new(StoryConfig::default(), &dataset()).unwrap();
    assert!(story.is_ready());
    assert_eq!(story.registry(VizId::Pack).unwrap().len(), 3);
    assert_eq!(story.registry(VizId::Grid).unwrap().len(), 2);
    assert_eq!(story.current_section(), 0);
    assert_eq!(story.transition_state(), TransitionState::Idle);
}

#[test]
fn stage_container_box_uses_scene_size() {
    let mut story = Story::new(StoryConfig::default(), &dataset()).unwrap();
    story.jump_to(7).unwrap();
    let pack = story.stage().container_box(VizId::Pack).unwrap();
    assert_eq!(pack, Rect::new(0.0, 0.0, 1200.0, 900.0));
    let grid = story.stage().container_box(VizId::Grid).unwrap();
    assert_eq!(grid.origin(), Point::new(0.0, 900.0));
    assert_eq!(grid.height(), story.scene(VizId::Grid).unwrap().size().height);
}

#[test]
fn jump_rejects_out_of_range_sections() {
    let mut story = Story::new(StoryConfig::default(), &dataset()).unwrap();
    assert!(story.jump_to(10).is_err());
}

#[test]
fn stage_visibility_targets_the_right_scene() {
    let mut story = Story::new(StoryConfig::default(), &dataset()).unwrap();
    let handle = story.registry(VizId::Grid).unwrap().get("Parus major").unwrap().handle;
    assert!(story.stage.set_element_visible(VizId::Grid, handle, false));
    assert!(!story.scene(VizId::Grid).unwrap().is_visible(handle));
    assert!(!story.stage.set_element_visible(VizId::Grid, ShapeId(9999), false));
}

#[test]
fn entity_position_is_reconciled() {
    let mut story = Story::new(StoryConfig::default(), &dataset()).unwrap();
    story.jump_to(8).unwrap();
    story.set_adjustment(Direction::Forward, VizId::Grid, Vec2::new(5.0, 5.0));
    let local = story.registry(VizId::Grid).unwrap().get("Panthera leo").unwrap().position;
    let abs = story
        .entity_position(VizId::Grid, "Panthera leo", Direction::Forward)
        .unwrap();
    assert_eq!(abs, local + Vec2::new(5.0, 5.0));
}

#[test]
fn refused_morph_degrades_to_plain_scroll() {
    let mut story = Story::new(StoryConfig::default(), &dataset()).unwrap();
    story.jump_to(7).unwrap();
    story.context = TransitionContext::default();

    let decision = story.request_navigate(8);
    assert!(matches!(decision, NavDecision::Transition(_)));
    assert_eq!(story.transition_state(), TransitionState::Idle);
    assert!(!story.page().is_pinned(7) && !story.page().is_pinned(8));
    assert!(story.is_transitioning());

    story.run_timers_until(Millis(799));
    assert_eq!(story.current_section(), 7);
    story.run_timers_until(Millis(800));
    assert_eq!(story.current_section(), 8);
    assert!(!story.is_transitioning());
    assert!(!story.is_scrolling());
    assert!(story.history().is_empty());
}
