use super::*;

fn page() -> Page {
    let sections = (1..=4)
        .map(|i| {
            let s = SectionSpec::new(format!("section{i}"));
            match i {
                2 => s.hosting(VizId::Pack),
                3 => SectionSpec {
                    container_offset: Vec2::new(120.0, 40.0),
                    ..s.hosting(VizId::Grid)
                },
                _ => s,
            }
        })
        .collect();
    Page::new(Size::new(1440.0, 900.0), sections).unwrap()
}

#[test]
fn rejects_empty_pages() {
    assert!(Page::new(Size::new(10.0, 10.0), Vec::new()).is_err());
}

#[test]
fn smooth_scroll_moves_between_section_tops() {
    let mut p = page();
    p.scroll_to(2, Millis(800), Ease::Linear);
    assert_eq!(p.scroll_y(), 0.0);
    p.set_time(Millis(400));
    assert_eq!(p.scroll_y(), 900.0);
    assert!(!p.is_scroll_settled());
    p.set_time(Millis(800));
    assert_eq!(p.scroll_y(), 1800.0);
    assert!(p.is_scroll_settled());
    assert_eq!(p.section_origin(2), Some(Point::new(0.0, 0.0)));
    assert_eq!(p.section_origin(3), Some(Point::new(0.0, 900.0)));
}

#[test]
fn container_box_tracks_scroll_and_offset() {
    let mut p = page();
    p.jump_to(1);
    let content = Size::new(1200.0, 224.0);
    assert_eq!(
        p.container_box(VizId::Pack, content),
        Some(Rect::new(0.0, 0.0, 1200.0, 224.0))
    );
    assert_eq!(
        p.container_box(VizId::Grid, content),
        Some(Rect::new(120.0, 940.0, 1320.0, 1164.0))
    );
}

#[test]
fn pinned_sections_overlap_at_viewport_top() {
    let mut p = page();
    p.jump_to(1);
    p.pin(1);
    p.pin(2);
    assert_eq!(p.container_origin(VizId::Pack), Some(Point::ZERO));
    assert_eq!(p.container_origin(VizId::Grid), Some(Point::new(120.0, 40.0)));
    p.reset_visibility();
    assert!(!p.is_pinned(1));
    assert_eq!(p.container_origin(VizId::Grid), Some(Point::new(120.0, 940.0)));
}

#[test]
fn missing_visualization_has_no_container() {
    let sections = vec![SectionSpec::new("only")];
    let p = Page::new(Size::new(100.0, 100.0), sections).unwrap();
    assert_eq!(p.container_box(VizId::Pack, Size::new(1.0, 1.0)), None);
}

#[test]
fn delayed_fade_holds_until_start() {
    let mut p = page();
    p.set_opacity(2, 0.0);
    p.fade_section(2, 1.0, Millis(800), Millis(800), Ease::Linear);
    p.set_time(Millis(500));
    assert_eq!(p.opacity(2), 0.0);
    p.set_time(Millis(1200));
    assert!((p.opacity(2) - 0.5).abs() < 1e-9);
    p.set_time(Millis(1600));
    assert_eq!(p.opacity(2), 1.0);
}

#[test]
fn visible_sections_respect_viewport_and_opacity() {
    let mut p = page();
    p.jump_to(1);
    assert_eq!(p.visible_sections(), vec![1]);
    p.pin(2);
    assert_eq!(p.visible_sections(), vec![1, 2]);
    p.set_opacity(1, 0.0);
    assert_eq!(p.visible_sections(), vec![2]);
}
