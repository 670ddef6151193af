use super::*;

use crate::{
    data::palette::Mechanism,
    foundation::core::{Color, Point},
    identity::registry::EntityDescriptor,
    scene::scene::ShapeId,
};

fn filled(viz: VizId, ready: bool) -> EntityRegistry {
    let mut r = EntityRegistry::new(viz);
    r.register(
        "Panthera leo",
        EntityDescriptor {
            position: Point::new(1.0, 2.0),
            radius: 10.0,
            color: Color::WHITE,
            mechanism: Mechanism::Behaviour,
            group: "Mammalia".to_string(),
            handle: ShapeId(0),
        },
    );
    if ready {
        r.mark_ready();
    }
    r
}

#[test]
fn readiness_needs_both_sealed_non_empty_registries() {
    let mut ctx = TransitionContext::default();
    assert!(!ctx.is_ready(VizId::Pack, VizId::Grid));

    ctx.insert_registry(filled(VizId::Pack, true));
    assert!(!ctx.is_ready(VizId::Pack, VizId::Grid));

    ctx.insert_registry(filled(VizId::Grid, false));
    assert!(!ctx.is_ready(VizId::Pack, VizId::Grid));

    ctx.registry_mut(VizId::Grid).unwrap().mark_ready();
    assert!(ctx.is_ready(VizId::Pack, VizId::Grid));

    let mut empty = EntityRegistry::new(VizId::Grid);
    empty.mark_ready();
    ctx.insert_registry(empty);
    assert!(!ctx.is_ready(VizId::Pack, VizId::Grid));
}

#[test]
fn adjustments_feed_the_reconciler() {
    let mut ctx = TransitionContext::default();
    ctx.set_adjustment(Direction::Reverse, VizId::Pack, Vec2::new(0.0, 30.0));
    assert_eq!(
        ctx.adjustments().get(Direction::Reverse, VizId::Pack),
        Vec2::new(0.0, 30.0)
    );
    let p = ctx.reconciler().reconcile(
        Point::new(1.0, 1.0),
        Some(crate::foundation::core::Rect::new(10.0, 10.0, 20.0, 20.0)),
        Direction::Reverse,
        VizId::Pack,
    );
    assert_eq!(p, Point::new(11.0, 41.0));
}
