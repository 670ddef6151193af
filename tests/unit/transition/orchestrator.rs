use super::*;

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::{
    data::palette::Mechanism,
    foundation::core::{Color, Direction, Point},
    identity::registry::{EntityDescriptor, EntityRegistry},
};

#[derive(Default)]
struct FakeHost {
    boxes: HashMap<VizId, Rect>,
    visible: HashMap<(VizId, ShapeId), bool>,
    fades: Vec<(VizId, f64, Millis, Millis)>,
}

impl TransitionHost for FakeHost {
    fn container_box(&self, viz: VizId) -> Option<Rect> {
        self.boxes.get(&viz).copied()
    }

    fn set_element_visible(&mut self, viz: VizId, handle: ShapeId, visible: bool) -> bool {
        self.visible.insert((viz, handle), visible);
        true
    }

    fn fade_container(&mut self, viz: VizId, opacity: f64, start: Millis, duration: Millis) {
        self.fades.push((viz, opacity, start, duration));
    }
}

fn registry(viz: VizId, entries: &[(&str, f64, f64, u32)]) -> EntityRegistry {
    let mut r = EntityRegistry::new(viz);
    for &(key, x, y, handle) in entries {
        r.register(
            key,
            EntityDescriptor {
                position: Point::new(x, y),
                radius: 10.0,
                color: Color::rgb(0, 0, handle as u8),
                mechanism: Mechanism::Behaviour,
                group: "g".to_string(),
                handle: ShapeId(handle),
            },
        );
    }
    r.mark_ready();
    r
}

fn context() -> TransitionContext {
    let mut ctx = TransitionContext::default();
    ctx.insert_registry(registry(VizId::Pack, &[("a", 1.0, 1.0, 0), ("b", 2.0, 2.0, 1)]));
    ctx.insert_registry(registry(VizId::Grid, &[("b", 50.0, 60.0, 7), ("c", 0.0, 0.0, 8)]));
    ctx
}

fn forward() -> TransitionRequest {
    TransitionRequest::new(Direction::Forward, VizId::Pack, VizId::Grid)
}

#[test]
fn start_hides_matched_elements_and_schedules_fades() {
    let ctx = context();
    let mut host = FakeHost::default();
    let mut orch = TransitionOrchestrator::new(TransitionSettings::default());

    let started = orch.start(forward(), &ctx, &mut host, Millis(100)).unwrap();
    assert_eq!(started.proxies, 1);
    assert_eq!(started.deadline, Millis(1600));
    assert_eq!(orch.state(), TransitionState::Running(started.session));

    assert_eq!(host.visible.get(&(VizId::Pack, ShapeId(1))), Some(&false));
    assert_eq!(host.visible.get(&(VizId::Grid, ShapeId(7))), Some(&false));
    assert!(!host.visible.contains_key(&(VizId::Pack, ShapeId(0))));
    assert_eq!(
        host.fades,
        vec![
            (VizId::Pack, 0.0, Millis(300), Millis(800)),
            (VizId::Grid, 0.0, Millis(100), Millis(0)),
            (VizId::Grid, 1.0, Millis(900), Millis(800)),
        ]
    );
}

#[test]
fn proxies_land_then_session_completes() {
    let ctx = context();
    let mut host = FakeHost::default();
    let mut orch = TransitionOrchestrator::new(TransitionSettings::default());
    orch.start(forward(), &ctx, &mut host, Millis(0)).unwrap();

    let mid = orch.overlay(Millis(500));
    assert_eq!(mid.len(), 1);
    assert_eq!(mid[0].center, Point::new(26.0, 31.0));

    assert!(orch.tick(Millis(999), &mut host).is_none());
    let report = orch.tick(Millis(1000), &mut host).unwrap();
    assert_eq!(report.completion, Completion::Natural);
    assert_eq!(report.proxies, 1);
    assert_eq!(report.forced, 0);
    assert_eq!(host.visible.get(&(VizId::Grid, ShapeId(7))), Some(&true));
    assert_eq!(host.visible.get(&(VizId::Pack, ShapeId(1))), Some(&false));
    assert!(!orch.is_running());
    assert!(orch.overlay(Millis(1000)).is_empty());
}

#[test]
fn busy_start_is_rejected_without_side_effects() {
    let ctx = context();
    let mut host = FakeHost::default();
    let mut orch = TransitionOrchestrator::new(TransitionSettings::default());
    let first = orch.start(forward(), &ctx, &mut host, Millis(0)).unwrap();
    let fades = host.fades.len();

    let called = Rc::new(Cell::new(false));
    let flag = called.clone();
    let err = orch
        .start_with(forward(), &ctx, &mut host, Millis(10), move |_| flag.set(true))
        .unwrap_err();
    assert_eq!(err, TransitionRejected::Busy(first.session));
    assert_eq!(host.fades.len(), fades);
    assert_eq!(orch.session().map(|s| s.proxies.len()), Some(1));

    orch.tick(Millis(1000), &mut host).unwrap();
    assert!(!called.get());
}

#[test]
fn missing_or_unready_registries_are_rejected() {
    let mut host = FakeHost::default();
    let mut orch = TransitionOrchestrator::new(TransitionSettings::default());

    let mut ctx = TransitionContext::default();
    ctx.insert_registry(registry(VizId::Pack, &[("a", 0.0, 0.0, 0)]));
    assert_eq!(
        orch.start(forward(), &ctx, &mut host, Millis(0)).unwrap_err(),
        TransitionRejected::MissingVisualization(VizId::Grid)
    );

    ctx.insert_registry(EntityRegistry::new(VizId::Grid));
    assert_eq!(
        orch.start(forward(), &ctx, &mut host, Millis(0)).unwrap_err(),
        TransitionRejected::NotReady(VizId::Grid)
    );
    assert!(!orch.is_running());

    let err: MorphError = TransitionRejected::NotReady(VizId::Grid).into();
    assert!(err.to_string().starts_with("transition error:"));
}

#[test]
fn stale_timeout_is_ignored() {
    let ctx = context();
    let mut host = FakeHost::default();
    let mut orch = TransitionOrchestrator::new(TransitionSettings::default());
    let started = orch.start(forward(), &ctx, &mut host, Millis(0)).unwrap();
    orch.tick(Millis(1000), &mut host).unwrap();
    assert!(orch.expire(started.session, Millis(1500), &mut host).is_none());
}

#[test]
fn timeout_reveals_remaining_destinations_and_calls_back_once() {
    let ctx = context();
    let mut host = FakeHost::default();
    let mut orch = TransitionOrchestrator::new(TransitionSettings::default());
    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();
    let started = orch
        .start_with(forward(), &ctx, &mut host, Millis(0), move |r| {
            assert_eq!(r.completion, Completion::TimedOut);
            counter.set(counter.get() + 1);
        })
        .unwrap();

    let report = orch.expire(started.session, started.deadline, &mut host).unwrap();
    assert_eq!(report.forced, 1);
    assert_eq!(report.finished_at, Millis(1500));
    assert_eq!(host.visible.get(&(VizId::Grid, ShapeId(7))), Some(&true));
    assert!(orch.tick(Millis(2000), &mut host).is_none());
    assert!(orch.expire(started.session, Millis(2000), &mut host).is_none());
    assert_eq!(calls.get(), 1);
}

#[test]
fn timeout_is_a_multiple_of_proxy_duration() {
    let settings = TransitionSettings {
        proxy_duration: Millis(400),
        timeout_factor: 2.0,
        ..TransitionSettings::default()
    };
    assert_eq!(settings.timeout(), Millis(800));
}
