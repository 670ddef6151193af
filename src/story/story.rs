use std::collections::BTreeMap;

use crate::{
    animation::ease::Ease,
    data::dataset::Dataset,
    foundation::{
        core::{Direction, Millis, Point, Rect, Size, Vec2, VizId},
        error::{MorphError, MorphResult},
    },
    identity::registry::EntityRegistry,
    layout::engine::LayoutEngine,
    navigation::{
        controller::{BoundaryCrossing, BoundaryKind, NavDecision, Navigator, PlainScroll},
        input::InputEvent,
    },
    page::page::Page,
    runtime::timers::TimerQueue,
    scene::{
        scene::{Scene, ShapeId},
        svg::{Frame, FrameLayer, frame_to_svg},
    },
    story::config::StoryConfig,
    transition::{
        context::TransitionContext,
        crossfade,
        orchestrator::{TransitionHost, TransitionOrchestrator, TransitionState},
        session::{TransitionReport, TransitionRequest},
    },
};

/// Page plus the scenes mounted in it; the orchestrator's view of the document.
#[derive(Clone, Debug)]
pub struct Stage {
    page: Page,
    scenes: BTreeMap<VizId, Scene>,
}

impl Stage {
    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn scene(&self, viz: VizId) -> Option<&Scene> {
        self.scenes.get(&viz)
    }

    /// Section activation: makes every element of `viz` visible again.
    fn reveal(&mut self, viz: VizId) {
        if let Some(scene) = self.scenes.get_mut(&viz) {
            scene.reveal_entities();
        }
    }
}

impl TransitionHost for Stage {
    fn container_box(&self, viz: VizId) -> Option<Rect> {
        let size = self.scenes.get(&viz)?.size();
        self.page.container_box(viz, size)
    }

    fn set_element_visible(&mut self, viz: VizId, handle: ShapeId, visible: bool) -> bool {
        self.scenes
            .get_mut(&viz)
            .is_some_and(|scene| scene.set_visible(handle, visible))
    }

    fn fade_container(&mut self, viz: VizId, opacity: f64, start: Millis, duration: Millis) {
        if let Some(index) = self.page.section_hosting(viz) {
            self.page
                .fade_section(index, opacity, start, duration, Ease::Css);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StoryTimer {
    ReleaseDebounce,
    Settle(u64),
    TransitionTimeout(crate::transition::session::SessionId),
    CrossfadeDone,
    ReleaseTransition,
}

/// The whole scroll-driven document: rendered visualizations, navigation and transitions,
/// driven by a virtual clock.
pub struct Story {
    config: StoryConfig,
    stage: Stage,
    context: TransitionContext,
    orchestrator: TransitionOrchestrator,
    navigator: Navigator,
    timers: TimerQueue<StoryTimer>,
    now: Millis,
    last_frame: Millis,
    history: Vec<TransitionReport>,
}

impl Story {
    /// Validates the config and renders every hosted visualization, populating its registry.
    pub fn new(config: StoryConfig, dataset: &Dataset) -> MorphResult<Self> {
        config.validate()?;
        let page = Page::new(config.viewport, config.sections.clone())?;
        let engine = LayoutEngine::new(&config.layout);

        let mut scenes = BTreeMap::new();
        let mut context = TransitionContext::new(config.adjustments);
        for viz in config.sections.iter().filter_map(|s| s.viz) {
            let mut scene = Scene::new(viz, Size::ZERO);
            let mut registry = EntityRegistry::new(viz);
            engine.render(dataset, &mut scene, &mut registry, config.viewport.height)?;
            scenes.insert(viz, scene);
            context.insert_registry(registry);
        }

        let orchestrator = TransitionOrchestrator::new(config.timings.transition_settings());
        let navigator = Navigator::new(
            config.sections.len(),
            config.boundaries.clone(),
            config.timings.touch_threshold,
        );
        tracing::info!(
            sections = config.sections.len(),
            visualizations = scenes.len(),
            "story ready"
        );

        Ok(Self {
            config,
            stage: Stage { page, scenes },
            context,
            orchestrator,
            navigator,
            timers: TimerQueue::new(),
            now: Millis::ZERO,
            last_frame: Millis::ZERO,
            history: Vec::new(),
        })
    }

    pub fn config(&self) -> &StoryConfig {
        &self.config
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn current_section(&self) -> usize {
        self.navigator.current()
    }

    pub fn indicator(&self) -> usize {
        self.navigator.indicator()
    }

    pub fn is_scrolling(&self) -> bool {
        self.navigator.is_scrolling()
    }

    pub fn is_transitioning(&self) -> bool {
        self.navigator.is_transitioning()
    }

    pub fn transition_state(&self) -> TransitionState {
        self.orchestrator.state()
    }

    /// Both visualizations have populated, non-empty registries.
    pub fn is_ready(&self) -> bool {
        self.context.is_ready(VizId::Pack, VizId::Grid)
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn page(&self) -> &Page {
        &self.stage.page
    }

    pub fn scene(&self, viz: VizId) -> Option<&Scene> {
        self.stage.scene(viz)
    }

    pub fn context(&self) -> &TransitionContext {
        &self.context
    }

    pub fn registry(&self, viz: VizId) -> Option<&EntityRegistry> {
        self.context.registry(viz)
    }

    pub fn orchestrator(&self) -> &TransitionOrchestrator {
        &self.orchestrator
    }

    /// Completed transitions, oldest first.
    pub fn history(&self) -> &[TransitionReport] {
        &self.history
    }

    pub fn set_adjustment(&mut self, direction: Direction, viz: VizId, offset: Vec2) {
        self.context.set_adjustment(direction, viz, offset);
    }

    /// Puts the page on `index` without any animation.
    pub fn jump_to(&mut self, index: usize) -> MorphResult<()> {
        if index >= self.stage.page.len() {
            return Err(MorphError::validation(format!(
                "section index {index} out of range"
            )));
        }
        if self.navigator.is_transitioning() {
            return Err(MorphError::transition(
                "cannot jump while a transition is running",
            ));
        }
        self.navigator.reset_to(index);
        self.stage.page.reset_visibility();
        self.stage.page.jump_to(index);
        self.activate(index);
        Ok(())
    }

    pub fn handle_input(&mut self, event: InputEvent) -> NavDecision {
        let response = self.navigator.handle_input(event);
        if response.arm_debounce {
            let due = self.now.saturating_add(self.config.timings.debounce);
            self.timers.schedule(due, StoryTimer::ReleaseDebounce);
        }
        self.apply(response.decision);
        response.decision
    }

    pub fn request_navigate(&mut self, index: usize) -> NavDecision {
        let decision = self.navigator.request_navigate(index);
        self.apply(decision);
        decision
    }

    /// Fires every timer due at or before `now`, in order, then moves the clock to `now`.
    pub fn run_timers_until(&mut self, now: Millis) {
        while let Some((due, timer)) = self.timers.pop_due(now) {
            self.set_time(due);
            self.fire(timer);
        }
        self.set_time(now);
    }

    /// One animation frame at `now`; timers are not run.
    pub fn animation_frame(&mut self, now: Millis) {
        self.set_time(now);
        self.last_frame = self.now;
        if let Some(report) = self.orchestrator.tick(self.now, &mut self.stage) {
            self.finish_crossing(Some(report));
        }
    }

    /// Advances the clock to `now`, interleaving timers with regularly spaced animation frames.
    pub fn advance_to(&mut self, now: Millis) {
        let interval = self.config.timings.frame_interval;
        loop {
            let next_frame = self.last_frame.max(self.now).saturating_add(interval);
            let mut step = now.min(next_frame);
            if let Some(due) = self.timers.next_due() {
                step = step.min(due.max(self.now));
            }
            self.run_timers_until(step);
            if step >= next_frame {
                self.animation_frame(step);
            }
            if step >= now {
                break;
            }
        }
    }

    /// Viewport contents at the current time: visible sections, then the overlay.
    pub fn frame(&self) -> Frame<'_> {
        let page = &self.stage.page;
        let layers = page
            .visible_sections()
            .into_iter()
            .filter_map(|index| {
                let spec = page.section(index)?;
                let origin = page.section_origin(index)?;
                Some(FrameLayer {
                    section: spec.id.clone(),
                    origin: origin + spec.container_offset,
                    size: page.viewport(),
                    opacity: page.opacity(index),
                    scene: spec.viz.and_then(|viz| self.stage.scene(viz)),
                })
            })
            .collect();
        Frame {
            size: page.viewport(),
            background: self.config.background,
            layers,
            proxies: self.orchestrator.overlay(self.now),
        }
    }

    pub fn render_svg(&self) -> String {
        frame_to_svg(&self.frame())
    }

    /// Reconciled viewport position of an entity as currently laid out.
    pub fn entity_position(&self, viz: VizId, key: &str, direction: Direction) -> Option<Point> {
        let descriptor = self.context.registry(viz)?.get(key)?;
        Some(self.context.reconciler().reconcile(
            descriptor.position,
            self.stage.container_box(viz),
            direction,
            viz,
        ))
    }

    fn set_time(&mut self, now: Millis) {
        self.now = self.now.max(now);
        self.stage.page.set_time(self.now);
    }

    fn apply(&mut self, decision: NavDecision) {
        match decision {
            NavDecision::Ignored(_) => {}
            NavDecision::Scroll(scroll) => self.begin_plain_scroll(scroll),
            NavDecision::Transition(crossing) => self.begin_crossing(crossing),
        }
    }

    fn begin_plain_scroll(&mut self, scroll: PlainScroll) {
        let settle = self.config.timings.settle_delay;
        self.stage.page.reset_visibility();
        self.activate(scroll.target);
        self.stage.page.scroll_to(scroll.target, settle, Ease::Css);
        self.timers.schedule(
            self.now.saturating_add(settle),
            StoryTimer::Settle(scroll.generation),
        );
    }

    fn begin_crossing(&mut self, crossing: BoundaryCrossing) {
        match crossing.kind {
            BoundaryKind::Crossfade => {
                let settings = self.config.timings.crossfade_settings();
                let done = crossfade::begin(
                    &mut self.stage.page,
                    crossing.from,
                    crossing.to,
                    self.now,
                    &settings,
                );
                self.timers.schedule(done, StoryTimer::CrossfadeDone);
            }
            BoundaryKind::Morph => {
                let page = &self.stage.page;
                let source = page.section(crossing.from).and_then(|s| s.viz);
                let target = page.section(crossing.to).and_then(|s| s.viz);
                let (Some(source), Some(target)) = (source, target) else {
                    tracing::warn!(
                        from = crossing.from,
                        to = crossing.to,
                        "morph boundary without two visualizations"
                    );
                    self.fall_back();
                    return;
                };

                self.stage.page.pin(crossing.from);
                self.stage.page.pin(crossing.to);
                let request = TransitionRequest::new(crossing.direction, source, target);
                match self
                    .orchestrator
                    .start(request, &self.context, &mut self.stage, self.now)
                {
                    Ok(started) => {
                        self.timers.schedule(
                            started.deadline,
                            StoryTimer::TransitionTimeout(started.session),
                        );
                    }
                    Err(rejected) => {
                        tracing::warn!(%rejected, "transition rejected");
                        self.fall_back();
                    }
                }
            }
        }
    }

    /// Degrades a crossing the orchestrator refused into a plain scroll that releases both
    /// navigation flags when it settles. A validated story always has both registries ready,
    /// so this only runs when the context lacks a rendered visualization.
    fn fall_back(&mut self) {
        if let Some(scroll) = self.navigator.transition_rejected() {
            self.begin_plain_scroll(scroll);
        }
    }

    fn finish_crossing(&mut self, report: Option<TransitionReport>) {
        self.timers
            .cancel_where(|t| matches!(t, StoryTimer::TransitionTimeout(_)));
        self.stage.page.unpin_all();
        if let Some(target) = self.navigator.transition_finished() {
            self.stage.page.jump_to(target);
        }
        self.timers.schedule(
            self.now.saturating_add(self.config.timings.release_tail),
            StoryTimer::ReleaseTransition,
        );
        if let Some(report) = report {
            self.history.push(report);
        }
    }

    fn fire(&mut self, timer: StoryTimer) {
        match timer {
            StoryTimer::ReleaseDebounce => self.navigator.release_debounce(),
            StoryTimer::Settle(generation) => {
                self.navigator.settle(generation);
            }
            StoryTimer::TransitionTimeout(session) => {
                if let Some(report) = self.orchestrator.expire(session, self.now, &mut self.stage)
                {
                    self.finish_crossing(Some(report));
                }
            }
            StoryTimer::CrossfadeDone => self.finish_crossing(None),
            StoryTimer::ReleaseTransition => self.navigator.release_transition(),
        }
    }

    fn activate(&mut self, index: usize) {
        if let Some(viz) = self.stage.page.section(index).and_then(|s| s.viz) {
            self.stage.reveal(viz);
        }
    }
}

impl std::fmt::Debug for Story {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Story")
            .field("now", &self.now)
            .field("current", &self.navigator.current())
            .field("state", &self.orchestrator.state())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/story/story.rs"]
mod tests;
