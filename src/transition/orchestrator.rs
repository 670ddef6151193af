use crate::{
    animation::{ease::Ease, tween::Tween},
    foundation::{
        core::{Millis, Rect, VizId},
        error::MorphError,
    },
    scene::{scene::ShapeId, svg::ProxyMark},
    transition::{
        context::TransitionContext,
        session::{
            Completion, Proxy, Session, SessionId, TransitionReport, TransitionRequest,
        },
    },
};

/// What the orchestrator needs from the page hosting the two visualizations.
pub trait TransitionHost {
    /// Bounding box of a visualization's container in viewport coordinates.
    fn container_box(&self, viz: VizId) -> Option<Rect>;

    /// Returns `false` when the handle is unknown.
    fn set_element_visible(&mut self, viz: VizId, handle: ShapeId, visible: bool) -> bool;

    /// Fades the section holding `viz` to `opacity` over `duration`, beginning at `start`.
    fn fade_container(&mut self, viz: VizId, opacity: f64, start: Millis, duration: Millis);
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TransitionSettings {
    pub proxy_duration: Millis,
    /// Session deadline as a multiple of `proxy_duration`.
    pub timeout_factor: f64,
    pub ease: Ease,
    pub source_fade_delay: Millis,
    pub source_fade: Millis,
    pub target_fade_delay: Millis,
    pub target_fade: Millis,
}

impl Default for TransitionSettings {
    fn default() -> Self {
        Self {
            proxy_duration: Millis(1000),
            timeout_factor: 1.5,
            ease: Ease::InOutCubic,
            source_fade_delay: Millis(200),
            source_fade: Millis(800),
            target_fade_delay: Millis(800),
            target_fade: Millis(800),
        }
    }
}

impl TransitionSettings {
    pub fn timeout(&self) -> Millis {
        self.proxy_duration.scaled(self.timeout_factor)
    }
}

/// Why a start request was refused. The orchestrator state is unchanged in every case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransitionRejected {
    #[error("transition {0} is already running")]
    Busy(SessionId),
    #[error("visualization '{0}' is not rendered")]
    MissingVisualization(VizId),
    #[error("visualization '{0}' has not finished populating its registry")]
    NotReady(VizId),
}

impl From<TransitionRejected> for MorphError {
    fn from(e: TransitionRejected) -> Self {
        MorphError::transition(e.to_string())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionStarted {
    pub session: SessionId,
    pub proxies: usize,
    /// When the caller must call [`TransitionOrchestrator::expire`].
    pub deadline: Millis,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionState {
    Idle,
    Running(SessionId),
}

pub type CompletionCallback = Box<dyn FnOnce(&TransitionReport)>;

/// Idle/Running state machine owning at most one [`Session`].
pub struct TransitionOrchestrator {
    settings: TransitionSettings,
    active: Option<Session>,
    on_complete: Option<CompletionCallback>,
    next_id: u64,
}

impl std::fmt::Debug for TransitionOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionOrchestrator")
            .field("settings", &self.settings)
            .field("active", &self.active)
            .field("has_callback", &self.on_complete.is_some())
            .finish()
    }
}

impl TransitionOrchestrator {
    pub fn new(settings: TransitionSettings) -> Self {
        Self {
            settings,
            active: None,
            on_complete: None,
            next_id: 1,
        }
    }

    pub fn settings(&self) -> &TransitionSettings {
        &self.settings
    }

    pub fn state(&self) -> TransitionState {
        match &self.active {
            Some(s) => TransitionState::Running(s.id),
            None => TransitionState::Idle,
        }
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn session(&self) -> Option<&Session> {
        self.active.as_ref()
    }

    /// Proxies currently in the overlay; empty when idle.
    pub fn overlay(&self, now: Millis) -> Vec<ProxyMark> {
        self.active
            .as_ref()
            .map(|s| s.overlay(now))
            .unwrap_or_default()
    }

    /// Starts a session and arranges for `on_complete` to run exactly once when it ends.
    ///
    /// On rejection the callback is dropped without being invoked.
    pub fn start_with(
        &mut self,
        request: TransitionRequest,
        context: &TransitionContext,
        host: &mut dyn TransitionHost,
        now: Millis,
        on_complete: impl FnOnce(&TransitionReport) + 'static,
    ) -> Result<TransitionStarted, TransitionRejected> {
        let started = self.start(request, context, host, now)?;
        self.on_complete = Some(Box::new(on_complete));
        Ok(started)
    }

    #[tracing::instrument(skip(self, context, host), fields(direction = %request.direction))]
    pub fn start(
        &mut self,
        request: TransitionRequest,
        context: &TransitionContext,
        host: &mut dyn TransitionHost,
        now: Millis,
    ) -> Result<TransitionStarted, TransitionRejected> {
        if let Some(active) = &self.active {
            tracing::warn!(session = %active.id, "transition already running; rejecting start");
            return Err(TransitionRejected::Busy(active.id));
        }

        let source = context
            .registry(request.source)
            .ok_or(TransitionRejected::MissingVisualization(request.source))?;
        let target = context
            .registry(request.target)
            .ok_or(TransitionRejected::MissingVisualization(request.target))?;
        for registry in [source, target] {
            if !registry.is_ready() {
                tracing::warn!(viz = %registry.viz(), "registry not ready; rejecting start");
                return Err(TransitionRejected::NotReady(registry.viz()));
            }
        }

        let source_box = host.container_box(request.source);
        let target_box = host.container_box(request.target);
        for (viz, bbox) in [(request.source, source_box), (request.target, target_box)] {
            if bbox.is_none() {
                tracing::warn!(%viz, "container not found; proxies use local positions");
            }
        }

        let reconciler = context.reconciler();
        let s = &self.settings;
        let mut proxies = Vec::new();
        for key in source.intersect_keys(target) {
            let (Some(from), Some(to)) = (source.get(key.as_str()), target.get(key.as_str()))
            else {
                continue;
            };
            let start = reconciler.reconcile(
                from.position,
                source_box,
                request.direction,
                request.source,
            );
            let end =
                reconciler.reconcile(to.position, target_box, request.direction, request.target);

            host.set_element_visible(request.source, from.handle, false);
            host.set_element_visible(request.target, to.handle, false);

            proxies.push(Proxy::new(
                key,
                Tween::new(start, end, now, s.proxy_duration, s.ease),
                Tween::new(from.radius, to.radius, now, s.proxy_duration, s.ease),
                Tween::new(from.color, to.color, now, s.proxy_duration, s.ease),
                from.handle,
                to.handle,
            ));
        }

        // Entities without a counterpart leave and arrive with their sections.
        host.fade_container(
            request.source,
            0.0,
            now.saturating_add(s.source_fade_delay),
            s.source_fade,
        );
        host.fade_container(request.target, 0.0, now, Millis::ZERO);
        host.fade_container(
            request.target,
            1.0,
            now.saturating_add(s.target_fade_delay),
            s.target_fade,
        );

        let id = SessionId(self.next_id);
        self.next_id += 1;
        let deadline = now.saturating_add(s.timeout());
        let count = proxies.len();
        self.active = Some(Session {
            id,
            request,
            proxies,
            started_at: now,
            ends_at: now.saturating_add(s.proxy_duration),
            deadline,
        });
        tracing::info!(
            session = %id,
            source = %request.source,
            target = %request.target,
            proxies = count,
            "transition started"
        );

        Ok(TransitionStarted {
            session: id,
            proxies: count,
            deadline,
        })
    }

    /// Animation-frame step: lands finished proxies and completes the session once every
    /// proxy has landed and the animation duration has elapsed.
    pub fn tick(&mut self, now: Millis, host: &mut dyn TransitionHost) -> Option<TransitionReport> {
        let session = self.active.as_mut()?;
        for proxy in session.proxies.iter_mut().filter(|p| !p.is_landed()) {
            if proxy.position.is_finished(now) {
                host.set_element_visible(session.request.target, proxy.destination, true);
                proxy.land();
            }
        }

        if session.pending() == 0 && now >= session.ends_at {
            return self.complete(Completion::Natural, 0, now);
        }
        None
    }

    /// Timeout step: forces the session to end if `session` is still the active one.
    ///
    /// Stale timeouts for sessions that already completed are ignored.
    pub fn expire(
        &mut self,
        session: SessionId,
        now: Millis,
        host: &mut dyn TransitionHost,
    ) -> Option<TransitionReport> {
        let active = self.active.as_mut().filter(|s| s.id == session)?;
        let mut forced = 0;
        for proxy in active.proxies.iter_mut().filter(|p| !p.is_landed()) {
            host.set_element_visible(active.request.target, proxy.destination, true);
            proxy.land();
            forced += 1;
        }
        tracing::warn!(session = %session, forced, "transition timed out; forcing completion");
        self.complete(Completion::TimedOut, forced, now)
    }

    fn complete(
        &mut self,
        completion: Completion,
        forced: usize,
        now: Millis,
    ) -> Option<TransitionReport> {
        let session = self.active.take()?;
        let report = TransitionReport {
            session: session.id,
            request: session.request,
            completion,
            proxies: session.proxies.len(),
            forced,
            started_at: session.started_at,
            finished_at: now,
        };
        tracing::info!(
            session = %report.session,
            completion = ?report.completion,
            elapsed = %now.since(session.started_at),
            "transition finished"
        );
        if let Some(callback) = self.on_complete.take() {
            callback(&report);
        }
        Some(report)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transition/orchestrator.rs"]
mod tests;
