use crate::{
    foundation::core::Direction,
    navigation::input::{InputEvent, Step},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryKind {
    /// Cross-visualization circle morph.
    Morph,
    /// Opacity swap between two pinned sections.
    Crossfade,
}

/// A pair of adjacent sections that is crossed with a transition instead of a scroll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BoundarySpec {
    pub upper: usize,
    pub lower: usize,
    pub kind: BoundaryKind,
}

impl BoundarySpec {
    pub fn connects(&self, a: usize, b: usize) -> bool {
        (a == self.upper && b == self.lower) || (a == self.lower && b == self.upper)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    Transitioning,
    Debouncing,
    SameSection,
    OutOfRange,
    /// No movement implied (edge of the page, short swipe, unmapped key).
    NoStep,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlainScroll {
    pub target: usize,
    /// Settle token; only the latest scroll commits.
    pub generation: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundaryCrossing {
    pub from: usize,
    pub to: usize,
    pub direction: Direction,
    pub kind: BoundaryKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavDecision {
    Ignored(IgnoreReason),
    Scroll(PlainScroll),
    Transition(BoundaryCrossing),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputResponse {
    /// The caller must schedule [`Navigator::release_debounce`].
    pub arm_debounce: bool,
    pub decision: NavDecision,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PendingScroll {
    target: usize,
    generation: u64,
    releases_flags: bool,
}

/// Single source of truth for the active section.
///
/// Never touches the clock: every delayed effect is returned to the caller as a decision,
/// and the caller reports back through `settle`, `transition_finished` and the release calls.
#[derive(Clone, Debug)]
pub struct Navigator {
    len: usize,
    current: usize,
    indicator: usize,
    is_scrolling: bool,
    is_transitioning: bool,
    boundaries: Vec<BoundarySpec>,
    touch_threshold: f64,
    touch_start: f64,
    generation: u64,
    pending: Option<PendingScroll>,
    crossing: Option<BoundaryCrossing>,
}

impl Navigator {
    pub fn new(len: usize, boundaries: Vec<BoundarySpec>, touch_threshold: f64) -> Self {
        Self {
            len,
            current: 0,
            indicator: 0,
            is_scrolling: false,
            is_transitioning: false,
            boundaries,
            touch_threshold,
            touch_start: 0.0,
            generation: 0,
            pending: None,
            crossing: None,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Section highlighted by the indicator dots.
    pub fn indicator(&self) -> usize {
        self.indicator
    }

    pub fn is_scrolling(&self) -> bool {
        self.is_scrolling
    }

    pub fn is_transitioning(&self) -> bool {
        self.is_transitioning
    }

    pub fn pending_target(&self) -> Option<usize> {
        self.pending.map(|p| p.target)
    }

    pub fn crossing(&self) -> Option<BoundaryCrossing> {
        self.crossing
    }

    pub fn boundary_between(&self, a: usize, b: usize) -> Option<&BoundarySpec> {
        self.boundaries.iter().find(|bd| bd.connects(a, b))
    }

    /// Places the page on `index` immediately, dropping any pending scroll.
    pub fn reset_to(&mut self, index: usize) {
        let index = index.min(self.len.saturating_sub(1));
        self.current = index;
        self.indicator = index;
        self.pending = None;
    }

    pub fn handle_input(&mut self, event: InputEvent) -> InputResponse {
        let step = match event {
            InputEvent::IndicatorClick(index) => {
                return InputResponse {
                    arm_debounce: false,
                    decision: self.request_navigate(index),
                };
            }
            InputEvent::TouchStart { y } => {
                self.touch_start = y;
                return ignored(IgnoreReason::NoStep);
            }
            InputEvent::TouchEnd { y } => {
                let diff = self.touch_start - y;
                if diff.abs() < self.touch_threshold {
                    return ignored(IgnoreReason::NoStep);
                }
                if diff > 0.0 { Step::Next } else { Step::Previous }
            }
            other => match other.step() {
                Some(step) => step,
                None => return ignored(IgnoreReason::NoStep),
            },
        };

        if self.is_transitioning {
            return ignored(IgnoreReason::Transitioning);
        }
        if self.is_scrolling {
            return ignored(IgnoreReason::Debouncing);
        }
        self.is_scrolling = true;

        let target = match step {
            Step::Next if self.current + 1 < self.len => self.current + 1,
            Step::Previous if self.current > 0 => self.current - 1,
            _ => {
                return InputResponse {
                    arm_debounce: true,
                    decision: NavDecision::Ignored(IgnoreReason::NoStep),
                };
            }
        };
        InputResponse {
            arm_debounce: true,
            decision: self.request_navigate(target),
        }
    }

    pub fn request_navigate(&mut self, target: usize) -> NavDecision {
        if self.is_transitioning {
            tracing::info!(target, "transition in progress; ignoring navigation");
            return NavDecision::Ignored(IgnoreReason::Transitioning);
        }
        if target >= self.len {
            tracing::debug!(target, len = self.len, "navigation target out of range");
            return NavDecision::Ignored(IgnoreReason::OutOfRange);
        }
        if target == self.current && !self.is_scrolling {
            return NavDecision::Ignored(IgnoreReason::SameSection);
        }

        if let Some(boundary) = self.boundary_between(self.current, target).copied() {
            let crossing = BoundaryCrossing {
                from: self.current,
                to: target,
                direction: Direction::between(self.current, target),
                kind: boundary.kind,
            };
            self.is_transitioning = true;
            self.is_scrolling = true;
            self.pending = None;
            self.crossing = Some(crossing);
            tracing::info!(
                from = crossing.from,
                to = crossing.to,
                direction = %crossing.direction,
                kind = ?crossing.kind,
                "crossing special boundary"
            );
            return NavDecision::Transition(crossing);
        }

        NavDecision::Scroll(self.plain_scroll(target, false))
    }

    /// The crossing could not be animated; degrade to a plain scroll that still releases
    /// both flags when it settles.
    pub fn transition_rejected(&mut self) -> Option<PlainScroll> {
        let crossing = self.crossing.take()?;
        tracing::warn!(
            from = crossing.from,
            to = crossing.to,
            "transition unavailable; falling back to plain scroll"
        );
        Some(self.plain_scroll(crossing.to, true))
    }

    /// Commits the crossing's target. Flags stay held until [`Navigator::release_transition`].
    pub fn transition_finished(&mut self) -> Option<usize> {
        let crossing = self.crossing.take()?;
        self.commit(crossing.to);
        Some(crossing.to)
    }

    pub fn release_transition(&mut self) {
        self.is_scrolling = false;
        self.is_transitioning = false;
        tracing::debug!(current = self.current, "navigation released");
    }

    pub fn release_debounce(&mut self) {
        if !self.is_transitioning {
            self.is_scrolling = false;
        }
    }

    /// Settle timer for a plain scroll; returns the committed section for the latest scroll.
    pub fn settle(&mut self, generation: u64) -> Option<usize> {
        let pending = self.pending.filter(|p| p.generation == generation)?;
        self.pending = None;
        self.commit(pending.target);
        if pending.releases_flags {
            self.is_scrolling = false;
            self.is_transitioning = false;
        }
        Some(pending.target)
    }

    fn plain_scroll(&mut self, target: usize, releases_flags: bool) -> PlainScroll {
        self.generation += 1;
        self.pending = Some(PendingScroll {
            target,
            generation: self.generation,
            releases_flags,
        });
        tracing::debug!(from = self.current, target, "plain scroll");
        PlainScroll {
            target,
            generation: self.generation,
        }
    }

    fn commit(&mut self, index: usize) {
        self.current = index;
        self.indicator = index;
        tracing::info!(section = index, "section active");
    }
}

fn ignored(reason: IgnoreReason) -> InputResponse {
    InputResponse {
        arm_debounce: false,
        decision: NavDecision::Ignored(reason),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/navigation/controller.rs"]
mod tests;
