use std::fmt;

use crate::{
    animation::tween::Tween,
    foundation::core::{Color, Direction, Millis, Point, VizId},
    identity::registry::EntityKey,
    scene::{scene::ShapeId, svg::ProxyMark},
};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which visualization a transition leaves and which one it lands in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TransitionRequest {
    pub direction: Direction,
    pub source: VizId,
    pub target: VizId,
}

impl TransitionRequest {
    pub fn new(direction: Direction, source: VizId, target: VizId) -> Self {
        Self {
            direction,
            source,
            target,
        }
    }
}

/// Transient circle travelling from an entity's source element to its destination element.
#[derive(Clone, Debug)]
pub struct Proxy {
    pub key: EntityKey,
    pub position: Tween<Point>,
    pub radius: Tween<f64>,
    pub color: Tween<Color>,
    pub source: ShapeId,
    pub destination: ShapeId,
    landed: bool,
}

impl Proxy {
    pub fn new(
        key: EntityKey,
        position: Tween<Point>,
        radius: Tween<f64>,
        color: Tween<Color>,
        source: ShapeId,
        destination: ShapeId,
    ) -> Self {
        Self {
            key,
            position,
            radius,
            color,
            source,
            destination,
            landed: false,
        }
    }

    pub fn is_landed(&self) -> bool {
        self.landed
    }

    pub(crate) fn land(&mut self) {
        self.landed = true;
    }

    pub fn mark(&self, now: Millis) -> ProxyMark {
        ProxyMark {
            center: self.position.sample(now),
            radius: self.radius.sample(now),
            color: self.color.sample(now),
        }
    }
}

/// The single in-flight transition. Dropping it removes the overlay.
#[derive(Clone, Debug)]
pub struct Session {
    pub id: SessionId,
    pub request: TransitionRequest,
    pub proxies: Vec<Proxy>,
    pub started_at: Millis,
    /// Earliest natural completion time.
    pub ends_at: Millis,
    /// Forced completion time.
    pub deadline: Millis,
}

impl Session {
    pub fn pending(&self) -> usize {
        self.proxies.iter().filter(|p| !p.is_landed()).count()
    }

    /// Marks of proxies still in the overlay.
    pub fn overlay(&self, now: Millis) -> Vec<ProxyMark> {
        self.proxies
            .iter()
            .filter(|p| !p.is_landed())
            .map(|p| p.mark(now))
            .collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Completion {
    /// Every proxy landed within the animation duration.
    Natural,
    /// The session deadline passed first; remaining destinations were revealed by force.
    TimedOut,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TransitionReport {
    pub session: SessionId,
    pub request: TransitionRequest,
    pub completion: Completion,
    pub proxies: usize,
    /// Destinations revealed by the timeout path rather than by a landed proxy.
    pub forced: usize,
    pub started_at: Millis,
    pub finished_at: Millis,
}
