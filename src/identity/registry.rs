use std::borrow::Borrow;
use std::collections::{BTreeSet, HashMap};
use std::fmt;

use crate::{
    data::palette::Mechanism,
    foundation::core::{Color, Point, VizId},
    scene::scene::ShapeId,
};

/// Stable identity of a species across visualizations (its binomial name).
#[derive(
    Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct EntityKey(String);

impl EntityKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for EntityKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for EntityKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rendered state of one entity inside one visualization.
///
/// `position` is in the visualization's container coordinates, after every group-level
/// translation has been applied. `handle` is a non-owning lookup into the visualization's scene.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct EntityDescriptor {
    pub position: Point,
    pub radius: f64,
    pub color: Color,
    pub mechanism: Mechanism,
    pub group: String,
    pub handle: ShapeId,
}

/// Per-visualization map from entity key to its rendered descriptor.
#[derive(Clone, Debug)]
pub struct EntityRegistry {
    viz: VizId,
    entries: HashMap<EntityKey, EntityDescriptor>,
    ready: bool,
}

impl EntityRegistry {
    pub fn new(viz: VizId) -> Self {
        Self {
            viz,
            entries: HashMap::new(),
            ready: false,
        }
    }

    pub fn viz(&self) -> VizId {
        self.viz
    }

    /// Inserts or overwrites the descriptor for `key`; the last write wins.
    pub fn register(
        &mut self,
        key: impl Into<EntityKey>,
        descriptor: EntityDescriptor,
    ) -> Option<EntityDescriptor> {
        let key = key.into();
        let previous = self.entries.insert(key.clone(), descriptor);
        if previous.is_some() {
            tracing::debug!(viz = %self.viz, key = %key, "entity registered twice; keeping the latest descriptor");
        }
        previous
    }

    pub fn get(&self, key: &str) -> Option<&EntityDescriptor> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Read-only snapshot of every entry, ordered by key.
    pub fn all_entries(&self) -> Vec<(EntityKey, EntityDescriptor)> {
        let mut out: Vec<_> = self
            .entries
            .iter()
            .map(|(k, d)| (k.clone(), d.clone()))
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }

    pub fn keys(&self) -> impl Iterator<Item = &EntityKey> {
        self.entries.keys()
    }

    /// Keys present in both registries.
    pub fn intersect_keys(&self, other: &EntityRegistry) -> BTreeSet<EntityKey> {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small
            .entries
            .keys()
            .filter(|k| large.entries.contains_key(k.as_str()))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolves the readiness signal; returns `false` if it was already resolved.
    pub fn mark_ready(&mut self) -> bool {
        if self.ready {
            tracing::warn!(viz = %self.viz, "registry readiness already resolved");
            return false;
        }
        self.ready = true;
        tracing::info!(viz = %self.viz, entities = self.entries.len(), "registry ready");
        true
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }
}

#[cfg(test)]
#[path = "../../tests/unit/identity/registry.rs"]
mod tests;
