use std::collections::BTreeMap;

use crate::{
    foundation::core::{Direction, Vec2, VizId},
    geometry::reconcile::{AdjustmentTable, Reconciler},
    identity::registry::EntityRegistry,
};

/// Explicitly constructed state shared by navigation and the transition orchestrator:
/// one registry per rendered visualization plus the position adjustment table.
#[derive(Clone, Debug, Default)]
pub struct TransitionContext {
    registries: BTreeMap<VizId, EntityRegistry>,
    adjustments: AdjustmentTable,
}

impl TransitionContext {
    pub fn new(adjustments: AdjustmentTable) -> Self {
        Self {
            registries: BTreeMap::new(),
            adjustments,
        }
    }

    /// Installs the registry for its visualization, replacing any previous one.
    pub fn insert_registry(&mut self, registry: EntityRegistry) -> Option<EntityRegistry> {
        self.registries.insert(registry.viz(), registry)
    }

    pub fn registry(&self, viz: VizId) -> Option<&EntityRegistry> {
        self.registries.get(&viz)
    }

    pub fn registry_mut(&mut self, viz: VizId) -> Option<&mut EntityRegistry> {
        self.registries.get_mut(&viz)
    }

    /// Both registries exist, resolved readiness and hold at least one entity.
    pub fn is_ready(&self, a: VizId, b: VizId) -> bool {
        [a, b].iter().all(|viz| {
            self.registry(*viz)
                .is_some_and(|r| r.is_ready() && !r.is_empty())
        })
    }

    pub fn adjustments(&self) -> &AdjustmentTable {
        &self.adjustments
    }

    /// Debug tuning hook; takes effect from the next reconciliation.
    pub fn set_adjustment(&mut self, direction: Direction, viz: VizId, offset: Vec2) {
        self.adjustments.set(direction, viz, offset);
    }

    pub fn reconciler(&self) -> Reconciler<'_> {
        Reconciler::new(&self.adjustments)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transition/context.rs"]
mod tests;
