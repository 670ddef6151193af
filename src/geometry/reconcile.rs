use crate::foundation::core::{Direction, Point, Rect, Vec2, VizId};

/// Correction offsets for each visualization side of one direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SideOffsets {
    pub pack: Vec2,
    pub grid: Vec2,
}

impl SideOffsets {
    pub fn get(&self, viz: VizId) -> Vec2 {
        match viz {
            VizId::Pack => self.pack,
            VizId::Grid => self.grid,
        }
    }

    pub fn set(&mut self, viz: VizId, offset: Vec2) {
        match viz {
            VizId::Pack => self.pack = offset,
            VizId::Grid => self.grid = offset,
        }
    }
}

/// Empirically tuned per-direction, per-visualization offsets applied on reconciliation.
///
/// Read on every reconciliation; changes made while a transition runs apply from the next one.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AdjustmentTable {
    pub forward: SideOffsets,
    pub reverse: SideOffsets,
}

impl AdjustmentTable {
    pub fn get(&self, direction: Direction, viz: VizId) -> Vec2 {
        self.side(direction).get(viz)
    }

    pub fn set(&mut self, direction: Direction, viz: VizId, offset: Vec2) {
        let side = match direction {
            Direction::Forward => &mut self.forward,
            Direction::Reverse => &mut self.reverse,
        };
        side.set(viz, offset);
        tracing::debug!(%direction, %viz, x = offset.x, y = offset.y, "adjustment offset updated");
    }

    pub fn side(&self, direction: Direction) -> &SideOffsets {
        match direction {
            Direction::Forward => &self.forward,
            Direction::Reverse => &self.reverse,
        }
    }

    pub fn is_finite(&self) -> bool {
        [self.forward, self.reverse]
            .iter()
            .flat_map(|s| [s.pack, s.grid])
            .all(|v| v.x.is_finite() && v.y.is_finite())
    }
}

/// Maps container-local positions into shared viewport coordinates.
#[derive(Clone, Copy, Debug)]
pub struct Reconciler<'a> {
    table: &'a AdjustmentTable,
}

impl<'a> Reconciler<'a> {
    pub fn new(table: &'a AdjustmentTable) -> Self {
        Self { table }
    }

    /// `local + container.origin + adjustment(direction, viz)`.
    ///
    /// Without a container box the local position is returned unchanged; the caller proceeds
    /// with a possibly misplaced proxy.
    pub fn reconcile(
        &self,
        local: Point,
        container: Option<Rect>,
        direction: Direction,
        viz: VizId,
    ) -> Point {
        match container {
            Some(bbox) => local + bbox.origin().to_vec2() + self.table.get(direction, viz),
            None => {
                tracing::debug!(%viz, %direction, "container not found; using local position");
                local
            }
        }
    }

    /// Inverse of [`Reconciler::reconcile`] for a located container.
    pub fn localize(
        &self,
        absolute: Point,
        container: Rect,
        direction: Direction,
        viz: VizId,
    ) -> Point {
        absolute - container.origin().to_vec2() - self.table.get(direction, viz)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/reconcile.rs"]
mod tests;
