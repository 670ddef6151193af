use crate::{
    foundation::core::{Color, Point, Size, VizId},
    identity::registry::EntityKey,
};

/// Handle to a shape owned by a [`Scene`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct ShapeId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    Start,
    Middle,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ShapeKind {
    Circle {
        center: Point,
        radius: f64,
    },
    Text {
        anchor: Point,
        text: String,
        font_px: f64,
        align: TextAlign,
    },
    /// Text laid out along a circular arc, angles in degrees clockwise from 12 o'clock.
    ArcText {
        center: Point,
        radius: f64,
        start_deg: f64,
        end_deg: f64,
        text: String,
        font_px: f64,
    },
}

/// What a shape stands for; fade policies and hit testing key off this.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeRole {
    GroupOutline,
    Entity,
    Label,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
    pub opacity: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub role: ShapeRole,
    pub fill: Color,
    pub fill_opacity: f64,
    pub stroke: Option<Stroke>,
    pub visible: bool,
    /// Opaque back-reference to the entity this shape renders.
    pub entity: Option<EntityKey>,
}

impl Shape {
    pub fn circle(center: Point, radius: f64, fill: Color, role: ShapeRole) -> Self {
        Self {
            kind: ShapeKind::Circle { center, radius },
            role,
            fill,
            fill_opacity: 1.0,
            stroke: None,
            visible: true,
            entity: None,
        }
    }

    pub fn label(kind: ShapeKind, fill: Color) -> Self {
        Self {
            kind,
            role: ShapeRole::Label,
            fill,
            fill_opacity: 1.0,
            stroke: None,
            visible: true,
            entity: None,
        }
    }

    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = Some(stroke);
        self
    }

    pub fn with_fill_opacity(mut self, opacity: f64) -> Self {
        self.fill_opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn for_entity(mut self, key: EntityKey) -> Self {
        self.entity = Some(key);
        self
    }
}

/// Retained shape arena for one visualization, in its container's coordinate space.
#[derive(Clone, Debug)]
pub struct Scene {
    viz: VizId,
    size: Size,
    shapes: Vec<Shape>,
}

impl Scene {
    pub fn new(viz: VizId, size: Size) -> Self {
        Self {
            viz,
            size,
            shapes: Vec::new(),
        }
    }

    pub fn viz(&self) -> VizId {
        self.viz
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    pub fn push(&mut self, shape: Shape) -> ShapeId {
        let id = ShapeId(self.shapes.len() as u32);
        self.shapes.push(shape);
        id
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(id.0 as usize)
    }

    /// Returns `false` when the handle does not belong to this scene.
    pub fn set_visible(&mut self, id: ShapeId, visible: bool) -> bool {
        match self.shapes.get_mut(id.0 as usize) {
            Some(shape) => {
                shape.visible = visible;
                true
            }
            None => false,
        }
    }

    pub fn is_visible(&self, id: ShapeId) -> bool {
        self.get(id).is_some_and(|s| s.visible)
    }

    /// Makes every entity shape visible again.
    pub fn reveal_entities(&mut self) {
        for shape in &mut self.shapes {
            if shape.role == ShapeRole::Entity {
                shape.visible = true;
            }
        }
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/scene.rs"]
mod tests;
