use crate::{
    animation::{ease::Ease, tween::Tween},
    foundation::{
        core::{Millis, Point, Rect, Size, Vec2, VizId},
        error::{MorphError, MorphResult},
    },
};

/// Static description of one full-viewport section.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SectionSpec {
    pub id: String,
    /// Visualization whose container lives in this section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viz: Option<VizId>,
    /// Offset of the visualization container from the section's top-left corner.
    #[serde(default)]
    pub container_offset: Vec2,
}

impl SectionSpec {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            viz: None,
            container_offset: Vec2::ZERO,
        }
    }

    pub fn hosting(mut self, viz: VizId) -> Self {
        self.viz = Some(viz);
        self
    }
}

#[derive(Clone, Debug)]
struct SectionState {
    spec: SectionSpec,
    opacity: Tween<f64>,
    pinned: bool,
}

/// Headless document: vertically stacked sections, a scroll position and per-section opacity.
///
/// All positions returned by this type are in viewport coordinates at the page's current time.
#[derive(Clone, Debug)]
pub struct Page {
    viewport: Size,
    sections: Vec<SectionState>,
    scroll: Tween<f64>,
    now: Millis,
}

impl Page {
    pub fn new(viewport: Size, sections: Vec<SectionSpec>) -> MorphResult<Self> {
        if sections.is_empty() {
            return Err(MorphError::validation("page needs at least one section"));
        }
        if !(viewport.width > 0.0 && viewport.height > 0.0) {
            return Err(MorphError::validation("viewport size must be > 0"));
        }
        Ok(Self {
            viewport,
            sections: sections
                .into_iter()
                .map(|spec| SectionState {
                    spec,
                    opacity: Tween::hold(1.0),
                    pinned: false,
                })
                .collect(),
            scroll: Tween::hold(0.0),
            now: Millis::ZERO,
        })
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn section(&self, index: usize) -> Option<&SectionSpec> {
        self.sections.get(index).map(|s| &s.spec)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.spec.id == id)
    }

    pub fn section_hosting(&self, viz: VizId) -> Option<usize> {
        self.sections.iter().position(|s| s.spec.viz == Some(viz))
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn set_time(&mut self, now: Millis) {
        self.now = now;
    }

    /// Document-space top of a section.
    pub fn section_top(&self, index: usize) -> f64 {
        index as f64 * self.viewport.height
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll.sample(self.now)
    }

    pub fn is_scroll_settled(&self) -> bool {
        self.scroll.is_finished(self.now)
    }

    /// Smooth scroll so that `index` is at the top of the viewport.
    pub fn scroll_to(&mut self, index: usize, duration: Millis, ease: Ease) {
        let target = self.section_top(index.min(self.len() - 1));
        self.scroll = self.scroll.retarget(self.now, target, self.now, duration, ease);
    }

    /// Instant scroll with no animation.
    pub fn jump_to(&mut self, index: usize) {
        self.scroll = Tween::hold(self.section_top(index.min(self.len() - 1)));
    }

    pub fn pin(&mut self, index: usize) {
        if let Some(s) = self.sections.get_mut(index) {
            s.pinned = true;
        }
    }

    pub fn unpin_all(&mut self) {
        for s in &mut self.sections {
            s.pinned = false;
        }
    }

    pub fn is_pinned(&self, index: usize) -> bool {
        self.sections.get(index).is_some_and(|s| s.pinned)
    }

    /// Top-left of a section in the viewport. Pinned sections sit at the viewport top.
    pub fn section_origin(&self, index: usize) -> Option<Point> {
        let s = self.sections.get(index)?;
        if s.pinned {
            return Some(Point::ZERO);
        }
        Some(Point::new(0.0, self.section_top(index) - self.scroll_y()))
    }

    pub fn opacity(&self, index: usize) -> f64 {
        self.sections
            .get(index)
            .map_or(0.0, |s| s.opacity.sample(self.now))
    }

    /// Fades a section from its current opacity to `to`, starting at `start`.
    pub fn fade_section(&mut self, index: usize, to: f64, start: Millis, duration: Millis, ease: Ease) {
        let now = self.now;
        if let Some(s) = self.sections.get_mut(index) {
            s.opacity = s.opacity.retarget(now, to.clamp(0.0, 1.0), start, duration, ease);
        }
    }

    pub fn set_opacity(&mut self, index: usize, opacity: f64) {
        if let Some(s) = self.sections.get_mut(index) {
            s.opacity = Tween::hold(opacity.clamp(0.0, 1.0));
        }
    }

    /// Restores full opacity and normal flow for every section.
    pub fn reset_visibility(&mut self) {
        for s in &mut self.sections {
            s.opacity = Tween::hold(1.0);
            s.pinned = false;
        }
    }

    /// Top-left of the container hosting `viz`, or `None` when no section hosts it.
    pub fn container_origin(&self, viz: VizId) -> Option<Point> {
        let index = self.section_hosting(viz)?;
        let origin = self.section_origin(index)?;
        Some(origin + self.sections[index].spec.container_offset)
    }

    /// Bounding box of the container hosting `viz` given its content size.
    pub fn container_box(&self, viz: VizId, content: Size) -> Option<Rect> {
        self.container_origin(viz)
            .map(|origin| Rect::from_origin_size(origin, content))
    }

    /// Sections that intersect the viewport and are not fully transparent, in document order.
    pub fn visible_sections(&self) -> Vec<usize> {
        let view = Rect::from_origin_size(Point::ZERO, self.viewport);
        (0..self.len())
            .filter(|&i| self.opacity(i) > 0.0)
            .filter(|&i| {
                self.section_origin(i).is_some_and(|o| {
                    let r = Rect::from_origin_size(o, self.viewport);
                    r.y0 < view.y1 && r.y1 > view.y0
                })
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/page.rs"]
mod tests;
