use std::collections::HashSet;
use std::path::Path;

use anyhow::Context as _;

use crate::{
    animation::ease::Ease,
    foundation::{
        core::{Color, Millis, Size, VizId},
        error::{MorphError, MorphResult},
    },
    geometry::reconcile::AdjustmentTable,
    layout::config::LayoutConfig,
    navigation::controller::{BoundaryKind, BoundarySpec},
    page::page::SectionSpec,
    transition::{crossfade::CrossfadeSettings, orchestrator::TransitionSettings},
};

/// Every delay and duration of the story, in virtual milliseconds.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Timings {
    pub proxy_duration: Millis,
    pub timeout_factor: f64,
    pub proxy_ease: Ease,
    pub source_fade_delay: Millis,
    pub source_fade: Millis,
    pub target_fade_delay: Millis,
    pub target_fade: Millis,
    /// Plain scrolls commit the new section after this delay.
    pub settle_delay: Millis,
    /// Navigation stays locked for this long after a transition completes.
    pub release_tail: Millis,
    pub debounce: Millis,
    pub touch_threshold: f64,
    pub crossfade: Millis,
    pub crossfade_switch: Millis,
    /// Animation frame spacing used by [`crate::Story::advance_to`].
    pub frame_interval: Millis,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            proxy_duration: Millis(1000),
            timeout_factor: 1.5,
            proxy_ease: Ease::InOutCubic,
            source_fade_delay: Millis(200),
            source_fade: Millis(800),
            target_fade_delay: Millis(800),
            target_fade: Millis(800),
            settle_delay: Millis(800),
            release_tail: Millis(200),
            debounce: Millis(800),
            touch_threshold: 50.0,
            crossfade: Millis(1500),
            crossfade_switch: Millis(600),
            frame_interval: Millis(16),
        }
    }
}

impl Timings {
    pub fn transition_settings(&self) -> TransitionSettings {
        TransitionSettings {
            proxy_duration: self.proxy_duration,
            timeout_factor: self.timeout_factor,
            ease: self.proxy_ease,
            source_fade_delay: self.source_fade_delay,
            source_fade: self.source_fade,
            target_fade_delay: self.target_fade_delay,
            target_fade: self.target_fade,
        }
    }

    pub fn crossfade_settings(&self) -> CrossfadeSettings {
        CrossfadeSettings {
            duration: self.crossfade,
            switch_at: self.crossfade_switch,
            ease: Ease::Css,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StoryConfig {
    pub viewport: Size,
    pub background: Color,
    pub sections: Vec<SectionSpec>,
    pub boundaries: Vec<BoundarySpec>,
    pub timings: Timings,
    pub adjustments: AdjustmentTable,
    pub layout: LayoutConfig,
}

impl Default for StoryConfig {
    /// Ten sections; the packing lives in the eighth, the grid in the ninth.
    fn default() -> Self {
        let sections = (1..=10)
            .map(|i| {
                let spec = SectionSpec::new(format!("section{i}"));
                match i {
                    8 => spec.hosting(VizId::Pack),
                    9 => spec.hosting(VizId::Grid),
                    _ => spec,
                }
            })
            .collect();
        Self {
            viewport: Size::new(1440.0, 900.0),
            background: Color::rgb(0x11, 0x11, 0x11),
            sections,
            boundaries: vec![
                BoundarySpec {
                    upper: 6,
                    lower: 7,
                    kind: BoundaryKind::Crossfade,
                },
                BoundarySpec {
                    upper: 7,
                    lower: 8,
                    kind: BoundaryKind::Morph,
                },
            ],
            timings: Timings::default(),
            adjustments: AdjustmentTable::default(),
            layout: LayoutConfig::default(),
        }
    }
}

impl StoryConfig {
    pub fn from_json_str(s: &str) -> MorphResult<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> MorphResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read story config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> MorphResult<()> {
        self.layout.validate()?;

        if !(self.viewport.width.is_finite()
            && self.viewport.height.is_finite()
            && self.viewport.width > 0.0
            && self.viewport.height > 0.0)
        {
            return Err(MorphError::validation("viewport must be finite and > 0"));
        }
        if self.sections.is_empty() {
            return Err(MorphError::validation("story needs at least one section"));
        }

        let mut ids = HashSet::new();
        let mut hosted = HashSet::new();
        for s in &self.sections {
            if !ids.insert(s.id.as_str()) {
                return Err(MorphError::validation(format!(
                    "duplicate section id '{}'",
                    s.id
                )));
            }
            if let Some(viz) = s.viz {
                if !hosted.insert(viz) {
                    return Err(MorphError::validation(format!(
                        "visualization '{viz}' is hosted by more than one section"
                    )));
                }
            }
            if !s.container_offset.x.is_finite() || !s.container_offset.y.is_finite() {
                return Err(MorphError::validation(format!(
                    "section '{}' container offset must be finite",
                    s.id
                )));
            }
        }

        for b in &self.boundaries {
            if b.lower >= self.sections.len() || b.upper.checked_add(1) != Some(b.lower) {
                return Err(MorphError::validation(format!(
                    "boundary {}..{} must join two adjacent sections",
                    b.upper, b.lower
                )));
            }
            if b.kind == BoundaryKind::Morph {
                let (a, z) = (self.sections[b.upper].viz, self.sections[b.lower].viz);
                match (a, z) {
                    (Some(a), Some(z)) if a != z => {}
                    _ => {
                        return Err(MorphError::validation(format!(
                            "morph boundary {}..{} needs two different visualizations",
                            b.upper, b.lower
                        )));
                    }
                }
            }
        }

        let t = &self.timings;
        for (name, v) in [
            ("proxy_duration", t.proxy_duration),
            ("settle_delay", t.settle_delay),
            ("debounce", t.debounce),
            ("crossfade", t.crossfade),
            ("frame_interval", t.frame_interval),
        ] {
            if v == Millis::ZERO {
                return Err(MorphError::validation(format!("timings.{name} must be > 0")));
            }
        }
        if !t.timeout_factor.is_finite() || t.timeout_factor < 1.0 {
            return Err(MorphError::validation(
                "timings.timeout_factor must be finite and >= 1",
            ));
        }
        if !t.touch_threshold.is_finite() || t.touch_threshold < 0.0 {
            return Err(MorphError::validation(
                "timings.touch_threshold must be finite and >= 0",
            ));
        }
        if t.crossfade_switch > t.crossfade {
            return Err(MorphError::validation(
                "timings.crossfade_switch must not exceed timings.crossfade",
            ));
        }
        if !self.adjustments.is_finite() {
            return Err(MorphError::validation("adjustment offsets must be finite"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/story/config.rs"]
mod tests;
