use crate::{
    animation::ease::Ease,
    foundation::core::Millis,
    page::page::Page,
};

/// Timing of a plain section crossfade boundary.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CrossfadeSettings {
    pub duration: Millis,
    /// When the outgoing section is gone and the incoming one starts to appear.
    pub switch_at: Millis,
    pub ease: Ease,
}

impl Default for CrossfadeSettings {
    fn default() -> Self {
        Self {
            duration: Millis(1500),
            switch_at: Millis(600),
            ease: Ease::Css,
        }
    }
}

/// Pins both sections and schedules their opacity swap. Returns the completion time.
pub fn begin(
    page: &mut Page,
    from: usize,
    to: usize,
    now: Millis,
    settings: &CrossfadeSettings,
) -> Millis {
    let switch_at = settings.switch_at.min(settings.duration);
    page.pin(from);
    page.pin(to);
    page.fade_section(from, 0.0, now, switch_at, settings.ease);
    page.set_opacity(to, 0.0);
    page.fade_section(
        to,
        1.0,
        now.saturating_add(switch_at),
        settings.duration.since(switch_at),
        settings.ease,
    );
    tracing::info!(from, to, duration = %settings.duration, "section crossfade started");
    now.saturating_add(settings.duration)
}

#[cfg(test)]
#[path = "../../tests/unit/transition/crossfade.rs"]
mod tests;
