use std::str::FromStr;

use crate::foundation::error::MorphError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    Other,
}

/// User input consumed by the navigation controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// Positive `delta_y` scrolls towards later sections.
    Wheel { delta_y: f64 },
    TouchStart { y: f64 },
    TouchEnd { y: f64 },
    Key(Key),
    /// Click on the section indicator dot for a section.
    IndicatorClick(usize),
}

/// Requested movement relative to the current section.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Next,
    Previous,
}

impl FromStr for Key {
    type Err = MorphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ArrowUp" => Ok(Self::ArrowUp),
            "ArrowDown" => Ok(Self::ArrowDown),
            "" => Err(MorphError::validation("empty key name")),
            _ => Ok(Self::Other),
        }
    }
}

impl InputEvent {
    /// Step implied by a stand-alone event; touch gestures are resolved by the controller.
    pub fn step(&self) -> Option<Step> {
        match *self {
            Self::Wheel { delta_y } if delta_y > 0.0 => Some(Step::Next),
            Self::Wheel { delta_y } if delta_y < 0.0 => Some(Step::Previous),
            Self::Key(Key::ArrowDown) => Some(Step::Next),
            Self::Key(Key::ArrowUp) => Some(Step::Previous),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/navigation/input.rs"]
mod tests;
