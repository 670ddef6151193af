use std::fmt;

use crate::foundation::core::Color;

/// Mechanism category of a study, the secondary attribute that drives fill colors.
#[derive(
    Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(into = "String", from = "String")]
pub enum Mechanism {
    Behaviour,
    Demographic,
    Physiological,
    Other(String),
}

impl Mechanism {
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "Behaviour" => Self::Behaviour,
            "Demographic" => Self::Demographic,
            "Physiological" => Self::Physiological,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Behaviour => "Behaviour",
            Self::Demographic => "Demographic",
            Self::Physiological => "Physiological",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for Mechanism {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<Mechanism> for String {
    fn from(m: Mechanism) -> Self {
        m.as_str().to_string()
    }
}

impl fmt::Display for Mechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category-to-fill mapping for one visualization.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Palette {
    pub behaviour: Color,
    pub demographic: Color,
    pub physiological: Color,
    pub fallback: Color,
}

impl Palette {
    pub fn packing() -> Self {
        Self {
            behaviour: Color::rgb(0x58, 0xCD, 0xFF),
            demographic: Color::rgb(0xF4, 0xC7, 0x35),
            physiological: Color::rgb(0xEE, 0x84, 0xCB),
            fallback: Color::rgb(0x3D, 0x41, 0x3F),
        }
    }

    pub fn grid() -> Self {
        Self {
            behaviour: Color::rgb(0x64, 0xF7, 0xFF),
            demographic: Color::rgb(0xE3, 0xF6, 0x39),
            physiological: Color::rgb(0xEE, 0x5E, 0xBE),
            fallback: Color::rgb(0x90, 0x90, 0x8E),
        }
    }

    pub fn fill(&self, mechanism: &Mechanism) -> Color {
        match mechanism {
            Mechanism::Behaviour => self.behaviour,
            Mechanism::Demographic => self.demographic,
            Mechanism::Physiological => self.physiological,
            Mechanism::Other(_) => self.fallback,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/data/palette.rs"]
mod tests;
