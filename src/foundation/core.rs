use std::fmt;

use crate::foundation::error::{MorphError, MorphResult};

pub use kurbo::{Point, Rect, Size, Vec2};

/// Milliseconds on the virtual clock that drives every timer and animation.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct Millis(pub u64);

impl Millis {
    pub const ZERO: Self = Self(0);

    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Time elapsed since `earlier`, zero when `earlier` is in the future.
    pub fn since(self, earlier: Self) -> Self {
        Self(self.0.saturating_sub(earlier.0))
    }

    pub fn scaled(self, factor: f64) -> Self {
        Self((self.0 as f64 * factor).round().max(0.0) as u64)
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }
}

impl fmt::Display for Millis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// Identity of one of the two concurrently rendered visualizations.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum VizId {
    /// Nested circle packing, one enclosing circle per species group.
    Pack,
    /// Column grid, one band per study type.
    Grid,
}

impl VizId {
    pub const ALL: [Self; 2] = [Self::Pack, Self::Grid];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pack => "pack",
            Self::Grid => "grid",
        }
    }
}

impl fmt::Display for VizId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VizId {
    type Err = MorphError;

    fn from_str(s: &str) -> MorphResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pack" => Ok(Self::Pack),
            "grid" => Ok(Self::Grid),
            other => Err(MorphError::validation(format!(
                "unknown visualization '{other}'"
            ))),
        }
    }
}

/// Direction of a cross-visualization transition relative to section order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards a higher section index.
    Forward,
    Reverse,
}

impl Direction {
    pub const ALL: [Self; 2] = [Self::Forward, Self::Reverse];

    pub fn between(current: usize, target: usize) -> Self {
        if target > current {
            Self::Forward
        } else {
            Self::Reverse
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Self::Forward => Self::Reverse,
            Self::Reverse => Self::Forward,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Reverse => "reverse",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Straight (non-premultiplied) RGBA8 color, serialized as `#RRGGBB` or `#RRGGBBAA`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn from_hex(s: &str) -> MorphResult<Self> {
        let hex = s.trim().trim_start_matches('#');
        if !hex.is_ascii() || !matches!(hex.len(), 6 | 8) {
            return Err(MorphError::validation(format!("invalid hex color '{s}'")));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| MorphError::validation(format!("invalid hex color '{s}'")))
        };
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
            a: if hex.len() == 8 { channel(6)? } else { 255 },
        })
    }

    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    /// Alpha as a 0..1 opacity.
    pub fn alpha(self) -> f64 {
        f64::from(self.a) / 255.0
    }
}

impl serde::Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
