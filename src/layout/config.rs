use std::collections::BTreeMap;

use crate::foundation::{
    core::Point,
    error::{MorphError, MorphResult},
};

/// Geometry shared by every layout computation.
///
/// Both visualizations read the same instance so that leaf radius and canvas width
/// cannot drift apart between them.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Radius of every species circle, in container pixels.
    pub leaf_radius: f64,
    /// Width of each visualization container.
    pub canvas_width: f64,
    pub pack: PackSettings,
    pub grid: GridSettings,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PackSettings {
    /// Padding between sibling circles before the leaf rescale.
    pub padding: f64,
    /// Square extent the raw packing is fitted into before the leaf rescale.
    pub extent: f64,
    /// Value assigned to every leaf (all leaves weigh the same).
    pub leaf_value: f64,
    /// Center of each group's enclosing circle, by group name.
    pub anchors: BTreeMap<String, Point>,
    pub fallback_anchor: Point,
    /// Gap between the enclosing circle and its curved label.
    pub label_gap: f64,
    pub label_start_deg: f64,
    pub label_end_deg: f64,
    pub label_font_px: f64,
    pub compact_label_font_px: f64,
    /// Labels with at least this many characters use the compact font size.
    pub compact_label_min_chars: usize,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GridSettings {
    pub circle_margin: f64,
    pub circles_per_column: u32,
    /// Horizontal offset of the first column.
    pub label_gap: f64,
    pub band_padding: f64,
    /// Extra height per band on top of its circle rows.
    pub band_extra: f64,
    pub label_x: f64,
    pub label_dy: f64,
    pub label_font_px: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            leaf_radius: 10.0,
            canvas_width: 1200.0,
            pack: PackSettings::default(),
            grid: GridSettings::default(),
        }
    }
}

impl Default for PackSettings {
    fn default() -> Self {
        let anchors = [
            ("Birds", 945.0, 495.0),
            ("Plantae", 230.0, 665.0),
            ("Mammalia", 645.0, 370.0),
            ("Arthropoda", 330.0, 300.0),
            ("Angiospermae", 530.0, 670.0),
            ("Amphibia", 545.0, 460.0),
            ("Algae & Cyanobacteria", 340.0, 790.0),
            ("Reptilia", 800.0, 760.0),
            ("arthropoda", 600.0, 190.0),
            ("Gymnospermae", 135.0, 500.0),
            ("Mollusca", 610.0, 230.0),
            ("Worm", 760.0, 230.0),
            ("Fish", 747.0, 690.0),
        ]
        .into_iter()
        .map(|(name, x, y)| (name.to_string(), Point::new(x, y)))
        .collect();

        Self {
            padding: 2.0,
            extent: 400.0,
            leaf_value: 100.0,
            anchors,
            fallback_anchor: Point::new(600.0, 400.0),
            label_gap: 10.0,
            label_start_deg: 20.0,
            label_end_deg: -135.0,
            label_font_px: 16.0,
            compact_label_font_px: 9.0,
            compact_label_min_chars: 21,
        }
    }
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            circle_margin: 4.0,
            circles_per_column: 3,
            label_gap: 150.0,
            band_padding: 0.2,
            band_extra: 40.0,
            label_x: 20.0,
            label_dy: 10.0,
            label_font_px: 16.0,
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> MorphResult<()> {
        fn positive(name: &str, v: f64) -> MorphResult<()> {
            if !v.is_finite() || v <= 0.0 {
                return Err(MorphError::validation(format!(
                    "layout {name} must be finite and > 0"
                )));
            }
            Ok(())
        }
        fn non_negative(name: &str, v: f64) -> MorphResult<()> {
            if !v.is_finite() || v < 0.0 {
                return Err(MorphError::validation(format!(
                    "layout {name} must be finite and >= 0"
                )));
            }
            Ok(())
        }

        positive("leaf_radius", self.leaf_radius)?;
        positive("canvas_width", self.canvas_width)?;
        non_negative("pack.padding", self.pack.padding)?;
        positive("pack.extent", self.pack.extent)?;
        positive("pack.leaf_value", self.pack.leaf_value)?;
        non_negative("grid.circle_margin", self.grid.circle_margin)?;
        non_negative("grid.band_extra", self.grid.band_extra)?;
        if self.grid.circles_per_column == 0 {
            return Err(MorphError::validation(
                "layout grid.circles_per_column must be > 0",
            ));
        }
        if !(0.0..1.0).contains(&self.grid.band_padding) {
            return Err(MorphError::validation(
                "layout grid.band_padding must be in [0, 1)",
            ));
        }
        for (name, p) in &self.pack.anchors {
            if !p.x.is_finite() || !p.y.is_finite() {
                return Err(MorphError::validation(format!(
                    "layout anchor for '{name}' must be finite"
                )));
            }
        }
        Ok(())
    }

    /// Center for a group's enclosing circle.
    pub fn anchor_for(&self, group: &str) -> Point {
        self.pack
            .anchors
            .get(group)
            .copied()
            .unwrap_or(self.pack.fallback_anchor)
    }

    /// Distance between neighbouring grid circle centers.
    pub fn grid_pitch(&self) -> f64 {
        self.leaf_radius * 2.0 + self.grid.circle_margin
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/config.rs"]
mod tests;
