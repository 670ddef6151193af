//! Band-scale grid: one horizontal band per study type, circles in fixed-height columns.

use crate::{
    data::{dataset::TypeBand, palette::Mechanism},
    foundation::core::{Point, Size},
    layout::config::LayoutConfig,
};

/// Discrete-to-continuous scale splitting a range into equal bands with inner and outer padding.
#[derive(Clone, Debug, PartialEq)]
pub struct BandScale {
    starts: Vec<f64>,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    /// Bands are centered within `range` (alignment 0.5).
    pub fn new(count: usize, range: (f64, f64), padding_inner: f64, padding_outer: f64) -> Self {
        let (r0, r1) = range;
        let n = count as f64;
        let step = (r1 - r0) / (n - padding_inner + padding_outer * 2.0).max(1.0);
        let start = r0 + (r1 - r0 - step * (n - padding_inner)) * 0.5;
        let starts = (0..count).map(|i| start + step * i as f64).collect();
        Self {
            starts,
            step,
            bandwidth: step * (1.0 - padding_inner),
        }
    }

    pub fn band_start(&self, index: usize) -> Option<f64> {
        self.starts.get(index).copied()
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GridBand {
    pub study_type: String,
    pub top: f64,
    pub label_anchor: Point,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GridCell {
    pub binomial: String,
    pub study_type: String,
    pub mechanism: Mechanism,
    pub center: Point,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GridLayout {
    pub size: Size,
    pub bands: Vec<GridBand>,
    pub cells: Vec<GridCell>,
}

/// Places every species of every band. Circles are numbered per band in mechanism order and
/// fill columns top to bottom.
pub fn layout_grid(bands: &[TypeBand], config: &LayoutConfig) -> GridLayout {
    let grid = &config.grid;
    let pitch = config.grid_pitch();
    let per_col = grid.circles_per_column as usize;
    let band_height = per_col as f64 * pitch + grid.band_extra;
    let height = bands.len() as f64 * band_height;
    let scale = BandScale::new(
        bands.len(),
        (0.0, height),
        grid.band_padding,
        grid.band_padding,
    );

    let mut placed_bands = Vec::with_capacity(bands.len());
    let mut cells = Vec::new();
    for (band_idx, band) in bands.iter().enumerate() {
        let top = scale.band_start(band_idx).unwrap_or(0.0);
        placed_bands.push(GridBand {
            study_type: band.study_type.clone(),
            top,
            label_anchor: Point::new(grid.label_x, top + grid.label_dy),
        });

        let items = band.by_mechanism.iter().flat_map(|(_, items)| items.iter());
        for (i, item) in items.enumerate() {
            let col = (i / per_col) as f64;
            let row = (i % per_col) as f64;
            cells.push(GridCell {
                binomial: item.binomial.clone(),
                study_type: band.study_type.clone(),
                mechanism: item.mechanism.clone(),
                center: Point::new(grid.label_gap + col * pitch, top + row * pitch),
            });
        }
    }

    GridLayout {
        size: Size::new(config.canvas_width, height),
        bands: placed_bands,
        cells,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/grid.rs"]
mod tests;
