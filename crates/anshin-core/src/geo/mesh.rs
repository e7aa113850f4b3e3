//! Grid tiling for blind-spot sweeps.
//!
//! The default step (0.045° lat × 0.055° lng) approximates a 5 km cell
//! around 33–35°N. Cells start at the southwest corner and advance east,
//! then north; each emitted point is a cell center.

use super::{BoundingBox, GeoPoint};
use crate::config::defaults;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridStep {
    pub lat: f64,
    pub lng: f64,
}

impl Default for GridStep {
    fn default() -> Self {
        Self {
            lat: defaults::DEFAULT_GRID_STEP_LAT,
            lng: defaults::DEFAULT_GRID_STEP_LNG,
        }
    }
}

/// A named bounding box selectable from the CLI.
#[derive(Debug, Clone, Copy)]
pub struct AreaPreset {
    pub key: &'static str,
    pub bounds: BoundingBox,
}

pub const AREA_PRESETS: &[AreaPreset] = &[
    AreaPreset {
        key: "FUKUOKA_CITY",
        bounds: BoundingBox::new(GeoPoint::new(33.52, 130.30), GeoPoint::new(33.70, 130.50)),
    },
    AreaPreset {
        key: "TOKYO_23",
        bounds: BoundingBox::new(GeoPoint::new(35.55, 139.55), GeoPoint::new(35.82, 139.92)),
    },
];

/// Look up a preset by key (case-insensitive).
pub fn area_bounds(key: &str) -> Option<BoundingBox> {
    AREA_PRESETS
        .iter()
        .find(|p| p.key.eq_ignore_ascii_case(key.trim()))
        .map(|p| p.bounds)
}

/// Number of cells needed to cover `span` with `step`. Tolerates float
/// noise so an exact multiple does not spill into an extra row.
fn cell_count(span: f64, step: f64) -> usize {
    if !(span > 0.0) || !(step > 0.0) {
        return 0;
    }
    ((span / step) - 1e-9).ceil().max(0.0) as usize
}

/// Cell-center points covering `bounds`. Empty for degenerate boxes or
/// non-positive steps.
pub fn generate_mesh(bounds: &BoundingBox, step: GridStep) -> Vec<GeoPoint> {
    let rows = cell_count(bounds.ne.lat - bounds.sw.lat, step.lat);
    let cols = cell_count(bounds.ne.lng - bounds.sw.lng, step.lng);
    let mut points = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        let lat = bounds.sw.lat + (r as f64 + 0.5) * step.lat;
        for c in 0..cols {
            let lng = bounds.sw.lng + (c as f64 + 0.5) * step.lng;
            points.push(GeoPoint::new(lat, lng));
        }
    }
    points
}
