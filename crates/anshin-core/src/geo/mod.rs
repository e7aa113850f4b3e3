//! Coordinates, bounding boxes and the mesh-tiling generator.

mod mesh;
mod point;

pub use mesh::{area_bounds, generate_mesh, AreaPreset, GridStep, AREA_PRESETS};
pub use point::{BoundingBox, GeoPoint};
