use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Axis-aligned box given by its southwest and northeast corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub sw: GeoPoint,
    pub ne: GeoPoint,
}

impl BoundingBox {
    pub const fn new(sw: GeoPoint, ne: GeoPoint) -> Self {
        Self { sw, ne }
    }

    pub fn contains(&self, p: &GeoPoint) -> bool {
        p.lat >= self.sw.lat && p.lat <= self.ne.lat && p.lng >= self.sw.lng && p.lng <= self.ne.lng
    }
}
