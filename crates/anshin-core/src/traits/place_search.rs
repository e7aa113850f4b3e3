use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AnshinResult;
use crate::geo::GeoPoint;

/// A text query against a places index, optionally biased to a circle.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceQuery {
    pub text: String,
    pub location_bias: Option<(GeoPoint, u32)>,
    pub max_results: u32,
}

impl PlaceQuery {
    pub fn text(text: impl Into<String>, max_results: u32) -> Self {
        Self {
            text: text.into(),
            location_bias: None,
            max_results,
        }
    }

    pub fn near(mut self, center: GeoPoint, radius_m: u32) -> Self {
        self.location_bias = Some((center, radius_m));
        self
    }
}

/// One result of a places search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PlaceHit {
    pub place_id: Option<String>,
    pub name: String,
    pub address: Option<String>,
    pub location: Option<GeoPoint>,
    pub photos: Vec<String>,
    pub phone: Option<String>,
    pub opening_hours: Option<String>,
    pub website: Option<String>,
    pub summary: Option<String>,
    pub parking: Option<bool>,
    pub wheelchair_accessible: Option<bool>,
}

/// Narrow capability over a places index.
#[async_trait]
pub trait PlaceSearch: Send + Sync {
    /// `false` when the index cannot be reached at all (e.g. no credentials),
    /// letting callers take their offline path without issuing a request.
    fn is_available(&self) -> bool {
        true
    }

    async fn search(&self, query: &PlaceQuery) -> AnshinResult<Vec<PlaceHit>>;
}
