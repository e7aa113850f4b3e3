use serde::{Deserialize, Serialize};

use crate::constants::MESH_MUNICIPALITY_CODE;
use crate::geo::GeoPoint;

/// What a job collects for: a named area, or a coordinate with a radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CollectionTarget {
    Area {
        name: String,
        municipality_code: Option<String>,
    },
    Spatial {
        center: GeoPoint,
        radius_m: u32,
    },
}

impl CollectionTarget {
    /// A named area with surrounding quotes and whitespace removed.
    pub fn area(name: &str) -> Self {
        Self::Area {
            name: name.trim().trim_matches(|c| c == '"' || c == '\'').trim().to_string(),
            municipality_code: None,
        }
    }

    pub fn area_with_code(name: &str, code: impl Into<String>) -> Self {
        match Self::area(name) {
            Self::Area { name, .. } => Self::Area {
                name,
                municipality_code: Some(code.into()),
            },
            other => other,
        }
    }

    pub fn spatial(center: GeoPoint, radius_m: u32) -> Self {
        Self::Spatial { center, radius_m }
    }

    /// The area name for named targets.
    pub fn area_name(&self) -> Option<&str> {
        match self {
            Self::Area { name, .. } => Some(name),
            Self::Spatial { .. } => None,
        }
    }

    /// The value stored as the job's area name.
    pub fn descriptor(&self) -> String {
        match self {
            Self::Area { name, .. } => name.clone(),
            Self::Spatial { center, radius_m } => {
                format!("MESH:{:.4},{:.4} ({radius_m}m)", center.lat, center.lng)
            }
        }
    }

    pub fn municipality_code(&self) -> Option<&str> {
        match self {
            Self::Area {
                municipality_code, ..
            } => municipality_code.as_deref(),
            Self::Spatial { .. } => Some(MESH_MUNICIPALITY_CODE),
        }
    }
}
