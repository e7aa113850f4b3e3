use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of external source a sighting came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    Official,
    Municipality,
    OfficialMatrix,
    Reservation,
    GoogleMaps,
    Sns,
    Blog,
    Review,
    #[serde(other)]
    Unknown,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Official => "official",
            Self::Municipality => "municipality",
            Self::OfficialMatrix => "official_matrix",
            Self::Reservation => "reservation",
            Self::GoogleMaps => "google_maps",
            Self::Sns => "sns",
            Self::Blog => "blog",
            Self::Review => "review",
            Self::Unknown => "unknown",
        }
    }

    /// Parse a stored label; anything unrecognized becomes `Unknown`.
    pub fn parse(value: &str) -> Self {
        match value {
            "official" => Self::Official,
            "municipality" => Self::Municipality,
            "official_matrix" => Self::OfficialMatrix,
            "reservation" => Self::Reservation,
            "google_maps" => Self::GoogleMaps,
            "sns" => Self::Sns,
            "blog" => Self::Blog,
            "review" => Self::Review,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
