/// Anshin pipeline version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Municipality code recorded for mesh-sweep jobs and their area record.
pub const MESH_MUNICIPALITY_CODE: &str = "MESH";

/// Source type label of the metadata blob appended to every candidate's sources.
pub const SYSTEM_METADATA_SOURCE: &str = "system_metadata";

/// Address component of a fingerprint when no address is known.
pub const UNKNOWN_ADDRESS_KEY: &str = "unknown_addr";

/// Character length that both fingerprint components are truncated to.
pub const FINGERPRINT_PREFIX_LEN: usize = 10;

/// Menu tag marking an item as explicitly allergen-free.
pub const ALLERGEN_FREE_TAG: &str = "allergen_free";

/// Menu tag marking an item as verified against an official source.
pub const OFFICIAL_VERIFIED_TAG: &str = "official_verified";

/// Tag attached to chain sightings emitted from master data without a places match.
pub const FALLBACK_DATA_TAG: &str = "FallbackData";

/// Contamination level written when free text mentions cross-contact but no level was supplied.
pub const CONTAMINATION_MENTIONED: &str = "mentioned";
