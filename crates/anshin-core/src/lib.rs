//! # anshin-core
//!
//! Foundation crate for the Anshin allergy-safety collection pipeline.
//! Defines the shared data model, traits, errors, config, geo primitives
//! and constants. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod geo;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::AnshinConfig;
pub use errors::{AnshinError, AnshinResult};
pub use geo::{BoundingBox, GeoPoint};
pub use models::{
    Allergen, CandidateMenu, CandidateRecord, CollectionTarget, JobRecord, JobStatus, MenuClaim,
    RawSighting, SourceCitation, SourceType,
};
