mod allergen;
mod area;
mod candidate;
mod job;
mod menu;
mod sighting;
mod source_type;
mod target;

pub use allergen::Allergen;
pub use area::{AreaRecord, RestaurantRef};
pub use candidate::{CandidateMenu, CandidateRecord, CandidateStatus, SystemMetadata};
pub use job::{JobLogEntry, JobRecord, JobStatus, JobSummary, RawSnapshot};
pub use menu::MenuClaim;
pub use sighting::{RawSighting, SightingMetadata, SourceCitation};
pub use source_type::SourceType;
pub use target::CollectionTarget;
