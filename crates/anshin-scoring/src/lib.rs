//! # anshin-scoring
//!
//! Pure scoring functions used by the merge engine:
//! - blocklist filter for generic menu names
//! - data-driven menu classifier and value scorer with freshness decay
//! - removable-allergen and safety-feature text extraction
//! - shop reliability scorer

pub mod blocklist;
pub mod category;
pub mod patterns;
pub mod reliability;
pub mod value;

pub use blocklist::{is_blocked, is_scrape_noise};
pub use category::{CategoryProfile, CategoryTable, Presence};
pub use patterns::removable::extract_removable_allergens;
pub use patterns::safety::{extract_safety_features, SafetyFlag};
pub use reliability::{reliability_breakdown, reliability_score, ReliabilityBreakdown, ReliabilityInput};
pub use value::{ValueBreakdown, ValueScorer};
