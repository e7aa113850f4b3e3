//! # anshin-merge
//!
//! Identity reconciliation: sightings that share a fingerprint are folded
//! into one [`MergedShop`], then scored and filtered by the post-merge
//! phases.

pub mod engine;
pub mod fingerprint;
pub mod pipeline;
pub mod shop;

pub use engine::MergeEngine;
pub use fingerprint::{fingerprint, BrandRegistry, Fingerprinter};
pub use pipeline::MergeOutcome;
pub use shop::{MergedShop, ScoredMenu, UpdateRef};
