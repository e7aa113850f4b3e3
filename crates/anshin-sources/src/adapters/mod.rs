//! One [`SourceAdapter`](anshin_core::traits::SourceAdapter) per external source.

pub mod blog;
pub mod chain_matrix;
pub mod gourmet;
pub mod google_maps;
pub mod official_list;
pub mod reservation;
pub mod sns;

pub use blog::BlogAdapter;
pub use chain_matrix::ChainMatrixAdapter;
pub use gourmet::GourmetAdapter;
pub use google_maps::GoogleMapsAdapter;
pub use official_list::OfficialListAdapter;
pub use reservation::ReservationAdapter;
pub use sns::SnsAdapter;

use anshin_core::models::{Allergen, MenuClaim};
use chrono::{DateTime, Utc};
use regex::Regex;

// --- Adapter names (config keys and log fields) ---
pub const OFFICIAL_LIST: &str = "official_list";
pub const SNS: &str = "sns";
pub const BLOG: &str = "blog";
pub const GOURMET: &str = "gourmet";
pub const GOOGLE_MAPS: &str = "google_maps";
pub const RESERVATION: &str = "reservation";
pub const CHAIN_MATRIX: &str = "chain_matrix";

pub const ALL_ADAPTERS: [&str; 7] = [
    OFFICIAL_LIST,
    SNS,
    BLOG,
    GOURMET,
    GOOGLE_MAPS,
    RESERVATION,
    CHAIN_MATRIX,
];

/// A keyword rule turning a text mention into a generic menu claim.
pub(crate) struct KeywordMenu {
    pub pattern: &'static std::sync::LazyLock<Option<Regex>>,
    pub name: &'static str,
    pub allergens: &'static [Allergen],
}

/// Claims for every rule whose pattern matches `text`.
pub(crate) fn keyword_menus(
    rules: &[KeywordMenu],
    text: &str,
    description: Option<&str>,
    now: DateTime<Utc>,
) -> Vec<MenuClaim> {
    rules
        .iter()
        .filter(|r| r.pattern.as_ref().is_some_and(|re| re.is_match(text)))
        .map(|r| {
            let mut claim = MenuClaim::new(r.name)
                .with_allergens(r.allergens.iter().copied())
                .collected(now);
            if let Some(d) = description {
                claim = claim.with_description(d);
            }
            claim
        })
        .collect()
}

/// First `max` characters of `text`.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
