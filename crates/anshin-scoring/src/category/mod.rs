//! Data-driven menu classification.
//!
//! Categories, per-category allergen profiles and natural exclusions are
//! loaded from a table (TOML or JSON) and compiled once. The built-in table
//! ships in `data/categories.toml`; tests and deployments may substitute
//! their own.

mod builtin;

use std::collections::BTreeSet;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use anshin_core::errors::ConfigError;
use anshin_core::Allergen;

pub use builtin::BUILTIN_TABLE_TOML;

/// Key of the fallback category for names no pattern matches.
pub const OTHER_CATEGORY: &str = "other";

/// How often an allergen is present in dishes of a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Usually,
    Rarely,
    Never,
    /// The category's profile says nothing about this allergen.
    Unlisted,
}

/// Serialized form of one category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySpec {
    pub key: String,
    pub label: String,
    pub pattern: String,
    #[serde(default)]
    pub usually: BTreeSet<Allergen>,
    #[serde(default)]
    pub rarely: BTreeSet<Allergen>,
    #[serde(default)]
    pub never: BTreeSet<Allergen>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NaturalExclusionSpec {
    pub category: String,
    pub allergen: Allergen,
    pub pattern: String,
}

/// Serialized form of a whole table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTableSpec {
    pub substitution_pattern: String,
    pub categories: Vec<CategorySpec>,
    #[serde(default)]
    pub natural_exclusions: Vec<NaturalExclusionSpec>,
}

/// A compiled category with its allergen profile.
#[derive(Debug, Clone)]
pub struct CategoryProfile {
    pub key: String,
    pub label: String,
    pub usually: BTreeSet<Allergen>,
    pub rarely: BTreeSet<Allergen>,
    pub never: BTreeSet<Allergen>,
    pattern: Regex,
}

impl CategoryProfile {
    pub fn presence(&self, allergen: Allergen) -> Presence {
        if self.usually.contains(&allergen) {
            Presence::Usually
        } else if self.rarely.contains(&allergen) {
            Presence::Rarely
        } else if self.never.contains(&allergen) {
            Presence::Never
        } else {
            Presence::Unlisted
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        self.pattern.is_match(name)
    }
}

#[derive(Debug, Clone)]
struct NaturalExclusion {
    category: String,
    allergen: Allergen,
    pattern: Regex,
}

/// Compiled classification table.
#[derive(Debug, Clone)]
pub struct CategoryTable {
    categories: Vec<CategoryProfile>,
    exclusions: Vec<NaturalExclusion>,
    substitution: Regex,
}

fn compile(pattern: &str, what: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|e| ConfigError::InvalidCategoryTable {
        reason: format!("{what}: {e}"),
    })
}

impl CategoryTable {
    /// The table bundled with the crate.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_toml(BUILTIN_TABLE_TOML)
    }

    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let spec: CategoryTableSpec =
            toml::from_str(toml_str).map_err(|e| ConfigError::InvalidCategoryTable {
                reason: e.to_string(),
            })?;
        Self::from_spec(spec)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let spec: CategoryTableSpec =
            serde_json::from_str(json).map_err(|e| ConfigError::InvalidCategoryTable {
                reason: e.to_string(),
            })?;
        Self::from_spec(spec)
    }

    /// Load a `.json` or `.toml` table from disk.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content),
            _ => Self::from_toml(&content),
        }
    }

    pub fn from_spec(spec: CategoryTableSpec) -> Result<Self, ConfigError> {
        let mut categories = Vec::with_capacity(spec.categories.len());
        for c in spec.categories {
            if c.key == OTHER_CATEGORY {
                return Err(ConfigError::InvalidCategoryTable {
                    reason: format!("'{OTHER_CATEGORY}' is reserved for unmatched names"),
                });
            }
            let pattern = compile(&c.pattern, &c.key)?;
            categories.push(CategoryProfile {
                key: c.key,
                label: c.label,
                usually: c.usually,
                rarely: c.rarely,
                never: c.never,
                pattern,
            });
        }
        let mut exclusions = Vec::with_capacity(spec.natural_exclusions.len());
        for e in spec.natural_exclusions {
            if !categories.iter().any(|c| c.key == e.category) {
                return Err(ConfigError::InvalidCategoryTable {
                    reason: format!("natural exclusion refers to unknown category '{}'", e.category),
                });
            }
            let pattern = compile(&e.pattern, &e.category)?;
            exclusions.push(NaturalExclusion {
                category: e.category,
                allergen: e.allergen,
                pattern,
            });
        }
        let substitution = compile(&spec.substitution_pattern, "substitution_pattern")?;
        tracing::debug!(
            categories = categories.len(),
            exclusions = exclusions.len(),
            "category table compiled"
        );
        Ok(Self {
            categories,
            exclusions,
            substitution,
        })
    }

    /// First category whose pattern matches `name`; `None` means "other".
    pub fn classify(&self, name: &str) -> Option<&CategoryProfile> {
        self.categories.iter().find(|c| c.matches(name))
    }

    /// Category key for `name`, falling back to [`OTHER_CATEGORY`].
    pub fn category_key(&self, name: &str) -> &str {
        self.classify(name).map_or(OTHER_CATEGORY, |c| c.key.as_str())
    }

    pub fn has_substitution_signal(&self, text: &str) -> bool {
        self.substitution.is_match(text)
    }

    /// True when `allergen` is naturally absent from this dish: either the
    /// category never contains it or a natural-exclusion pattern matches.
    pub fn is_naturally_free(&self, category: &CategoryProfile, allergen: Allergen, name: &str) -> bool {
        if category.never.contains(&allergen) {
            return true;
        }
        self.exclusions
            .iter()
            .any(|e| e.category == category.key && e.allergen == allergen && e.pattern.is_match(name))
    }

    pub fn categories(&self) -> &[CategoryProfile] {
        &self.categories
    }
}
