use super::normalize_name_full;

/// Chain brands whose branches should share a name key.
///
/// Aliases are normalized the same way as shop names, so "モスバーガー",
/// "もすばーがー" and "MOS BURGER" all resolve to one canonical key.
#[derive(Debug, Clone, Default)]
pub struct BrandRegistry {
    /// (normalized alias, canonical key), longest alias first.
    aliases: Vec<(String, String)>,
}

impl BrandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a brand under `canonical` with the given surface forms.
    pub fn register<I, S>(&mut self, canonical: &str, aliases: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let key = normalize_name_full(canonical);
        if key.is_empty() {
            return;
        }
        let mut forms: Vec<String> = aliases.into_iter().map(|a| a.as_ref().to_string()).collect();
        forms.push(canonical.to_string());
        for form in forms {
            let norm = normalize_name_full(&form);
            if norm.chars().count() >= 2 && !self.aliases.iter().any(|(a, _)| *a == norm) {
                self.aliases.push((norm, key.clone()));
            }
        }
        self.aliases
            .sort_by(|a, b| b.0.chars().count().cmp(&a.0.chars().count()));
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Canonical brand key if `normalized_name` contains a known alias.
    pub fn canonical_for(&self, normalized_name: &str) -> Option<&str> {
        self.aliases
            .iter()
            .find(|(alias, _)| normalized_name.contains(alias.as_str()))
            .map(|(_, key)| key.as_str())
    }
}
