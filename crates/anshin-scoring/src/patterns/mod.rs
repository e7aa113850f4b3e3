//! Free-text pattern extraction over menu descriptions and shop text.

/// Declare a lazily compiled pattern. A pattern that fails to compile
/// yields `None` and simply never matches.
macro_rules! text_pattern {
    ($name:ident, $regex_str:expr) => {
        pub(crate) static $name: std::sync::LazyLock<Option<regex::Regex>> =
            std::sync::LazyLock::new(|| regex::Regex::new($regex_str).ok());
    };
}

pub(crate) use text_pattern;

pub mod removable;
pub mod safety;

pub(crate) fn is_match(pattern: &std::sync::LazyLock<Option<regex::Regex>>, text: &str) -> bool {
    pattern.as_ref().is_some_and(|re| re.is_match(text))
}
