//! Compiled regular expression carried by filter predicates.

use regex_automata::meta;

pub use regex_automata::meta::BuildError as RegexBuildError;

/// A regex literal from a filter, compiled once at path compile time.
///
/// Matching is an unanchored search: `/b/` matches `"abc"`.
#[derive(Clone)]
pub struct Regex {
    pattern: String,
    matcher: meta::Regex,
}

impl Regex {
    /// Compile `pattern` (the literal without its `/` delimiters, unescaped).
    pub fn new(pattern: &str) -> Result<Self, RegexBuildError> {
        let matcher = meta::Regex::new(pattern)?;
        Ok(Self {
            pattern: pattern.to_string(),
            matcher,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    #[inline]
    pub fn is_match(&self, haystack: &str) -> bool {
        self.matcher.is_match(haystack)
    }
}

impl PartialEq for Regex {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

impl std::fmt::Debug for Regex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Regex").field(&self.pattern).finish()
    }
}

/// Renders the literal form, re-escaping `/`.
impl std::fmt::Display for Regex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "/{}/", self.pattern.replace('/', "\\/"))
    }
}
