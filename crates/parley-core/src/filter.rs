//! Profanity screening seam.
//!
//! The protocol consumes profanity detection as a black-box predicate
//! behind [`ProfanityFilter`]. The shipped [`WordListFilter`] is a plain
//! blocklist; tests inject stubs through the same trait.

use std::collections::HashSet;

/// Black-box predicate deciding whether message text is allowed.
pub trait ProfanityFilter: Send + Sync {
    /// Returns `true` if `text` must be rejected.
    fn is_profane(&self, text: &str) -> bool;
}

/// Case-insensitive word blocklist.
///
/// Matches whole words only: text is split on non-alphanumeric boundaries,
/// so "hello" is never flagged for containing "hell".
#[derive(Debug, Clone)]
pub struct WordListFilter {
    blocked: HashSet<String>,
}

impl WordListFilter {
    /// Build a filter from a list of blocked words (normalized to lowercase).
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            blocked: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }
}

impl ProfanityFilter for WordListFilter {
    fn is_profane(&self, text: &str) -> bool {
        text.to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .any(|word| !word.is_empty() && self.blocked.contains(word))
    }
}
