//! Content filtering for free-text profile fields

use std::collections::HashSet;

/// Oracle deciding whether text is unfit for publication
pub trait ProfanityChecker: Send + Sync {
    fn is_profane(&self, text: &str) -> bool;
}

const DEFAULT_WORDS: &[&str] = &[
    "arse", "asshole", "bastard", "bitch", "bollocks", "crap", "cunt", "dick", "fuck",
    "fucking", "motherfucker", "piss", "prick", "shit", "slut", "twat", "wanker", "whore",
];

/// Whole-word, case-insensitive match against a fixed word list
#[derive(Debug, Clone)]
pub struct WordListFilter {
    words: HashSet<String>,
}

impl WordListFilter {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for WordListFilter {
    fn default() -> Self {
        Self::new(DEFAULT_WORDS)
    }
}

impl ProfanityChecker for WordListFilter {
    fn is_profane(&self, text: &str) -> bool {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|token| !token.is_empty())
            .any(|token| self.words.contains(&token.to_lowercase()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_words_only() {
        let filter = WordListFilter::new(["heck"]);
        assert!(filter.is_profane("What the HECK!"));
        assert!(filter.is_profane("heck,yes"));
        assert!(!filter.is_profane("checking in"));
        assert!(!filter.is_profane(""));
    }

    #[test]
    fn test_default_list_is_populated() {
        let filter = WordListFilter::default();
        assert!(!filter.is_empty());
        assert!(!filter.is_profane("I like long walks and dungeon crawls"));
    }
}
