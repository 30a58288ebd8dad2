//! Reserved and unreserved keyword classification.

use std::collections::BTreeSet;

/// Which keyword set a word belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordClass {
    /// Words that can never be used as naked identifiers.
    Reserved,
    /// Words with a grammatical role that may still name objects.
    Unreserved,
}

impl KeywordClass {
    /// Returns the set name as used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reserved => "reserved_keywords",
            Self::Unreserved => "unreserved_keywords",
        }
    }
}

/// The keyword sets of a dialect. All words are stored upper-cased.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSets {
    reserved: BTreeSet<String>,
    unreserved: BTreeSet<String>,
}

impl KeywordSets {
    /// Creates empty keyword sets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn set_mut(&mut self, class: KeywordClass) -> &mut BTreeSet<String> {
        match class {
            KeywordClass::Reserved => &mut self.reserved,
            KeywordClass::Unreserved => &mut self.unreserved,
        }
    }

    /// Returns the words of one class in sorted order.
    pub fn words(&self, class: KeywordClass) -> impl Iterator<Item = &str> {
        match class {
            KeywordClass::Reserved => self.reserved.iter(),
            KeywordClass::Unreserved => self.unreserved.iter(),
        }
        .map(String::as_str)
    }

    /// Adds words to a set.
    pub fn extend<I, S>(&mut self, class: KeywordClass, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set = self.set_mut(class);
        set.extend(words.into_iter().map(|w| w.as_ref().to_ascii_uppercase()));
    }

    /// Removes words from a set. Absent words are ignored.
    pub fn remove<I, S>(&mut self, class: KeywordClass, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set = self.set_mut(class);
        for word in words {
            set.remove(&word.as_ref().to_ascii_uppercase());
        }
    }

    /// Empties a set.
    pub fn clear(&mut self, class: KeywordClass) {
        self.set_mut(class).clear();
    }

    /// Returns true if `word` is reserved (case-insensitive).
    #[must_use]
    pub fn is_reserved(&self, word: &str) -> bool {
        self.reserved.contains(&word.to_ascii_uppercase())
    }

    /// Returns true if `word` is in either set (case-insensitive).
    #[must_use]
    pub fn is_keyword(&self, word: &str) -> bool {
        let upper = word.to_ascii_uppercase();
        self.reserved.contains(&upper) || self.unreserved.contains(&upper)
    }

    /// Classifies `word`. A word listed in both sets counts as reserved.
    #[must_use]
    pub fn classify(&self, word: &str) -> Option<KeywordClass> {
        let upper = word.to_ascii_uppercase();
        if self.reserved.contains(&upper) {
            Some(KeywordClass::Reserved)
        } else if self.unreserved.contains(&upper) {
            Some(KeywordClass::Unreserved)
        } else {
            None
        }
    }

    /// Total number of distinct words across both sets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.reserved.union(&self.unreserved).count()
    }

    /// Returns true when both sets are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reserved.is_empty() && self.unreserved.is_empty()
    }
}
