//! Bracket pair definitions.

/// A kind of bracket the grammar can ask for by name.
///
/// `open` and `close` name rules in the dialect, so a dialect can reuse its
/// symbol segments (`LessThanSegment`, ...) as bracket tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketDef {
    /// The kind name grammars refer to, e.g. `round` or `angle`.
    pub kind: String,
    /// Rule matching the opening token.
    pub open: String,
    /// Rule matching the closing token.
    pub close: String,
    /// False when the tokens double as operators elsewhere (`<` and `>`).
    pub unambiguous: bool,
}

impl BracketDef {
    /// Creates a bracket definition.
    #[must_use]
    pub fn new(
        kind: impl Into<String>,
        open: impl Into<String>,
        close: impl Into<String>,
        unambiguous: bool,
    ) -> Self {
        Self {
            kind: kind.into(),
            open: open.into(),
            close: close.into(),
            unambiguous,
        }
    }
}

/// The bracket pairs known to a dialect, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BracketPairs {
    pairs: Vec<BracketDef>,
}

impl BracketPairs {
    /// Creates an empty set of bracket pairs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a pair, replacing any existing pair of the same kind.
    pub fn insert(&mut self, def: BracketDef) {
        if let Some(existing) = self.pairs.iter_mut().find(|p| p.kind == def.kind) {
            *existing = def;
        } else {
            self.pairs.push(def);
        }
    }

    /// Removes the pair of the given kind, returning it.
    pub fn remove(&mut self, kind: &str) -> Option<BracketDef> {
        let index = self.pairs.iter().position(|p| p.kind == kind)?;
        Some(self.pairs.remove(index))
    }

    /// Looks up a pair by kind.
    #[must_use]
    pub fn get(&self, kind: &str) -> Option<&BracketDef> {
        self.pairs.iter().find(|p| p.kind == kind)
    }

    /// Iterates over all pairs.
    pub fn iter(&self) -> impl Iterator<Item = &BracketDef> {
        self.pairs.iter()
    }

    /// Returns the number of registered pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if no pairs are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
