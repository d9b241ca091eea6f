// src/word.rs

// Double-occurrence word validation and the derived neighbor structure.

use indexmap::{IndexMap, IndexSet};

use crate::error::SagError;

/// A vertex label. The CLI accepts arbitrary comma-separated integers.
pub type Symbol = i64;

/// Symbol -> set of symbols appearing immediately before or after it anywhere
/// in the word. Undirected and deduplicated. Insertion order is preserved so
/// that placement iterates neighbors deterministically.
pub type Adjacency = IndexMap<Symbol, IndexSet<Symbol>>;

/// A validated double-occurrence word: every distinct symbol occurs exactly
/// twice. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct Word {
    symbols: Vec<Symbol>,
}

impl Word {
    /// Validates the double-occurrence invariant.
    ///
    /// # Errors
    ///
    /// Returns [`SagError::InvalidWord`] naming the first symbol (in order of
    /// appearance) whose occurrence count is not exactly 2.
    pub fn parse(symbols: &[Symbol]) -> Result<Word, SagError> {
        let mut counts: IndexMap<Symbol, usize> = IndexMap::new();
        for &symbol in symbols {
            *counts.entry(symbol).or_insert(0) += 1;
        }
        for (&symbol, &count) in &counts {
            if count != 2 {
                return Err(SagError::InvalidWord { symbol, count });
            }
        }
        Ok(Word {
            symbols: symbols.to_vec(),
        })
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Word length, 2n for n distinct symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Number of distinct symbols (n).
    pub fn distinct_count(&self) -> usize {
        self.symbols.len() / 2
    }

    /// Symbols whose vertex markers are highlighted in the rendering: the
    /// first and the last position of the word.
    pub fn endpoints(&self) -> Option<(Symbol, Symbol)> {
        Some((*self.symbols.first()?, *self.symbols.last()?))
    }

    /// Builds the undirected neighbor sets by scanning consecutive pairs.
    /// Every symbol occupies two positions and each position contributes at
    /// most two neighbors, so every entry holds at most 4 symbols.
    pub fn adjacency(&self) -> Adjacency {
        let mut adjacency: Adjacency = IndexMap::new();
        for pair in self.symbols.windows(2) {
            adjacency.entry(pair[0]).or_default().insert(pair[1]);
            adjacency.entry(pair[1]).or_default().insert(pair[0]);
        }
        // A word of length 2 still needs its single vertex present.
        for &symbol in &self.symbols {
            adjacency.entry(symbol).or_default();
        }
        adjacency
    }
}
