//! Romanization: rendering a phoneme sequence as a surface string through
//! an ordered symbol-to-grapheme substitution table.

use serde::{Deserialize, Serialize};

/// A phoneme-to-grapheme substitution table.
///
/// Unmapped symbols pass through unchanged, so an empty romanizer is the
/// identity rendering. Both symbols and graphemes may span several
/// characters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Romanizer {
    pub mappings: Vec<(String, String)>,
}

impl Romanizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fluent mapping registration. The first mapping for a symbol wins.
    pub fn map(mut self, symbol: impl Into<String>, grapheme: impl Into<String>) -> Self {
        self.add(symbol, grapheme);
        self
    }

    pub fn add(&mut self, symbol: impl Into<String>, grapheme: impl Into<String>) {
        self.mappings.push((symbol.into(), grapheme.into()));
    }

    pub fn grapheme(&self, symbol: &str) -> Option<&str> {
        self.mappings
            .iter()
            .find(|(s, _)| s == symbol)
            .map(|(_, g)| g.as_str())
    }

    /// Map every phoneme and join, preserving order.
    pub fn romanize(&self, phonemes: &[String]) -> String {
        phonemes
            .iter()
            .map(|p| self.grapheme(p).unwrap_or(p.as_str()))
            .collect()
    }
}
