//! Syllable pattern templates: a short class string such as "CCVC" compiled
//! into a closed symbol-class sequence, plus the per-template knobs that
//! shape how the syllable assembler realizes it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::schema::inventory::SymbolClass;
use crate::schema::ConfigError;

/// Where a syllable sits within its word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WordPosition {
    Initial,
    Medial,
    Final,
}

impl WordPosition {
    /// The position of syllable `index` in a word of `count` syllables.
    /// A one-syllable word counts as initial.
    pub fn of_index(index: u32, count: u32) -> Self {
        if index == 0 {
            Self::Initial
        } else if index + 1 == count {
            Self::Final
        } else {
            Self::Medial
        }
    }
}

/// A single syllable template.
///
/// The pattern string is resolved into [`SymbolClass`] entries once, at
/// parse time; generation never re-dispatches on characters. Templates are
/// immutable once built and carry no generation state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyllablePattern {
    /// Compiled class sequence, one entry per pattern character.
    pub symbols: Vec<SymbolClass>,
    /// The original pattern text, kept for display and diagnostics.
    pub source: String,
    /// Syllable-local forbidden substrings, checked against the joined
    /// phoneme sequence.
    pub constraints: Vec<String>,
    /// Probability of appending one extra, preferentially distinct vowel
    /// after a vowel run.
    pub hiatus_probability: f32,
    /// Probability of doubling a consonant emitted outside a cluster.
    pub gemination_probability: f32,
    /// Probability of doubling a just-emitted vowel. Independent of hiatus.
    pub vowel_lengthening_probability: f32,
    /// Whitelist for syllable-initial consonant clusters. `None` (or an
    /// unrealizable list) degrades a cluster request to a single consonant.
    pub onset_clusters: Option<Vec<String>>,
    /// Whitelist for syllable-final consonant clusters, same contract.
    pub coda_clusters: Option<Vec<String>>,
    /// Per-position multipliers applied on top of `selection_probability`
    /// when a template is picked for a syllable slot.
    pub position_weights: HashMap<WordPosition, f32>,
    /// Base selection weight used when no position weight applies.
    pub selection_probability: f32,
}

impl SyllablePattern {
    /// Parse a pattern string into a template with default knobs.
    ///
    /// Every character is one class symbol: `C`, `V`, or a custom group id.
    /// Whether a group id is actually defined is checked later, against a
    /// concrete inventory.
    pub fn parse(pattern: &str) -> Result<Self, ConfigError> {
        if pattern.is_empty() {
            return Err(ConfigError::InvalidPattern("empty pattern".to_string()));
        }
        let mut symbols = Vec::with_capacity(pattern.len());
        for c in pattern.chars() {
            if c.is_whitespace() {
                return Err(ConfigError::InvalidPattern(format!(
                    "whitespace in pattern '{}'",
                    pattern
                )));
            }
            symbols.push(match c {
                'C' => SymbolClass::Consonant,
                'V' => SymbolClass::Vowel,
                other => SymbolClass::Group(other),
            });
        }
        Ok(Self {
            symbols,
            source: pattern.to_string(),
            constraints: Vec::new(),
            hiatus_probability: 0.0,
            gemination_probability: 0.0,
            vowel_lengthening_probability: 0.0,
            onset_clusters: None,
            coda_clusters: None,
            position_weights: HashMap::new(),
            selection_probability: 1.0,
        })
    }

    pub fn with_constraints<I, S>(mut self, constraints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.constraints = constraints.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_hiatus(mut self, probability: f32) -> Self {
        self.hiatus_probability = probability;
        self
    }

    pub fn with_gemination(mut self, probability: f32) -> Self {
        self.gemination_probability = probability;
        self
    }

    pub fn with_vowel_lengthening(mut self, probability: f32) -> Self {
        self.vowel_lengthening_probability = probability;
        self
    }

    pub fn with_onset_clusters<I, S>(mut self, clusters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.onset_clusters = Some(clusters.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_coda_clusters<I, S>(mut self, clusters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.coda_clusters = Some(clusters.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_position_weight(mut self, position: WordPosition, weight: f32) -> Self {
        self.position_weights.insert(position, weight);
        self
    }

    pub fn with_selection_probability(mut self, probability: f32) -> Self {
        self.selection_probability = probability;
        self
    }

    /// Whether this template can produce a vowel pair through hiatus.
    pub fn allows_hiatus(&self) -> bool {
        self.hiatus_probability > 0.0
    }

    /// The effective weight of this template for a syllable at `position`.
    pub fn weight_at(&self, position: WordPosition) -> f32 {
        let positional = self.position_weights.get(&position).copied().unwrap_or(1.0);
        self.selection_probability * positional
    }

    /// True when none of the local constraints occurs in the joined
    /// sequence. Vacuously true with no constraints.
    pub fn validate(&self, sequence: &[String]) -> bool {
        if self.constraints.is_empty() {
            return true;
        }
        let joined = sequence.concat();
        !self.constraints.iter().any(|c| joined.contains(c.as_str()))
    }
}
