//! Phoneme inventory: symbol sets, custom groups, weights, and positional
//! restrictions, with weighted sampling over all of them.

use rand::rngs::StdRng;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::core::sampling::{weighted_index, GenerationError};
use crate::schema::ConfigError;

/// Group ids that always refer to the built-in consonant and vowel classes.
pub const RESERVED_GROUP_IDS: [char; 2] = ['C', 'V'];

lazy_static::lazy_static! {
    /// IPA vowel characters, consulted only for symbols the inventory does
    /// not register itself. Configured data always wins.
    static ref IPA_VOWELS: FxHashSet<char> = {
        "aeiouyäöüɪʏʊɨʉɯɘɵɤəɛœɜɞʌɔæɐɶɑɒø".chars().collect()
    };
}

/// Length and non-syllabicity marks stripped before the fallback lookup, so
/// symbols like "aː" still classify as vowels.
const IPA_VOWEL_MODIFIERS: [char; 3] = ['ː', 'ˑ', '̯'];

/// True when every character of `symbol` (modifiers aside) is an IPA vowel.
/// Covers diphthong digraphs like "aɪ" as well as plain vowels.
pub fn ipa_vowel_fallback(symbol: &str) -> bool {
    let stripped = symbol.trim_end_matches(IPA_VOWEL_MODIFIERS);
    !stripped.is_empty() && stripped.chars().all(|c| IPA_VOWELS.contains(&c))
}

/// A position a phoneme may be restricted to, within the word or within a
/// single syllable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    WordInitial,
    WordMedial,
    WordFinal,
    SyllableInitial,
    SyllableFinal,
}

/// The class a pattern symbol resolves to: one of the two built-in classes
/// or a named custom group. Resolved once at pattern parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolClass {
    Consonant,
    Vowel,
    Group(char),
}

impl fmt::Display for SymbolClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Consonant => write!(f, "consonant"),
            Self::Vowel => write!(f, "vowel"),
            Self::Group(id) => write!(f, "group '{}'", id),
        }
    }
}

/// The phoneme inventory of a language.
///
/// Symbol lists are declaration-ordered and duplicate-free; the order is
/// load-bearing for sequential enumeration. Symbols without a `weights`
/// entry sample at weight 1.0, and symbols without a `positions` entry are
/// allowed everywhere.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhonemeInventory {
    pub consonants: Vec<String>,
    pub vowels: Vec<String>,
    #[serde(default)]
    pub custom_groups: HashMap<char, Vec<String>>,
    #[serde(default)]
    pub weights: HashMap<String, f32>,
    #[serde(default)]
    pub positions: HashMap<String, FxHashSet<Position>>,
}

impl PhonemeInventory {
    pub fn new<C, V, S, T>(consonants: C, vowels: V) -> Self
    where
        C: IntoIterator<Item = S>,
        V: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        let mut inv = Self::default();
        for c in consonants {
            inv.push_unique_consonant(c.into());
        }
        for v in vowels {
            inv.push_unique_vowel(v.into());
        }
        inv
    }

    fn push_unique_consonant(&mut self, symbol: String) {
        if !self.consonants.contains(&symbol) {
            self.consonants.push(symbol);
        }
    }

    fn push_unique_vowel(&mut self, symbol: String) {
        if !self.vowels.contains(&symbol) {
            self.vowels.push(symbol);
        }
    }

    /// Register a custom symbol group under a single-character id.
    ///
    /// `C` and `V` always name the built-in classes and cannot be redefined.
    pub fn add_group<I, S>(&mut self, id: char, members: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if RESERVED_GROUP_IDS.contains(&id) {
            return Err(ConfigError::ReservedSymbol(id));
        }
        self.custom_groups
            .insert(id, members.into_iter().map(Into::into).collect());
        Ok(())
    }

    /// Set a sampling weight for a symbol. Unset symbols weigh 1.0.
    pub fn set_weight(&mut self, symbol: impl Into<String>, weight: f32) {
        self.weights.insert(symbol.into(), weight);
    }

    /// Restrict a symbol to a set of positions. A symbol never restricted is
    /// allowed everywhere.
    pub fn restrict(&mut self, symbol: impl Into<String>, position: Position) {
        self.positions.entry(symbol.into()).or_default().insert(position);
    }

    pub fn weight_of(&self, symbol: &str) -> f32 {
        self.weights.get(symbol).copied().unwrap_or(1.0)
    }

    /// True if the symbol is a registered vowel, or, failing local
    /// registration entirely, looks like a vowel to the IPA fallback table.
    pub fn is_vowel(&self, symbol: &str) -> bool {
        if self.vowels.iter().any(|v| v == symbol) {
            return true;
        }
        if self.consonants.iter().any(|c| c == symbol) {
            return false;
        }
        ipa_vowel_fallback(symbol)
    }

    pub fn is_consonant(&self, symbol: &str) -> bool {
        !self.is_vowel(symbol)
    }

    /// A group is vowel-like only when every member classifies as a vowel.
    /// Mixed groups are not vowel-like.
    pub fn is_group_vowel_like(&self, id: char) -> bool {
        match self.class_members(SymbolClass::Group(id)) {
            Ok(members) => !members.is_empty() && members.iter().all(|m| self.is_vowel(m)),
            Err(_) => false,
        }
    }

    /// True when a pattern may resolve `class` against this inventory.
    pub fn defines(&self, class: SymbolClass) -> bool {
        match class {
            SymbolClass::Consonant | SymbolClass::Vowel => true,
            SymbolClass::Group(id) => {
                RESERVED_GROUP_IDS.contains(&id) || self.custom_groups.contains_key(&id)
            }
        }
    }

    /// The declaration-ordered member list behind a symbol class. `C` and
    /// `V` group ids resolve to the built-in classes.
    pub fn class_members(&self, class: SymbolClass) -> Result<&[String], GenerationError> {
        match class {
            SymbolClass::Consonant => Ok(&self.consonants),
            SymbolClass::Vowel => Ok(&self.vowels),
            SymbolClass::Group('C') => Ok(&self.consonants),
            SymbolClass::Group('V') => Ok(&self.vowels),
            SymbolClass::Group(id) => self
                .custom_groups
                .get(&id)
                .map(Vec::as_slice)
                .ok_or(GenerationError::UnknownGroup(id)),
        }
    }

    fn allowed_at(&self, symbol: &str, tags: &[Position]) -> bool {
        match self.positions.get(symbol) {
            None => true,
            Some(allowed) => tags.is_empty() || tags.iter().any(|t| allowed.contains(t)),
        }
    }

    /// Candidate symbols of `class` allowed at any of `tags`, with their
    /// effective weights, in declaration order. An empty `tags` slice means
    /// the draw is positionally unconstrained.
    pub fn candidates(
        &self,
        class: SymbolClass,
        tags: &[Position],
    ) -> Result<(Vec<&str>, Vec<f32>), GenerationError> {
        let pool = self.class_members(class)?;
        let mut symbols = Vec::with_capacity(pool.len());
        let mut weights = Vec::with_capacity(pool.len());
        for symbol in pool {
            if self.allowed_at(symbol, tags) {
                symbols.push(symbol.as_str());
                weights.push(self.weight_of(symbol));
            }
        }
        Ok((symbols, weights))
    }

    /// Weighted draw of one symbol of `class` allowed at every applicable
    /// position tag. Fails immediately when the filtered set is empty, since
    /// no retry can change that outcome.
    pub fn sample_at(
        &self,
        class: SymbolClass,
        tags: &[Position],
        rng: &mut StdRng,
    ) -> Result<String, GenerationError> {
        let (symbols, weights) = self.candidates(class, tags)?;
        match weighted_index(&weights, rng) {
            Some(i) => Ok(symbols[i].to_string()),
            None => Err(GenerationError::NoCandidates {
                class,
                position: tags.to_vec(),
            }),
        }
    }

    /// Single-tag convenience over [`Self::sample_at`].
    pub fn sample(
        &self,
        class: SymbolClass,
        position: Option<Position>,
        rng: &mut StdRng,
    ) -> Result<String, GenerationError> {
        match position {
            Some(tag) => self.sample_at(class, &[tag], rng),
            None => self.sample_at(class, &[], rng),
        }
    }

    /// Weighted draw restricted to a custom group's member list.
    pub fn sample_group(
        &self,
        id: char,
        position: Option<Position>,
        rng: &mut StdRng,
    ) -> Result<String, GenerationError> {
        self.sample(SymbolClass::Group(id), position, rng)
    }
}
