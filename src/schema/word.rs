//! Word-level rules: syllable count policies and the word specification
//! that couples templates with boundary and thematic constraints.

use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::sampling::weighted_index;
use crate::schema::pattern::{SyllablePattern, WordPosition};
use crate::schema::ConfigError;

/// How many syllables a word gets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SyllableCountPolicy {
    /// Always exactly this many.
    Exact(u32),
    /// Uniform draw, both bounds inclusive.
    Range(u32, u32),
    /// Frequency-weighted draw over explicit counts.
    Weighted(Vec<(u32, f32)>),
}

impl SyllableCountPolicy {
    /// Reject degenerate policies before any generator exists.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::Exact(n) if *n == 0 => Err(ConfigError::InvalidCountPolicy(
                "syllable count must be at least 1".to_string(),
            )),
            Self::Range(min, max) if *min == 0 || min > max => {
                Err(ConfigError::InvalidCountPolicy(format!(
                    "bad range {}..={}",
                    min, max
                )))
            }
            Self::Weighted(entries)
                if entries.is_empty()
                    || entries.iter().any(|(n, _)| *n == 0)
                    || !entries.iter().any(|(_, w)| *w > 0.0) =>
            {
                Err(ConfigError::InvalidCountPolicy(
                    "weighted counts need at least one positive weight".to_string(),
                ))
            }
            _ => Ok(()),
        }
    }

    /// Draw one syllable count. No state is retained between calls.
    pub fn generate_count(&self, rng: &mut StdRng) -> u32 {
        match self {
            Self::Exact(n) => *n,
            Self::Range(min, max) => rng.gen_range(*min..=*max),
            Self::Weighted(entries) => {
                let weights: Vec<f32> = entries.iter().map(|(_, w)| *w).collect();
                match weighted_index(&weights, rng) {
                    Some(i) => entries[i].0,
                    None => entries.first().map(|(n, _)| *n).unwrap_or(1),
                }
            }
        }
    }

    /// Every count this policy can produce, in declaration order. This is
    /// the outermost radix of the sequential enumeration.
    pub fn options(&self) -> Vec<u32> {
        match self {
            Self::Exact(n) => vec![*n],
            Self::Range(min, max) => (*min..=*max).collect(),
            Self::Weighted(entries) => entries
                .iter()
                .filter(|(_, w)| *w > 0.0)
                .map(|(n, _)| *n)
                .collect(),
        }
    }
}

/// Constraint on the class of a word's first phoneme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartingClass {
    Consonant,
    Vowel,
}

/// The full word-level specification: a count policy, the weighted syllable
/// templates, and the rules the generator enforces across syllables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordSpec {
    pub count_policy: SyllableCountPolicy,
    pub patterns: Vec<SyllablePattern>,
    #[serde(default)]
    pub starting_class: Option<StartingClass>,
    /// If set, the last vowel of every generated word must be this symbol.
    /// Membership is validated at configuration time, never at generation
    /// time.
    #[serde(default)]
    pub thematic_vowel: Option<String>,
    #[serde(default)]
    pub starts_with: Option<Vec<String>>,
    #[serde(default)]
    pub ends_with: Option<Vec<String>>,
    /// Forbidden substrings over the whole joined word.
    #[serde(default)]
    pub word_constraints: Vec<String>,
}

impl WordSpec {
    pub fn new(count_policy: SyllableCountPolicy, patterns: Vec<SyllablePattern>) -> Self {
        Self {
            count_policy,
            patterns,
            starting_class: None,
            thematic_vowel: None,
            starts_with: None,
            ends_with: None,
            word_constraints: Vec::new(),
        }
    }

    pub fn generate_syllable_count(&self, rng: &mut StdRng) -> u32 {
        self.count_policy.generate_count(rng)
    }

    /// Pick a template for a syllable at `position` by cumulative-weight
    /// draw over every template's combined weight. Returns the index so
    /// callers can keep template provenance.
    pub fn select_template(&self, position: WordPosition, rng: &mut StdRng) -> Option<usize> {
        let weights: Vec<f32> = self.patterns.iter().map(|p| p.weight_at(position)).collect();
        weighted_index(&weights, rng)
    }

    /// Template indices with non-zero combined weight at `position`, in
    /// declaration order. Used by the sequential enumeration.
    pub fn eligible_templates(&self, position: WordPosition) -> Vec<usize> {
        self.patterns
            .iter()
            .enumerate()
            .filter(|(_, p)| p.weight_at(position) > 0.0)
            .map(|(i, _)| i)
            .collect()
    }

    /// True when no word-level forbidden substring occurs in the joined
    /// sequence.
    pub fn validate_word(&self, sequence: &[String]) -> bool {
        if self.word_constraints.is_empty() {
            return true;
        }
        let joined = sequence.concat();
        !self
            .word_constraints
            .iter()
            .any(|c| joined.contains(c.as_str()))
    }
}
