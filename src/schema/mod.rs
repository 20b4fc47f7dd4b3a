//! The passive data model: everything a language definition is made of.
//!
//! Types here carry no generation state. The runtime in [`crate::core`]
//! borrows them per call.

pub mod inventory;
pub mod pattern;
pub mod word;

use thiserror::Error;

/// Configuration-time failures. These surface while a language is being
/// defined or loaded, never during generation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("group id '{0}' is reserved for the built-in class")]
    ReservedSymbol(char),
    #[error("pattern references undefined group '{0}'")]
    UndefinedGroup(char),
    #[error("thematic vowel '{0}' is not classified as a vowel by the inventory")]
    InvalidThematicVowel(String),
    #[error("invalid syllable pattern: {0}")]
    InvalidPattern(String),
    #[error("invalid syllable count policy: {0}")]
    InvalidCountPolicy(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}
