//! The shared cumulative-weight draw primitive and generation-time errors.

use rand::distributions::WeightedIndex;
use rand::prelude::Distribution;
use rand::rngs::StdRng;
use thiserror::Error;

use crate::schema::inventory::{Position, SymbolClass};

/// Generation-time failures. None of these is expected control flow: each
/// one indicates a misconfigured grammar and is reported to the caller
/// rather than swallowed.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("no candidate phonemes for {class} at {position:?}")]
    NoCandidates {
        class: SymbolClass,
        position: Vec<Position>,
    },
    #[error("unknown phoneme group '{0}'")]
    UnknownGroup(char),
    #[error("syllable constraints still unsatisfied after {0} attempts")]
    UnsatisfiableConstraint(u32),
    #[error("word generation exhausted after {0} attempts")]
    GenerationExhausted(u32),
}

/// Pick an index into a parallel slice of weights by cumulative-weight draw.
///
/// Returns `None` when the slice is empty or the weights cannot form a
/// distribution (all zero, or any negative), which callers surface as
/// [`GenerationError::NoCandidates`].
pub fn weighted_index(weights: &[f32], rng: &mut StdRng) -> Option<usize> {
    if weights.is_empty() {
        return None;
    }
    let dist = WeightedIndex::new(weights).ok()?;
    Some(dist.sample(rng))
}
