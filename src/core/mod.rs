//! The generation runtime: sampling, syllable assembly, the word-level
//! generator with its three modes, and the surrounding collaborators
//! (builder, romanizer, analyzers).

pub mod analyze;
pub mod builder;
pub mod generator;
pub mod romanize;
pub mod sampling;
pub mod sequential;
pub mod syllable;
