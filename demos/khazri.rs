//! Khazri demo: harsh cluster-heavy words, plus an exhaustive sequential
//! enumeration of a cut-down version of the same grammar.
//!
//! Run with: cargo run --example khazri

use lexigen::core::builder::LanguageBuilder;
use lexigen::core::generator::GenerationMode;
use lexigen::presets;
use lexigen::schema::pattern::SyllablePattern;
use lexigen::schema::word::SyllableCountPolicy;

fn main() {
    let mut generator = presets::khazri()
        .into_builder()
        .expect("khazri preset should lower cleanly")
        .seed(41)
        .build()
        .expect("khazri preset should validate");

    println!("--- random khazri words ---");
    let words = generator
        .generate_batch(12)
        .expect("generation should succeed");
    for chunk in words.chunks(4) {
        println!("{}", chunk.join("  "));
    }

    // A small deterministic grammar enumerated to exhaustion.
    let pattern = SyllablePattern::parse("CV").expect("literal pattern");
    let mut sequential = LanguageBuilder::new()
        .consonants(["k", "r", "z"])
        .vowels(["a", "u"])
        .pattern(pattern)
        .syllables(SyllableCountPolicy::Exact(1))
        .mode(GenerationMode::Sequential)
        .build()
        .expect("sequential grammar should validate");

    println!();
    println!("--- exhaustive one-syllable enumeration ---");
    let mut row = Vec::new();
    while let Some(word) = sequential
        .next_sequential()
        .expect("enumeration should not fail")
    {
        row.push(word);
    }
    println!("{}", row.join("  "));
}
