//! Elvish demo: build the preset language, generate a vocabulary batch,
//! and report corpus statistics.
//!
//! Run with: cargo run --example elvish

use lexigen::core::analyze::WordAnalyzer;
use lexigen::presets;

fn main() {
    let mut generator = presets::elvish()
        .into_builder()
        .expect("elvish preset should lower cleanly")
        .seed(2026)
        .build()
        .expect("elvish preset should validate");

    let words = generator
        .generate_batch(30)
        .expect("generation should succeed");

    println!("--- 30 elvish words ---");
    for chunk in words.chunks(6) {
        println!("{}", chunk.join("  "));
    }

    let analyzer = WordAnalyzer::new(generator.inventory(), generator.romanizer());
    let stats = analyzer.analyze_corpus(&words);

    println!();
    println!("words: {} ({} unique)", stats.word_count, stats.unique_words);
    println!("mean length: {:.1} phonemes", stats.mean_length);
    println!("mean complexity: {:.2}", stats.mean_complexity);
    println!();
    println!("rank  phoneme  observed  expected (Gusein-Zade)");
    for (rank, (symbol, observed, expected)) in stats.gusein_zade_fit.iter().take(8).enumerate() {
        println!(
            "{:>4}  {:>7}  {:>8.3}  {:>8.3}",
            rank + 1,
            symbol,
            observed,
            expected
        );
    }
    println!("rank-frequency RMS error: {:.4}", stats.gusein_zade_rms_error);
}
