//! Wordlist: batch word generation from a RON language file.
//!
//! Usage: wordlist --spec <file.ron> [--count <n>] [--seed <n>] [--sequential] [--analyze]
//!
//!   --spec <file.ron>  Language definition to load
//!   --count <n>        Words to generate (default: 20)
//!   --seed <n>         RNG seed (default: 42)
//!   --sequential       Enumerate deterministically instead of sampling
//!   --analyze          Print corpus statistics after the word list

use lexigen::core::analyze::WordAnalyzer;
use lexigen::core::builder::LanguageSpec;
use lexigen::core::generator::GenerationMode;
use std::path::Path;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return;
    }

    let mut spec_path = None;
    let mut count: usize = 20;
    let mut seed: u64 = 42;
    let mut sequential = false;
    let mut analyze = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--spec" if i + 1 < args.len() => {
                i += 1;
                spec_path = Some(args[i].clone());
            }
            "--count" if i + 1 < args.len() => {
                i += 1;
                count = args[i].parse().unwrap_or(20);
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                seed = args[i].parse().unwrap_or(42);
            }
            "--sequential" => {
                sequential = true;
            }
            "--analyze" => {
                analyze = true;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let Some(spec_path) = spec_path else {
        eprintln!("Missing required --spec argument");
        print_usage();
        std::process::exit(1);
    };

    let spec = match LanguageSpec::load_from_ron(Path::new(&spec_path)) {
        Ok(spec) => spec,
        Err(e) => {
            eprintln!("ERROR loading {}: {}", spec_path, e);
            std::process::exit(1);
        }
    };
    println!(
        "Loaded language '{}' ({} consonants, {} vowels, {} patterns)",
        spec.name,
        spec.consonants.len(),
        spec.vowels.len(),
        spec.patterns.len()
    );

    let builder = match spec.into_builder() {
        Ok(builder) => builder,
        Err(e) => {
            eprintln!("ERROR in language definition: {}", e);
            std::process::exit(1);
        }
    };
    let mode = if sequential {
        GenerationMode::Sequential
    } else {
        GenerationMode::Random
    };
    let mut generator = match builder
        .seed(seed)
        .mode(mode)
        .max_words(count as u64)
        .build()
    {
        Ok(generator) => generator,
        Err(e) => {
            eprintln!("ERROR in language definition: {}", e);
            std::process::exit(1);
        }
    };

    let mut words = Vec::with_capacity(count);
    if sequential {
        loop {
            match generator.next_sequential() {
                Ok(Some(word)) => words.push(word),
                Ok(None) => break,
                Err(e) => {
                    eprintln!("ERROR during enumeration: {}", e);
                    std::process::exit(1);
                }
            }
        }
        println!("Enumerated {} words:", words.len());
    } else {
        match generator.generate_batch(count) {
            Ok(batch) => words = batch,
            Err(e) => {
                eprintln!("ERROR during generation: {}", e);
                std::process::exit(1);
            }
        }
        println!("Generated {} words (seed {}):", words.len(), seed);
    }

    for chunk in words.chunks(8) {
        println!("  {}", chunk.join("  "));
    }

    if analyze && !words.is_empty() {
        let analyzer = WordAnalyzer::new(generator.inventory(), generator.romanizer());
        let stats = analyzer.analyze_corpus(&words);

        println!();
        println!("=== Corpus statistics ===");
        println!("words: {} ({} unique)", stats.word_count, stats.unique_words);
        println!("mean length: {:.2} phonemes", stats.mean_length);
        println!("mean complexity: {:.2}", stats.mean_complexity);
        println!();
        println!("Top phonemes (observed vs Gusein-Zade expected):");
        for (rank, (symbol, observed, expected)) in
            stats.gusein_zade_fit.iter().take(10).enumerate()
        {
            println!(
                "  {:>2}. {:>4}  {:.3}  {:.3}",
                rank + 1,
                symbol,
                observed,
                expected
            );
        }
        println!("rank-frequency RMS error: {:.4}", stats.gusein_zade_rms_error);
    }
}

fn print_usage() {
    println!("Wordlist: batch word generation from a RON language file.");
    println!();
    println!("Usage: wordlist --spec <file.ron> [--count <n>] [--seed <n>] [--sequential] [--analyze]");
    println!();
    println!("  --spec <file.ron>  Language definition to load");
    println!("  --count <n>        Words to generate (default: 20)");
    println!("  --seed <n>         RNG seed (default: 42)");
    println!("  --sequential       Enumerate deterministically instead of sampling");
    println!("  --analyze          Print corpus statistics after the word list");
}
