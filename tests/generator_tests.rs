//! Generation integration tests: word shape, weighting, word-level rules.

use lexigen::core::builder::{LanguageBuilder, LanguageSpec};
use lexigen::core::generator::{GenerationMode, WordGenerator};
use lexigen::core::sampling::GenerationError;
use lexigen::schema::inventory::Position;
use lexigen::schema::pattern::SyllablePattern;
use lexigen::schema::word::{StartingClass, SyllableCountPolicy};

fn cv_language(syllables: SyllableCountPolicy) -> LanguageBuilder {
    WordGenerator::builder()
        .consonants(["p", "t", "r"])
        .vowels(["a", "e", "i", "o"])
        .pattern(SyllablePattern::parse("CV").unwrap())
        .syllables(syllables)
}

#[test]
fn cv_words_have_two_phonemes_per_syllable() {
    let mut generator = cv_language(SyllableCountPolicy::Exact(3))
        .seed(1)
        .build()
        .unwrap();
    for _ in 0..50 {
        let word = generator.generate().unwrap();
        assert_eq!(word.chars().count(), 6, "word {}", word);
    }
}

#[test]
fn starting_class_holds_for_all_trials() {
    let mut generator = WordGenerator::builder()
        .consonants(["p", "t"])
        .vowels(["a", "e"])
        .pattern(SyllablePattern::parse("CV").unwrap())
        .pattern(SyllablePattern::parse("VC").unwrap())
        .syllables(SyllableCountPolicy::Exact(2))
        .starting_class(StartingClass::Vowel)
        .seed(5)
        .build()
        .unwrap();
    for _ in 0..50 {
        let word = generator.generate().unwrap();
        let first = word.chars().next().unwrap();
        assert!("ae".contains(first), "word {} starts with {}", word, first);
    }
}

#[test]
fn certain_hiatus_yields_two_distinct_vowels() {
    let mut generator = WordGenerator::builder()
        .consonants(["t"])
        .vowels(["a", "e", "i"])
        .pattern(SyllablePattern::parse("V").unwrap().with_hiatus(1.0))
        .syllables(SyllableCountPolicy::Exact(1))
        .seed(9)
        .build()
        .unwrap();
    for _ in 0..50 {
        let word = generator.generate().unwrap();
        let vowels: Vec<char> = word.chars().collect();
        assert_eq!(vowels.len(), 2, "word {}", word);
        assert_ne!(vowels[0], vowels[1], "word {}", word);
    }
}

#[test]
fn gemination_disabled_never_doubles() {
    let mut generator = WordGenerator::builder()
        .consonants(["t", "r"])
        .vowels(["a", "e"])
        .pattern(SyllablePattern::parse("CV").unwrap().with_gemination(0.0))
        .syllables(SyllableCountPolicy::Exact(3))
        .seed(2)
        .build()
        .unwrap();
    for _ in 0..100 {
        let word = generator.generate().unwrap();
        let chars: Vec<char> = word.chars().collect();
        for pair in chars.windows(2) {
            assert!(
                !("tr".contains(pair[0]) && pair[0] == pair[1]),
                "doubled consonant in {}",
                word
            );
        }
    }
}

#[test]
fn certain_gemination_doubles_every_consonant() {
    let mut generator = WordGenerator::builder()
        .consonants(["t", "r"])
        .vowels(["a", "e"])
        .pattern(SyllablePattern::parse("CV").unwrap().with_gemination(1.0))
        .syllables(SyllableCountPolicy::Exact(2))
        .seed(3)
        .build()
        .unwrap();
    let mut doubled_seen = false;
    for _ in 0..20 {
        let word = generator.generate().unwrap();
        if word.contains("tt") || word.contains("rr") {
            doubled_seen = true;
        }
    }
    assert!(doubled_seen, "no doubled consonant in 20 certain-gemination words");
}

#[test]
fn weighted_sampling_dominates_over_100_draws() {
    let mut generator = WordGenerator::builder()
        .consonants(["p", "t"])
        .vowels(["a"])
        .weight("p", 50.0)
        .weight("t", 1.0)
        .pattern(SyllablePattern::parse("CV").unwrap())
        .syllables(SyllableCountPolicy::Exact(1))
        .seed(42)
        .build()
        .unwrap();
    let mut p_count = 0;
    let mut t_count = 0;
    for _ in 0..100 {
        let word = generator.generate().unwrap();
        match word.chars().next().unwrap() {
            'p' => p_count += 1,
            't' => t_count += 1,
            other => panic!("unexpected onset {}", other),
        }
    }
    assert!(
        p_count > t_count,
        "expected p ({}) to beat t ({})",
        p_count,
        t_count
    );
}

#[test]
fn thematic_vowel_is_always_the_last_vowel() {
    let mut generator = WordGenerator::builder()
        .consonants(["t", "r"])
        .vowels(["a", "e", "i"])
        .pattern(SyllablePattern::parse("CV").unwrap().with_hiatus(0.5))
        .syllables(SyllableCountPolicy::Range(1, 3))
        .thematic_vowel("a")
        .seed(17)
        .build()
        .unwrap();
    for _ in 0..50 {
        let word = generator.generate().unwrap();
        let last_vowel = word.chars().filter(|c| "aei".contains(*c)).last().unwrap();
        assert_eq!(last_vowel, 'a', "word {}", word);
    }
}

#[test]
fn forbidden_substring_never_appears() {
    let mut generator = WordGenerator::builder()
        .consonants(["r", "t"])
        .vowels(["a", "e"])
        .pattern(SyllablePattern::parse("CV").unwrap().with_gemination(0.5))
        .syllables(SyllableCountPolicy::Range(1, 3))
        .forbid("rr")
        .seed(23)
        .build()
        .unwrap();
    for _ in 0..100 {
        let word = generator.generate().unwrap();
        assert!(!word.contains("rr"), "forbidden substring in {}", word);
    }
}

#[test]
fn boundary_sequences_bind_the_raw_symbols() {
    let mut generator = WordGenerator::builder()
        .consonants(["t", "r"])
        .vowels(["a", "e"])
        .pattern(SyllablePattern::parse("CV").unwrap())
        .syllables(SyllableCountPolicy::Exact(2))
        .starts_with(["t", "a"])
        .ends_with(["e"])
        .seed(31)
        .build()
        .unwrap();
    for _ in 0..20 {
        let word = generator.generate().unwrap();
        assert!(word.starts_with("ta"), "word {}", word);
        assert!(word.ends_with('e'), "word {}", word);
    }
}

#[test]
fn empty_positional_pool_surfaces_no_candidates() {
    let mut generator = WordGenerator::builder()
        .consonants(["h"])
        .vowels(["a"])
        .restrict("h", Position::WordFinal)
        .pattern(SyllablePattern::parse("CV").unwrap())
        .syllables(SyllableCountPolicy::Exact(1))
        .seed(1)
        .build()
        .unwrap();
    assert!(matches!(
        generator.generate(),
        Err(GenerationError::NoCandidates { .. })
    ));
}

#[test]
fn jointly_unsatisfiable_rules_exhaust_the_ceiling() {
    // "i" is a registered vowel, so configuration passes, but its sampling
    // weight is zero: no draw can ever produce it and the retry loop must
    // hit its ceiling.
    let mut generator = WordGenerator::builder()
        .consonants(["t"])
        .vowels(["a", "i"])
        .weight("i", 0.0)
        .pattern(SyllablePattern::parse("CV").unwrap())
        .syllables(SyllableCountPolicy::Exact(1))
        .thematic_vowel("i")
        .max_attempts(200)
        .seed(13)
        .build()
        .unwrap();
    assert!(matches!(
        generator.generate(),
        Err(GenerationError::GenerationExhausted(200))
    ));
}

#[test]
fn fixture_language_loads_and_generates() {
    let path = std::path::Path::new("tests/fixtures/elvish.ron");
    let spec = LanguageSpec::load_from_ron(path).unwrap();
    let mut generator = spec.into_builder().unwrap().seed(2026).build().unwrap();
    let words = generator.generate_batch(20).unwrap();
    assert_eq!(words.len(), 20);
    for word in &words {
        assert!(!word.contains('θ'), "unromanized phoneme in {}", word);
        assert!(!word.contains("θs"), "forbidden substring in {}", word);
    }
}

#[test]
fn random_and_weighted_random_modes_agree() {
    let words_random: Vec<String> = {
        let mut g = cv_language(SyllableCountPolicy::Exact(2))
            .mode(GenerationMode::Random)
            .seed(8)
            .build()
            .unwrap();
        (0..10).map(|_| g.generate().unwrap()).collect()
    };
    let words_weighted: Vec<String> = {
        let mut g = cv_language(SyllableCountPolicy::Exact(2))
            .mode(GenerationMode::WeightedRandom)
            .seed(8)
            .build()
            .unwrap();
        (0..10).map(|_| g.generate().unwrap()).collect()
    };
    assert_eq!(words_random, words_weighted);
}
