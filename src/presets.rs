//! Ready-made language definitions, usable as-is or as starting points.
//!
//! Each preset is plain [`LanguageSpec`] data; lower it with
//! [`LanguageSpec::into_builder`] and adjust before building.

use crate::core::builder::{LanguageSpec, PatternSpec};
use crate::schema::pattern::WordPosition;
use crate::schema::word::SyllableCountPolicy;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// A flowing, vowel-rich language in the high-fantasy elvish mold: liquids
/// and nasals dominate, hiatus is common, clusters are absent.
pub fn elvish() -> LanguageSpec {
    LanguageSpec {
        name: "elvish".to_string(),
        consonants: strings(&["l", "r", "n", "m", "t", "s", "v", "θ"]),
        vowels: strings(&["a", "e", "i", "o"]),
        groups: vec![('N', strings(&["n", "m"]))],
        weights: vec![
            ("l".to_string(), 3.0),
            ("n".to_string(), 2.5),
            ("r".to_string(), 2.0),
            ("θ".to_string(), 0.8),
            ("a".to_string(), 3.0),
            ("e".to_string(), 2.5),
            ("i".to_string(), 2.0),
        ],
        positions: vec![],
        patterns: vec![
            PatternSpec {
                pattern: "CV".to_string(),
                constraints: vec![],
                hiatus: 0.15,
                gemination: 0.0,
                lengthening: 0.05,
                onset_clusters: None,
                coda_clusters: None,
                weight: 3.0,
                position_weights: vec![],
            },
            PatternSpec {
                pattern: "CVN".to_string(),
                constraints: vec![],
                hiatus: 0.0,
                gemination: 0.0,
                lengthening: 0.0,
                onset_clusters: None,
                coda_clusters: None,
                weight: 1.0,
                position_weights: vec![(WordPosition::Final, 2.0)],
            },
            PatternSpec {
                pattern: "V".to_string(),
                constraints: vec![],
                hiatus: 0.1,
                gemination: 0.0,
                lengthening: 0.0,
                onset_clusters: None,
                coda_clusters: None,
                weight: 0.5,
                position_weights: vec![(WordPosition::Initial, 2.0)],
            },
        ],
        syllables: SyllableCountPolicy::Weighted(vec![(2, 3.0), (3, 2.0), (4, 0.5)]),
        starting_class: None,
        thematic_vowel: None,
        starts_with: None,
        ends_with: None,
        forbid: strings(&["θs", "sθ"]),
        romanization: vec![("θ".to_string(), "th".to_string())],
    }
}

/// A harsh, cluster-heavy language: back consonants, few vowels, frequent
/// gemination, whitelisted onset clusters.
pub fn khazri() -> LanguageSpec {
    LanguageSpec {
        name: "khazri".to_string(),
        consonants: strings(&["k", "g", "d", "r", "z", "t", "x", "ɣ"]),
        vowels: strings(&["a", "o", "u"]),
        groups: vec![],
        weights: vec![
            ("k".to_string(), 2.5),
            ("r".to_string(), 2.0),
            ("d".to_string(), 1.5),
            ("a".to_string(), 2.0),
            ("u".to_string(), 1.5),
        ],
        positions: vec![("ɣ".to_string(), vec![crate::schema::inventory::Position::SyllableFinal])],
        patterns: vec![
            PatternSpec {
                pattern: "CVC".to_string(),
                constraints: strings(&["xx"]),
                hiatus: 0.0,
                gemination: 0.2,
                lengthening: 0.0,
                onset_clusters: None,
                coda_clusters: None,
                weight: 2.0,
                position_weights: vec![],
            },
            PatternSpec {
                pattern: "CCVC".to_string(),
                constraints: vec![],
                hiatus: 0.0,
                gemination: 0.0,
                lengthening: 0.0,
                onset_clusters: Some(strings(&["dr", "gr", "zd", "kr"])),
                coda_clusters: None,
                weight: 1.0,
                position_weights: vec![(WordPosition::Initial, 2.0)],
            },
        ],
        syllables: SyllableCountPolicy::Range(1, 3),
        starting_class: None,
        thematic_vowel: None,
        starts_with: None,
        ends_with: None,
        forbid: strings(&["rr"]),
        romanization: vec![
            ("x".to_string(), "kh".to_string()),
            ("ɣ".to_string(), "gh".to_string()),
        ],
    }
}
