//! Structural analysis of romanized words and aggregate corpus statistics,
//! including a Gusein-Zade rank-frequency fit.

use std::collections::HashMap;

use crate::core::romanize::Romanizer;
use crate::schema::inventory::PhonemeInventory;

/// Per-word structural metrics recovered from a romanized surface string.
#[derive(Debug, Clone)]
pub struct WordAnalysis {
    /// The phoneme sequence recovered by longest-match segmentation.
    pub phonemes: Vec<String>,
    pub vowel_count: usize,
    pub consonant_count: usize,
    /// Number of maximal vowel runs, a proxy for syllable nuclei.
    pub syllable_estimate: usize,
    /// Maximal consonant runs of two or more phonemes.
    pub cluster_count: usize,
    /// Adjacent pairs of distinct vowels.
    pub hiatus_count: usize,
    /// Adjacent identical consonants.
    pub gemination_count: usize,
    /// Adjacent identical vowels.
    pub lengthening_count: usize,
    /// Weighted structural load per estimated syllable.
    pub complexity: f32,
}

/// Aggregate statistics over a collection of romanized words.
#[derive(Debug, Clone)]
pub struct CorpusStats {
    pub word_count: usize,
    pub unique_words: usize,
    /// Mean phonemes per word.
    pub mean_length: f32,
    pub mean_complexity: f32,
    /// Phoneme counts, most frequent first.
    pub phoneme_frequencies: Vec<(String, usize)>,
    /// Per rank: symbol, observed relative frequency, Gusein-Zade expected
    /// relative frequency.
    pub gusein_zade_fit: Vec<(String, f32, f32)>,
    /// Root-mean-square deviation between observed and expected.
    pub gusein_zade_rms_error: f32,
}

/// Expected relative frequency of the phoneme at `rank` (1-based) among
/// `n` phonemes under the Gusein-Zade rank-frequency law.
pub fn gusein_zade(n: usize, rank: usize) -> f32 {
    if n == 0 || rank == 0 || rank > n {
        return 0.0;
    }
    (((n + 1) as f32 / rank as f32).ln()) / n as f32
}

/// Reverse-engineers structure from romanized words, using the inventory
/// and the romanization table that produced them.
pub struct WordAnalyzer<'a> {
    inventory: &'a PhonemeInventory,
    /// Grapheme-to-symbol entries, longest grapheme first.
    table: Vec<(String, String)>,
}

impl<'a> WordAnalyzer<'a> {
    pub fn new(inventory: &'a PhonemeInventory, romanizer: &'a Romanizer) -> Self {
        let mut table: Vec<(String, String)> = Vec::new();
        for (symbol, grapheme) in &romanizer.mappings {
            table.push((grapheme.clone(), symbol.clone()));
        }
        let known = inventory
            .consonants
            .iter()
            .chain(inventory.vowels.iter())
            .chain(inventory.custom_groups.values().flatten());
        for symbol in known {
            if romanizer.grapheme(symbol).is_none() {
                table.push((symbol.clone(), symbol.clone()));
            }
        }
        // Longest match first; the sort is stable, so explicit mappings
        // keep priority over identity entries of equal length.
        table.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        Self { inventory, table }
    }

    /// Re-segment a romanized word into the phoneme sequence that produced
    /// it. Text matching no known grapheme falls back to single characters,
    /// mirroring the romanizer's pass-through behavior.
    pub fn segment(&self, word: &str) -> Vec<String> {
        let mut rest = word;
        let mut out = Vec::new();
        while !rest.is_empty() {
            let hit = self
                .table
                .iter()
                .find(|(g, _)| !g.is_empty() && rest.starts_with(g.as_str()));
            match hit {
                Some((grapheme, symbol)) => {
                    out.push(symbol.clone());
                    rest = &rest[grapheme.len()..];
                }
                None => {
                    let c = rest.chars().next().unwrap_or('\0');
                    out.push(c.to_string());
                    rest = &rest[c.len_utf8()..];
                }
            }
        }
        out
    }

    pub fn analyze(&self, word: &str) -> WordAnalysis {
        let phonemes = self.segment(word);
        let vowel: Vec<bool> = phonemes.iter().map(|p| self.inventory.is_vowel(p)).collect();

        let vowel_count = vowel.iter().filter(|v| **v).count();
        let consonant_count = phonemes.len() - vowel_count;

        let mut syllable_estimate = 0;
        let mut cluster_count = 0;
        let mut consonant_run = 0;
        let mut vowel_run = 0;
        for &is_v in &vowel {
            if is_v {
                if vowel_run == 0 {
                    syllable_estimate += 1;
                }
                vowel_run += 1;
                if consonant_run >= 2 {
                    cluster_count += 1;
                }
                consonant_run = 0;
            } else {
                consonant_run += 1;
                vowel_run = 0;
            }
        }
        if consonant_run >= 2 {
            cluster_count += 1;
        }

        let mut hiatus_count = 0;
        let mut gemination_count = 0;
        let mut lengthening_count = 0;
        for i in 1..phonemes.len() {
            match (vowel[i - 1], vowel[i]) {
                (true, true) if phonemes[i - 1] == phonemes[i] => lengthening_count += 1,
                (true, true) => hiatus_count += 1,
                (false, false) if phonemes[i - 1] == phonemes[i] => gemination_count += 1,
                _ => {}
            }
        }

        let load = phonemes.len()
            + 2 * cluster_count
            + hiatus_count
            + gemination_count
            + lengthening_count;
        let complexity = load as f32 / syllable_estimate.max(1) as f32;

        WordAnalysis {
            phonemes,
            vowel_count,
            consonant_count,
            syllable_estimate,
            cluster_count,
            hiatus_count,
            gemination_count,
            lengthening_count,
            complexity,
        }
    }

    /// Frequency statistics over a word collection, with the Gusein-Zade
    /// smoothing model fitted against the observed phoneme ranking.
    pub fn analyze_corpus(&self, words: &[String]) -> CorpusStats {
        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut total_phonemes = 0usize;
        let mut total_complexity = 0f32;
        let mut unique: Vec<&String> = Vec::new();

        for word in words {
            if !unique.contains(&word) {
                unique.push(word);
            }
            let analysis = self.analyze(word);
            total_phonemes += analysis.phonemes.len();
            total_complexity += analysis.complexity;
            for phoneme in analysis.phonemes {
                *counts.entry(phoneme).or_insert(0) += 1;
            }
        }

        let mut phoneme_frequencies: Vec<(String, usize)> = counts.into_iter().collect();
        phoneme_frequencies.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let n = phoneme_frequencies.len();
        let mut gusein_zade_fit = Vec::with_capacity(n);
        let mut squared_error = 0f32;
        for (rank, (symbol, count)) in phoneme_frequencies.iter().enumerate() {
            let observed = if total_phonemes > 0 {
                *count as f32 / total_phonemes as f32
            } else {
                0.0
            };
            let expected = gusein_zade(n, rank + 1);
            squared_error += (observed - expected) * (observed - expected);
            gusein_zade_fit.push((symbol.clone(), observed, expected));
        }
        let gusein_zade_rms_error = if n > 0 {
            (squared_error / n as f32).sqrt()
        } else {
            0.0
        };

        CorpusStats {
            word_count: words.len(),
            unique_words: unique.len(),
            mean_length: if words.is_empty() {
                0.0
            } else {
                total_phonemes as f32 / words.len() as f32
            },
            mean_complexity: if words.is_empty() {
                0.0
            } else {
                total_complexity / words.len() as f32
            },
            phoneme_frequencies,
            gusein_zade_fit,
            gusein_zade_rms_error,
        }
    }
}
