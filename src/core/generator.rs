//! The word-level generator: mode dispatch, word-level rule enforcement,
//! and the global rejection-sampling loop with its attempt ceiling.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::core::builder::LanguageBuilder;
use crate::core::romanize::Romanizer;
use crate::core::sampling::GenerationError;
use crate::core::sequential::EnumerationSpace;
use crate::core::syllable::assemble_syllable;
use crate::schema::inventory::PhonemeInventory;
use crate::schema::pattern::WordPosition;
use crate::schema::word::{StartingClass, WordSpec};

/// Default ceiling on whole-word rejection-sampling attempts. Exceeding it
/// means the configured constraints are jointly unsatisfiable in practice.
pub const DEFAULT_MAX_WORD_ATTEMPTS: u32 = 10_000;

/// How words are produced.
///
/// `Random` and `WeightedRandom` are deliberately kept as two labeled,
/// functionally equivalent sampling paths: configured weights are honored
/// on both, so callers switching between them see stable semantics.
/// `Sequential` enumerates the grammar exhaustively and is terminal once
/// the cursor passes `max_words` or the enumeration size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    Random,
    WeightedRandom,
    Sequential,
}

/// Generates words from a phoneme inventory and a word specification.
///
/// The only mutable state is the sequential cursor and the generation
/// counter behind seeding; a generator instance is single-writer and
/// carries no internal locking.
pub struct WordGenerator {
    pub(crate) inventory: PhonemeInventory,
    pub(crate) word_spec: WordSpec,
    pub(crate) romanizer: Romanizer,
    pub(crate) mode: GenerationMode,
    pub(crate) max_words: u64,
    pub(crate) max_attempts: u32,
    pub(crate) seed: u64,
    generation_count: u64,
    cursor: u64,
    enumeration: Option<EnumerationSpace>,
}

impl WordGenerator {
    pub fn builder() -> LanguageBuilder {
        LanguageBuilder::new()
    }

    pub(crate) fn new(
        inventory: PhonemeInventory,
        word_spec: WordSpec,
        romanizer: Romanizer,
        mode: GenerationMode,
        max_words: u64,
        max_attempts: u32,
        seed: u64,
    ) -> Self {
        Self {
            inventory,
            word_spec,
            romanizer,
            mode,
            max_words,
            max_attempts,
            seed,
            generation_count: 0,
            cursor: 0,
            enumeration: None,
        }
    }

    pub fn inventory(&self) -> &PhonemeInventory {
        &self.inventory
    }

    pub fn romanizer(&self) -> &Romanizer {
        &self.romanizer
    }

    pub fn word_spec(&self) -> &WordSpec {
        &self.word_spec
    }

    pub fn mode(&self) -> GenerationMode {
        self.mode
    }

    /// Generate one surface word in the configured mode.
    pub fn generate(&mut self) -> Result<String, GenerationError> {
        self.generate_with(None, None)
    }

    /// Generate one word with per-call overrides for the syllable count and
    /// the starting class. In sequential mode the overrides do not apply:
    /// the enumeration advances instead.
    pub fn generate_with(
        &mut self,
        syllable_count: Option<u32>,
        starting_class: Option<StartingClass>,
    ) -> Result<String, GenerationError> {
        let phonemes = match self.mode {
            GenerationMode::Random => self.sample_random(syllable_count, starting_class)?,
            GenerationMode::WeightedRandom => {
                self.sample_weighted(syllable_count, starting_class)?
            }
            GenerationMode::Sequential => match self.next_sequential_phonemes()? {
                Some(p) => p,
                None => {
                    return Err(GenerationError::GenerationExhausted(0));
                }
            },
        };
        Ok(self.romanizer.romanize(&phonemes))
    }

    /// Generate the raw phoneme sequence of one word, before romanization.
    pub fn generate_phonemes(&mut self) -> Result<Vec<String>, GenerationError> {
        match self.mode {
            GenerationMode::Random => self.sample_random(None, None),
            GenerationMode::WeightedRandom => self.sample_weighted(None, None),
            GenerationMode::Sequential => self
                .next_sequential_phonemes()?
                .ok_or(GenerationError::GenerationExhausted(0)),
        }
    }

    /// Generate `n` words. Calls are independent: no cross-call state and
    /// no deduplication.
    pub fn generate_batch(&mut self, n: usize) -> Result<Vec<String>, GenerationError> {
        let mut words = Vec::with_capacity(n);
        for _ in 0..n {
            words.push(self.generate()?);
        }
        Ok(words)
    }

    /// Advance the deterministic enumeration by one word.
    ///
    /// Returns `Ok(None)` once the cursor reaches `max_words` or the full
    /// enumeration size, whichever is smaller. Combinations that fail the
    /// word-level rules are skipped; the cursor still advances past them.
    pub fn next_sequential(&mut self) -> Result<Option<String>, GenerationError> {
        Ok(self
            .next_sequential_phonemes()?
            .map(|phonemes| self.romanizer.romanize(&phonemes)))
    }

    /// Rewind the enumeration so the sequence replays from its first word.
    pub fn reset_sequential(&mut self) {
        self.cursor = 0;
    }

    fn next_sequential_phonemes(&mut self) -> Result<Option<Vec<String>>, GenerationError> {
        if self.enumeration.is_none() {
            self.enumeration = Some(EnumerationSpace::build(&self.inventory, &self.word_spec)?);
        }
        let Some(space) = self.enumeration.as_ref() else {
            return Ok(None);
        };
        let limit = space.total().min(self.max_words);
        let mut cursor = self.cursor;
        let mut found = None;
        while cursor < limit {
            let decoded = space.decode(cursor);
            cursor += 1;
            if validate_candidate(&self.inventory, &self.word_spec, &decoded, None) {
                found = Some(decoded);
                break;
            }
        }
        self.cursor = cursor;
        Ok(found.map(|syllables| syllables.into_iter().flat_map(|(s, _)| s).collect()))
    }

    // Random mode. Weights are honored here as everywhere in the inventory.
    fn sample_random(
        &mut self,
        syllable_count: Option<u32>,
        starting_class: Option<StartingClass>,
    ) -> Result<Vec<String>, GenerationError> {
        self.rejection_sample(syllable_count, starting_class)
    }

    // Weighted-random mode. Identical semantics to `sample_random`; the
    // label exists so the two modes stay distinct at the call surface.
    fn sample_weighted(
        &mut self,
        syllable_count: Option<u32>,
        starting_class: Option<StartingClass>,
    ) -> Result<Vec<String>, GenerationError> {
        self.rejection_sample(syllable_count, starting_class)
    }

    /// The whole-word rejection-sampling loop: draw a syllable count, pick
    /// and assemble a template per syllable, then apply every word-level
    /// rule. Any failure discards the entire candidate and restarts from
    /// the count draw.
    fn rejection_sample(
        &mut self,
        syllable_count: Option<u32>,
        starting_class: Option<StartingClass>,
    ) -> Result<Vec<String>, GenerationError> {
        if self.word_spec.patterns.is_empty() {
            return Err(GenerationError::GenerationExhausted(0));
        }
        let mut rng = StdRng::seed_from_u64(
            self.seed
                .wrapping_add(self.generation_count.wrapping_mul(7919)),
        );
        for _ in 0..self.max_attempts {
            let count =
                syllable_count.unwrap_or_else(|| self.word_spec.generate_syllable_count(&mut rng));
            let mut syllables: Vec<(Vec<String>, usize)> = Vec::with_capacity(count as usize);
            for i in 0..count {
                let position = WordPosition::of_index(i, count);
                let template_index = self
                    .word_spec
                    .select_template(position, &mut rng)
                    .unwrap_or(0);
                let pattern = &self.word_spec.patterns[template_index];
                let sequence = assemble_syllable(pattern, &self.inventory, position, &mut rng)?;
                syllables.push((sequence, template_index));
            }
            if validate_candidate(&self.inventory, &self.word_spec, &syllables, starting_class) {
                self.generation_count += 1;
                return Ok(syllables.into_iter().flat_map(|(s, _)| s).collect());
            }
        }
        Err(GenerationError::GenerationExhausted(self.max_attempts))
    }
}

/// Apply every word-level rule to an assembled candidate.
pub(crate) fn validate_candidate(
    inventory: &PhonemeInventory,
    word_spec: &WordSpec,
    syllables: &[(Vec<String>, usize)],
    starting_class: Option<StartingClass>,
) -> bool {
    let flat: Vec<String> = syllables
        .iter()
        .flat_map(|(s, _)| s.iter().cloned())
        .collect();
    if flat.is_empty() {
        return false;
    }
    if !word_spec.validate_word(&flat) {
        return false;
    }
    if let Some(class) = starting_class.or(word_spec.starting_class) {
        let first_is_vowel = inventory.is_vowel(&flat[0]);
        let matches = match class {
            StartingClass::Vowel => first_is_vowel,
            StartingClass::Consonant => !first_is_vowel,
        };
        if !matches {
            return false;
        }
    }
    if let Some(prefix) = &word_spec.starts_with {
        if !flat.starts_with(prefix) {
            return false;
        }
    }
    if let Some(suffix) = &word_spec.ends_with {
        if !flat.ends_with(suffix) {
            return false;
        }
    }
    if let Some(thematic) = &word_spec.thematic_vowel {
        match flat.iter().rev().find(|s| inventory.is_vowel(s)) {
            Some(last_vowel) if last_vowel == thematic => {}
            _ => return false,
        }
    }
    smooth_across_syllables(inventory, word_spec, syllables, &flat)
}

/// Cross-syllable smoothing: reject three or more consecutive vowels, and
/// identical symbols touching across a syllable boundary, unless the
/// template on the left edge has the corresponding feature enabled.
fn smooth_across_syllables(
    inventory: &PhonemeInventory,
    word_spec: &WordSpec,
    syllables: &[(Vec<String>, usize)],
    flat: &[String],
) -> bool {
    let mut owner = Vec::with_capacity(flat.len());
    for (si, (seq, _)) in syllables.iter().enumerate() {
        for _ in seq {
            owner.push(si);
        }
    }

    let vowel_run_excused = |start: usize, len: usize| -> bool {
        (start..start + len).any(|i| {
            let (_, template_index) = syllables[owner[i]];
            let template = &word_spec.patterns[template_index];
            template.allows_hiatus() || template.vowel_lengthening_probability > 0.0
        })
    };

    let mut run_start = 0;
    let mut run_len = 0;
    for (i, symbol) in flat.iter().enumerate() {
        if inventory.is_vowel(symbol) {
            if run_len == 0 {
                run_start = i;
            }
            run_len += 1;
        } else {
            if run_len >= 3 && !vowel_run_excused(run_start, run_len) {
                return false;
            }
            run_len = 0;
        }
    }
    if run_len >= 3 && !vowel_run_excused(run_start, run_len) {
        return false;
    }

    for pair in syllables.windows(2) {
        let (left, left_template) = &pair[0];
        let (right, _) = &pair[1];
        if let (Some(l), Some(r)) = (left.last(), right.first()) {
            if l == r {
                let template = &word_spec.patterns[*left_template];
                let excused = if inventory.is_vowel(l) {
                    template.allows_hiatus() || template.vowel_lengthening_probability > 0.0
                } else {
                    template.gemination_probability > 0.0
                };
                if !excused {
                    return false;
                }
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::pattern::SyllablePattern;
    use crate::schema::word::SyllableCountPolicy;

    fn generator(mode: GenerationMode) -> WordGenerator {
        let inventory = PhonemeInventory::new(["p", "t", "r"], ["a", "e"]);
        let spec = WordSpec::new(
            SyllableCountPolicy::Exact(2),
            vec![SyllablePattern::parse("CV").unwrap()],
        );
        WordGenerator::new(
            inventory,
            spec,
            Romanizer::new(),
            mode,
            u64::MAX,
            DEFAULT_MAX_WORD_ATTEMPTS,
            42,
        )
    }

    #[test]
    fn generate_is_deterministic_for_a_seed() {
        let mut a = generator(GenerationMode::Random);
        let mut b = generator(GenerationMode::Random);
        for _ in 0..10 {
            assert_eq!(a.generate().unwrap(), b.generate().unwrap());
        }
    }

    #[test]
    fn different_seeds_eventually_differ() {
        let mut a = generator(GenerationMode::Random);
        let words_a: Vec<String> = (0..10).map(|_| a.generate().unwrap()).collect();
        let mut found_different = false;
        for seed in 1..50 {
            let mut b = generator(GenerationMode::Random);
            b.seed = seed;
            let words_b: Vec<String> = (0..10).map(|_| b.generate().unwrap()).collect();
            if words_a != words_b {
                found_different = true;
                break;
            }
        }
        assert!(found_different);
    }

    #[test]
    fn both_random_modes_accept_the_same_grammar() {
        let mut random = generator(GenerationMode::Random);
        let mut weighted = generator(GenerationMode::WeightedRandom);
        assert_eq!(random.generate().unwrap(), weighted.generate().unwrap());
    }

    #[test]
    fn syllable_count_override_changes_length() {
        let mut g = generator(GenerationMode::Random);
        let word = g.generate_with(Some(3), None).unwrap();
        assert_eq!(word.chars().count(), 6);
    }

    #[test]
    fn starting_class_override_holds_for_all_trials() {
        let inventory = PhonemeInventory::new(["p", "t"], ["a", "e"]);
        let spec = WordSpec::new(
            SyllableCountPolicy::Exact(1),
            vec![
                SyllablePattern::parse("CV").unwrap(),
                SyllablePattern::parse("VC").unwrap(),
            ],
        );
        let mut g = WordGenerator::new(
            inventory,
            spec,
            Romanizer::new(),
            GenerationMode::Random,
            u64::MAX,
            DEFAULT_MAX_WORD_ATTEMPTS,
            7,
        );
        for _ in 0..30 {
            let word = g.generate_with(None, Some(StartingClass::Vowel)).unwrap();
            let first = word.chars().next().unwrap();
            assert!("ae".contains(first), "word {} starts with {}", word, first);
        }
    }

    #[test]
    fn batch_produces_requested_count() {
        let mut g = generator(GenerationMode::Random);
        let words = g.generate_batch(25).unwrap();
        assert_eq!(words.len(), 25);
        for w in &words {
            assert_eq!(w.chars().count(), 4);
        }
    }

    #[test]
    fn exhausted_constraints_raise_after_the_ceiling() {
        let inventory = PhonemeInventory::new(["t"], ["a"]);
        let mut spec = WordSpec::new(
            SyllableCountPolicy::Exact(1),
            vec![SyllablePattern::parse("CV").unwrap()],
        );
        spec.word_constraints = vec!["ta".to_string()];
        let mut g = WordGenerator::new(
            inventory,
            spec,
            Romanizer::new(),
            GenerationMode::Random,
            u64::MAX,
            50,
            1,
        );
        assert!(matches!(
            g.generate(),
            Err(GenerationError::GenerationExhausted(50))
        ));
    }

    #[test]
    fn boundary_doubles_are_rejected_without_features() {
        let inventory = PhonemeInventory::new(["t"], ["a", "e"]);
        let pattern = SyllablePattern::parse("VC").unwrap();
        let spec = WordSpec::new(SyllableCountPolicy::Exact(2), vec![pattern.clone()]);
        let doubled = vec![
            (vec!["a".to_string(), "t".to_string()], 0),
            (vec!["t".to_string(), "a".to_string()], 0),
        ];
        assert!(!validate_candidate(&inventory, &spec, &doubled, None));

        let excused = WordSpec::new(
            SyllableCountPolicy::Exact(2),
            vec![pattern.with_gemination(0.5)],
        );
        assert!(validate_candidate(&inventory, &excused, &doubled, None));
    }

    #[test]
    fn smoothing_rejects_triple_vowels_without_features() {
        let inventory = PhonemeInventory::new(["t"], ["a", "e"]);
        let plain = SyllablePattern::parse("V").unwrap();
        let spec = WordSpec::new(SyllableCountPolicy::Exact(3), vec![plain.clone()]);
        let syllables = vec![
            (vec!["a".to_string()], 0),
            (vec!["e".to_string()], 0),
            (vec!["a".to_string()], 0),
        ];
        assert!(!validate_candidate(&inventory, &spec, &syllables, None));

        let excused = WordSpec::new(
            SyllableCountPolicy::Exact(3),
            vec![plain.with_hiatus(0.5)],
        );
        assert!(validate_candidate(&inventory, &excused, &syllables, None));
    }

    #[test]
    fn thematic_vowel_binds_the_last_vowel() {
        let inventory = PhonemeInventory::new(["t"], ["a", "e"]);
        let mut spec = WordSpec::new(
            SyllableCountPolicy::Exact(2),
            vec![SyllablePattern::parse("CV").unwrap()],
        );
        spec.thematic_vowel = Some("a".to_string());
        let mut g = WordGenerator::new(
            inventory,
            spec,
            Romanizer::new(),
            GenerationMode::Random,
            u64::MAX,
            DEFAULT_MAX_WORD_ATTEMPTS,
            11,
        );
        for _ in 0..25 {
            let word = g.generate().unwrap();
            let last_vowel = word.chars().filter(|c| "ae".contains(*c)).last().unwrap();
            assert_eq!(last_vowel, 'a', "word {}", word);
        }
    }
}
