//! Language configuration: the fluent builder and the RON language-spec
//! document. All configuration-time validation happens here, before a
//! generator ever exists.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::generator::{GenerationMode, WordGenerator, DEFAULT_MAX_WORD_ATTEMPTS};
use crate::core::romanize::Romanizer;
use crate::schema::inventory::{PhonemeInventory, Position, SymbolClass};
use crate::schema::pattern::{SyllablePattern, WordPosition};
use crate::schema::word::{StartingClass, SyllableCountPolicy, WordSpec};
use crate::schema::ConfigError;

/// Fluent configuration for a [`WordGenerator`].
///
/// Terminates in [`LanguageBuilder::build`], which validates the whole
/// configuration and surfaces [`ConfigError`] before returning a generator.
pub struct LanguageBuilder {
    consonants: Vec<String>,
    vowels: Vec<String>,
    groups: Vec<(char, Vec<String>)>,
    weights: Vec<(String, f32)>,
    positions: Vec<(String, Position)>,
    patterns: Vec<SyllablePattern>,
    count_policy: SyllableCountPolicy,
    starting_class: Option<StartingClass>,
    thematic_vowel: Option<String>,
    starts_with: Option<Vec<String>>,
    ends_with: Option<Vec<String>>,
    word_constraints: Vec<String>,
    romanization: Vec<(String, String)>,
    mode: GenerationMode,
    max_words: u64,
    max_attempts: u32,
    seed: u64,
}

impl Default for LanguageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageBuilder {
    pub fn new() -> Self {
        Self {
            consonants: Vec::new(),
            vowels: Vec::new(),
            groups: Vec::new(),
            weights: Vec::new(),
            positions: Vec::new(),
            patterns: Vec::new(),
            count_policy: SyllableCountPolicy::Exact(2),
            starting_class: None,
            thematic_vowel: None,
            starts_with: None,
            ends_with: None,
            word_constraints: Vec::new(),
            romanization: Vec::new(),
            mode: GenerationMode::Random,
            max_words: u64::MAX,
            max_attempts: DEFAULT_MAX_WORD_ATTEMPTS,
            seed: 0,
        }
    }

    pub fn consonants<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.consonants.extend(symbols.into_iter().map(Into::into));
        self
    }

    pub fn vowels<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.vowels.extend(symbols.into_iter().map(Into::into));
        self
    }

    /// Declare a custom symbol group under a single-character id.
    pub fn group<I, S>(mut self, id: char, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups
            .push((id, members.into_iter().map(Into::into).collect()));
        self
    }

    pub fn weight(mut self, symbol: impl Into<String>, weight: f32) -> Self {
        self.weights.push((symbol.into(), weight));
        self
    }

    pub fn restrict(mut self, symbol: impl Into<String>, position: Position) -> Self {
        self.positions.push((symbol.into(), position));
        self
    }

    pub fn pattern(mut self, pattern: SyllablePattern) -> Self {
        self.patterns.push(pattern);
        self
    }

    pub fn syllables(mut self, policy: SyllableCountPolicy) -> Self {
        self.count_policy = policy;
        self
    }

    pub fn starting_class(mut self, class: StartingClass) -> Self {
        self.starting_class = Some(class);
        self
    }

    pub fn thematic_vowel(mut self, vowel: impl Into<String>) -> Self {
        self.thematic_vowel = Some(vowel.into());
        self
    }

    pub fn starts_with<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.starts_with = Some(symbols.into_iter().map(Into::into).collect());
        self
    }

    pub fn ends_with<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ends_with = Some(symbols.into_iter().map(Into::into).collect());
        self
    }

    /// Forbid a substring anywhere in generated words.
    pub fn forbid(mut self, substring: impl Into<String>) -> Self {
        self.word_constraints.push(substring.into());
        self
    }

    pub fn romanize(mut self, symbol: impl Into<String>, grapheme: impl Into<String>) -> Self {
        self.romanization.push((symbol.into(), grapheme.into()));
        self
    }

    pub fn mode(mut self, mode: GenerationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Upper bound on sequential enumeration output.
    pub fn max_words(mut self, max_words: u64) -> Self {
        self.max_words = max_words;
        self
    }

    /// Ceiling on whole-word rejection-sampling attempts.
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validate the configuration and hand over a generator.
    pub fn build(self) -> Result<WordGenerator, ConfigError> {
        let mut inventory = PhonemeInventory::new(self.consonants, self.vowels);
        for (id, members) in self.groups {
            inventory.add_group(id, members)?;
        }
        for (symbol, weight) in self.weights {
            inventory.set_weight(symbol, weight);
        }
        for (symbol, position) in self.positions {
            inventory.restrict(symbol, position);
        }

        if self.patterns.is_empty() {
            return Err(ConfigError::InvalidPattern(
                "no syllable patterns configured".to_string(),
            ));
        }
        for pattern in &self.patterns {
            for class in &pattern.symbols {
                if let SymbolClass::Group(id) = class {
                    if !inventory.defines(*class) {
                        return Err(ConfigError::UndefinedGroup(*id));
                    }
                }
            }
        }
        self.count_policy.validate()?;
        if let Some(vowel) = &self.thematic_vowel {
            if !inventory.is_vowel(vowel) {
                return Err(ConfigError::InvalidThematicVowel(vowel.clone()));
            }
        }

        let mut word_spec = WordSpec::new(self.count_policy, self.patterns);
        word_spec.starting_class = self.starting_class;
        word_spec.thematic_vowel = self.thematic_vowel;
        word_spec.starts_with = self.starts_with;
        word_spec.ends_with = self.ends_with;
        word_spec.word_constraints = self.word_constraints;

        let mut romanizer = Romanizer::new();
        for (symbol, grapheme) in self.romanization {
            romanizer.add(symbol, grapheme);
        }

        Ok(WordGenerator::new(
            inventory,
            word_spec,
            romanizer,
            self.mode,
            self.max_words,
            self.max_attempts,
            self.seed,
        ))
    }
}

/// One syllable template of a RON language document. The knobs mirror
/// [`SyllablePattern`] with data-file-friendly defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternSpec {
    pub pattern: String,
    #[serde(default)]
    pub constraints: Vec<String>,
    #[serde(default)]
    pub hiatus: f32,
    #[serde(default)]
    pub gemination: f32,
    #[serde(default)]
    pub lengthening: f32,
    #[serde(default)]
    pub onset_clusters: Option<Vec<String>>,
    #[serde(default)]
    pub coda_clusters: Option<Vec<String>>,
    #[serde(default = "default_weight")]
    pub weight: f32,
    #[serde(default)]
    pub position_weights: Vec<(WordPosition, f32)>,
}

fn default_weight() -> f32 {
    1.0
}

/// A complete declarative language definition, loadable from a RON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageSpec {
    pub name: String,
    pub consonants: Vec<String>,
    pub vowels: Vec<String>,
    #[serde(default)]
    pub groups: Vec<(char, Vec<String>)>,
    #[serde(default)]
    pub weights: Vec<(String, f32)>,
    #[serde(default)]
    pub positions: Vec<(String, Vec<Position>)>,
    pub patterns: Vec<PatternSpec>,
    pub syllables: SyllableCountPolicy,
    #[serde(default)]
    pub starting_class: Option<StartingClass>,
    #[serde(default)]
    pub thematic_vowel: Option<String>,
    #[serde(default)]
    pub starts_with: Option<Vec<String>>,
    #[serde(default)]
    pub ends_with: Option<Vec<String>>,
    #[serde(default)]
    pub forbid: Vec<String>,
    #[serde(default)]
    pub romanization: Vec<(String, String)>,
}

impl LanguageSpec {
    /// Load a language definition from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a language definition from a RON string.
    pub fn parse_ron(input: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(input)?)
    }

    /// Lower the document into a builder, compiling every pattern. The
    /// result still goes through [`LanguageBuilder::build`] validation.
    pub fn into_builder(self) -> Result<LanguageBuilder, ConfigError> {
        let mut builder = LanguageBuilder::new()
            .consonants(self.consonants)
            .vowels(self.vowels)
            .syllables(self.syllables);
        for (id, members) in self.groups {
            builder = builder.group(id, members);
        }
        for (symbol, weight) in self.weights {
            builder = builder.weight(symbol, weight);
        }
        for (symbol, positions) in self.positions {
            for position in positions {
                builder = builder.restrict(symbol.clone(), position);
            }
        }
        for entry in self.patterns {
            let mut pattern = SyllablePattern::parse(&entry.pattern)?
                .with_constraints(entry.constraints)
                .with_hiatus(entry.hiatus)
                .with_gemination(entry.gemination)
                .with_vowel_lengthening(entry.lengthening)
                .with_selection_probability(entry.weight);
            if let Some(onsets) = entry.onset_clusters {
                pattern = pattern.with_onset_clusters(onsets);
            }
            if let Some(codas) = entry.coda_clusters {
                pattern = pattern.with_coda_clusters(codas);
            }
            for (position, weight) in entry.position_weights {
                pattern = pattern.with_position_weight(position, weight);
            }
            builder = builder.pattern(pattern);
        }
        if let Some(class) = self.starting_class {
            builder = builder.starting_class(class);
        }
        if let Some(vowel) = self.thematic_vowel {
            builder = builder.thematic_vowel(vowel);
        }
        if let Some(prefix) = self.starts_with {
            builder = builder.starts_with(prefix);
        }
        if let Some(suffix) = self.ends_with {
            builder = builder.ends_with(suffix);
        }
        for substring in self.forbid {
            builder = builder.forbid(substring);
        }
        for (symbol, grapheme) in self.romanization {
            builder = builder.romanize(symbol, grapheme);
        }
        Ok(builder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_builder() -> LanguageBuilder {
        LanguageBuilder::new()
            .consonants(["p", "t", "r"])
            .vowels(["a", "e"])
            .pattern(SyllablePattern::parse("CV").unwrap())
    }

    #[test]
    fn build_produces_a_working_generator() {
        let mut generator = base_builder().seed(42).build().unwrap();
        let word = generator.generate().unwrap();
        assert_eq!(word.chars().count(), 4);
    }

    #[test]
    fn reserved_group_id_fails_at_build() {
        let result = base_builder().group('V', ["a"]).build();
        assert!(matches!(result, Err(ConfigError::ReservedSymbol('V'))));
    }

    #[test]
    fn undefined_pattern_group_fails_at_build() {
        let result = base_builder()
            .pattern(SyllablePattern::parse("CVN").unwrap())
            .build();
        assert!(matches!(result, Err(ConfigError::UndefinedGroup('N'))));
    }

    #[test]
    fn declared_pattern_group_passes() {
        let result = base_builder()
            .group('N', ["m", "n"])
            .pattern(SyllablePattern::parse("CVN").unwrap())
            .build();
        assert!(result.is_ok());
    }

    #[test]
    fn invalid_thematic_vowel_fails_at_build() {
        let result = base_builder().thematic_vowel("t").build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidThematicVowel(v)) if v == "t"
        ));
    }

    #[test]
    fn ipa_fallback_vowel_is_a_valid_thematic_vowel() {
        // "ø" is not registered anywhere but classifies through the
        // fallback table.
        let result = base_builder().thematic_vowel("ø").build();
        assert!(result.is_ok());
    }

    #[test]
    fn missing_patterns_fail_at_build() {
        let result = LanguageBuilder::new()
            .consonants(["t"])
            .vowels(["a"])
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidPattern(_))));
    }

    #[test]
    fn degenerate_count_policy_fails_at_build() {
        let result = base_builder()
            .syllables(SyllableCountPolicy::Range(4, 2))
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidCountPolicy(_))));
    }

    #[test]
    fn parse_minimal_language_spec() {
        let source = r#"(
            name: "toy",
            consonants: ["t", "r"],
            vowels: ["a", "e"],
            patterns: [(pattern: "CV")],
            syllables: Exact(2),
        )"#;
        let spec = LanguageSpec::parse_ron(source).unwrap();
        assert_eq!(spec.name, "toy");
        let mut generator = spec.into_builder().unwrap().seed(1).build().unwrap();
        assert_eq!(generator.generate().unwrap().chars().count(), 4);
    }

    #[test]
    fn spec_patterns_carry_their_knobs() {
        let source = r#"(
            name: "knobs",
            consonants: ["s", "t", "p", "r"],
            vowels: ["a"],
            patterns: [(
                pattern: "CCV",
                onset_clusters: Some(["st", "pr"]),
                gemination: 0.0,
                weight: 2.0,
            )],
            syllables: Exact(1),
            forbid: ["rr"],
            romanization: [("s", "ş")],
        )"#;
        let spec = LanguageSpec::parse_ron(source).unwrap();
        let builder = spec.into_builder().unwrap();
        let generator = builder.build().unwrap();
        assert_eq!(generator.word_spec().word_constraints, vec!["rr"]);
        assert_eq!(generator.romanizer().grapheme("s"), Some("ş"));
        let pattern = &generator.word_spec().patterns[0];
        assert_eq!(pattern.onset_clusters.as_deref().unwrap().len(), 2);
        assert!((pattern.selection_probability - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn spec_with_bad_pattern_group_fails_validation() {
        let source = r#"(
            name: "broken",
            consonants: ["t"],
            vowels: ["a"],
            patterns: [(pattern: "CVX")],
            syllables: Exact(1),
        )"#;
        let spec = LanguageSpec::parse_ron(source).unwrap();
        let result = spec.into_builder().unwrap().build();
        assert!(matches!(result, Err(ConfigError::UndefinedGroup('X'))));
    }
}
