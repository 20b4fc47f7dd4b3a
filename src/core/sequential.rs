//! Exhaustive enumeration of a word grammar.
//!
//! The enumeration space is built once from the inventory and word spec and
//! then decoded purely: an external cursor indexes into the Cartesian
//! product of syllable counts (outermost), template assignments, and
//! per-slot phoneme candidates (last slot varies fastest). Probabilistic
//! features never contribute combinations, so the enumeration covers
//! exactly the deterministic grammar the random modes draw from.

use crate::core::sampling::GenerationError;
use crate::core::syllable::{plan_slots, slot_tags, SlotKind};
use crate::schema::inventory::{PhonemeInventory, SymbolClass};
use crate::schema::pattern::WordPosition;
use crate::schema::word::WordSpec;

/// One syllable of a shape: the producing template and, per slot, the
/// ordered candidate emissions (a cluster candidate spans several tokens).
#[derive(Debug, Clone)]
struct SyllableShape {
    template_index: usize,
    slots: Vec<Vec<Vec<String>>>,
}

/// A fixed choice of syllable count and templates; its phoneme product is
/// one contiguous block of the enumeration.
#[derive(Debug, Clone)]
struct Shape {
    syllables: Vec<SyllableShape>,
    size: u64,
}

impl Shape {
    /// Mixed-radix decode of a block-local index into concrete syllables.
    fn decode(&self, index: u64) -> Vec<(Vec<String>, usize)> {
        let radices: Vec<u64> = self
            .syllables
            .iter()
            .flat_map(|s| s.slots.iter().map(|c| c.len() as u64))
            .collect();
        let mut digits = vec![0u64; radices.len()];
        let mut rest = index;
        for i in (0..radices.len()).rev() {
            digits[i] = rest % radices[i];
            rest /= radices[i];
        }
        let mut out = Vec::with_capacity(self.syllables.len());
        let mut d = 0;
        for syllable in &self.syllables {
            let mut seq = Vec::new();
            for slot in &syllable.slots {
                seq.extend(slot[digits[d] as usize].iter().cloned());
                d += 1;
            }
            out.push((seq, syllable.template_index));
        }
        out
    }
}

/// The complete, ordered enumeration space of a grammar.
#[derive(Debug, Clone)]
pub struct EnumerationSpace {
    shapes: Vec<Shape>,
    total: u64,
}

impl EnumerationSpace {
    /// Build the space: counts in policy order, template assignments with
    /// the first syllable most significant, slot candidates in declaration
    /// order with zero-weight symbols excluded (the random modes can never
    /// draw them either).
    pub fn build(
        inventory: &PhonemeInventory,
        word_spec: &WordSpec,
    ) -> Result<Self, GenerationError> {
        let mut shapes = Vec::new();
        let mut total: u64 = 0;
        for count in word_spec.count_policy.options() {
            let eligible: Vec<Vec<usize>> = (0..count)
                .map(|i| word_spec.eligible_templates(WordPosition::of_index(i, count)))
                .collect();
            if eligible.iter().any(Vec::is_empty) {
                continue;
            }
            let radices: Vec<usize> = eligible.iter().map(Vec::len).collect();
            let mut assignment = vec![0usize; eligible.len()];
            loop {
                let shape = build_shape(inventory, word_spec, count, &eligible, &assignment)?;
                total = total.saturating_add(shape.size);
                shapes.push(shape);
                if !advance(&mut assignment, &radices) {
                    break;
                }
            }
        }
        Ok(Self { shapes, total })
    }

    /// Total number of raw combinations, before word-level filtering.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Pure decode of a global index. Callers keep `index < total()`.
    pub fn decode(&self, index: u64) -> Vec<(Vec<String>, usize)> {
        let mut rest = index;
        for shape in &self.shapes {
            if rest < shape.size {
                return shape.decode(rest);
            }
            rest -= shape.size;
        }
        Vec::new()
    }
}

fn build_shape(
    inventory: &PhonemeInventory,
    word_spec: &WordSpec,
    count: u32,
    eligible: &[Vec<usize>],
    assignment: &[usize],
) -> Result<Shape, GenerationError> {
    let mut syllables = Vec::with_capacity(eligible.len());
    let mut size: u64 = 1;
    for (i, choices) in eligible.iter().enumerate() {
        let template_index = choices[assignment[i]];
        let pattern = &word_spec.patterns[template_index];
        let position = WordPosition::of_index(i as u32, count);
        let slots = plan_slots(pattern, inventory);
        let mut slot_candidates = Vec::with_capacity(slots.len());
        for (j, slot) in slots.iter().enumerate() {
            let tags = slot_tags(position, j, slots.len());
            let candidates: Vec<Vec<String>> = match &slot.kind {
                SlotKind::Cluster(clusters) => clusters.clone(),
                SlotKind::Single(class) => {
                    let (symbols, weights) = inventory.candidates(*class, &tags)?;
                    symbols
                        .iter()
                        .zip(&weights)
                        .filter(|(_, w)| **w > 0.0)
                        .map(|(s, _)| vec![s.to_string()])
                        .collect()
                }
            };
            if candidates.is_empty() {
                let class = match slot.kind {
                    SlotKind::Single(class) => class,
                    SlotKind::Cluster(_) => SymbolClass::Consonant,
                };
                return Err(GenerationError::NoCandidates {
                    class,
                    position: tags,
                });
            }
            size = size.saturating_mul(candidates.len() as u64);
            slot_candidates.push(candidates);
        }
        syllables.push(SyllableShape {
            template_index,
            slots: slot_candidates,
        });
    }
    Ok(Shape { syllables, size })
}

/// Odometer step over template assignments, last syllable fastest.
fn advance(assignment: &mut [usize], radices: &[usize]) -> bool {
    for i in (0..assignment.len()).rev() {
        assignment[i] += 1;
        if assignment[i] < radices[i] {
            return true;
        }
        assignment[i] = 0;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::pattern::SyllablePattern;
    use crate::schema::word::SyllableCountPolicy;

    fn tiny_spec() -> (PhonemeInventory, WordSpec) {
        let inventory = PhonemeInventory::new(["r", "t"], ["a", "e"]);
        let spec = WordSpec::new(
            SyllableCountPolicy::Exact(1),
            vec![SyllablePattern::parse("CV").unwrap()],
        );
        (inventory, spec)
    }

    fn flatten(decoded: Vec<(Vec<String>, usize)>) -> String {
        decoded.into_iter().flat_map(|(s, _)| s).collect()
    }

    #[test]
    fn cv_enumeration_order_is_declaration_order() {
        let (inventory, spec) = tiny_spec();
        let space = EnumerationSpace::build(&inventory, &spec).unwrap();
        assert_eq!(space.total(), 4);
        let words: Vec<String> = (0..4).map(|i| flatten(space.decode(i))).collect();
        assert_eq!(words, vec!["ra", "re", "ta", "te"]);
    }

    #[test]
    fn counts_enumerate_outermost() {
        let inventory = PhonemeInventory::new(["t"], ["a", "e"]);
        let spec = WordSpec::new(
            SyllableCountPolicy::Range(1, 2),
            vec![SyllablePattern::parse("CV").unwrap()],
        );
        let space = EnumerationSpace::build(&inventory, &spec).unwrap();
        // 2 one-syllable words, then 4 two-syllable words.
        assert_eq!(space.total(), 6);
        assert_eq!(flatten(space.decode(0)), "ta");
        assert_eq!(flatten(space.decode(1)), "te");
        assert_eq!(flatten(space.decode(2)), "tata");
        assert_eq!(flatten(space.decode(5)), "tete");
    }

    #[test]
    fn templates_enumerate_between_counts_and_phonemes() {
        let inventory = PhonemeInventory::new(["t"], ["a", "e"]);
        let spec = WordSpec::new(
            SyllableCountPolicy::Exact(1),
            vec![
                SyllablePattern::parse("CV").unwrap(),
                SyllablePattern::parse("V").unwrap(),
            ],
        );
        let space = EnumerationSpace::build(&inventory, &spec).unwrap();
        assert_eq!(space.total(), 4);
        let words: Vec<String> = (0..4).map(|i| flatten(space.decode(i))).collect();
        assert_eq!(words, vec!["ta", "te", "a", "e"]);
    }

    #[test]
    fn zero_weight_symbols_never_enumerate() {
        let (mut inventory, spec) = tiny_spec();
        inventory.set_weight("t", 0.0);
        let space = EnumerationSpace::build(&inventory, &spec).unwrap();
        assert_eq!(space.total(), 2);
        assert_eq!(flatten(space.decode(0)), "ra");
        assert_eq!(flatten(space.decode(1)), "re");
    }

    #[test]
    fn cluster_slots_enumerate_the_whitelist() {
        let inventory = PhonemeInventory::new(["s", "t", "p", "r"], ["a"]);
        let spec = WordSpec::new(
            SyllableCountPolicy::Exact(1),
            vec![SyllablePattern::parse("CCV")
                .unwrap()
                .with_onset_clusters(["st", "pr"])],
        );
        let space = EnumerationSpace::build(&inventory, &spec).unwrap();
        assert_eq!(space.total(), 2);
        assert_eq!(flatten(space.decode(0)), "sta");
        assert_eq!(flatten(space.decode(1)), "pra");
    }

    #[test]
    fn positional_restrictions_shrink_slots() {
        let (mut inventory, spec) = tiny_spec();
        inventory.restrict("t", crate::schema::inventory::Position::SyllableFinal);
        let space = EnumerationSpace::build(&inventory, &spec).unwrap();
        assert_eq!(space.total(), 2);
        assert_eq!(flatten(space.decode(0)), "ra");
    }

    #[test]
    fn empty_slot_is_an_immediate_error() {
        let inventory = PhonemeInventory::new(Vec::<String>::new(), vec!["a".to_string()]);
        let spec = WordSpec::new(
            SyllableCountPolicy::Exact(1),
            vec![SyllablePattern::parse("CV").unwrap()],
        );
        assert!(matches!(
            EnumerationSpace::build(&inventory, &spec),
            Err(GenerationError::NoCandidates { .. })
        ));
    }
}
