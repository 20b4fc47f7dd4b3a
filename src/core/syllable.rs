//! Syllable assembly: realizes one template into a concrete phoneme
//! sequence, honoring cluster whitelists, hiatus, gemination, vowel
//! lengthening, and the template's local constraints.

use rand::rngs::StdRng;
use rand::Rng;

use crate::core::sampling::GenerationError;
use crate::schema::inventory::{PhonemeInventory, Position, SymbolClass};
use crate::schema::pattern::{SyllablePattern, WordPosition};

/// Retry ceiling for satisfying one syllable's local constraints.
pub const MAX_SYLLABLE_ATTEMPTS: u32 = 100;

/// Bounded resample budget when steering a draw away from a repeat. Once
/// spent, the repeat is accepted: no alternative may exist.
const MAX_DISTINCT_ATTEMPTS: u32 = 16;

/// One emission step of a planned syllable.
#[derive(Debug, Clone)]
pub(crate) enum SlotKind {
    /// A whitelisted cluster slot; each candidate is already segmented into
    /// inventory phonemes.
    Cluster(Vec<Vec<String>>),
    /// A single weighted draw from a symbol class.
    Single(SymbolClass),
}

#[derive(Debug, Clone)]
pub(crate) struct Slot {
    pub(crate) kind: SlotKind,
    /// Set on the last slot of a vowel run: the hiatus feature may append
    /// one extra vowel here.
    pub(crate) hiatus_eligible: bool,
}

struct Run {
    class: SymbolClass,
    len: usize,
}

fn partition_runs(symbols: &[SymbolClass]) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();
    for &class in symbols {
        match runs.last_mut() {
            Some(run) if run.class == class => run.len += 1,
            _ => runs.push(Run { class, len: 1 }),
        }
    }
    runs
}

/// Greedy longest-match segmentation of a cluster string into inventory
/// consonants. `None` when some part of the string matches no consonant,
/// which marks the cluster unrealizable.
pub fn segment_cluster(cluster: &str, inventory: &PhonemeInventory) -> Option<Vec<String>> {
    let mut rest = cluster;
    let mut parts = Vec::new();
    while !rest.is_empty() {
        let hit = inventory
            .consonants
            .iter()
            .filter(|c| rest.starts_with(c.as_str()))
            .max_by_key(|c| c.len())?;
        parts.push(hit.clone());
        rest = &rest[hit.len()..];
    }
    Some(parts)
}

fn realizable_clusters(whitelist: &[String], inventory: &PhonemeInventory) -> Vec<Vec<String>> {
    whitelist
        .iter()
        .filter_map(|c| segment_cluster(c, inventory))
        .collect()
}

/// Expand a template into its emission plan against a concrete inventory.
///
/// Consonant runs of length two or more become cluster slots when a
/// realizable whitelist exists, and degrade to a single consonant slot
/// otherwise: clusters are strictly opt-in, and the degradation is policy,
/// not an error. Vowel and group runs expand into one slot per symbol.
pub(crate) fn plan_slots(pattern: &SyllablePattern, inventory: &PhonemeInventory) -> Vec<Slot> {
    let runs = partition_runs(&pattern.symbols);
    let last_run = runs.len().saturating_sub(1);
    let mut slots = Vec::new();
    for (ri, run) in runs.iter().enumerate() {
        let vowelish = match run.class {
            SymbolClass::Vowel => true,
            SymbolClass::Group('V') => true,
            SymbolClass::Group(id) if id != 'C' => inventory.is_group_vowel_like(id),
            _ => false,
        };
        if run.class == SymbolClass::Consonant && run.len >= 2 {
            let whitelist = if ri == last_run && ri != 0 {
                pattern.coda_clusters.as_deref()
            } else {
                pattern.onset_clusters.as_deref()
            };
            let candidates = whitelist
                .map(|w| realizable_clusters(w, inventory))
                .unwrap_or_default();
            if candidates.is_empty() {
                slots.push(Slot {
                    kind: SlotKind::Single(SymbolClass::Consonant),
                    hiatus_eligible: false,
                });
            } else {
                slots.push(Slot {
                    kind: SlotKind::Cluster(candidates),
                    hiatus_eligible: false,
                });
            }
        } else {
            for j in 0..run.len {
                slots.push(Slot {
                    kind: SlotKind::Single(run.class),
                    hiatus_eligible: vowelish && j == run.len - 1,
                });
            }
        }
    }
    slots
}

/// Position tags applicable to slot `index` of `total`, given the
/// syllable's place in the word. A restricted symbol is allowed when its
/// allow-set intersects these tags.
pub(crate) fn slot_tags(
    word_position: WordPosition,
    index: usize,
    total: usize,
) -> Vec<Position> {
    let first = index == 0;
    let last = index + 1 == total;
    let word_initial = first && word_position == WordPosition::Initial;
    let word_final = last && word_position == WordPosition::Final;
    let mut tags = Vec::with_capacity(3);
    if first {
        tags.push(Position::SyllableInitial);
    }
    if last {
        tags.push(Position::SyllableFinal);
    }
    if word_initial {
        tags.push(Position::WordInitial);
    }
    if word_final {
        tags.push(Position::WordFinal);
    }
    if !word_initial && !word_final {
        tags.push(Position::WordMedial);
    }
    tags
}

fn sample_distinct_from(
    inventory: &PhonemeInventory,
    class: SymbolClass,
    tags: &[Position],
    avoid: Option<&str>,
    rng: &mut StdRng,
) -> Result<String, GenerationError> {
    let mut symbol = inventory.sample_at(class, tags, rng)?;
    for _ in 0..MAX_DISTINCT_ATTEMPTS {
        if avoid != Some(symbol.as_str()) {
            break;
        }
        symbol = inventory.sample_at(class, tags, rng)?;
    }
    Ok(symbol)
}

fn try_assemble(
    pattern: &SyllablePattern,
    slots: &[Slot],
    inventory: &PhonemeInventory,
    rng: &mut StdRng,
    word_position: WordPosition,
) -> Result<Vec<String>, GenerationError> {
    let mut out: Vec<String> = Vec::new();
    for (i, slot) in slots.iter().enumerate() {
        let tags = slot_tags(word_position, i, slots.len());
        match &slot.kind {
            SlotKind::Cluster(candidates) => {
                let choice = &candidates[rng.gen_range(0..candidates.len())];
                out.extend(choice.iter().cloned());
            }
            SlotKind::Single(class) => {
                let previous = out.last().cloned();
                let symbol =
                    sample_distinct_from(inventory, *class, &tags, previous.as_deref(), rng)?;
                let is_vowel = inventory.is_vowel(&symbol);
                out.push(symbol.clone());
                if is_vowel {
                    if rng.gen::<f32>() < pattern.vowel_lengthening_probability {
                        out.push(symbol);
                    }
                } else if rng.gen::<f32>() < pattern.gemination_probability {
                    out.push(symbol);
                }
            }
        }
        if slot.hiatus_eligible && rng.gen::<f32>() < pattern.hiatus_probability {
            let previous = out.last().cloned();
            let extra = sample_distinct_from(
                inventory,
                SymbolClass::Vowel,
                &tags,
                previous.as_deref(),
                rng,
            )?;
            out.push(extra);
        }
    }
    Ok(out)
}

/// Realize one syllable of `pattern` at `word_position`.
///
/// Local constraint violations discard the whole syllable and retry, up to
/// [`MAX_SYLLABLE_ATTEMPTS`]. Empty sampling sets surface immediately as
/// [`GenerationError::NoCandidates`]: no retry changes that outcome.
pub fn assemble_syllable(
    pattern: &SyllablePattern,
    inventory: &PhonemeInventory,
    word_position: WordPosition,
    rng: &mut StdRng,
) -> Result<Vec<String>, GenerationError> {
    let slots = plan_slots(pattern, inventory);
    for _ in 0..MAX_SYLLABLE_ATTEMPTS {
        let candidate = try_assemble(pattern, &slots, inventory, rng, word_position)?;
        if pattern.validate(&candidate) {
            return Ok(candidate);
        }
    }
    Err(GenerationError::UnsatisfiableConstraint(
        MAX_SYLLABLE_ATTEMPTS,
    ))
}
