pub mod table;
pub mod version;

pub use self::version::{RuleConfig, Version};

use crate::error::{M209Error, M209Result};
use crate::key::lugs::displacement_vector;
use crate::machine::{
    bar_count, lug_count_sequence, overlaps, pair_type, single_type, wheel_bit, TypeCount, BARS,
    EMPTY_BAR, PATTERNS, TYPES, TYPE_COUNT_SIZE, WHEELS,
};
use fastrand::Rng;
use std::cmp::Ordering;
use tracing::{debug, info, warn};

/// Sorted per-wheel lug counts, smallest first.
pub type LugCountSequence = [u8; WHEELS];

const MAX_RANDOMIZE_ATTEMPTS: usize = 100_000;
const MAX_OVERLAP_PLACEMENT_STEPS: usize = 1_000;

/// Legality rules for lug placement under one [`RuleConfig`].
///
/// Built once before any worker starts, then shared read-only.
#[derive(Debug, Clone)]
pub struct LugRules {
    config: RuleConfig,
    sequences: Vec<LugCountSequence>,
    search_types: Vec<usize>,
}

impl LugRules {
    pub fn new(config: RuleConfig) -> M209Result<Self> {
        config.validate()?;

        let uses_sequences = !config.bars_only() && !config.is_unrestricted();
        let sequences = if !uses_sequences {
            Vec::new()
        } else if config.from_table {
            table_sequences(&config)
        } else {
            enumerate_sequences(&config)
        };

        if uses_sequences && sequences.is_empty() {
            return Err(M209Error::Config(format!(
                "No admissible lug-count sequence for {}",
                config.version
            )));
        }
        info!(
            "🔩 {} lug rules: {} admissible lug-count sequences",
            config.version,
            sequences.len()
        );

        let search_types = if config.is_unrestricted() {
            std::iter::once(EMPTY_BAR).chain(TYPES).collect()
        } else if config.max_overlap == 0 {
            (0..WHEELS).map(single_type).collect()
        } else {
            TYPES.to_vec()
        };

        Ok(Self {
            config,
            sequences,
            search_types,
        })
    }

    pub fn for_version(version: Version) -> M209Result<Self> {
        Self::new(RuleConfig::for_version(version))
    }

    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    /// Admissible sorted lug-count sequences, lexicographic order.
    pub fn sequences(&self) -> &[LugCountSequence] {
        &self.sequences
    }

    /// Same set as [`Self::sequences`], in the order the operating manuals
    /// list them.
    pub fn sequences_sorted_for_display(&self) -> Vec<LugCountSequence> {
        let mut sorted = self.sequences.clone();
        sorted.sort_by(display_order);
        sorted
    }

    /// Lug types the hill climber may move bars between.
    pub fn search_types(&self) -> &[usize] {
        &self.search_types
    }

    pub fn is_type_count_compliant(&self, type_count: &TypeCount) -> bool {
        if self.config.is_unrestricted() {
            return true;
        }
        if self.config.bars_only() {
            return bar_count(type_count) == BARS;
        }
        let mut seq = lug_count_sequence(type_count);
        seq.sort_unstable();
        self.sequences.binary_search(&seq).is_ok()
    }

    /// Applies `changes[i]` to `type_count[types[i]]` and keeps the result if
    /// every touched cell stays within its bounds and the overlap count
    /// stays within the configured range. Otherwise `type_count` is left
    /// untouched and `false` is returned.
    pub fn do_changes_if_valid(
        &self,
        type_count: &mut TypeCount,
        types: &[usize],
        changes: &[i8],
    ) -> bool {
        debug_assert_eq!(types.len(), changes.len());
        for (&t, &delta) in types.iter().zip(changes) {
            let updated = type_count[t] as i16 + delta as i16;
            if updated < 0 || (delta > 0 && updated > self.cell_capacity(t) as i16) {
                return false;
            }
        }
        for (&t, &delta) in types.iter().zip(changes) {
            type_count[t] = (type_count[t] as i16 + delta as i16) as u8;
        }
        let ov = overlaps(type_count);
        if ov < self.config.min_overlap || ov > self.config.max_overlap {
            self.undo_changes(type_count, types, changes);
            return false;
        }
        true
    }

    pub fn undo_changes(&self, type_count: &mut TypeCount, types: &[usize], changes: &[i8]) {
        for (&t, &delta) in types.iter().zip(changes) {
            type_count[t] = (type_count[t] as i16 - delta as i16) as u8;
        }
    }

    fn cell_capacity(&self, t: usize) -> usize {
        match t {
            EMPTY_BAR => BARS,
            1..=6 => self.config.max_kick as usize,
            _ => self.config.max_overlap,
        }
    }

    /// Draws a random lug placement legal under these rules.
    ///
    /// `required_overlap == 0` accepts any overlap count within bounds.
    pub fn randomize(&self, rng: &mut Rng, required_overlap: usize) -> M209Result<TypeCount> {
        let cfg = &self.config;
        if required_overlap != 0
            && (required_overlap < cfg.min_overlap || required_overlap > cfg.max_overlap)
        {
            return Err(M209Error::Config(format!(
                "Required overlap {} outside {}..={}",
                required_overlap, cfg.min_overlap, cfg.max_overlap
            )));
        }

        let candidates: Vec<&LugCountSequence> = self
            .sequences
            .iter()
            .filter(|s| {
                let ov = sequence_overlaps(s);
                if required_overlap != 0 {
                    ov == required_overlap as i32
                } else {
                    ov >= cfg.min_overlap as i32 && ov <= cfg.max_overlap as i32
                }
            })
            .collect();

        for _ in 0..MAX_RANDOMIZE_ATTEMPTS {
            let drawn = match cfg.version {
                Version::Unrestricted => Some(random_unrestricted(rng)),
                Version::Swedish => Some(random_swedish(rng, cfg.max_overlap)),
                Version::NoOverlap => Some(random_no_overlap(rng)),
                _ => {
                    if candidates.is_empty() {
                        return Err(M209Error::Config(format!(
                            "No lug-count sequence with {} overlaps for {}",
                            required_overlap, cfg.version
                        )));
                    }
                    let seq = candidates[rng.usize(..candidates.len())];
                    self.random_from_sequence(rng, seq)
                }
            };
            if let Some(tc) = drawn {
                if self.complies_with_manual_rules(&tc) {
                    return Ok(tc);
                }
            }
        }

        Err(M209Error::RandomizationExhausted {
            what: "lugs",
            attempts: MAX_RANDOMIZE_ATTEMPTS,
        })
    }

    /// Spreads `seq` over randomly permuted wheels, places the overlapping
    /// bars, and fills the remainder with single-wheel bars. `None` when the
    /// overlap placement dead-ends.
    fn random_from_sequence(&self, rng: &mut Rng, seq: &LugCountSequence) -> Option<TypeCount> {
        let mut perm: [usize; WHEELS] = [0, 1, 2, 3, 4, 5];
        rng.shuffle(&mut perm);

        let mut target = [0u8; WHEELS];
        for (i, &w) in perm.iter().enumerate() {
            target[w] = seq[i];
        }

        let mut tc: TypeCount = [0; TYPE_COUNT_SIZE];
        let mut actual = [0u8; WHEELS];
        let mut remaining = sequence_overlaps(seq);
        let mut steps = 0;

        while remaining > 0 {
            steps += 1;
            if steps > MAX_OVERLAP_PLACEMENT_STEPS || !self.pair_left(&target, &actual, &tc) {
                return None;
            }
            let w1 = wheel_with_count_left(rng, &target, &actual, None)?;
            actual[w1] += 1;
            let Some(w2) = wheel_with_count_left(rng, &target, &actual, Some(w1)) else {
                return None;
            };
            let t = pair_type(w1, w2);
            if !self.accept_similar_overlap(rng, tc[t] as usize) {
                actual[w1] -= 1;
                continue;
            }
            actual[w2] += 1;
            tc[t] += 1;
            remaining -= 1;
        }

        for w in 0..WHEELS {
            tc[single_type(w)] = target[w] - actual[w];
        }
        Some(tc)
    }

    /// Some pair of wheels can still take an overlapping bar.
    fn pair_left(&self, target: &[u8; WHEELS], actual: &[u8; WHEELS], tc: &TypeCount) -> bool {
        let open = |w: usize| actual[w] < target[w];
        (0..WHEELS).any(|w1| {
            open(w1)
                && ((w1 + 1)..WHEELS).any(|w2| {
                    open(w2) && (tc[pair_type(w1, w2)] as usize) < self.config.max_same_overlap
                })
        })
    }

    fn accept_similar_overlap(&self, rng: &mut Rng, same: usize) -> bool {
        if same >= self.config.max_same_overlap {
            return false;
        }
        if !self.config.overlaps_evenly {
            return true;
        }
        // Each repeat of the same pair halves the odds.
        let threshold = 64usize >> same.min(6);
        rng.usize(..64) < threshold
    }

    /// Secondary checks taken from the historical operating instructions.
    pub fn complies_with_manual_rules(&self, tc: &TypeCount) -> bool {
        let cfg = &self.config;
        if cfg.version == Version::Swedish {
            return bar_count(tc) == BARS && overlaps(tc) <= cfg.max_overlap;
        }

        let mut per_wheel = [0usize; WHEELS];
        let mut total = 0;
        let mut adjacent = 0;
        for w1 in 0..WHEELS {
            for w2 in (w1 + 1)..WHEELS {
                let count = tc[pair_type(w1, w2)] as usize;
                if count > cfg.max_same_overlap {
                    return false;
                }
                per_wheel[w1] += count;
                per_wheel[w2] += count;
                total += count;
                if w2 == w1 + 1 {
                    adjacent += count;
                }
            }
        }

        if total > 1 {
            if cfg.min_involved_wheels > 0 {
                let involved = per_wheel.iter().filter(|&&c| c > 0).count();
                if involved < cfg.min_involved_wheels {
                    return false;
                }
            }
            if cfg.overlaps_side_by_side_separated && (adjacent == 0 || adjacent == total) {
                return false;
            }
        }

        if cfg.max_total_overlap < WHEELS {
            let only_overlapping = (0..WHEELS).filter(|&w| tc[single_type(w)] == 0).count();
            if only_overlapping > cfg.max_total_overlap {
                return false;
            }
        }

        if cfg.max_kick_repetition_64 <= PATTERNS {
            let vector = displacement_vector(tc);
            let mut repetitions = [0usize; 26];
            for &d in vector.iter() {
                repetitions[d as usize] += 1;
                if repetitions[d as usize] > cfg.max_kick_repetition_64 {
                    return false;
                }
            }
        }
        true
    }
}

fn wheel_with_count_left(
    rng: &mut Rng,
    target: &[u8; WHEELS],
    actual: &[u8; WHEELS],
    exclude: Option<usize>,
) -> Option<usize> {
    let left = |w: usize| -> usize {
        if Some(w) == exclude {
            0
        } else {
            target[w].saturating_sub(actual[w]) as usize
        }
    };
    let total: usize = (0..WHEELS).map(left).sum();
    if total == 0 {
        return None;
    }
    let mut pick = rng.usize(..total);
    for w in 0..WHEELS {
        let l = left(w);
        if pick < l {
            return Some(w);
        }
        pick -= l;
    }
    None
}

fn random_unrestricted(rng: &mut Rng) -> TypeCount {
    let mut tc: TypeCount = [0; TYPE_COUNT_SIZE];
    for _ in 0..BARS {
        let a = rng.usize(..=WHEELS);
        let b = rng.usize(..=WHEELS);
        if a == 0 {
            tc[EMPTY_BAR] += 1;
        } else if b == 0 || a == b {
            tc[single_type(a - 1)] += 1;
        } else {
            tc[pair_type(a - 1, b - 1)] += 1;
        }
    }
    tc
}

fn random_swedish(rng: &mut Rng, max_overlap: usize) -> TypeCount {
    let mut tc: TypeCount = [0; TYPE_COUNT_SIZE];
    for _ in 0..BARS {
        let a = rng.usize(..WHEELS);
        let b = rng.usize(..=WHEELS);
        if b == 0 || b - 1 == a || overlaps(&tc) >= max_overlap {
            tc[single_type(a)] += 1;
        } else {
            tc[pair_type(a, b - 1)] += 1;
        }
    }
    tc
}

fn random_no_overlap(rng: &mut Rng) -> TypeCount {
    let mut tc: TypeCount = [0; TYPE_COUNT_SIZE];
    for _ in 0..BARS {
        tc[single_type(rng.usize(..WHEELS))] += 1;
    }
    tc
}

fn sequence_sum(seq: &LugCountSequence) -> i32 {
    seq.iter().map(|&c| c as i32).sum()
}

fn sequence_overlaps(seq: &LugCountSequence) -> i32 {
    sequence_sum(seq) - BARS as i32
}

fn same_successors(seq: &LugCountSequence) -> usize {
    seq.windows(2).filter(|w| w[0] == w[1]).count()
}

fn triple_same(seq: &LugCountSequence) -> bool {
    seq.windows(3).any(|w| w[0] == w[1] && w[1] == w[2])
}

fn even_count(seq: &LugCountSequence) -> usize {
    seq.iter().filter(|&&c| c % 2 == 0).count()
}

/// Every displacement 1..=27 is produced by at least one set of wheels.
fn covers_all_displacements(seq: &LugCountSequence) -> bool {
    let mut covered = [false; BARS + 1];
    for pattern in 1..PATTERNS {
        let sum: usize = (0..WHEELS)
            .filter(|&w| wheel_bit(pattern, w))
            .map(|w| seq[w] as usize)
            .sum();
        if sum <= BARS {
            covered[sum] = true;
        }
    }
    covered[1..].iter().all(|&c| c)
}

fn display_order(a: &LugCountSequence, b: &LugCountSequence) -> Ordering {
    same_successors(b)
        .cmp(&same_successors(a))
        .then_with(|| sequence_sum(a).cmp(&sequence_sum(b)))
        .then_with(|| a[1].cmp(&b[1]))
        .then_with(|| a[2].cmp(&b[2]))
        .then_with(|| a[3].cmp(&b[3]))
        .then_with(|| b[4].cmp(&a[4]))
        .then_with(|| a[5].cmp(&b[5]))
}

fn enumerate_sequences(cfg: &RuleConfig) -> Vec<LugCountSequence> {
    let mut out = Vec::new();
    let mut s = [0u8; WHEELS];
    let max = cfg.max_kick;

    for a in cfg.min_kick..=cfg.max_lowest_kick {
        s[0] = a;
        for b in a..=max {
            s[1] = b;
            for c in b..=max {
                s[2] = c;
                for d in c..=max {
                    s[3] = d;
                    for e in d..=max {
                        s[4] = e;
                        for f in e..=max {
                            s[5] = f;
                            if sequence_admissible(cfg, &s) {
                                out.push(s);
                            }
                        }
                    }
                }
            }
        }
    }
    out
}

fn sequence_admissible(cfg: &RuleConfig, s: &LugCountSequence) -> bool {
    if triple_same(s) {
        return false;
    }
    if !cfg.same_successor_allowed && same_successors(s) != 0 {
        return false;
    }
    let ov = sequence_overlaps(s);
    if ov < cfg.min_overlap as i32 || ov > cfg.max_overlap as i32 {
        return false;
    }
    let even = even_count(s);
    if cfg.even_3 && even != 3 {
        return false;
    }
    if cfg.even_2_3_4 && !(2..=4).contains(&even) {
        return false;
    }
    !(cfg.coverage_27 && !covers_all_displacements(s))
}

fn table_sequences(cfg: &RuleConfig) -> Vec<LugCountSequence> {
    let mut rows: Vec<&[u8; 7]> = Vec::new();
    if !cfg.only_table_group_b {
        rows.extend(table::GROUP_A.iter());
    }
    if !cfg.only_table_group_a {
        rows.extend(table::GROUP_B.iter());
    }

    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let mut seq = [0u8; WHEELS];
        seq.copy_from_slice(&row[..WHEELS]);
        if seq.iter().any(|&c| c > cfg.max_kick) {
            debug!("Skipping table row {:?}: exceeds max kick {}", row, cfg.max_kick);
            continue;
        }
        let ov = sequence_overlaps(&seq);
        if ov != row[WHEELS] as i32 {
            warn!(
                "⚠️  Table row {:?} declares {} overlaps, counts give {}",
                row, row[WHEELS], ov
            );
            continue;
        }
        if ov < cfg.min_overlap as i32 || ov > cfg.max_overlap as i32 {
            continue;
        }
        seq.sort_unstable();
        out.push(seq);
    }
    out.sort_unstable();
    out.dedup();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coverage_of_binary_sequence() {
        // 1,2,4,... style counts reach every total.
        assert!(covers_all_displacements(&[1, 2, 3, 4, 8, 10]));
        assert!(!covers_all_displacements(&[2, 2, 4, 6, 8, 10]));
    }

    #[test]
    fn test_triple_and_successors() {
        assert!(triple_same(&[1, 2, 2, 2, 5, 6]));
        assert!(!triple_same(&[1, 2, 2, 3, 3, 6]));
        assert_eq!(same_successors(&[1, 2, 2, 3, 3, 6]), 2);
    }

    #[test]
    fn test_display_order_lists_repeated_counts_first() {
        let distinct = [1, 2, 3, 4, 8, 10];
        let repeated = [1, 1, 3, 4, 8, 10];
        assert_eq!(display_order(&repeated, &distinct), Ordering::Less);
        assert_eq!(display_order(&distinct, &repeated), Ordering::Greater);
    }

    #[test]
    fn test_enumerated_sequences_are_sorted_and_unique() {
        let rules = LugRules::for_version(Version::V1947).unwrap();
        let seqs = rules.sequences();
        assert!(!seqs.is_empty());
        assert!(seqs.windows(2).all(|w| w[0] < w[1]));
        for s in seqs {
            assert!(s.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn test_table_rows_all_within_bounds() {
        let rules = LugRules::for_version(Version::V1944).unwrap();
        for s in rules.sequences() {
            let ov = sequence_overlaps(s);
            assert!((1..=12).contains(&ov), "{:?}", s);
        }
    }

    #[test]
    fn test_changes_rejected_leave_counts_untouched() {
        let rules = LugRules::for_version(Version::V1947).unwrap();
        let mut rng = Rng::with_seed(3);
        let mut tc = rules.randomize(&mut rng, 0).unwrap();
        let before = tc;
        let empty = (0..TYPE_COUNT_SIZE).find(|&t| t != 0 && tc[t] == 0).unwrap();
        let full = (1..TYPE_COUNT_SIZE).find(|&t| tc[t] > 0).unwrap();
        assert!(!rules.do_changes_if_valid(&mut tc, &[empty, full], &[-1, 1]));
        assert_eq!(tc, before);
    }
}
