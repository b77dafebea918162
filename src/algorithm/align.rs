//! Global sequence alignment with pathway-specific substitution scores.
//!
//! The scorer measures ordering fidelity between the reduced projected
//! sequence and the pathway's target sequence: a Gotoh affine-gap global
//! alignment with free end gaps, so an observation covering only a
//! contiguous sub-path is not punished for the unmatched tail.

use crate::algorithm::{SENTINEL, Symbol};
use crate::error::{AdherenceError, Result};

/// Score for aligning identical non-sentinel symbols
pub const MATCH_SCORE: i32 = 10;
/// Score for aligning the two sentinel anchors to each other
pub const ANCHOR_SCORE: i32 = 1000;
/// Score for aligning a real step to the sentinel; large enough to forbid it
pub const ANCHOR_MISMATCH_SCORE: i32 = -1000;
/// Score for symbols one step apart in pathway order (near-miss ordering)
pub const ADJACENT_SCORE: i32 = 5;

/// Affine gap costs of the alignment.
///
/// The two gap types are priced asymmetrically: an observed code with no
/// expected counterpart (a gap opened in the target row) costs more to open
/// than a pathway step that was never observed (a gap in the observed row),
/// but missed steps keep costing as the run extends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GapPenalties {
    /// Opening a gap in the target row (an unexpected observed symbol)
    pub unexpected_open: i32,
    /// Extending a gap in the target row
    pub unexpected_extend: i32,
    /// Opening a gap in the observed row (a missed pathway step)
    pub missed_open: i32,
    /// Extending a gap in the observed row
    pub missed_extend: i32,
}

impl Default for GapPenalties {
    fn default() -> Self {
        Self {
            unexpected_open: -10,
            unexpected_extend: 0,
            missed_open: -5,
            missed_extend: -1,
        }
    }
}

/// Symmetric substitution-scoring table over the alphabet of one target
/// sequence.
///
/// A small derived artifact, rebuilt per pathway; symbols index directly
/// into a dense matrix.
#[derive(Debug, Clone)]
pub struct ScoringTable {
    size: usize,
    scores: Vec<i32>,
}

impl ScoringTable {
    /// Build the table for a target sequence
    #[must_use]
    pub fn for_target(target: &[Symbol]) -> Self {
        let size = target
            .iter()
            .max()
            .map_or(1, |max| usize::from(*max) + 1);
        let mut scores = vec![0; size * size];
        for a in 0..size {
            for b in 0..size {
                scores[a * size + b] = substitution_score(a as Symbol, b as Symbol);
            }
        }
        Self { size, scores }
    }

    /// Substitution score of a symbol pair; symbols outside the target
    /// alphabet score zero
    #[must_use]
    pub fn score(&self, a: Symbol, b: Symbol) -> i32 {
        let (a, b) = (usize::from(a), usize::from(b));
        if a < self.size && b < self.size {
            self.scores[a * self.size + b]
        } else {
            0
        }
    }
}

fn substitution_score(a: Symbol, b: Symbol) -> i32 {
    if a == b {
        if a == SENTINEL {
            ANCHOR_SCORE
        } else {
            MATCH_SCORE
        }
    } else if a == SENTINEL || b == SENTINEL {
        ANCHOR_MISMATCH_SCORE
    } else if a.abs_diff(b) == 1 {
        ADJACENT_SCORE
    } else {
        0
    }
}

/// Raw global-alignment score between a target sequence and a (reduced)
/// observed sequence, end gaps free on both sides.
///
/// Gotoh three-state recurrence, score only: `m` holds alignments ending in
/// a substitution, `gap_t` alignments ending in a gap in the target row,
/// `gap_o` alignments ending in a gap in the observed row. Free end gaps
/// mean every alignment is a core that starts and ends with a substitution,
/// so the result is the best substitution-state cell anywhere in the
/// matrix (or zero for an all-gap alignment).
#[must_use]
pub fn align_score(
    target: &[Symbol],
    observed: &[Symbol],
    table: &ScoringTable,
    gaps: &GapPenalties,
) -> i32 {
    let rows = target.len();
    let cols = observed.len();
    if rows == 0 || cols == 0 {
        return 0;
    }

    // Low enough to never win a max, high enough to not underflow when
    // penalties are added.
    const UNREACHABLE: i32 = i32::MIN / 4;

    let mut best = 0;
    let mut m_prev = vec![UNREACHABLE; cols + 1];
    let mut gap_t_prev = vec![UNREACHABLE; cols + 1];
    let mut gap_o_prev = vec![UNREACHABLE; cols + 1];

    for i in 1..=rows {
        let mut m_row = vec![UNREACHABLE; cols + 1];
        let mut gap_t_row = vec![UNREACHABLE; cols + 1];
        let mut gap_o_row = vec![UNREACHABLE; cols + 1];

        for j in 1..=cols {
            // The zero term starts a fresh core: both prefixes become free
            // leading gaps.
            let diag = m_prev[j - 1]
                .max(gap_t_prev[j - 1])
                .max(gap_o_prev[j - 1])
                .max(0);
            m_row[j] = table.score(target[i - 1], observed[j - 1]) + diag;

            gap_t_row[j] = (m_row[j - 1] + gaps.unexpected_open)
                .max(gap_t_row[j - 1] + gaps.unexpected_extend)
                .max(gap_o_row[j - 1] + gaps.unexpected_open);

            gap_o_row[j] = (m_prev[j] + gaps.missed_open)
                .max(gap_o_prev[j] + gaps.missed_extend)
                .max(gap_t_prev[j] + gaps.missed_open);

            best = best.max(m_row[j]);
        }

        m_prev = m_row;
        gap_t_prev = gap_t_row;
        gap_o_prev = gap_o_row;
    }

    best
}

/// Normalize a raw alignment score into the adherence value.
///
/// Subtracts the guaranteed sentinel-anchor bonus, then divides by the
/// number of real symbols in the aligned observed sequence and by the
/// per-match unit score. Well-formed input lands in roughly `[0, 1]`, but
/// the value is not hard-clamped.
pub fn normalize(raw_score: i32, aligned_len: usize) -> Result<f64> {
    if aligned_len <= 1 {
        return Err(AdherenceError::DivisionUndefined);
    }
    Ok(f64::from(raw_score - ANCHOR_SCORE) / (aligned_len - 1) as f64 / f64::from(MATCH_SCORE))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aligned(target: &[Symbol], observed: &[Symbol]) -> i32 {
        let table = ScoringTable::for_target(target);
        align_score(target, observed, &table, &GapPenalties::default())
    }

    #[test]
    fn substitution_table_matches_the_domain_scores() {
        let table = ScoringTable::for_target(&[0, 1, 2, 3]);
        assert_eq!(table.score(0, 0), ANCHOR_SCORE);
        assert_eq!(table.score(2, 2), MATCH_SCORE);
        assert_eq!(table.score(0, 2), ANCHOR_MISMATCH_SCORE);
        assert_eq!(table.score(3, 0), ANCHOR_MISMATCH_SCORE);
        assert_eq!(table.score(1, 2), ADJACENT_SCORE);
        assert_eq!(table.score(1, 3), 0);
        assert_eq!(table.score(2, 1), table.score(1, 2));
    }

    #[test]
    fn identical_sequences_attain_the_maximum() {
        let target = [0, 1, 2, 3];
        let perfect = aligned(&target, &target);
        assert_eq!(perfect, ANCHOR_SCORE + 3 * MATCH_SCORE);

        // No other observation over the same alphabet can beat it.
        for observed in [
            vec![0, 1, 3],
            vec![0, 3, 1],
            vec![0, 2],
            vec![0, 3, 2, 1],
        ] {
            assert!(aligned(&target, &observed) < perfect);
        }
    }

    #[test]
    fn skipping_a_step_costs_one_gap_open() {
        // Observed steps 1 and 3, step 2 missed: anchor + two matches,
        // minus one missed-step gap open.
        let score = aligned(&[0, 1, 2, 3], &[0, 1, 3]);
        assert_eq!(score, ANCHOR_SCORE + 2 * MATCH_SCORE - 5);
    }

    #[test]
    fn reversed_order_scores_below_omission() {
        let target = [0, 1, 2, 3];
        let omission = aligned(&target, &[0, 1, 3]);
        let reversed = aligned(&target, &[0, 3, 1]);
        assert!(reversed < omission);
    }

    #[test]
    fn unmatched_tail_is_free() {
        // A contiguous prefix sub-path is not punished for the tail of the
        // pathway it never reached.
        let score = aligned(&[0, 1, 2, 3, 4, 5], &[0, 1, 2]);
        assert_eq!(score, ANCHOR_SCORE + 2 * MATCH_SCORE);
    }

    #[test]
    fn normalization_scales_to_unit_per_match() {
        let target = [0, 1, 2, 3];
        let raw = aligned(&target, &target);
        let value = normalize(raw, 4).unwrap();
        assert!((value - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn normalization_rejects_sentinel_only_sequences() {
        assert!(matches!(
            normalize(ANCHOR_SCORE, 1),
            Err(AdherenceError::DivisionUndefined)
        ));
    }

    #[test]
    fn empty_sequences_align_to_zero() {
        let table = ScoringTable::for_target(&[0, 1]);
        assert_eq!(align_score(&[0, 1], &[], &table, &GapPenalties::default()), 0);
        assert_eq!(align_score(&[], &[0], &table, &GapPenalties::default()), 0);
    }
}
