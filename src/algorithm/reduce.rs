//! First-occurrence reduction of symbol sequences.

use itertools::Itertools;

use crate::algorithm::{Symbol, SymbolSeq};

/// Collapse a symbol sequence to the first occurrence of each distinct
/// symbol, preserving original order.
///
/// Repeated symbols are structurally meaningless noise from duplicate
/// billing codes for one clinical step; the alignment scorer would
/// otherwise penalize them.
#[must_use]
pub fn reduce(sequence: &[Symbol]) -> SymbolSeq {
    sequence.iter().copied().unique().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_first_occurrences_in_order() {
        let reduced = reduce(&[0, 1, 2, 3, 2, 3, 1]);
        assert_eq!(reduced.as_slice(), &[0, 1, 2, 3]);
    }

    #[test]
    fn is_idempotent() {
        let once = reduce(&[0, 2, 2, 1, 3, 1]);
        let twice = reduce(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_sequence_stays_empty() {
        assert!(reduce(&[]).is_empty());
    }
}
