//! Encoding of a care pathway into its target symbol sequence.

use crate::algorithm::{SENTINEL, Symbol, SymbolSeq};
use crate::error::{AdherenceError, Result};
use crate::model::CarePathway;

/// The target symbol sequence of a pathway together with its step-to-symbol
/// mapping.
///
/// An N-step pathway encodes to `[0, 1, 2, ..., N]`: the sentinel anchor
/// followed by one symbol per step in authored order. Encoding is
/// deterministic, so two calls on the same pathway are interchangeable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSequence {
    symbols: SymbolSeq,
}

impl TargetSequence {
    /// Encode a pathway into its target sequence
    pub fn encode(pathway: &CarePathway) -> Result<Self> {
        let step_count = pathway.len();
        if step_count >= usize::from(Symbol::MAX) {
            return Err(AdherenceError::MalformedPathway(format!(
                "pathway has {step_count} steps, exceeding the symbol alphabet"
            )));
        }

        let mut symbols = SymbolSeq::with_capacity(step_count + 1);
        symbols.push(SENTINEL);
        for step in 1..=step_count {
            symbols.push(step as Symbol);
        }
        Ok(Self { symbols })
    }

    /// The full target sequence, sentinel included
    #[must_use]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// The symbol assigned to the step at `step_index` in authored order
    #[must_use]
    pub fn symbol_for_step(&self, step_index: usize) -> Symbol {
        self.symbols[step_index + 1]
    }

    /// Number of real (non-sentinel) steps
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.symbols.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PathwayStep;

    fn pathway(names: &[&str]) -> CarePathway {
        CarePathway::new(
            names
                .iter()
                .map(|name| PathwayStep::new(*name, vec![format!("code-{name}")]))
                .collect(),
        )
    }

    #[test]
    fn encodes_sentinel_plus_one_symbol_per_step() {
        let target = TargetSequence::encode(&pathway(&["Imaging", "Consult", "Surgery"])).unwrap();
        assert_eq!(target.symbols(), &[0, 1, 2, 3]);
        assert_eq!(target.step_count(), 3);
        assert_eq!(target.symbol_for_step(0), 1);
        assert_eq!(target.symbol_for_step(2), 3);
    }

    #[test]
    fn encoding_is_deterministic() {
        let pathway = pathway(&["A", "B"]);
        assert_eq!(
            TargetSequence::encode(&pathway).unwrap(),
            TargetSequence::encode(&pathway).unwrap()
        );
    }

    #[test]
    fn empty_pathway_encodes_to_bare_sentinel() {
        let target = TargetSequence::encode(&CarePathway::new(Vec::new())).unwrap();
        assert_eq!(target.symbols(), &[0]);
        assert_eq!(target.step_count(), 0);
    }
}
