//! Core scoring algorithms: encoding, projection, reduction, alignment,
//! and the best-of-candidates evaluator.

pub mod align;
pub mod encode;
pub mod evaluate;
pub mod project;
pub mod reduce;

use smallvec::SmallVec;

/// One element of a symbol sequence. `0` is the reserved sentinel meaning
/// "no corresponding step"; `1..=N` identify pathway steps in authored
/// order. Integer symbols lift the implicit nine-step ceiling of a
/// digit-string encoding.
pub type Symbol = u16;

/// A symbol sequence. Sequences are short (one symbol per pathway step or
/// matched procedure code), so they stay stack-local in the common case.
pub type SymbolSeq = SmallVec<[Symbol; 16]>;

/// The reserved anchor symbol that opens every sequence
pub const SENTINEL: Symbol = 0;

pub use align::{GapPenalties, ScoringTable, align_score, normalize};
pub use encode::TargetSequence;
pub use evaluate::{AdherenceScorer, SENTINEL_SCORE};
pub use project::{Projection, ProjectionMode, project};
pub use reduce::reduce;
