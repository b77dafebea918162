//! A Rust library for scoring how closely an observed sequence of clinical
//! procedure codes adheres to the canonical care pathways registered for a
//! diagnosis.
//!
//! The kernel encodes a pathway and an observation into comparable symbol
//! sequences, optionally rolls unmatched codes up to their clinical
//! category, runs a custom-scored global alignment, and normalizes the
//! result into a bounded adherence score with best-of-candidates selection.
//! Scoring is deterministic and rule-based; every call is a pure function
//! of its inputs plus two immutable reference snapshots, so batches
//! parallelize trivially.

pub mod algorithm;
pub mod batch;
pub mod config;
pub mod error;
pub mod loader;
pub mod model;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use algorithm::{AdherenceScorer, SENTINEL, SENTINEL_SCORE, Symbol, SymbolSeq};
pub use config::{ScoringConfig, ScoringConfigBuilder, ScoringPolicy};
pub use error::{AdherenceError, Result};

// Reference data
pub use model::{CarePathway, HierarchyEntry, HierarchyIndex, PathwayRegistry, PathwayStep};

// Loaders and input parsing
pub use loader::{load_hierarchy, load_pathway_registry, parse_procedure_codes};

// Batch scoring
pub use batch::{ScoreRecord, score_batch};
