//! Parallel batch scoring over independent records.
//!
//! Every scoring call is stateless and side-effect-free apart from reading
//! the shared immutable reference snapshots, so a batch is an
//! embarrassingly-parallel map over rows, using Rayon for parallel
//! processing. This is the integration surface for row-wise execution
//! engines: the scorer captures nothing but reference-counted snapshots.

use log::info;
use rayon::prelude::*;

use crate::algorithm::evaluate::AdherenceScorer;
use crate::utils::progress;

/// One input record: a diagnosis code and the raw whitespace-delimited
/// procedure-code string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreRecord {
    /// Diagnosis code to select candidate pathways
    pub diagnosis: String,
    /// Raw procedure-code sequence as exported from claims data
    pub procedure_codes: String,
}

impl ScoreRecord {
    /// Create a record from its two fields
    pub fn new(diagnosis: impl Into<String>, procedure_codes: impl Into<String>) -> Self {
        Self {
            diagnosis: diagnosis.into(),
            procedure_codes: procedure_codes.into(),
        }
    }
}

/// Score a batch of records in parallel, preserving input order.
///
/// Each row produces one adherence score or the failure sentinel; a row
/// can never fail the batch.
#[must_use]
pub fn score_batch(scorer: &AdherenceScorer, records: &[ScoreRecord]) -> Vec<f64> {
    info!(
        "scoring {} records with {} threads",
        records.len(),
        rayon::current_num_threads()
    );
    let pb = progress::create_batch_progress_bar(records.len() as u64, Some("Scoring adherence"));

    let scores = records
        .par_iter()
        .map(|record| {
            let score = scorer.score_raw(&record.diagnosis, &record.procedure_codes);
            pb.inc(1);
            score
        })
        .collect();

    progress::finish_progress_bar(&pb, Some("Scoring complete"));
    scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::evaluate::SENTINEL_SCORE;
    use crate::config::{ScoringConfig, ScoringPolicy};
    use crate::model::{CarePathway, HierarchyIndex, PathwayRegistry, PathwayStep};
    use std::sync::Arc;

    fn scorer() -> AdherenceScorer {
        let mut registry = PathwayRegistry::default();
        registry.insert(
            "M17",
            CarePathway::new(vec![
                PathwayStep::new("Imaging", vec!["100".to_string()]),
                PathwayStep::new("Surgery", vec!["300".to_string()]),
            ]),
        );
        AdherenceScorer::new(
            Arc::new(registry),
            Arc::new(HierarchyIndex::default()),
            ScoringConfig::with_policy(ScoringPolicy::Strict),
        )
    }

    #[test]
    fn batch_preserves_input_order_and_isolates_failures() {
        let scorer = scorer();
        let records = vec![
            ScoreRecord::new("M17", "100 300 "),
            ScoreRecord::new("Z99", "100 300 "),
            ScoreRecord::new("M17", ""),
            ScoreRecord::new("M17", "300 "),
        ];
        let scores = score_batch(&scorer, &records);
        assert_eq!(scores.len(), 4);
        assert!((scores[0] - 1.0).abs() < f64::EPSILON);
        assert_eq!(scores[1], SENTINEL_SCORE);
        assert_eq!(scores[2], SENTINEL_SCORE);
        assert_eq!(scores[3], scorer.score_raw("M17", "300 "));
    }

    #[test]
    fn batch_matches_sequential_scoring() {
        let scorer = scorer();
        let records: Vec<ScoreRecord> = (0..64)
            .map(|i| {
                if i % 2 == 0 {
                    ScoreRecord::new("M17", "100 300 ")
                } else {
                    ScoreRecord::new("M17", "300 100 ")
                }
            })
            .collect();
        let parallel = score_batch(&scorer, &records);
        let sequential: Vec<f64> = records
            .iter()
            .map(|r| scorer.score_raw(&r.diagnosis, &r.procedure_codes))
            .collect();
        assert_eq!(parallel, sequential);
    }
}
