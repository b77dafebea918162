//! Best-of-candidates adherence evaluation.
//!
//! The evaluator orchestrates encoding, projection, reduction, and
//! alignment across every candidate pathway registered for a diagnosis and
//! keeps the best score. Its public entry point is total: any failure
//! surfaces as the `-1.0` sentinel, never as an error or panic.

use std::sync::Arc;

use log::warn;

use crate::algorithm::align::{ScoringTable, align_score, normalize};
use crate::algorithm::encode::TargetSequence;
use crate::algorithm::project::{ProjectionMode, project};
use crate::algorithm::reduce::reduce;
use crate::config::{ScoringConfig, ScoringPolicy};
use crate::error::{AdherenceError, Result};
use crate::loader::parse_procedure_codes;
use crate::model::{CarePathway, HierarchyIndex, PathwayRegistry};

/// The designated "could not compute" result, distinct from a legitimate
/// adherence of `0.0`
pub const SENTINEL_SCORE: f64 = -1.0;

/// Scale used to round the final score to three decimals
const ROUND_SCALE: f64 = 1000.0;

/// Outcome of scoring one candidate pathway
enum CandidateScore {
    /// The candidate produced an adherence value
    Scored(f64),
    /// No observed code resolved to any step of the candidate
    NoMatch,
}

/// Stateless adherence scorer over immutable reference snapshots.
///
/// Holds reference-counted handles to the pathway registry and the
/// hierarchy index, so clones are cheap and every scoring call is a pure
/// function of its inputs. Safe to share across worker threads.
#[derive(Debug, Clone)]
pub struct AdherenceScorer {
    registry: Arc<PathwayRegistry>,
    hierarchy: Arc<HierarchyIndex>,
    config: ScoringConfig,
}

impl AdherenceScorer {
    /// Create a scorer over loaded reference snapshots
    #[must_use]
    pub fn new(
        registry: Arc<PathwayRegistry>,
        hierarchy: Arc<HierarchyIndex>,
        config: ScoringConfig,
    ) -> Self {
        Self {
            registry,
            hierarchy,
            config,
        }
    }

    /// The active configuration
    #[must_use]
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score one record; the total entry point.
    ///
    /// Returns the best adherence across the candidate pathways of the
    /// diagnosis, rounded to three decimals, or [`SENTINEL_SCORE`] when the
    /// record cannot be scored at all (unknown diagnosis, empty procedure
    /// list, or every candidate failing).
    #[must_use]
    pub fn score(&self, diagnosis: &str, procedure_codes: &[String]) -> f64 {
        match self.evaluate(diagnosis, procedure_codes) {
            Ok(score) => score,
            Err(err) => {
                log::debug!("could not score diagnosis {diagnosis}: {err}");
                SENTINEL_SCORE
            }
        }
    }

    /// Score one record given the raw whitespace-delimited procedure string
    #[must_use]
    pub fn score_raw(&self, diagnosis: &str, raw_procedure_codes: &str) -> f64 {
        self.score(diagnosis, &parse_procedure_codes(raw_procedure_codes))
    }

    fn evaluate(&self, diagnosis: &str, codes: &[String]) -> Result<f64> {
        let candidates = self
            .registry
            .candidates(diagnosis)
            .ok_or_else(|| AdherenceError::UnknownDiagnosis(diagnosis.to_string()))?;
        if codes.is_empty() {
            return Err(AdherenceError::EmptyInput);
        }

        let mut best = 0.0_f64;
        let mut evaluated = 0_usize;
        let mut last_error = None;

        for (index, pathway) in candidates.iter().enumerate() {
            match self.score_candidate(pathway, codes) {
                Ok(CandidateScore::Scored(adherence)) => {
                    evaluated += 1;
                    if adherence > best {
                        best = adherence;
                    }
                }
                Ok(CandidateScore::NoMatch) => {
                    evaluated += 1;
                    if self.config.policy == ScoringPolicy::Generous
                        && self.config.legacy_generous_fallback
                    {
                        // Upstream quirk, preserved: a zero-match candidate
                        // forces the running best to the sentinel instead
                        // of scoring 0.
                        best = SENTINEL_SCORE;
                    } else if 0.0 > best {
                        best = 0.0;
                    }
                }
                Err(err) => {
                    // One broken candidate must not abort the diagnosis.
                    warn!("skipping candidate pathway {index} for diagnosis {diagnosis}: {err}");
                    last_error = Some(err);
                }
            }
        }

        if evaluated == 0 {
            if let Some(err) = last_error {
                return Err(err);
            }
        }

        Ok((best * ROUND_SCALE).round() / ROUND_SCALE)
    }

    fn score_candidate(&self, pathway: &CarePathway, codes: &[String]) -> Result<CandidateScore> {
        if pathway.is_empty() {
            return Err(AdherenceError::MalformedPathway(
                "pathway has no steps".to_string(),
            ));
        }

        let target = TargetSequence::encode(pathway)?;
        let mode = match self.config.policy {
            ScoringPolicy::Rollup => ProjectionMode::Rollup,
            ScoringPolicy::Strict | ScoringPolicy::Generous => ProjectionMode::Exact,
        };
        let projection = project(codes, pathway, &target, mode, &self.hierarchy)?;
        if projection.match_fraction == 0.0 {
            return Ok(CandidateScore::NoMatch);
        }

        let aligned = reduce(&projection.symbols);
        let table = ScoringTable::for_target(target.symbols());
        let raw = align_score(
            target.symbols(),
            &aligned,
            &table,
            &self.config.gap_penalties,
        );
        let adherence = normalize(raw, aligned.len())?;

        Ok(CandidateScore::Scored(match self.config.policy {
            ScoringPolicy::Generous => adherence,
            ScoringPolicy::Strict | ScoringPolicy::Rollup => {
                adherence * projection.match_fraction
            }
        }))
    }
}
