//! Configuration for the adherence scorer.

use crate::algorithm::align::GapPenalties;

/// The scoring policy variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoringPolicy {
    /// Exact projection; candidate score is alignment times match fraction
    #[default]
    Strict,
    /// Exact projection; candidate score is the bare alignment value
    Generous,
    /// Category-rollup projection; candidate score is alignment times
    /// match fraction
    Rollup,
}

/// Configuration for adherence scoring
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    /// Which policy variant to score with
    pub policy: ScoringPolicy,
    /// Preserve the upstream Generous behavior of forcing the running best
    /// to the failure sentinel when a candidate matches nothing. With
    /// `false`, a zero-match candidate simply scores 0 like the other
    /// policies.
    pub legacy_generous_fallback: bool,
    /// Affine gap costs used by the alignment
    pub gap_penalties: GapPenalties,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            policy: ScoringPolicy::Strict,
            legacy_generous_fallback: true,
            gap_penalties: GapPenalties::default(),
        }
    }
}

impl ScoringConfig {
    /// Create a configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new builder for constructing a scoring configuration
    #[must_use]
    pub fn builder() -> ScoringConfigBuilder {
        ScoringConfigBuilder::new()
    }

    /// Shorthand for a default configuration with the given policy
    #[must_use]
    pub fn with_policy(policy: ScoringPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }
}

/// Builder for constructing a scoring configuration
#[derive(Debug, Clone, Default)]
pub struct ScoringConfigBuilder {
    config: ScoringConfig,
}

impl ScoringConfigBuilder {
    /// Create a new builder with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scoring policy
    #[must_use]
    pub const fn policy(mut self, policy: ScoringPolicy) -> Self {
        self.config.policy = policy;
        self
    }

    /// Set whether the Generous zero-match fallback is preserved
    #[must_use]
    pub const fn legacy_generous_fallback(mut self, preserve: bool) -> Self {
        self.config.legacy_generous_fallback = preserve;
        self
    }

    /// Set the affine gap costs
    #[must_use]
    pub const fn gap_penalties(mut self, gaps: GapPenalties) -> Self {
        self.config.gap_penalties = gaps;
        self
    }

    /// Build the scoring configuration
    #[must_use]
    pub fn build(self) -> ScoringConfig {
        self.config
    }
}
