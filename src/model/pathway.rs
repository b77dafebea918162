//! Care-pathway definitions and the per-diagnosis registry.
//!
//! A pathway is an ordered list of named steps, each accepting a set of
//! procedure codes. The registry maps a diagnosis code to its candidate
//! pathways and is immutable for the lifetime of the process.

use rustc_hash::{FxHashMap, FxHashSet};

/// One clinical step of a care pathway with the procedure codes it accepts
#[derive(Debug, Clone)]
pub struct PathwayStep {
    name: String,
    codes: FxHashSet<String>,
}

impl PathwayStep {
    /// Create a step from its name and accepted procedure codes
    pub fn new(name: impl Into<String>, codes: impl IntoIterator<Item = String>) -> Self {
        Self {
            name: name.into(),
            codes: codes.into_iter().collect(),
        }
    }

    /// The authored step name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the step accepts the given procedure code exactly
    #[must_use]
    pub fn accepts(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    /// The accepted procedure codes (membership set; no meaningful order)
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().map(String::as_str)
    }
}

/// An ordered sequence of pathway steps for one diagnosis variant.
///
/// Step order is significant and fixed at authoring time: it drives both
/// symbol assignment and the first-match tie-break during projection.
#[derive(Debug, Clone)]
pub struct CarePathway {
    steps: Vec<PathwayStep>,
}

impl CarePathway {
    /// Create a pathway from its authored step order
    #[must_use]
    pub fn new(steps: Vec<PathwayStep>) -> Self {
        Self { steps }
    }

    /// The steps in authored order
    #[must_use]
    pub fn steps(&self) -> &[PathwayStep] {
        &self.steps
    }

    /// Number of steps
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the pathway has no steps
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Read-only mapping from diagnosis code to candidate pathways.
///
/// Loaded once at startup and shared across all scoring calls.
#[derive(Debug, Default)]
pub struct PathwayRegistry {
    by_diagnosis: FxHashMap<String, Vec<CarePathway>>,
}

impl PathwayRegistry {
    /// Create a registry from a prebuilt diagnosis map
    #[must_use]
    pub fn new(by_diagnosis: FxHashMap<String, Vec<CarePathway>>) -> Self {
        Self { by_diagnosis }
    }

    /// Add a candidate pathway for a diagnosis (used while assembling
    /// the registry, before it is shared)
    pub fn insert(&mut self, diagnosis: impl Into<String>, pathway: CarePathway) {
        self.by_diagnosis
            .entry(diagnosis.into())
            .or_default()
            .push(pathway);
    }

    /// The candidate pathways registered for a diagnosis, in registration
    /// order, or `None` for an unknown diagnosis
    #[must_use]
    pub fn candidates(&self, diagnosis: &str) -> Option<&[CarePathway]> {
        self.by_diagnosis.get(diagnosis).map(Vec::as_slice)
    }

    /// Iterate over the registered diagnosis codes
    pub fn diagnoses(&self) -> impl Iterator<Item = &str> {
        self.by_diagnosis.keys().map(String::as_str)
    }

    /// Number of registered diagnoses
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_diagnosis.len()
    }

    /// Whether the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_diagnosis.is_empty()
    }
}
