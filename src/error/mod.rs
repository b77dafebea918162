//! Error handling for the adherence scoring kernel.

use std::{fmt, io};

/// Specialized error type for adherence scoring
#[derive(Debug)]
pub enum AdherenceError {
    /// Diagnosis code absent from the pathway registry
    UnknownDiagnosis(String),
    /// Empty procedure-code list
    EmptyInput,
    /// Match fraction computed against zero observed codes
    DivisionUndefined,
    /// Procedure code containing non-digit characters where a numeric
    /// code is required
    InvalidCode(String),
    /// Numeric procedure code not covered by any hierarchy range
    CodeNotFound(String),
    /// Pathway definition that cannot be scored
    MalformedPathway(String),
    /// Hierarchy entry whose start code exceeds its end code
    InvalidRange { start_code: u32, end_code: u32 },
    /// Error reading reference data
    IoError(io::Error),
    /// Error parsing the pathway registry document
    RegistryError(serde_json::Error),
    /// Error parsing the hierarchy table
    HierarchyError(csv::Error),
}

impl From<io::Error> for AdherenceError {
    fn from(error: io::Error) -> Self {
        Self::IoError(error)
    }
}

impl From<serde_json::Error> for AdherenceError {
    fn from(error: serde_json::Error) -> Self {
        Self::RegistryError(error)
    }
}

impl From<csv::Error> for AdherenceError {
    fn from(error: csv::Error) -> Self {
        Self::HierarchyError(error)
    }
}

impl fmt::Display for AdherenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownDiagnosis(code) => write!(f, "unknown diagnosis code: {code}"),
            Self::EmptyInput => write!(f, "empty procedure-code list"),
            Self::DivisionUndefined => {
                write!(f, "match fraction undefined for zero observed codes")
            }
            Self::InvalidCode(code) => write!(f, "non-numeric procedure code: {code:?}"),
            Self::CodeNotFound(code) => {
                write!(f, "procedure code not covered by the hierarchy: {code}")
            }
            Self::MalformedPathway(msg) => write!(f, "malformed pathway: {msg}"),
            Self::InvalidRange {
                start_code,
                end_code,
            } => write!(f, "invalid hierarchy range: {start_code}-{end_code}"),
            Self::IoError(e) => write!(f, "IO error: {e}"),
            Self::RegistryError(e) => write!(f, "registry parse error: {e}"),
            Self::HierarchyError(e) => write!(f, "hierarchy parse error: {e}"),
        }
    }
}

impl std::error::Error for AdherenceError {}

/// Result type for adherence scoring operations
pub type Result<T> = std::result::Result<T, AdherenceError>;
