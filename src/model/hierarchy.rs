//! Range-based lookup from numeric procedure codes to clinical categories.
//!
//! The hierarchy table maps inclusive ranges of procedure codes to "minor
//! category" labels. The index expands those ranges once at load time so
//! that scoring-time lookups are a single hash probe.

use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::error::{AdherenceError, Result};

/// Identifier of an interned category label
pub type CategoryId = u16;

/// One row of the code-hierarchy table: an inclusive range of procedure
/// codes and the minor category they belong to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HierarchyEntry {
    /// First procedure code of the range (inclusive)
    #[serde(rename = "Start Code")]
    pub start_code: u32,
    /// Last procedure code of the range (inclusive)
    #[serde(rename = "End Code")]
    pub end_code: u32,
    /// Minor category label for every code in the range
    #[serde(rename = "CPT Minor Category")]
    pub category: String,
}

impl HierarchyEntry {
    /// Create a new hierarchy entry
    pub fn new(start_code: u32, end_code: u32, category: impl Into<String>) -> Self {
        Self {
            start_code,
            end_code,
            category: category.into(),
        }
    }
}

/// Immutable index from numeric procedure code to minor category.
///
/// Built once at startup and shared read-only across all scoring calls.
/// Category labels are interned so the expanded per-code map stores a
/// compact id instead of a string clone per code.
#[derive(Debug, Default)]
pub struct HierarchyIndex {
    categories: Vec<String>,
    by_code: FxHashMap<u32, CategoryId>,
}

impl HierarchyIndex {
    /// Build the index by expanding every entry's inclusive code range.
    ///
    /// Later entries overwrite earlier ones on key collision. The source
    /// table is expected to be collision-free; the overwrite is a defined
    /// tie-break, not an error.
    pub fn build(entries: &[HierarchyEntry]) -> Result<Self> {
        let mut categories: Vec<String> = Vec::new();
        let mut ids: FxHashMap<String, CategoryId> = FxHashMap::default();
        let mut by_code: FxHashMap<u32, CategoryId> = FxHashMap::default();

        for entry in entries {
            if entry.start_code > entry.end_code {
                return Err(AdherenceError::InvalidRange {
                    start_code: entry.start_code,
                    end_code: entry.end_code,
                });
            }

            let id = match ids.get(&entry.category) {
                Some(id) => *id,
                None => {
                    let id = categories.len() as CategoryId;
                    categories.push(entry.category.clone());
                    ids.insert(entry.category.clone(), id);
                    id
                }
            };

            for code in entry.start_code..=entry.end_code {
                by_code.insert(code, id);
            }
        }

        Ok(Self {
            categories,
            by_code,
        })
    }

    /// Look up the minor category of a procedure code given as a decimal
    /// string.
    ///
    /// Leading zeros are stripped by the numeric parse, so `"00470"` and
    /// `"470"` resolve identically. Non-digit input fails with
    /// [`AdherenceError::InvalidCode`]; a code outside every range fails
    /// with [`AdherenceError::CodeNotFound`] rather than resolving to a
    /// false category.
    pub fn lookup(&self, code: &str) -> Result<&str> {
        let numeric = parse_numeric_code(code)?;
        let id = self
            .by_code
            .get(&numeric)
            .copied()
            .ok_or_else(|| AdherenceError::CodeNotFound(code.to_string()))?;
        Ok(&self.categories[id as usize])
    }

    /// Quiet lookup used by the rollup projector: any non-numeric or
    /// uncovered code is simply `None`.
    #[must_use]
    pub fn category_id(&self, code: &str) -> Option<CategoryId> {
        let numeric = parse_numeric_code(code).ok()?;
        self.by_code.get(&numeric).copied()
    }

    /// The label of an interned category id
    #[must_use]
    pub fn category_name(&self, id: CategoryId) -> Option<&str> {
        self.categories.get(id as usize).map(String::as_str)
    }

    /// Number of individual codes covered by the index
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    /// Whether the index covers no codes at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

/// Parse a decimal procedure-code string, rejecting anything with
/// non-digit characters instead of coercing it.
fn parse_numeric_code(code: &str) -> Result<u32> {
    if code.is_empty() || !code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AdherenceError::InvalidCode(code.to_string()));
    }
    code.parse::<u32>()
        .map_err(|_| AdherenceError::InvalidCode(code.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_index() -> HierarchyIndex {
        let entries = vec![
            HierarchyEntry::new(100, 199, "Imaging"),
            HierarchyEntry::new(200, 299, "Consultation"),
            HierarchyEntry::new(300, 399, "Surgery"),
        ];
        HierarchyIndex::build(&entries).unwrap()
    }

    #[test]
    fn lookup_resolves_codes_inside_a_range() {
        let index = sample_index();
        assert_eq!(index.lookup("150").unwrap(), "Imaging");
        assert_eq!(index.lookup("200").unwrap(), "Consultation");
        assert_eq!(index.lookup("399").unwrap(), "Surgery");
    }

    #[test]
    fn lookup_strips_leading_zeros() {
        let index = sample_index();
        assert_eq!(index.lookup("00150").unwrap(), "Imaging");
        assert_eq!(
            index.category_id("00150").unwrap(),
            index.category_id("150").unwrap()
        );
    }

    #[test]
    fn lookup_rejects_non_digit_input() {
        let index = sample_index();
        assert!(matches!(
            index.lookup("15A"),
            Err(AdherenceError::InvalidCode(_))
        ));
        assert!(matches!(
            index.lookup("+150"),
            Err(AdherenceError::InvalidCode(_))
        ));
        assert!(matches!(
            index.lookup(""),
            Err(AdherenceError::InvalidCode(_))
        ));
    }

    #[test]
    fn uncovered_code_is_not_found() {
        let index = sample_index();
        assert!(matches!(
            index.lookup("999"),
            Err(AdherenceError::CodeNotFound(_))
        ));
        assert_eq!(index.category_id("999"), None);
    }

    #[test]
    fn later_entries_overwrite_earlier_on_collision() {
        let entries = vec![
            HierarchyEntry::new(100, 199, "Imaging"),
            HierarchyEntry::new(150, 160, "Radiology"),
        ];
        let index = HierarchyIndex::build(&entries).unwrap();
        assert_eq!(index.lookup("155").unwrap(), "Radiology");
        assert_eq!(index.lookup("149").unwrap(), "Imaging");
    }

    #[test]
    fn inverted_range_is_rejected() {
        let entries = vec![HierarchyEntry::new(200, 100, "Broken")];
        assert!(matches!(
            HierarchyIndex::build(&entries),
            Err(AdherenceError::InvalidRange { .. })
        ));
    }
}
