//! Loaders for the two reference-data structures and the raw
//! procedure-code input format.
//!
//! The pathway registry is a JSON document mapping each diagnosis code to
//! its candidate pathways, each pathway an ordered array of steps:
//!
//! ```json
//! {
//!   "M17": [
//!     [
//!       { "name": "Imaging", "codes": ["73560", "73562"] },
//!       { "name": "Surgery", "codes": ["27447"] }
//!     ]
//!   ]
//! }
//! ```
//!
//! The hierarchy table is a CSV file with `Start Code`, `End Code`, and
//! `CPT Minor Category` columns. Both structures are validated at load
//! time so scoring never sees a malformed definition.

use std::io::Read;

use log::info;
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::error::{AdherenceError, Result};
use crate::model::{CarePathway, HierarchyEntry, PathwayRegistry, PathwayStep};

#[derive(Debug, Deserialize)]
struct StepDef {
    name: String,
    codes: Vec<String>,
}

/// Load and validate the pathway registry from its JSON source.
///
/// Pathways without steps and steps without accepted codes are rejected
/// here rather than degraded at scoring time.
pub fn load_pathway_registry<R: Read>(reader: R) -> Result<PathwayRegistry> {
    let raw: FxHashMap<String, Vec<Vec<StepDef>>> = serde_json::from_reader(reader)?;

    let mut by_diagnosis = FxHashMap::default();
    for (diagnosis, pathway_defs) in raw {
        let mut pathways = Vec::with_capacity(pathway_defs.len());
        for steps in pathway_defs {
            if steps.is_empty() {
                return Err(AdherenceError::MalformedPathway(format!(
                    "pathway for diagnosis {diagnosis} has no steps"
                )));
            }
            let steps = steps
                .into_iter()
                .map(|def| {
                    if def.codes.is_empty() {
                        return Err(AdherenceError::MalformedPathway(format!(
                            "step {:?} for diagnosis {diagnosis} accepts no codes",
                            def.name
                        )));
                    }
                    Ok(PathwayStep::new(def.name, def.codes))
                })
                .collect::<Result<Vec<_>>>()?;
            pathways.push(CarePathway::new(steps));
        }
        by_diagnosis.insert(diagnosis, pathways);
    }

    let registry = PathwayRegistry::new(by_diagnosis);
    info!("loaded pathway registry with {} diagnoses", registry.len());
    Ok(registry)
}

/// Load the code-hierarchy table from its CSV source.
pub fn load_hierarchy<R: Read>(reader: R) -> Result<Vec<HierarchyEntry>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut entries = Vec::new();
    for record in csv_reader.deserialize() {
        let entry: HierarchyEntry = record?;
        if entry.start_code > entry.end_code {
            return Err(AdherenceError::InvalidRange {
                start_code: entry.start_code,
                end_code: entry.end_code,
            });
        }
        entries.push(entry);
    }
    info!("loaded {} hierarchy entries", entries.len());
    Ok(entries)
}

/// Parse a raw whitespace-delimited procedure-code string into the ordered
/// code list.
///
/// Claim exports carry a trailing separator; trailing empty elements are
/// trimmed while interior elements are kept as observed.
#[must_use]
pub fn parse_procedure_codes(raw: &str) -> Vec<String> {
    let mut codes: Vec<String> = raw.split(' ').map(str::to_string).collect();
    while codes.last().is_some_and(String::is_empty) {
        codes.pop();
    }
    codes
}

#[cfg(test)]
mod tests {
    use super::*;

    const REGISTRY_JSON: &str = r#"
    {
        "M17": [
            [
                { "name": "Imaging", "codes": ["100", "101"] },
                { "name": "Surgery", "codes": ["300"] }
            ],
            [
                { "name": "Consult", "codes": ["200"] }
            ]
        ]
    }
    "#;

    const HIERARCHY_CSV: &str = "\
Start Code,End Code,CPT Minor Category
100,199,Imaging
200,299,Consultation
";

    #[test]
    fn registry_loads_pathways_in_authored_order() {
        let registry = load_pathway_registry(REGISTRY_JSON.as_bytes()).unwrap();
        let candidates = registry.candidates("M17").unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].len(), 2);
        assert_eq!(candidates[0].steps()[0].name(), "Imaging");
        assert_eq!(candidates[0].steps()[1].name(), "Surgery");
        assert!(candidates[0].steps()[0].accepts("101"));
    }

    #[test]
    fn registry_rejects_stepless_pathways() {
        let json = r#"{ "M17": [ [] ] }"#;
        assert!(matches!(
            load_pathway_registry(json.as_bytes()),
            Err(AdherenceError::MalformedPathway(_))
        ));
    }

    #[test]
    fn registry_rejects_codeless_steps() {
        let json = r#"{ "M17": [ [ { "name": "Imaging", "codes": [] } ] ] }"#;
        assert!(matches!(
            load_pathway_registry(json.as_bytes()),
            Err(AdherenceError::MalformedPathway(_))
        ));
    }

    #[test]
    fn hierarchy_loads_the_source_columns() {
        let entries = load_hierarchy(HIERARCHY_CSV.as_bytes()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], HierarchyEntry::new(100, 199, "Imaging"));
        assert_eq!(entries[1].category, "Consultation");
    }

    #[test]
    fn hierarchy_rejects_inverted_ranges() {
        let csv = "Start Code,End Code,CPT Minor Category\n200,100,Broken\n";
        assert!(matches!(
            load_hierarchy(csv.as_bytes()),
            Err(AdherenceError::InvalidRange { .. })
        ));
    }

    #[test]
    fn parsing_trims_only_trailing_empties() {
        assert_eq!(parse_procedure_codes("100 200 300 "), vec!["100", "200", "300"]);
        assert_eq!(parse_procedure_codes("100  300"), vec!["100", "", "300"]);
        assert!(parse_procedure_codes("").is_empty());
        assert!(parse_procedure_codes("   ").is_empty());
    }
}
