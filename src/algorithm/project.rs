//! Projection of observed procedure codes onto pathway symbols.

use log::debug;

use crate::algorithm::encode::TargetSequence;
use crate::algorithm::{SENTINEL, Symbol, SymbolSeq};
use crate::error::{AdherenceError, Result};
use crate::model::{CarePathway, HierarchyIndex};

/// How observed codes are matched against pathway steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionMode {
    /// Only codes explicitly listed in a step's accepted set match
    Exact,
    /// Exact matching first; on miss, fall back to matching the code's
    /// minor category against the categories of the steps' numeric codes
    Rollup,
}

/// The projected symbol sequence of an observation and the share of
/// observed codes that resolved to a step
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    /// Projected symbols, opened by the sentinel anchor
    pub symbols: SymbolSeq,
    /// `(symbols.len() - 1) / observed code count`
    pub match_fraction: f64,
}

/// Project an observed procedure-code sequence onto the symbols of a
/// pathway.
///
/// Each code is matched against the steps in authored order and the symbol
/// of the first accepting step is appended; codes matching no step are
/// skipped, not encoded as gaps. An empty observation makes the match
/// fraction undefined and is reported as [`AdherenceError::DivisionUndefined`].
pub fn project(
    codes: &[String],
    pathway: &CarePathway,
    target: &TargetSequence,
    mode: ProjectionMode,
    hierarchy: &HierarchyIndex,
) -> Result<Projection> {
    if codes.is_empty() {
        return Err(AdherenceError::DivisionUndefined);
    }

    let mut symbols = SymbolSeq::new();
    symbols.push(SENTINEL);

    for code in codes {
        if mode == ProjectionMode::Rollup && is_placeholder(code) {
            continue;
        }
        if let Some(symbol) = match_exact(code, pathway, target) {
            symbols.push(symbol);
            continue;
        }
        if mode == ProjectionMode::Rollup {
            if let Some(symbol) = match_rollup(code, pathway, target, hierarchy) {
                symbols.push(symbol);
            }
        }
    }

    let match_fraction = (symbols.len() - 1) as f64 / codes.len() as f64;
    Ok(Projection {
        symbols,
        match_fraction,
    })
}

/// Symbol of the first step in authored order whose accepted set contains
/// the code
fn match_exact(code: &str, pathway: &CarePathway, target: &TargetSequence) -> Option<Symbol> {
    pathway
        .steps()
        .iter()
        .position(|step| step.accepts(code))
        .map(|index| target.symbol_for_step(index))
}

/// Symbol of the first step in authored order holding any numeric code of
/// the same minor category as the observed code.
///
/// Non-numeric codes, codes outside the hierarchy, and categories shared
/// by no step all roll up to nothing; the observation is skipped silently.
fn match_rollup(
    code: &str,
    pathway: &CarePathway,
    target: &TargetSequence,
    hierarchy: &HierarchyIndex,
) -> Option<Symbol> {
    let category = hierarchy.category_id(code)?;

    for (index, step) in pathway.steps().iter().enumerate() {
        let shares_category = step
            .codes()
            .any(|accepted| hierarchy.category_id(accepted) == Some(category));
        if shares_category {
            return Some(target.symbol_for_step(index));
        }
    }

    debug!("no step shares a category with procedure code {code}");
    None
}

/// Source-data placeholders carried through claim exports
fn is_placeholder(code: &str) -> bool {
    code.is_empty() || code == "None"
}
