//! Graph equivalence up to blank node relabelling.

use semops_model::{Dataset, Term};
use tracing::debug;

use crate::bridge;
use crate::error::{Error, Result};

/// Returns true if `a` and `b` are isomorphic: some bijection between their
/// blank nodes makes them equal. IRIs and literals must match exactly.
///
/// Datasets without blank nodes are compared directly.
///
/// # Errors
///
/// [`Error::Isomorphism`] if either dataset cannot be indexed for the check.
pub fn isomorphic(a: &Dataset, b: &Dataset) -> Result<bool> {
    if a.len() != b.len() {
        return Ok(false);
    }
    if !has_blank_nodes(a) && !has_blank_nodes(b) {
        return Ok(a == b);
    }
    let left = bridge::dataset_to_sophia(a)?;
    let right = bridge::dataset_to_sophia(b)?;
    let same = sophia::isomorphism::isomorphic_datasets(&left, &right)
        .map_err(|e| Error::Isomorphism(e.to_string()))?;
    debug!(quads = a.len(), same, "compared datasets with blank nodes");
    Ok(same)
}

fn has_blank_nodes(dataset: &Dataset) -> bool {
    let blank = |t: &Term| matches!(t, Term::BlankNode(_));
    dataset
        .iter()
        .any(|q| blank(q.subject()) || blank(q.object()) || q.graph().is_some_and(blank))
}
