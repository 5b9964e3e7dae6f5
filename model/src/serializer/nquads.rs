//! N-Quads serializer.
//!
//! One statement per line, absolute IRIs, no prefixes. This is the exchange
//! form between the Turtle and JSON-LD sides of the facade, and the easiest
//! form to diff.

use crate::dataset::Dataset;

/// Serializes every quad of `dataset`, one per line, in dataset order.
#[must_use]
pub fn to_nquads(dataset: &Dataset) -> String {
    let mut out = String::with_capacity(dataset.len() * 96);
    for quad in dataset {
        out.push_str(&quad.to_string());
        out.push('\n');
    }
    out
}
