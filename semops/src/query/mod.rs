//! Query result aggregation.
//!
//! A [`QueryEngine`] evaluates queries however it likes and reports results
//! as an [`EventStream`]. [`QueryAggregator`] drains those streams into
//! in-memory collections, resolving exactly once per query.

mod aggregate;
mod stream;

use std::future::Future;

use semops_model::{Dataset, Quad, Term};

pub use aggregate::QueryAggregator;
pub use stream::{event_channel, EngineError, EventSink, EventStream, StreamEvent};

/// Variable bindings for one SELECT solution, in projection order.
pub type Bindings = Vec<(String, Term)>;

/// A query engine over a set of source datasets.
///
/// Evaluation is asynchronous. `construct` and `select` hand back a stream
/// immediately and feed it as results become available.
pub trait QueryEngine {
    /// Evaluates a CONSTRUCT query.
    fn construct(&self, query: &str, sources: &[&Dataset]) -> EventStream<Quad>;

    /// Evaluates a SELECT query.
    fn select(&self, query: &str, sources: &[&Dataset]) -> EventStream<Bindings>;

    /// Evaluates an ASK query.
    fn ask(
        &self,
        query: &str,
        sources: &[&Dataset],
    ) -> impl Future<Output = Result<bool, EngineError>> + Send;
}

/// One SELECT solution with every bound term flattened to its string value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    values: Vec<(String, String)>,
}

impl Row {
    /// Value bound to `variable`, if any.
    #[must_use]
    pub fn get(&self, variable: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(name, _)| name == variable)
            .map(|(_, value)| value.as_str())
    }

    /// `(variable, value)` pairs in projection order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.values.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Number of bound variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no variable is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Bindings> for Row {
    fn from(bindings: Bindings) -> Self {
        Self {
            values: bindings
                .into_iter()
                .map(|(name, term)| {
                    let value = term.value().to_owned();
                    (name, value)
                })
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use semops_model::vocab;

    #[test]
    fn row_flattens_terms_to_values() {
        let row = Row::from(vec![
            ("s".to_owned(), Term::iri("https://example.org/a")),
            ("n".to_owned(), Term::typed_literal("42", vocab::XSD_INTEGER)),
            ("b".to_owned(), Term::blank("x")),
        ]);
        assert_eq!(row.get("s"), Some("https://example.org/a"));
        assert_eq!(row.get("n"), Some("42"));
        assert_eq!(row.get("b"), Some("x"));
        assert_eq!(row.get("missing"), None);
        let names: Vec<&str> = row.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["s", "n", "b"]);
    }
}
