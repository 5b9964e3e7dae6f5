//! Turns engine event streams into CONSTRUCT quads, SELECT rows and ASK answers.
//!
//! CONSTRUCT results reach the optional target dataset only after the stream
//! ended cleanly.

use semops_model::{Dataset, Quad};
use tracing::{debug, warn};

use super::{QueryEngine, Row};
use crate::error::QueryError;

/// Collects streamed query results into in-memory values.
///
/// Each call resolves exactly once: with every result in emission order,
/// or with the first error. Partial results are never returned.
#[derive(Debug, Clone, Default)]
pub struct QueryAggregator<E> {
    engine: E,
}

impl<E: QueryEngine> QueryAggregator<E> {
    /// Wraps an engine.
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    /// The wrapped engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Runs a CONSTRUCT query and collects the emitted quads.
    ///
    /// With a `target`, the quads are also added to it, but only once the
    /// stream has ended successfully. A failed query leaves the target as it
    /// was.
    ///
    /// # Errors
    ///
    /// [`QueryError::Stream`] if the engine reports an error,
    /// [`QueryError::Closed`] if the stream ends without a terminal event.
    pub async fn construct_quads(
        &self,
        query: &str,
        sources: &[&Dataset],
        target: Option<&mut Dataset>,
    ) -> Result<Vec<Quad>, QueryError> {
        let mut quads = Vec::new();
        self.engine
            .construct(query, sources)
            .drain(|quad| quads.push(quad))
            .await
            .inspect_err(|err| warn!(error = %err, "construct query failed"))?;

        if let Some(target) = target {
            let added = quads.iter().filter(|q| target.insert((*q).clone())).count();
            debug!(emitted = quads.len(), added, "construct results committed");
        } else {
            debug!(emitted = quads.len(), "construct results collected");
        }
        Ok(quads)
    }

    /// Runs a SELECT query and flattens every solution into a [`Row`].
    ///
    /// # Errors
    ///
    /// As [`QueryAggregator::construct_quads`].
    pub async fn select_bindings(
        &self,
        query: &str,
        sources: &[&Dataset],
    ) -> Result<Vec<Row>, QueryError> {
        let mut rows = Vec::new();
        self.engine
            .select(query, sources)
            .drain(|bindings| rows.push(Row::from(bindings)))
            .await
            .inspect_err(|err| warn!(error = %err, "select query failed"))?;
        debug!(rows = rows.len(), "select results collected");
        Ok(rows)
    }

    /// Runs an ASK query.
    ///
    /// # Errors
    ///
    /// [`QueryError::Engine`] with the engine's error.
    pub async fn ask_boolean(&self, query: &str, sources: &[&Dataset]) -> Result<bool, QueryError> {
        let answer = self
            .engine
            .ask(query, sources)
            .await
            .map_err(QueryError::Engine)
            .inspect_err(|err| warn!(error = %err, "ask query failed"))?;
        debug!(answer, "ask query answered");
        Ok(answer)
    }
}
