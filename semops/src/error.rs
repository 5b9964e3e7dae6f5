//! Error types for conversions, equivalence checks and query aggregation.

use std::fmt;

use crate::query::EngineError;

/// Textual and document formats the facade reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Turtle (read as TriG).
    Turtle,
    /// N-Quads.
    NQuads,
    /// JSON-LD.
    JsonLd,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Format::Turtle => "Turtle",
            Format::NQuads => "N-Quads",
            Format::JsonLd => "JSON-LD",
        })
    }
}

/// Errors raised by the conversion facade and the equivalence checker.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed input. Nothing was added to any dataset.
    #[error("failed to parse {format}: {message}")]
    Parse {
        /// Format being parsed.
        format: Format,
        /// The parser's own message.
        message: String,
    },

    /// The parser produced a term the quad model cannot hold (RDF-star triple, variable).
    #[error("unsupported {0} term in parsed input")]
    UnsupportedTerm(String),

    /// A parsed statement did not fit the quad model (e.g. a literal subject).
    #[error(transparent)]
    Model(#[from] semops_model::Error),

    /// The isomorphism routine failed to index one of the datasets.
    #[error("isomorphism check failed: {0}")]
    Isomorphism(String),

    /// A JSON-LD document could not be re-encoded for the parser.
    #[error("failed to encode JSON-LD document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for facade operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised while aggregating query results.
///
/// Whatever was collected before the failure is discarded.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// The engine reported an error mid-stream.
    #[error("query stream failed: {0}")]
    Stream(#[source] EngineError),

    /// The engine failed a single-shot (ASK) query.
    #[error("query engine failed: {0}")]
    Engine(#[source] EngineError),

    /// The engine dropped the stream without signalling end or error.
    #[error("query stream closed without signalling completion")]
    Closed,
}
