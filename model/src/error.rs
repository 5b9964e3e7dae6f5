//! Error type for registry construction and quad assembly.

/// Errors raised while building a prefix registry or assembling quads.
///
/// Classification, expansion and compaction are total and never produce
/// one of these.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The same prefix name was registered twice.
    #[error("prefix `{0}` is registered more than once")]
    DuplicatePrefix(String),

    /// A prefix name is empty or contains characters that break `prefix:local` parsing.
    #[error("invalid prefix name `{name}`: {reason}")]
    InvalidPrefixName {
        /// The offending name.
        name: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// A base IRI cannot act as a namespace.
    #[error("invalid base IRI `{iri}` for prefix `{name}`: {reason}")]
    InvalidBase {
        /// Prefix the base was registered under.
        name: String,
        /// The offending IRI.
        iri: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// A quad position that only admits IRIs (or blank nodes) received something else.
    #[error("quad {position} must be {expected}, found {term}")]
    InvalidQuadTerm {
        /// `subject`, `predicate` or `graph`.
        position: &'static str,
        /// What the position admits.
        expected: &'static str,
        /// N-Triples rendering of the rejected term.
        term: String,
    },

    /// The prefix configuration file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File that was being read.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The prefix configuration file is not valid TOML or has the wrong shape.
    #[error("failed to parse prefix configuration: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result alias used throughout `semops-model`.
pub type Result<T, E = Error> = std::result::Result<T, E>;
