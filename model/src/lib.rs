//! RDF term model, prefix registry and term classifier for the SemOps facade.
//!
//! The `semops-model` crate holds everything that does not need an external
//! RDF engine: owned [`Term`]s and [`Quad`]s, the in-memory [`Dataset`], the
//! bidirectional [`PrefixRegistry`], the scalar-to-term [`TermClassifier`],
//! and prefix-aware serializers for Turtle, N-Quads and JSON-LD.
//!
//! # Entry Point
//!
//! ```
//! use std::sync::Arc;
//! use semops_model::{PrefixRegistry, Term, TermClassifier};
//!
//! let registry = Arc::new(PrefixRegistry::default());
//! let classifier = TermClassifier::new(registry.clone());
//! assert_eq!(
//!     classifier.classify("ff:Citizen"),
//!     Term::iri("https://foerderfunke.org/default#Citizen")
//! );
//! assert_eq!(registry.compact("http://www.w3.org/2001/XMLSchema#date"), "xsd:date");
//! ```
//!
//! # Serialization
//!
//! ```
//! use semops_model::{serializer, Dataset, PrefixRegistry};
//!
//! let dataset = Dataset::new();
//! let registry = PrefixRegistry::default();
//! let turtle = serializer::turtle::to_turtle(&dataset, &registry);
//! let json_ld = serializer::jsonld::to_json_ld(&dataset, &registry, &[]);
//! assert!(turtle.contains("@prefix ff:"));
//! assert!(json_ld["@graph"].is_array());
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod classify;
pub mod dataset;
pub mod error;
mod lexical;
pub mod prefix;
pub mod serializer;
pub mod term;
pub mod vocab;

pub use classify::{ObjectValue, Rule, TermClassifier};
pub use dataset::Dataset;
pub use error::{Error, Result};
pub use prefix::{PrefixEntry, PrefixRegistry};
pub use term::{Literal, Quad, Term};
