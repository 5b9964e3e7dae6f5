//! Semantic-graph data facade.
//!
//! `semops` puts one prefix table and one typing policy in front of an RDF
//! toolkit:
//!
//! | Component | Role |
//! |-----------|------|
//! | [`GraphFacade`] | Turtle, N-Quads and JSON-LD in and out of a [`Dataset`] |
//! | [`query::QueryAggregator`] | Drains streamed CONSTRUCT / SELECT / ASK results |
//! | [`isomorphic`] | Dataset equivalence up to blank node relabelling |
//!
//! The term model, registry and classifier live in [`semops_model`] and are
//! re-exported here.
//!
//! # Entry Point
//!
//! ```
//! use semops::{GraphFacade, Dataset};
//!
//! let facade = GraphFacade::default();
//! let mut data = Dataset::new();
//! facade.add_triple(
//!     &mut data,
//!     "https://foerderfunke.org/default#alice",
//!     "https://foerderfunke.org/default#age",
//!     "42",
//! )?;
//! let turtle = facade.to_turtle(&data);
//! assert!(turtle.contains("ff:age \"42\"^^xsd:integer"));
//! assert!(semops::isomorphic(&facade.from_turtle(&turtle)?, &data)?);
//! # Ok::<(), semops::Error>(())
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

mod bridge;
pub mod equivalence;
pub mod error;
pub mod facade;
pub mod query;

pub use equivalence::isomorphic;
pub use error::{Error, Format, QueryError, Result};
pub use facade::GraphFacade;
pub use semops_model::{
    vocab, Dataset, Literal, ObjectValue, PrefixRegistry, Quad, Rule, Term, TermClassifier,
};
pub use semops_model as model;
