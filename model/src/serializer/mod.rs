//! Serializers for [`Dataset`](crate::Dataset)s.
//!
//! Three output forms are supported:
//! - **Turtle** ([`turtle`]): prefixed, grouped by subject; named graphs as TriG blocks
//! - **N-Quads** ([`nquads`]): the line-oriented exchange form, absolute IRIs only
//! - **JSON-LD** ([`jsonld`]): compacted against the prefix table, optionally framed

pub mod jsonld;
pub mod nquads;
pub mod turtle;
