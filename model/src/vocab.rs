//! Namespace bases and the handful of vocabulary IRIs the facade refers to.
//!
//! The six namespaces below make up the built-in prefix table returned by
//! [`PrefixRegistry::default()`](crate::PrefixRegistry::default).

/// Domain namespace of the eligibility knowledge graph.
pub const FF: &str = "https://foerderfunke.org/default#";
/// SHACL shape-constraint namespace.
pub const SH: &str = "http://www.w3.org/ns/shacl#";
/// XML Schema datatype namespace.
pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
/// RDF core namespace.
pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
/// RDF Schema namespace.
pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
/// schema.org namespace.
pub const SCHEMA: &str = "http://schema.org/";

/// `(prefix, base)` pairs of the built-in table, in registration order.
pub const DEFAULT_PREFIXES: &[(&str, &str)] = &[
    ("ff", FF),
    ("sh", SH),
    ("xsd", XSD),
    ("rdf", RDF),
    ("rdfs", RDFS),
    ("schema", SCHEMA),
];

/// `rdf:type`.
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
/// `rdf:langString`, the datatype of language-tagged literals.
pub const RDF_LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";
/// `xsd:string`, the datatype of plain literals.
pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
/// `xsd:boolean`.
pub const XSD_BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
/// `xsd:integer`.
pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
/// `xsd:decimal`.
pub const XSD_DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
/// `xsd:date`.
pub const XSD_DATE: &str = "http://www.w3.org/2001/XMLSchema#date";
/// `xsd:dateTime`.
pub const XSD_DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";
