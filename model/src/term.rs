//! RDF terms and quads.
//!
//! Terms are plain owned values: equality, ordering and hashing are
//! structural, so a [`Quad`] can live in ordered or hashed collections
//! without an interning layer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::vocab;

/// A literal: lexical form plus datatype, and a language tag for `rdf:langString`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Literal {
    lexical: String,
    datatype: String,
    language: Option<String>,
}

impl Literal {
    /// Creates a literal with an explicit datatype IRI.
    pub fn typed(lexical: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: datatype.into(),
            language: None,
        }
    }

    /// Creates a plain (`xsd:string`) literal.
    pub fn simple(lexical: impl Into<String>) -> Self {
        Self::typed(lexical, vocab::XSD_STRING)
    }

    /// Creates a language-tagged literal (datatype `rdf:langString`).
    pub fn lang(lexical: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: vocab::RDF_LANG_STRING.to_owned(),
            language: Some(language.into()),
        }
    }

    /// The lexical form.
    #[must_use]
    pub fn lexical(&self) -> &str {
        &self.lexical
    }

    /// The datatype IRI.
    #[must_use]
    pub fn datatype(&self) -> &str {
        &self.datatype
    }

    /// The language tag, if this is a language-tagged literal.
    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Returns true for an `xsd:string` literal without language tag.
    #[must_use]
    pub fn is_simple(&self) -> bool {
        self.language.is_none() && self.datatype == vocab::XSD_STRING
    }
}

/// An RDF term.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Term {
    /// A named resource.
    Iri(String),
    /// A literal value.
    Literal(Literal),
    /// A blank node, identified only within one dataset.
    BlankNode(String),
}

impl Term {
    /// Creates a named resource.
    pub fn iri(iri: impl Into<String>) -> Self {
        Term::Iri(iri.into())
    }

    /// Creates a blank node with the given local identifier (without `_:`).
    pub fn blank(id: impl Into<String>) -> Self {
        Term::BlankNode(id.into())
    }

    /// Creates a literal with an explicit datatype IRI.
    pub fn typed_literal(lexical: impl Into<String>, datatype: impl Into<String>) -> Self {
        Term::Literal(Literal::typed(lexical, datatype))
    }

    /// Creates a plain (`xsd:string`) literal.
    pub fn simple_literal(lexical: impl Into<String>) -> Self {
        Term::Literal(Literal::simple(lexical))
    }

    /// The string value of the term: the IRI, the lexical form, or the blank node id.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Term::Iri(iri) => iri,
            Term::Literal(lit) => lit.lexical(),
            Term::BlankNode(id) => id,
        }
    }

    /// The IRI, if this term is a named resource.
    #[must_use]
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// Returns true for IRIs and blank nodes.
    #[must_use]
    pub fn is_resource(&self) -> bool {
        !matches!(self, Term::Literal(_))
    }
}

impl From<Literal> for Term {
    fn from(lit: Literal) -> Self {
        Term::Literal(lit)
    }
}

/// N-Triples rendering.
impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "<{}>", iri),
            Term::BlankNode(id) => write!(f, "_:{}", id),
            Term::Literal(lit) => {
                write!(f, "\"{}\"", escape_string(lit.lexical()))?;
                match lit.language() {
                    Some(lang) => write!(f, "@{}", lang),
                    None if lit.is_simple() => Ok(()),
                    None => write!(f, "^^<{}>", lit.datatype()),
                }
            }
        }
    }
}

/// An immutable subject–predicate–object statement with an optional named graph.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Quad {
    subject: Term,
    predicate: String,
    object: Term,
    graph: Option<Term>,
}

impl Quad {
    /// Creates a quad in the default graph.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidQuadTerm`] if `subject` is a literal.
    pub fn new(subject: Term, predicate: impl Into<String>, object: Term) -> Result<Self> {
        ensure_resource("subject", &subject)?;
        Ok(Self {
            subject,
            predicate: predicate.into(),
            object,
            graph: None,
        })
    }

    /// Creates a quad from terms, checking that the predicate is an IRI.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidQuadTerm`] if the subject or graph is a literal
    /// or the predicate is not an IRI.
    pub fn from_terms(
        subject: Term,
        predicate: Term,
        object: Term,
        graph: Option<Term>,
    ) -> Result<Self> {
        let predicate = match predicate {
            Term::Iri(iri) => iri,
            other => {
                return Err(Error::InvalidQuadTerm {
                    position: "predicate",
                    expected: "an IRI",
                    term: other.to_string(),
                })
            }
        };
        let quad = Self::new(subject, predicate, object)?;
        match graph {
            Some(g) => quad.in_graph(g),
            None => Ok(quad),
        }
    }

    /// Moves this quad into the named graph `graph`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidQuadTerm`] if `graph` is a literal.
    pub fn in_graph(mut self, graph: Term) -> Result<Self> {
        ensure_resource("graph", &graph)?;
        self.graph = Some(graph);
        Ok(self)
    }

    /// The subject (an IRI or blank node).
    #[must_use]
    pub fn subject(&self) -> &Term {
        &self.subject
    }

    /// The predicate IRI.
    #[must_use]
    pub fn predicate(&self) -> &str {
        &self.predicate
    }

    /// The object.
    #[must_use]
    pub fn object(&self) -> &Term {
        &self.object
    }

    /// The named graph, or `None` for the default graph.
    #[must_use]
    pub fn graph(&self) -> Option<&Term> {
        self.graph.as_ref()
    }
}

/// N-Quads rendering, without the trailing newline.
impl fmt::Display for Quad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}> {}", self.subject, self.predicate, self.object)?;
        if let Some(graph) = &self.graph {
            write!(f, " {}", graph)?;
        }
        f.write_str(" .")
    }
}

fn ensure_resource(position: &'static str, term: &Term) -> Result<()> {
    if term.is_resource() {
        Ok(())
    } else {
        Err(Error::InvalidQuadTerm {
            position,
            expected: "an IRI or blank node",
            term: term.to_string(),
        })
    }
}

/// Escapes a lexical form for a double-quoted N-Triples/Turtle string.
pub(crate) fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}
