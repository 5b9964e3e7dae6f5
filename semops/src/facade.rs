//! Conversions between datasets, Turtle, N-Quads and JSON-LD.
//!
//! Writers are the prefix-aware serializers of `semops-model`; readers are
//! sophia's parsers. Every reader collects the whole document before touching
//! a dataset, so malformed input never leaves a partial result behind.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use semops_model::serializer::{jsonld, nquads, turtle};
use semops_model::{vocab, Dataset, ObjectValue, PrefixRegistry, Quad, Term, TermClassifier};
use serde_json::Value;
use sophia_api::parser::QuadParser;
use sophia_api::source::{QuadSource, StreamError};
use sophia_jsonld::JsonLdParser;
use tracing::{debug, warn};

use crate::bridge;
use crate::error::{Error, Format, Result};

/// Prefix-aware conversion facade.
///
/// One registry drives Turtle prefix declarations, the JSON-LD `@context`,
/// and expansion of prefixed names handed to the classifier.
#[derive(Debug)]
pub struct GraphFacade {
    registry: Arc<PrefixRegistry>,
    classifier: TermClassifier,
    /// Counter for per-document blank node scopes in [`GraphFacade::add_turtle`].
    documents: AtomicU64,
}

impl GraphFacade {
    /// Creates a facade over `registry`.
    pub fn new(registry: Arc<PrefixRegistry>) -> Self {
        Self {
            classifier: TermClassifier::new(registry.clone()),
            registry,
            documents: AtomicU64::new(0),
        }
    }

    /// The prefix table.
    pub fn registry(&self) -> &PrefixRegistry {
        &self.registry
    }

    /// The classifier used by [`GraphFacade::add_triple`].
    pub fn classifier(&self) -> &TermClassifier {
        &self.classifier
    }

    /// Serializes a dataset to Turtle, declaring every registry prefix.
    pub fn to_turtle(&self, dataset: &Dataset) -> String {
        turtle::to_turtle(dataset, &self.registry)
    }

    /// Parses a Turtle (or TriG) document into a fresh dataset.
    ///
    /// Blank node labels are kept as written.
    ///
    /// # Errors
    ///
    /// [`Error::Parse`] for malformed input.
    pub fn from_turtle(&self, text: &str) -> Result<Dataset> {
        let quads = self.parse_turtle(text, None)?;
        debug!(quads = quads.len(), "parsed turtle document");
        Ok(quads.into_iter().collect())
    }

    /// Parses a Turtle document and adds its quads to `dataset`.
    ///
    /// Blank nodes are relabelled per call so that two documents using the
    /// same label stay distinct. Returns how many quads were new.
    ///
    /// # Errors
    ///
    /// [`Error::Parse`] for malformed input; `dataset` is then unchanged.
    pub fn add_turtle(&self, dataset: &mut Dataset, text: &str) -> Result<usize> {
        let scope = format!("d{}_", self.documents.fetch_add(1, Ordering::Relaxed));
        let quads = self.parse_turtle(text, Some(&scope))?;
        let parsed = quads.len();
        let added = quads.into_iter().filter(|q| dataset.insert(q.clone())).count();
        debug!(parsed, added, "merged turtle document");
        Ok(added)
    }

    /// Builds one dataset from several Turtle documents.
    ///
    /// # Errors
    ///
    /// The first [`Error::Parse`] encountered.
    pub fn store_from_turtles<I, S>(&self, texts: I) -> Result<Dataset>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dataset = Dataset::new();
        for text in texts {
            self.add_turtle(&mut dataset, text.as_ref())?;
        }
        Ok(dataset)
    }

    /// Serializes a dataset to N-Quads.
    pub fn to_nquads(&self, dataset: &Dataset) -> String {
        nquads::to_nquads(dataset)
    }

    /// Parses an N-Quads document.
    ///
    /// # Errors
    ///
    /// [`Error::Parse`] for malformed input.
    pub fn from_nquads(&self, text: &str) -> Result<Dataset> {
        let source = sophia_turtle::parser::nq::parse_str(text);
        let quads = collect_quads(source, Format::NQuads, None)?;
        debug!(quads = quads.len(), "parsed n-quads document");
        Ok(quads.into_iter().collect())
    }

    /// Serializes a dataset to a compacted JSON-LD document.
    ///
    /// With `root_types` the document is framed: only nodes of those types
    /// (IRIs or prefixed names) lead the top level and the nodes they
    /// reference are embedded once each. Nodes no root reaches follow them.
    pub fn to_document(&self, dataset: &Dataset, root_types: &[&str]) -> Value {
        let doc = jsonld::to_json_ld(dataset, &self.registry, root_types);
        debug!(
            quads = dataset.len(),
            framed = !root_types.is_empty(),
            "built json-ld document"
        );
        doc
    }

    /// Expands a JSON-LD document into a dataset.
    ///
    /// # Errors
    ///
    /// [`Error::Parse`] if the document is not valid JSON-LD.
    pub fn from_document(&self, doc: &Value) -> Result<Dataset> {
        let text = serde_json::to_string(doc)?;
        let parser = JsonLdParser::new();
        let quads = collect_quads(parser.parse_str(&text), Format::JsonLd, None)?;
        debug!(quads = quads.len(), "expanded json-ld document");
        Ok(quads.into_iter().collect())
    }

    /// Adds one statement, classifying the object.
    ///
    /// Subject and predicate are taken as full IRIs. Returns `false` if the
    /// statement was already present.
    ///
    /// # Errors
    ///
    /// Never fails for IRI subjects; the result mirrors [`Quad::new`].
    pub fn add_triple(
        &self,
        dataset: &mut Dataset,
        subject: &str,
        predicate: &str,
        object: impl Into<ObjectValue>,
    ) -> Result<bool> {
        let object = self.classifier.classify(object);
        Ok(dataset.insert(Quad::new(Term::iri(subject), predicate, object)?))
    }

    /// Finds the first subject, in document order, typed with `class`.
    ///
    /// `class` may be an IRI or a prefixed name of the registry. Only IRI
    /// subjects count; blank nodes are skipped.
    ///
    /// # Errors
    ///
    /// [`Error::Parse`] for malformed input.
    pub fn extract_first_individual(&self, text: &str, class: &str) -> Result<Option<String>> {
        let class = Term::iri(self.registry.expand(class));
        let found = self
            .parse_turtle(text, None)?
            .into_iter()
            .filter(|q| q.predicate() == vocab::RDF_TYPE && *q.object() == class)
            .find_map(|q| q.subject().as_iri().map(str::to_owned));
        if found.is_none() {
            warn!(class = %class, "no individual of class found");
        }
        Ok(found)
    }
}

impl GraphFacade {
    /// Parses Turtle with every registry prefix pre-declared.
    ///
    /// The declarations share the document's first line, so parser line
    /// numbers still point into `text`. Declarations in `text` override them.
    fn parse_turtle(&self, text: &str, blank_scope: Option<&str>) -> Result<Vec<Quad>> {
        let mut source = String::with_capacity(text.len() + 256);
        for entry in turtle::declarable_prefixes(&self.registry) {
            source.push_str(&format!("@prefix {}: <{}> . ", entry.name, entry.base));
        }
        source.push_str(text);
        let parsed = sophia_turtle::parser::trig::parse_str(&source);
        collect_quads(parsed, Format::Turtle, blank_scope)
    }
}

impl Default for GraphFacade {
    fn default() -> Self {
        Self::new(Arc::new(PrefixRegistry::default()))
    }
}

/// Drains a quad source in emission order.
fn collect_quads<S: QuadSource>(
    mut source: S,
    format: Format,
    blank_scope: Option<&str>,
) -> Result<Vec<Quad>> {
    let mut quads = Vec::new();
    let outcome = source.try_for_each_quad(|quad| -> Result<()> {
        quads.push(bridge::quad_from_sophia(quad, blank_scope)?);
        Ok(())
    });
    match outcome {
        Ok(()) => Ok(quads),
        Err(StreamError::SourceError(err)) => {
            warn!(%format, error = %err, "parse failed");
            Err(Error::Parse {
                format,
                message: err.to_string(),
            })
        }
        Err(StreamError::SinkError(err)) => Err(err),
    }
}
