//! JSON-LD 1.1 serializer.
//!
//! Produces a compacted document whose `@context` is the prefix table and
//! whose `@graph` holds one node object per subject. With a non-empty list of
//! root types the graph is framed instead: nodes typed with one of the roots
//! lead the top level, and the nodes they reference are embedded in place.
//! Every node is embedded at most once per graph (`@embed: @once`); later
//! occurrences, cycles included, are `{"@id": ...}` references. Nodes no
//! root reaches follow the roots at the top level, so framing never loses a
//! statement. Blank nodes referenced exactly once, within the graph that
//! describes them, lose their `@id` when embedded.
//!
//! Named graphs become `{"@id": <graph>, "@graph": [...]}` entries shaped the
//! same way.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::{json, Map, Value};

use crate::dataset::Dataset;
use crate::prefix::PrefixRegistry;
use crate::term::{Quad, Term};
use crate::vocab;

/// Serializes `dataset` to a JSON-LD `Value`, framed on `root_types` if any.
///
/// Root types may be IRIs or prefixed names of the registry.
#[must_use]
pub fn to_json_ld(dataset: &Dataset, registry: &PrefixRegistry, root_types: &[&str]) -> Value {
    let roots: BTreeSet<String> = root_types.iter().map(|t| registry.expand(t)).collect();
    let anonymous = anonymous_blank_nodes(dataset);

    let mut named: BTreeMap<&Term, Vec<&Quad>> = BTreeMap::new();
    let mut default_graph: Vec<&Quad> = Vec::new();
    for quad in dataset {
        match quad.graph() {
            Some(graph) => named.entry(graph).or_default().push(quad),
            None => default_graph.push(quad),
        }
    }

    let mut graph = GraphShaper::new(&default_graph, registry, &anonymous).shape(&roots);
    for (name, quads) in named {
        graph.push(json!({
            "@id": id_of(name, registry),
            "@graph": GraphShaper::new(&quads, registry, &anonymous).shape(&roots),
        }));
    }

    json!({
        "@context": build_context(registry),
        "@graph": graph
    })
}

/// Blank nodes that may be embedded without `@id`: referenced exactly once,
/// never naming a graph, and described only in the graph of that reference.
fn anonymous_blank_nodes(dataset: &Dataset) -> BTreeSet<&Term> {
    let mut refs: BTreeMap<&Term, (usize, Option<&Term>)> = BTreeMap::new();
    for quad in dataset {
        if matches!(quad.object(), Term::BlankNode(_)) {
            let entry = refs.entry(quad.object()).or_insert((0, quad.graph()));
            entry.0 += 1;
        }
    }
    let mut anonymous: BTreeSet<&Term> = refs
        .iter()
        .filter(|(_, (count, _))| *count == 1)
        .map(|(term, _)| *term)
        .collect();
    for quad in dataset {
        if let Some(graph) = quad.graph() {
            anonymous.remove(graph);
        }
        let home = refs.get(quad.subject()).map(|(_, graph)| *graph);
        if home != Some(quad.graph()) {
            anonymous.remove(quad.subject());
        }
    }
    anonymous
}

fn build_context(registry: &PrefixRegistry) -> Value {
    let mut ctx = Map::new();
    for entry in registry.entries() {
        ctx.insert(entry.name.clone(), json!(entry.base));
    }
    Value::Object(ctx)
}

struct GraphShaper<'a> {
    registry: &'a PrefixRegistry,
    /// Outgoing quads per subject, in dataset order.
    subjects: BTreeMap<&'a Term, Vec<&'a Quad>>,
    /// Blank nodes embedded without `@id`.
    anonymous: &'a BTreeSet<&'a Term>,
}

impl<'a> GraphShaper<'a> {
    fn new(
        quads: &[&'a Quad],
        registry: &'a PrefixRegistry,
        anonymous: &'a BTreeSet<&'a Term>,
    ) -> Self {
        let mut subjects: BTreeMap<&Term, Vec<&Quad>> = BTreeMap::new();
        for quad in quads {
            subjects.entry(quad.subject()).or_default().push(quad);
        }
        Self {
            registry,
            subjects,
            anonymous,
        }
    }

    fn shape(&self, roots: &BTreeSet<String>) -> Vec<Value> {
        if roots.is_empty() {
            return self
                .subjects
                .keys()
                .map(|s| Value::Object(self.flat_node(s)))
                .collect();
        }
        let tops: Vec<&'a Term> = self
            .subjects
            .iter()
            .filter(|(_, quads)| {
                quads.iter().any(|q| {
                    q.predicate() == vocab::RDF_TYPE
                        && q.object().as_iri().is_some_and(|t| roots.contains(t))
                })
            })
            .map(|(s, _)| *s)
            .collect();
        let mut seen: BTreeSet<&'a Term> = tops.iter().copied().collect();
        let mut graph: Vec<Value> = tops
            .iter()
            .map(|&s| Value::Object(self.framed_node(s, &mut seen, true)))
            .collect();

        // Unreached nodes, single-use blank nodes last so a referrer can still embed them.
        let mut rest: Vec<&'a Term> = self
            .subjects
            .keys()
            .copied()
            .filter(|s| !seen.contains(s))
            .collect();
        rest.sort_by_key(|s| self.embeds_without_id(s));
        for subject in rest {
            if seen.insert(subject) {
                graph.push(Value::Object(self.framed_node(subject, &mut seen, true)));
            }
        }
        graph
    }

    /// A node object whose references stay `{"@id": ...}`.
    fn flat_node(&self, subject: &Term) -> Map<String, Value> {
        self.node(subject, true, |o| self.reference(o))
    }

    /// A node object with referenced nodes embedded unless already `seen`.
    fn framed_node(
        &self,
        subject: &'a Term,
        seen: &mut BTreeSet<&'a Term>,
        keep_id: bool,
    ) -> Map<String, Value> {
        self.node(subject, keep_id, |object| {
            let Some((&target, _)) = self.subjects.get_key_value(object) else {
                return self.reference(object);
            };
            if !seen.insert(target) {
                return self.reference(object);
            }
            let keep_id = !self.embeds_without_id(target);
            Value::Object(self.framed_node(target, seen, keep_id))
        })
    }

    fn embeds_without_id(&self, term: &Term) -> bool {
        self.anonymous.contains(term)
    }

    fn node<F>(&self, subject: &Term, keep_id: bool, mut object_value: F) -> Map<String, Value>
    where
        F: FnMut(&Term) -> Value,
    {
        let mut node = Map::new();
        if keep_id {
            node.insert("@id".to_owned(), json!(id_of(subject, self.registry)));
        }
        let mut types: Vec<Value> = Vec::new();
        let mut properties: Vec<(String, Vec<Value>)> = Vec::new();
        for quad in self.subjects.get(subject).into_iter().flatten() {
            if quad.predicate() == vocab::RDF_TYPE {
                if let Term::Iri(class) = quad.object() {
                    types.push(json!(self.registry.compact(class)));
                    continue;
                }
            }
            let key = self.registry.compact(quad.predicate());
            let value = object_value(quad.object());
            match properties.iter_mut().find(|(k, _)| *k == key) {
                Some((_, values)) => values.push(value),
                None => properties.push((key, vec![value])),
            }
        }
        if !types.is_empty() {
            node.insert("@type".to_owned(), collapse(types));
        }
        for (key, values) in properties {
            node.insert(key, collapse(values));
        }
        node
    }

    fn reference(&self, object: &Term) -> Value {
        match object {
            Term::Iri(_) | Term::BlankNode(_) => json!({ "@id": id_of(object, self.registry) }),
            Term::Literal(lit) => match lit.language() {
                Some(lang) => json!({ "@value": lit.lexical(), "@language": lang }),
                None if lit.is_simple() => json!(lit.lexical()),
                None => json!({
                    "@value": lit.lexical(),
                    "@type": self.registry.compact(lit.datatype())
                }),
            },
        }
    }
}

fn id_of(term: &Term, registry: &PrefixRegistry) -> String {
    match term {
        Term::Iri(iri) => registry.compact(iri),
        Term::BlankNode(id) => format!("_:{}", id),
        // Literals never reach an @id position: subjects and graphs are checked on construction.
        Term::Literal(lit) => lit.lexical().to_owned(),
    }
}

fn collapse(mut values: Vec<Value>) -> Value {
    if values.len() == 1 {
        values.remove(0)
    } else {
        Value::Array(values)
    }
}
