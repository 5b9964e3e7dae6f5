//! Turtle 1.1 serializer.
//!
//! Declares every registry prefix that is a valid Turtle `PN_PREFIX`, then
//! writes the default graph grouped by subject and predicate. Quads in named
//! graphs are written as TriG `<graph> { ... }` blocks, so a dataset with
//! only default-graph quads produces plain Turtle.
//!
//! IRIs are abbreviated only when the local part is a conservative
//! `PN_LOCAL` (ASCII letters, digits, `_`, `-`, inner `.`); anything else is
//! written as `<iri>`.

use std::collections::BTreeMap;

use crate::dataset::Dataset;
use crate::prefix::{PrefixEntry, PrefixRegistry};
use crate::term::{escape_string, Quad, Term};
use crate::vocab;

/// Serializes `dataset` to Turtle (TriG when named graphs are present).
#[must_use]
pub fn to_turtle(dataset: &Dataset, registry: &PrefixRegistry) -> String {
    let mut out = String::with_capacity(dataset.len() * 64 + 512);
    let writer = Writer { registry };

    // Prefix declarations
    for entry in declarable_prefixes(registry) {
        out.push_str(&format!("@prefix {}: <{}> .\n", entry.name, entry.base));
    }
    out.push('\n');

    let mut named: BTreeMap<&Term, Vec<&Quad>> = BTreeMap::new();
    let mut default_graph: Vec<&Quad> = Vec::new();
    for quad in dataset {
        match quad.graph() {
            Some(graph) => named.entry(graph).or_default().push(quad),
            None => default_graph.push(quad),
        }
    }

    writer.write_statements(&mut out, &default_graph, "");

    for (graph, quads) in named {
        out.push_str(&format!("{} {{\n", writer.term(graph)));
        writer.write_statements(&mut out, &quads, "  ");
        out.push_str("}\n\n");
    }

    out
}

/// Registry entries whose name is a valid Turtle `PN_PREFIX`, in order.
pub fn declarable_prefixes(registry: &PrefixRegistry) -> impl Iterator<Item = &PrefixEntry> {
    registry.entries().iter().filter(|e| is_pn_prefix(&e.name))
}

struct Writer<'a> {
    registry: &'a PrefixRegistry,
}

impl Writer<'_> {
    /// Writes quads (sorted by subject, then predicate) as subject blocks.
    fn write_statements(&self, out: &mut String, quads: &[&Quad], indent: &str) {
        let mut i = 0;
        while i < quads.len() {
            let subject = quads[i].subject();
            let end = quads[i..]
                .iter()
                .position(|q| q.subject() != subject)
                .map_or(quads.len(), |n| i + n);
            self.write_subject(out, subject, &quads[i..end], indent);
            i = end;
        }
    }

    fn write_subject(&self, out: &mut String, subject: &Term, quads: &[&Quad], indent: &str) {
        out.push_str(&format!("{}{}\n", indent, self.term(subject)));

        let mut predicates: Vec<(&str, Vec<&Term>)> = Vec::new();
        for quad in quads {
            if let Some((_, objects)) = predicates
                .last_mut()
                .filter(|(p, _)| *p == quad.predicate())
            {
                objects.push(quad.object());
            } else {
                predicates.push((quad.predicate(), vec![quad.object()]));
            }
        }

        let last = predicates.len().saturating_sub(1);
        for (n, (predicate, objects)) in predicates.iter().enumerate() {
            let objects: Vec<String> = objects.iter().map(|o| self.term(o)).collect();
            out.push_str(&format!(
                "{}  {} {} {}\n",
                indent,
                self.predicate(predicate),
                objects.join(" , "),
                if n == last { "." } else { ";" }
            ));
        }
        out.push('\n');
    }

    fn predicate(&self, iri: &str) -> String {
        if iri == vocab::RDF_TYPE {
            "a".to_owned()
        } else {
            self.iri(iri)
        }
    }

    fn iri(&self, iri: &str) -> String {
        match self.registry.split(iri) {
            Some((prefix, local)) if is_pn_prefix(prefix) && is_pn_local(local) => {
                format!("{}:{}", prefix, local)
            }
            _ => format!("<{}>", iri),
        }
    }

    fn term(&self, term: &Term) -> String {
        match term {
            Term::Iri(iri) => self.iri(iri),
            Term::BlankNode(id) => format!("_:{}", id),
            Term::Literal(lit) => {
                let lexical = turtle_string(lit.lexical());
                match lit.language() {
                    Some(lang) => format!("{}@{}", lexical, lang),
                    None if lit.is_simple() => lexical,
                    None => format!("{}^^{}", lexical, self.iri(lit.datatype())),
                }
            }
        }
    }
}

fn turtle_string(s: &str) -> String {
    format!("\"{}\"", escape_string(s))
}

fn is_pn_prefix(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        && !name.ends_with('.')
}

fn is_pn_local(local: &str) -> bool {
    let mut chars = local.chars();
    match chars.next() {
        None => true,
        Some(first) => {
            (first.is_ascii_alphanumeric() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
                && !local.ends_with('.')
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::Literal;

    fn ds(quads: Vec<Quad>) -> Dataset {
        quads.into_iter().collect()
    }

    #[test]
    fn declares_registry_prefixes() {
        let turtle = to_turtle(&Dataset::new(), &PrefixRegistry::default());
        for (name, base) in vocab::DEFAULT_PREFIXES {
            assert!(
                turtle.contains(&format!("@prefix {}: <{}> .", name, base)),
                "Missing prefix declaration for '{}'",
                name
            );
        }
    }

    #[test]
    fn groups_by_subject_and_predicate() -> crate::Result<()> {
        let s = Term::iri(format!("{}alice", vocab::FF));
        let p = format!("{}likes", vocab::FF);
        let dataset = ds(vec![
            Quad::new(s.clone(), vocab::RDF_TYPE, Term::iri(format!("{}Citizen", vocab::FF)))?,
            Quad::new(s.clone(), p.clone(), Term::simple_literal("tea"))?,
            Quad::new(s.clone(), p, Term::simple_literal("cake"))?,
        ]);
        let turtle = to_turtle(&dataset, &PrefixRegistry::default());
        assert!(turtle.contains("ff:alice\n"));
        assert!(turtle.contains("  a ff:Citizen ;\n"));
        assert!(turtle.contains("  ff:likes \"cake\" , \"tea\" .\n"));
        Ok(())
    }

    #[test]
    fn literals_use_prefixed_datatypes() -> crate::Result<()> {
        let s = Term::iri("https://example.org/s");
        let dataset = ds(vec![
            Quad::new(
                s.clone(),
                "https://example.org/n",
                Term::typed_literal("7", vocab::XSD_INTEGER),
            )?,
            Quad::new(s.clone(), "https://example.org/l", Literal::lang("chat", "fr").into())?,
            Quad::new(s, "https://example.org/q", Term::simple_literal("say \"hi\""))?,
        ]);
        let turtle = to_turtle(&dataset, &PrefixRegistry::default());
        assert!(turtle.contains("\"7\"^^xsd:integer"));
        assert!(turtle.contains("\"chat\"@fr"));
        assert!(turtle.contains("\"say \\\"hi\\\"\""));
        Ok(())
    }

    #[test]
    fn unsafe_local_names_are_bracketed() -> crate::Result<()> {
        let reg = PrefixRegistry::new([("ex", "http://example.org/")])?;
        let dataset = ds(vec![Quad::new(
            Term::iri("http://example.org/s"),
            "http://example.org/aeiou.%C3%A4Dot.",
            Term::iri("http://example.org/o"),
        )?]);
        let turtle = to_turtle(&dataset, &reg);
        assert!(turtle.contains("ex:s\n"));
        assert!(turtle.contains("<http://example.org/aeiou.%C3%A4Dot.> ex:o ."));
        Ok(())
    }

    #[test]
    fn named_graphs_become_trig_blocks() -> crate::Result<()> {
        let dataset = ds(vec![Quad::new(
            Term::blank("b0"),
            "https://example.org/p",
            Term::iri("https://example.org/o"),
        )?
        .in_graph(Term::iri("https://example.org/g"))?]);
        let turtle = to_turtle(&dataset, &PrefixRegistry::default());
        assert!(turtle.contains("<https://example.org/g> {\n  _:b0\n"));
        assert!(turtle.trim_end().ends_with('}'));
        Ok(())
    }

    #[test]
    fn prefix_name_validity() {
        assert!(is_pn_prefix("ff"));
        assert!(is_pn_prefix("schema"));
        assert!(!is_pn_prefix("1x"));
        assert!(!is_pn_prefix("a."));
        assert!(is_pn_local(""));
        assert!(is_pn_local("7up"));
        assert!(!is_pn_local("a/b"));
        assert!(!is_pn_local("end."));
    }
}
