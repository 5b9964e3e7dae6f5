//! Conversions between the owned quad model and sophia's term API.
//!
//! Parsers hand us borrowed sophia terms; the isomorphism routine wants a
//! sophia dataset. Both directions are lossless for IRIs, blank nodes and
//! literals. RDF-star triple terms and variables have no counterpart and are
//! rejected.

use semops_model::{Dataset, Literal, Quad, Term};
use sophia_api::dataset::MutableDataset;
use sophia_api::quad::Quad as SophiaQuad;
use sophia_api::term::{BnodeId, IriRef, LanguageTag, SimpleTerm, Term as SophiaTerm, TermKind};
use sophia_inmem::dataset::LightDataset;

use crate::error::{Error, Result};

/// Converts any sophia term into an owned [`Term`].
pub(crate) fn term_from_sophia<T: SophiaTerm>(term: T) -> Result<Term> {
    let converted = match term.kind() {
        TermKind::Iri => term.iri().map(|iri| Term::iri(iri.as_str())),
        TermKind::BlankNode => term.bnode_id().map(|id| Term::blank(id.as_str())),
        TermKind::Literal => term.lexical_form().and_then(|lex| {
            let lex: &str = &lex;
            match term.language_tag() {
                Some(tag) => Some(Literal::lang(lex, tag.as_str()).into()),
                None => term
                    .datatype()
                    .map(|dt| Term::typed_literal(lex, dt.as_str())),
            }
        }),
        other => return Err(Error::UnsupportedTerm(format!("{:?}", other))),
    };
    converted.ok_or_else(|| Error::UnsupportedTerm(format!("{:?}", term.kind())))
}

/// Converts a parsed sophia quad into an owned [`Quad`].
///
/// With a `blank_scope`, every blank node label is prefixed with it, so
/// labels from separate documents cannot collide in one dataset.
pub(crate) fn quad_from_sophia<Q: SophiaQuad>(quad: Q, blank_scope: Option<&str>) -> Result<Quad> {
    let graph = match quad.g() {
        Some(g) => Some(scoped(g, blank_scope)?),
        None => None,
    };
    Ok(Quad::from_terms(
        scoped(quad.s(), blank_scope)?,
        term_from_sophia(quad.p())?,
        scoped(quad.o(), blank_scope)?,
        graph,
    )?)
}

fn scoped<T: SophiaTerm>(term: T, blank_scope: Option<&str>) -> Result<Term> {
    Ok(match (term_from_sophia(term)?, blank_scope) {
        (Term::BlankNode(id), Some(scope)) => Term::blank(format!("{}{}", scope, id)),
        (other, _) => other,
    })
}

/// Converts an owned [`Term`] into a self-contained sophia term.
pub(crate) fn term_to_sophia(term: &Term) -> SimpleTerm<'static> {
    match term {
        Term::Iri(iri) => SimpleTerm::Iri(IriRef::new_unchecked(iri.clone().into())),
        Term::BlankNode(id) => SimpleTerm::BlankNode(BnodeId::new_unchecked(id.clone().into())),
        Term::Literal(lit) => match lit.language() {
            Some(tag) => SimpleTerm::LiteralLanguage(
                lit.lexical().to_owned().into(),
                LanguageTag::new_unchecked(tag.to_owned().into()),
            ),
            None => SimpleTerm::LiteralDatatype(
                lit.lexical().to_owned().into(),
                IriRef::new_unchecked(lit.datatype().to_owned().into()),
            ),
        },
    }
}

/// Copies a [`Dataset`] into a sophia in-memory dataset.
pub(crate) fn dataset_to_sophia(dataset: &Dataset) -> Result<LightDataset> {
    let mut out = LightDataset::new();
    for quad in dataset {
        out.insert(
            term_to_sophia(quad.subject()),
            SimpleTerm::Iri(IriRef::new_unchecked(quad.predicate().to_owned().into())),
            term_to_sophia(quad.object()),
            quad.graph().map(term_to_sophia),
        )
        .map_err(|e| Error::Isomorphism(e.to_string()))?;
    }
    Ok(out)
}
