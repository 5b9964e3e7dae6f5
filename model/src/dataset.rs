//! In-memory quad collection.

use std::collections::BTreeSet;

use crate::term::{Quad, Term};
use crate::vocab;

/// A duplicate-free set of quads, mutable by append.
///
/// Iteration is in the quads' structural order, so two datasets holding the
/// same quads always serialize identically. There is no interior locking:
/// mutation goes through `&mut self`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    quads: BTreeSet<Quad>,
}

impl Dataset {
    /// Creates an empty dataset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a quad. Returns false if it was already present.
    pub fn insert(&mut self, quad: Quad) -> bool {
        self.quads.insert(quad)
    }

    /// Returns true if the quad is present.
    #[must_use]
    pub fn contains(&self, quad: &Quad) -> bool {
        self.quads.contains(quad)
    }

    /// Number of quads.
    #[must_use]
    pub fn len(&self) -> usize {
        self.quads.len()
    }

    /// Returns true if the dataset holds no quads.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    /// Iterates over all quads.
    pub fn iter(&self) -> impl Iterator<Item = &Quad> + '_ {
        self.quads.iter()
    }

    /// Subjects asserted to have `rdf:type` `class`, in dataset order, without repeats.
    pub fn instances_of(&self, class: &str) -> Vec<&Term> {
        let mut seen = BTreeSet::new();
        self.quads
            .iter()
            .filter(|q| q.predicate() == vocab::RDF_TYPE && q.object().as_iri() == Some(class))
            .map(Quad::subject)
            .filter(|s| seen.insert(*s))
            .collect()
    }

    /// Appends every quad of `other`. Returns how many were new.
    pub fn merge(&mut self, other: Dataset) -> usize {
        let before = self.quads.len();
        self.quads.extend(other.quads);
        self.quads.len() - before
    }
}

impl Extend<Quad> for Dataset {
    fn extend<I: IntoIterator<Item = Quad>>(&mut self, iter: I) {
        self.quads.extend(iter);
    }
}

impl FromIterator<Quad> for Dataset {
    fn from_iter<I: IntoIterator<Item = Quad>>(iter: I) -> Self {
        Self {
            quads: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Dataset {
    type Item = Quad;
    type IntoIter = std::collections::btree_set::IntoIter<Quad>;

    fn into_iter(self) -> Self::IntoIter {
        self.quads.into_iter()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Quad;
    type IntoIter = std::collections::btree_set::Iter<'a, Quad>;

    fn into_iter(self) -> Self::IntoIter {
        self.quads.iter()
    }
}
