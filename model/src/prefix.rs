//! Bidirectional prefix table.
//!
//! A [`PrefixRegistry`] maps short prefix names to namespace base IRIs and is
//! immutable once built. Lookups scan entries in registration order and the
//! first match wins, in both directions. Duplicate prefix names are rejected
//! at construction; overlapping base IRIs are allowed and resolved by that
//! order.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::vocab;

/// One `(prefix, base)` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixEntry {
    /// Short name, used as `name:local`.
    pub name: String,
    /// Namespace base IRI.
    pub base: String,
}

/// Ordered, immutable prefix table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixRegistry {
    entries: Vec<PrefixEntry>,
}

#[derive(Debug, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    prefix: Vec<EntryDef>,
}

#[derive(Debug, Deserialize)]
struct EntryDef {
    name: String,
    iri: String,
}

impl PrefixRegistry {
    /// Builds a registry from `(name, base)` pairs, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicatePrefix`] if a name repeats,
    /// [`Error::InvalidPrefixName`] for empty names or names containing `:` or
    /// whitespace, and [`Error::InvalidBase`] for bases that are not `http(s)`
    /// IRIs ending in `/` or `#`.
    pub fn new<I, N, B>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, B)>,
        N: Into<String>,
        B: Into<String>,
    {
        let mut entries: Vec<PrefixEntry> = Vec::new();
        for (name, base) in pairs {
            let entry = PrefixEntry {
                name: name.into(),
                base: base.into(),
            };
            validate_entry(&entry)?;
            if entries.iter().any(|e| e.name == entry.name) {
                return Err(Error::DuplicatePrefix(entry.name));
            }
            entries.push(entry);
        }
        Ok(Self { entries })
    }

    /// Parses a TOML prefix table:
    ///
    /// ```toml
    /// [[prefix]]
    /// name = "ex"
    /// iri = "https://example.org/"
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for malformed TOML, or any error of [`PrefixRegistry::new`].
    pub fn from_toml_str(src: &str) -> Result<Self> {
        let file: RegistryFile = toml::from_str(src)?;
        Self::new(file.prefix.into_iter().map(|e| (e.name, e.iri)))
    }

    /// Reads and parses a TOML prefix table from disk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, otherwise as
    /// [`PrefixRegistry::from_toml_str`].
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let src = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let registry = Self::from_toml_str(&src)?;
        debug!(path = %path.display(), entries = registry.entries.len(), "loaded prefix table");
        Ok(registry)
    }

    /// Entries in registration order.
    #[must_use]
    pub fn entries(&self) -> &[PrefixEntry] {
        &self.entries
    }

    /// Base IRI registered under `name`.
    #[must_use]
    pub fn base(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.base.as_str())
    }

    /// Expands `prefix:local` to `base + local`; anything else passes through.
    #[must_use]
    pub fn expand(&self, name: &str) -> String {
        for entry in &self.entries {
            if let Some(local) = name
                .strip_prefix(entry.name.as_str())
                .and_then(|rest| rest.strip_prefix(':'))
            {
                return format!("{}{}", entry.base, local);
            }
        }
        name.to_owned()
    }

    /// Compacts `base + local` to `prefix:local`; anything else passes through.
    #[must_use]
    pub fn compact(&self, iri: &str) -> String {
        match self.split(iri) {
            Some((prefix, local)) => format!("{}:{}", prefix, local),
            None => iri.to_owned(),
        }
    }

    /// Splits an IRI into `(prefix, local)` against the first matching base.
    #[must_use]
    pub fn split<'a>(&'a self, iri: &'a str) -> Option<(&'a str, &'a str)> {
        self.entries.iter().find_map(|e| {
            iri.strip_prefix(e.base.as_str())
                .map(|local| (e.name.as_str(), local))
        })
    }
}

/// The built-in table: `ff`, `sh`, `xsd`, `rdf`, `rdfs`, `schema`.
impl Default for PrefixRegistry {
    fn default() -> Self {
        Self {
            entries: vocab::DEFAULT_PREFIXES
                .iter()
                .map(|(name, base)| PrefixEntry {
                    name: (*name).to_owned(),
                    base: (*base).to_owned(),
                })
                .collect(),
        }
    }
}

fn validate_entry(entry: &PrefixEntry) -> Result<()> {
    let bad_name = |reason: &'static str| {
        Err(Error::InvalidPrefixName {
            name: entry.name.clone(),
            reason,
        })
    };
    if entry.name.is_empty() {
        return bad_name("name is empty");
    }
    if entry.name.contains(':') {
        return bad_name("name contains ':'");
    }
    if entry.name.chars().any(char::is_whitespace) {
        return bad_name("name contains whitespace");
    }

    let bad_base = |reason: &'static str| {
        Err(Error::InvalidBase {
            name: entry.name.clone(),
            iri: entry.base.clone(),
            reason,
        })
    };
    if !(entry.base.starts_with("http://") || entry.base.starts_with("https://")) {
        return bad_base("not an http(s) IRI");
    }
    if !(entry.base.ends_with('/') || entry.base.ends_with('#')) {
        return bad_base("does not end in '/' or '#'");
    }
    Ok(())
}
