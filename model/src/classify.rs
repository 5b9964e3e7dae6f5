//! Scalar-to-term classification.
//!
//! [`TermClassifier::classify`] turns an [`ObjectValue`] into a typed
//! [`Term`] by trying the rules of [`Rule::ORDER`] in turn; the first rule
//! that matches decides. Categories overlap (`2025-07-27` is both a date and
//! the start of a numeral-looking string), so the order is part of the
//! contract:
//!
//! 1. already-typed terms are returned unchanged
//! 2. booleans (`true`/`false`, any casing)
//! 3. `http(s)` IRIs, after prefix expansion, that need no escaping
//! 4. `xsd:dateTime`
//! 5. `xsd:date`
//! 6. `xsd:integer` / `xsd:decimal`
//! 7. plain string literal

use std::sync::Arc;

use crate::lexical::{self, NumberKind};
use crate::prefix::PrefixRegistry;
use crate::term::{Literal, Term};
use crate::vocab;

/// Input to the classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectValue {
    /// A term that already carries its type.
    Typed(Term),
    /// A native boolean.
    Boolean(bool),
    /// Free text, trimmed before matching.
    Text(String),
}

impl From<Term> for ObjectValue {
    fn from(term: Term) -> Self {
        ObjectValue::Typed(term)
    }
}

impl From<Literal> for ObjectValue {
    fn from(lit: Literal) -> Self {
        ObjectValue::Typed(Term::Literal(lit))
    }
}

impl From<bool> for ObjectValue {
    fn from(b: bool) -> Self {
        ObjectValue::Boolean(b)
    }
}

impl From<&str> for ObjectValue {
    fn from(s: &str) -> Self {
        ObjectValue::Text(s.to_owned())
    }
}

impl From<String> for ObjectValue {
    fn from(s: String) -> Self {
        ObjectValue::Text(s)
    }
}

impl From<i64> for ObjectValue {
    fn from(n: i64) -> Self {
        ObjectValue::Text(n.to_string())
    }
}

/// One classification rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Pass already-typed terms through.
    Typed,
    /// Native booleans and `true`/`false` text.
    Boolean,
    /// Text that expands to an `http(s)` IRI with no characters an IRI
    /// reference must not contain.
    Iri,
    /// Text starting with `YYYY-MM-DDThh:mm:ss`.
    DateTime,
    /// Text starting with `YYYY-MM-DD`.
    Date,
    /// Decimal numerals.
    Number,
    /// Anything else.
    PlainString,
}

impl Rule {
    /// Precedence order; the first matching rule decides.
    pub const ORDER: [Rule; 7] = [
        Rule::Typed,
        Rule::Boolean,
        Rule::Iri,
        Rule::DateTime,
        Rule::Date,
        Rule::Number,
        Rule::PlainString,
    ];
}

/// Converts scalars into typed RDF terms, expanding prefixed names through a
/// shared [`PrefixRegistry`].
#[derive(Debug, Clone)]
pub struct TermClassifier {
    registry: Arc<PrefixRegistry>,
}

impl TermClassifier {
    /// Creates a classifier over `registry`.
    #[must_use]
    pub fn new(registry: Arc<PrefixRegistry>) -> Self {
        Self { registry }
    }

    /// The registry used for IRI expansion.
    #[must_use]
    pub fn registry(&self) -> &PrefixRegistry {
        &self.registry
    }

    /// Classifies `input`. Never fails: unmatched text becomes a plain literal.
    pub fn classify(&self, input: impl Into<ObjectValue>) -> Term {
        let input = input.into();
        self.classify_with_rule(&input).0
    }

    /// Classifies `input` and reports which rule decided.
    #[must_use]
    pub fn classify_with_rule(&self, input: &ObjectValue) -> (Term, Rule) {
        for rule in Rule::ORDER {
            if let Some(term) = self.apply(rule, input) {
                return (term, rule);
            }
        }
        // Typed, Boolean and PlainString each accept every value of their input kind.
        (Term::simple_literal(String::new()), Rule::PlainString)
    }

    /// Applies a single rule, returning `None` if it does not match.
    #[must_use]
    pub fn apply(&self, rule: Rule, input: &ObjectValue) -> Option<Term> {
        match (rule, input) {
            (Rule::Typed, ObjectValue::Typed(term)) => Some(term.clone()),
            (Rule::Boolean, ObjectValue::Boolean(b)) => Some(boolean(*b)),
            (Rule::Boolean, ObjectValue::Text(s)) => {
                let s = s.trim();
                if s.eq_ignore_ascii_case("true") {
                    Some(boolean(true))
                } else if s.eq_ignore_ascii_case("false") {
                    Some(boolean(false))
                } else {
                    None
                }
            }
            (Rule::Iri, ObjectValue::Text(s)) => {
                let expanded = self.registry.expand(s.trim());
                (is_http_iri(&expanded) && lexical::is_iri_ref(&expanded))
                    .then(|| Term::Iri(expanded))
            }
            (Rule::DateTime, ObjectValue::Text(s)) => {
                let s = s.trim();
                lexical::starts_with_date_time(s)
                    .then(|| Term::typed_literal(s, vocab::XSD_DATE_TIME))
            }
            (Rule::Date, ObjectValue::Text(s)) => {
                let s = s.trim();
                // The shape check guarantees 10 ASCII bytes, so slicing is on a char boundary.
                lexical::starts_with_date(s).then(|| Term::typed_literal(&s[..10], vocab::XSD_DATE))
            }
            (Rule::Number, ObjectValue::Text(s)) => {
                lexical::canonical_number(s.trim()).map(|(kind, lex)| {
                    let datatype = match kind {
                        NumberKind::Integer => vocab::XSD_INTEGER,
                        NumberKind::Decimal => vocab::XSD_DECIMAL,
                    };
                    Term::typed_literal(lex, datatype)
                })
            }
            (Rule::PlainString, ObjectValue::Text(s)) => Some(Term::simple_literal(s.trim())),
            _ => None,
        }
    }
}

impl Default for TermClassifier {
    fn default() -> Self {
        Self::new(Arc::new(PrefixRegistry::default()))
    }
}

fn boolean(b: bool) -> Term {
    Term::typed_literal(if b { "true" } else { "false" }, vocab::XSD_BOOLEAN)
}

fn is_http_iri(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xsd(dt: &str, lex: &str) -> Term {
        Term::typed_literal(lex, format!("{}{}", vocab::XSD, dt))
    }

    #[test]
    fn typed_terms_pass_through() {
        let c = TermClassifier::default();
        let nn = Term::iri("https://example.org/foo");
        let lit = Term::simple_literal("foo");
        let odd = Term::typed_literal("true", "https://example.org/notBoolean");
        assert_eq!(c.classify(nn.clone()), nn);
        assert_eq!(c.classify(lit.clone()), lit);
        assert_eq!(c.classify(odd.clone()), odd);
        assert_eq!(c.classify(Term::blank("b0")), Term::blank("b0"));
    }

    #[test]
    fn booleans_are_canonical() {
        let c = TermClassifier::default();
        for input in ["true", "TRUE", " True "] {
            assert_eq!(c.classify(input), xsd("boolean", "true"));
        }
        for input in ["false", "False", "FALSE"] {
            assert_eq!(c.classify(input), xsd("boolean", "false"));
        }
        assert_eq!(c.classify(true), xsd("boolean", "true"));
        assert_eq!(c.classify(false), xsd("boolean", "false"));
    }

    #[test]
    fn iris_and_prefixed_names() {
        let c = TermClassifier::default();
        assert_eq!(
            c.classify("ff:Test"),
            Term::iri("https://foerderfunke.org/default#Test")
        );
        assert_eq!(
            c.classify(" https://example.org/dev "),
            Term::iri("https://example.org/dev")
        );
        assert_eq!(c.classify("http://a.b/c"), Term::iri("http://a.b/c"));
        // Unregistered prefixes and non-http schemes stay literals.
        assert_eq!(c.classify("ex:Test"), Term::simple_literal("ex:Test"));
        assert_eq!(c.classify("urn:isbn:1"), Term::simple_literal("urn:isbn:1"));
    }

    #[test]
    fn urls_needing_escapes_stay_literals() {
        let c = TermClassifier::default();
        for input in ["https://example.org/a b", "https://example.org/<x>", "ff:a|b"] {
            assert_eq!(c.classify(input), Term::simple_literal(input));
        }
        assert_eq!(
            c.classify(" https://example.org/a b "),
            Term::simple_literal("https://example.org/a b")
        );
    }

    #[test]
    fn dates_and_date_times() {
        let c = TermClassifier::default();
        assert_eq!(
            c.classify("2025-07-27T14:30:00"),
            xsd("dateTime", "2025-07-27T14:30:00")
        );
        assert_eq!(
            c.classify("2025-07-27T14:30:00.5+02:00"),
            xsd("dateTime", "2025-07-27T14:30:00.5+02:00")
        );
        assert_eq!(c.classify("2025-07-27"), xsd("date", "2025-07-27"));
        assert_eq!(c.classify("2025-07-27Z"), xsd("date", "2025-07-27"));
    }

    #[test]
    fn numbers() {
        let c = TermClassifier::default();
        assert_eq!(c.classify("7"), xsd("integer", "7"));
        assert_eq!(c.classify("-5"), xsd("integer", "-5"));
        assert_eq!(c.classify("3.14"), xsd("decimal", "3.14"));
        assert_eq!(c.classify(" 42 "), xsd("integer", "42"));
        assert_eq!(c.classify(12_i64), xsd("integer", "12"));
    }

    #[test]
    fn fallback_is_trimmed_plain_literal() {
        let c = TermClassifier::default();
        assert_eq!(c.classify(" hello "), Term::simple_literal("hello"));
        assert_eq!(c.classify(""), Term::simple_literal(""));
        assert_eq!(c.classify("1e3"), Term::simple_literal("1e3"));
    }

    #[test]
    fn deciding_rule_is_reported() {
        let c = TermClassifier::default();
        let cases = [
            (ObjectValue::from("TRUE"), Rule::Boolean),
            (ObjectValue::from("xsd:date"), Rule::Iri),
            (ObjectValue::from("2025-07-27T00:00:00"), Rule::DateTime),
            (ObjectValue::from("2025-07-27"), Rule::Date),
            (ObjectValue::from("-1.5"), Rule::Number),
            (ObjectValue::from("x"), Rule::PlainString),
            (ObjectValue::from(Term::iri("urn:x")), Rule::Typed),
        ];
        for (input, rule) in cases {
            assert_eq!(c.classify_with_rule(&input).1, rule, "{input:?}");
        }
    }

    #[test]
    fn custom_registry_drives_expansion() -> crate::Result<()> {
        let reg = PrefixRegistry::new([("ex", "https://example.org/")])?;
        let c = TermClassifier::new(Arc::new(reg));
        assert_eq!(c.classify("ex:Thing"), Term::iri("https://example.org/Thing"));
        assert_eq!(c.classify("ff:Test"), Term::simple_literal("ff:Test"));
        Ok(())
    }
}
