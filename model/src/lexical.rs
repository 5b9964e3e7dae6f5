//! Lexical shape checks used by the classifier.
//!
//! Date matching only looks at the digit/separator shape of the leading
//! characters; calendar validity is not checked. Numerals are handled as
//! text so no precision is lost on the way to a literal.

/// True if `s` starts with `YYYY-MM-DD`.
pub(crate) fn starts_with_date(s: &str) -> bool {
    matches_shape(s.as_bytes(), b"dddd-dd-dd")
}

/// True if `s` starts with `YYYY-MM-DDThh:mm:ss`.
pub(crate) fn starts_with_date_time(s: &str) -> bool {
    matches_shape(s.as_bytes(), b"dddd-dd-ddTdd:dd:dd")
}

/// True if `s` may be written between `<` and `>` without escaping.
///
/// Rejects control characters, spaces and the delimiters Turtle and
/// N-Quads forbid inside an IRI reference.
pub(crate) fn is_iri_ref(s: &str) -> bool {
    !s.chars()
        .any(|c| c <= ' ' || matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\'))
}

// `d` in the shape matches any ASCII digit, every other byte matches itself.
fn matches_shape(input: &[u8], shape: &[u8]) -> bool {
    input.len() >= shape.len()
        && shape.iter().zip(input).all(|(&want, &got)| match want {
            b'd' => got.is_ascii_digit(),
            _ => want == got,
        })
}

/// Kind of a recognised numeral.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NumberKind {
    Integer,
    Decimal,
}

/// Canonicalises a decimal numeral `[+-]? digits? ('.' digits?)?` (at least
/// one digit overall).
///
/// Integer-valued numerals (`7`, `+007`, `3.00`, `5.`) come back as
/// [`NumberKind::Integer`] in `xsd:integer` canonical form; the rest as
/// [`NumberKind::Decimal`] with leading zeros of the integer part and
/// trailing zeros of the fraction removed. Negative zero becomes `0`.
/// Exponents, hex, `NaN` and `Infinity` are not numerals here.
pub(crate) fn canonical_number(s: &str) -> Option<(NumberKind, String)> {
    let (negative, unsigned) = match s.as_bytes().first()? {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, f),
        None => (unsigned, ""),
    };
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !all_digits(int_part) || !all_digits(frac_part) {
        return None;
    }

    let int_digits = int_part.trim_start_matches('0');
    let int_digits = if int_digits.is_empty() { "0" } else { int_digits };
    let frac_digits = frac_part.trim_end_matches('0');
    let is_zero = int_digits == "0" && frac_digits.is_empty();
    let sign = if negative && !is_zero { "-" } else { "" };

    if frac_digits.is_empty() {
        Some((NumberKind::Integer, format!("{}{}", sign, int_digits)))
    } else {
        Some((
            NumberKind::Decimal,
            format!("{}{}.{}", sign, int_digits, frac_digits),
        ))
    }
}
