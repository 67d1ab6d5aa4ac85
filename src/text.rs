//! Input pre-processing helpers
//!
//! The grammar itself is whitespace-free; these utilities sit between raw
//! program text and the parser.

/// Remove every whitespace character from `s`.
pub fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Whether `s` is an optionally-signed run of decimal digits.
pub fn is_integer_literal(s: &str) -> bool {
    let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
