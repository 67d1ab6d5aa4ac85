//! Diagnostic types for parsing and evaluation
//!
//! Parse errors carry a byte offset into the whitespace-stripped program
//! text so miette can point at the offending spot. Evaluation errors have
//! no positions: the tree being walked no longer remembers where its nodes
//! came from.

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// A program text that the recursive descent could not turn into one
/// well-formed expression tree.
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum ParseError {
    #[error("malformed program: unexpected end of input")]
    #[diagnostic(code(texp::parse::unexpected_end))]
    UnexpectedEnd {
        #[label("input ends here")]
        at: SourceSpan,
        #[source_code]
        src: String,
    },

    #[error("malformed program: expected `{expected}`")]
    #[diagnostic(code(texp::parse::expected))]
    Expected {
        expected: char,
        #[label("expected `{expected}` here")]
        at: SourceSpan,
        #[source_code]
        src: String,
    },

    #[error("malformed program: unknown tag `{tag}`")]
    #[diagnostic(code(texp::parse::unknown_tag))]
    UnknownTag {
        tag: String,
        #[label("not a known expression tag")]
        at: SourceSpan,
        #[source_code]
        src: String,
    },

    #[error("malformed program: invalid integer literal `{literal}`")]
    #[diagnostic(
        code(texp::parse::invalid_int),
        help("integer literals are an optionally-signed run of digits")
    )]
    InvalidInt {
        literal: String,
        #[label("not an integer")]
        at: SourceSpan,
        #[source_code]
        src: String,
    },

    #[error("malformed program: trailing input after expression")]
    #[diagnostic(code(texp::parse::trailing_input))]
    TrailingInput {
        #[label("extra input starts here")]
        at: SourceSpan,
        #[source_code]
        src: String,
    },
}

/// A runtime failure raised mid-walk; it unwinds the whole evaluation.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("{op} applied to non-{expected} (got {found})")]
    #[diagnostic(code(texp::eval::type_error))]
    TypeError {
        op: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("unbound name `{name}`")]
    #[diagnostic(
        code(texp::eval::unbound_name),
        help("bind it first with `<def, ...>`, `<let, ...>` or `<fun, ...>`")
    )]
    UnboundName { name: String },

    #[error("divmod with a zero divisor")]
    #[diagnostic(code(texp::eval::division_by_zero))]
    DivisionByZero,
}
