//! texp — a tree-walking evaluator for tagged-prefix expressions
//!
//! Programs are written in a fully tagged, parenthesized prefix notation:
//!
//! ```text
//! <let, x, <int, 3>, <add, <var, x>, <int, 4>>>
//! ```
//!
//! # Architecture
//!
//! ```text
//! Source → Parser → Expr tree → Evaluator (+ Env) → value Expr
//! ```
//!
//! Values are expressions too, restricted to `<void>`, `<int, N>`, pairs
//! of values, and closures; rendering a value with `Display` produces
//! text the parser accepts back (closures excepted).
//!
//! # Example
//!
//! ```
//! use texp::{interpret, Expr};
//!
//! let value = interpret("<add, <int, 3>, <int, 4>>").unwrap();
//! assert_eq!(value, Expr::Int(7));
//! ```

pub mod ast;
pub mod diagnostics;
pub mod interp;
pub mod parser;
pub mod text;

// Re-exports for convenience
pub use ast::Expr;
pub use diagnostics::{EvalError, ParseError};
pub use interp::{eval, Env};

/// Interpreter version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parse program text into an expression tree
pub fn parse(source: &str) -> miette::Result<Expr> {
    Ok(parser::parse(source)?)
}

/// Evaluate an expression tree against an environment
pub fn evaluate(expr: &Expr, env: &mut Env) -> miette::Result<Expr> {
    Ok(interp::eval(expr, env)?)
}

/// Parse and evaluate program text in a fresh environment
pub fn interpret(source: &str) -> miette::Result<Expr> {
    let expr = parser::parse(source)?;
    let mut env = Env::new();
    Ok(interp::eval(&expr, &mut env)?)
}
