//! Tree-walking evaluation
//!
//! Walks an expression tree directly against an environment, producing a
//! value expression or a runtime error.

pub mod env;
pub mod eval;

pub use env::Env;
pub use eval::eval;
