//! Evaluation environments

use serde::{Deserialize, Serialize};

use crate::ast::Expr;

/// Ordered name-to-value bindings with shadowing by search order.
///
/// Inserting a name never overwrites an earlier binding of the same name:
/// lookup walks from the most recent binding backwards, so the newest one
/// wins while the older ones stay in place. Cloning an environment deep-
/// clones every stored value; two copies never alias.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Env {
    bindings: Vec<(String, Expr)>,
}

impl Env {
    /// Create an empty environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`, shadowing any existing binding of `name`.
    pub fn insert(&mut self, name: impl Into<String>, value: Expr) {
        self.bindings.push((name.into(), value));
    }

    /// The most recent binding of `name`, as an independent copy. The
    /// environment keeps ownership of its own value.
    pub fn lookup(&self, name: &str) -> Option<Expr> {
        self.bindings
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }

    /// Whether `name` is bound
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.iter().any(|(n, _)| n == name)
    }

    /// Number of bindings, shadowed ones included
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bindings in lookup order (most recent first)
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Expr)> {
        self.bindings.iter().rev().map(|(n, v)| (n.as_str(), v))
    }
}
