//! Abstract syntax tree for the tagged-prefix expression language
//!
//! A single closed enum represents both parsed syntax and runtime values:
//! evaluation produces trees restricted to the value variants (`Void`,
//! `Int`, `Pair` of values, `Closure`). Every node exclusively owns its
//! children, so `Clone` is a full deep copy.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::interp::Env;

/// Expression node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// The unit/absence value `<void>`
    Void,
    /// Integer literal `<int, N>`
    Int(i64),
    /// Ordered pair `<pair, A, B>`
    Pair(Box<Expr>, Box<Expr>),
    /// First projection `<fst, A>`
    Fst(Box<Expr>),
    /// Second projection `<snd, A>`
    Snd(Box<Expr>),
    /// Integer negation `<neg, A>`
    Neg(Box<Expr>),
    /// Runtime test against void `<isvoid, A>`
    IsVoid(Box<Expr>),
    /// Integer addition `<add, A, B>`
    Add(Box<Expr>, Box<Expr>),
    /// Integer multiplication `<mul, A, B>`
    Mul(Box<Expr>, Box<Expr>),
    /// Truncating division, yields `<pair, quotient, remainder>`
    DivMod(Box<Expr>, Box<Expr>),
    /// Variable reference `<var, x>`
    Var(String),
    /// Ambient binding `<def, x, A>`; evaluates to void
    Def { name: String, value: Box<Expr> },
    /// Lexical binding `<let, x, A, B>`; `x` is visible in `B` only
    Let {
        name: String,
        bound: Box<Expr>,
        body: Box<Expr>,
    },
    /// `<ifgreater, A, B, C, D>`: `C` if `A > B`, else `D`
    IfGreater {
        lhs: Box<Expr>,
        rhs: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    /// Named single-argument function `<fun, f, x, BODY>`; evaluating it
    /// binds a closure under `f` and yields void
    Fun {
        name: String,
        formal: String,
        body: Box<Expr>,
    },
    /// Invocation by name `<call, f, A>`
    Call { name: String, arg: Box<Expr> },
    /// A captured environment paired with its `Fun` node. Runtime-only:
    /// never produced by the parser.
    Closure { env: Env, fun: Box<Expr> },
}

impl Expr {
    /// The tag naming this variant, as it appears in program text.
    pub fn tag(&self) -> &'static str {
        match self {
            Expr::Void => "void",
            Expr::Int(_) => "int",
            Expr::Pair(..) => "pair",
            Expr::Fst(_) => "fst",
            Expr::Snd(_) => "snd",
            Expr::Neg(_) => "neg",
            Expr::IsVoid(_) => "isvoid",
            Expr::Add(..) => "add",
            Expr::Mul(..) => "mul",
            Expr::DivMod(..) => "divmod",
            Expr::Var(_) => "var",
            Expr::Def { .. } => "def",
            Expr::Let { .. } => "let",
            Expr::IfGreater { .. } => "ifgreater",
            Expr::Fun { .. } => "fun",
            Expr::Call { .. } => "call",
            Expr::Closure { .. } => "closure",
        }
    }

    /// Whether this tree is a value: void, int, a pair of values, or a
    /// closure. Evaluation results always satisfy this.
    pub fn is_value(&self) -> bool {
        match self {
            Expr::Void | Expr::Int(_) | Expr::Closure { .. } => true,
            Expr::Pair(a, b) => a.is_value() && b.is_value(),
            _ => false,
        }
    }

    /// Try to get as integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Expr::Int(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Void => write!(f, "<void>"),
            Expr::Int(n) => write!(f, "<int, {}>", n),
            Expr::Pair(a, b) => write!(f, "<pair, {}, {}>", a, b),
            Expr::Fst(e) => write!(f, "<fst, {}>", e),
            Expr::Snd(e) => write!(f, "<snd, {}>", e),
            Expr::Neg(e) => write!(f, "<neg, {}>", e),
            Expr::IsVoid(e) => write!(f, "<isvoid, {}>", e),
            Expr::Add(a, b) => write!(f, "<add, {}, {}>", a, b),
            Expr::Mul(a, b) => write!(f, "<mul, {}, {}>", a, b),
            Expr::DivMod(a, b) => write!(f, "<divmod, {}, {}>", a, b),
            Expr::Var(name) => write!(f, "<var, {}>", name),
            Expr::Def { name, value } => write!(f, "<def, {}, {}>", name, value),
            Expr::Let { name, bound, body } => {
                write!(f, "<let, {}, {}, {}>", name, bound, body)
            }
            Expr::IfGreater {
                lhs,
                rhs,
                then_branch,
                else_branch,
            } => write!(
                f,
                "<ifgreater, {}, {}, {}, {}>",
                lhs, rhs, then_branch, else_branch
            ),
            Expr::Fun { name, formal, body } => {
                write!(f, "<fun, {}, {}, {}>", name, formal, body)
            }
            Expr::Call { name, arg } => write!(f, "<call, {}, {}>", name, arg),
            Expr::Closure { .. } => write!(f, "<closure>"),
        }
    }
}
