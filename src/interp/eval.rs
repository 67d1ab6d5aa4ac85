//! Evaluator for expression trees
//!
//! A direct recursive walk: each variant either evaluates to a fresh value
//! expression or raises an [`EvalError`]. The input tree is never mutated;
//! the only side effects are the ambient bindings made by `def` and `fun`.

use tracing::trace;

use crate::ast::Expr;
use crate::diagnostics::EvalError;

use super::env::Env;

/// Evaluate `expr` against `env`, producing a value expression.
///
/// `def` and `fun` insert into the caller-visible environment; `let` and
/// `call` evaluate their bodies in private copies, so bindings made there
/// do not leak out.
pub fn eval(expr: &Expr, env: &mut Env) -> Result<Expr, EvalError> {
    trace!(tag = expr.tag(), "eval");

    match expr {
        // Values evaluate to themselves
        Expr::Void | Expr::Int(_) | Expr::Closure { .. } => Ok(expr.clone()),

        Expr::Pair(a, b) => {
            let va = eval(a, env)?;
            let vb = eval(b, env)?;
            Ok(Expr::Pair(Box::new(va), Box::new(vb)))
        }

        Expr::Fst(e) => match eval(e, env)? {
            Expr::Pair(first, _) => Ok(*first),
            other => Err(type_error("fst", "pair", &other)),
        },

        Expr::Snd(e) => match eval(e, env)? {
            Expr::Pair(_, second) => Ok(*second),
            other => Err(type_error("snd", "pair", &other)),
        },

        Expr::Neg(e) => match eval(e, env)? {
            Expr::Int(n) => Ok(Expr::Int(n.wrapping_neg())),
            other => Err(type_error("neg", "int", &other)),
        },

        Expr::IsVoid(e) => {
            let v = eval(e, env)?;
            Ok(Expr::Int(if matches!(v, Expr::Void) { 1 } else { 0 }))
        }

        Expr::Add(a, b) => {
            let (x, y) = int_operands("add", eval(a, env)?, eval(b, env)?)?;
            Ok(Expr::Int(x.wrapping_add(y)))
        }

        Expr::Mul(a, b) => {
            let (x, y) = int_operands("mul", eval(a, env)?, eval(b, env)?)?;
            Ok(Expr::Int(x.wrapping_mul(y)))
        }

        Expr::DivMod(a, b) => {
            let (x, y) = int_operands("divmod", eval(a, env)?, eval(b, env)?)?;
            if y == 0 {
                return Err(EvalError::DivisionByZero);
            }
            // Wrapping keeps i64::MIN / -1 from trapping
            Ok(Expr::Pair(
                Box::new(Expr::Int(x.wrapping_div(y))),
                Box::new(Expr::Int(x.wrapping_rem(y))),
            ))
        }

        Expr::Var(name) => env
            .lookup(name)
            .ok_or_else(|| EvalError::UnboundName { name: name.clone() }),

        Expr::Def { name, value } => {
            let v = eval(value, env)?;
            env.insert(name.clone(), v);
            Ok(Expr::Void)
        }

        Expr::Let { name, bound, body } => {
            let bound_value = eval(bound, env)?;
            let mut scope = env.clone();
            scope.insert(name.clone(), bound_value);
            eval(body, &mut scope)
        }

        Expr::IfGreater {
            lhs,
            rhs,
            then_branch,
            else_branch,
        } => {
            let (x, y) = int_operands("ifgreater", eval(lhs, env)?, eval(rhs, env)?)?;
            if x > y {
                eval(then_branch, env)
            } else {
                eval(else_branch, env)
            }
        }

        // The closure captures the environment as it was before the
        // function's own binding; recursion is wired up at call time.
        Expr::Fun { name, .. } => {
            let closure = Expr::Closure {
                env: env.clone(),
                fun: Box::new(expr.clone()),
            };
            env.insert(name.clone(), closure);
            Ok(Expr::Void)
        }

        Expr::Call { name, arg } => {
            let closure = env
                .lookup(name)
                .ok_or_else(|| EvalError::UnboundName { name: name.clone() })?;
            let (captured, fun) = match &closure {
                Expr::Closure { env, fun } => (env, fun.as_ref()),
                other => return Err(type_error("call", "closure", other)),
            };
            let Expr::Fun { name: fname, formal, body } = fun else {
                // Closures wrap fun nodes only; anything else means a
                // hand-built tree
                return Err(type_error("call", "closure", fun));
            };

            // The actual argument is evaluated in the caller's
            // environment, eagerly
            let arg_value = eval(arg, env)?;

            // Rebind the closure under its own name so the body can
            // recurse; the formal goes in afterwards and shadows it if
            // the names collide
            let mut call_env = captured.clone();
            call_env.insert(fname.clone(), closure.clone());
            call_env.insert(formal.clone(), arg_value);
            eval(body, &mut call_env)
        }
    }
}

fn type_error(op: &'static str, expected: &'static str, found: &Expr) -> EvalError {
    EvalError::TypeError {
        op,
        expected,
        found: found.tag(),
    }
}

/// Require two int values, reporting the offending operand otherwise.
/// Both operands are already evaluated by the caller, left first.
fn int_operands(op: &'static str, lhs: Expr, rhs: Expr) -> Result<(i64, i64), EvalError> {
    match (lhs, rhs) {
        (Expr::Int(x), Expr::Int(y)) => Ok((x, y)),
        (Expr::Int(_), other) | (other, _) => Err(type_error(op, "int", &other)),
    }
}
