//! Rule converter: boolean AST → StateVector.

use crate::ast::{BinOp, Expr};
use crate::error::{EngineError, EngineResult};
use crate::state_vector::StateVector;
use crate::tobject::TObject;

/// Convert a parsed boolean expression into the StateVector of assignments
/// satisfying it, over the full declared variable list. Fails with
/// `UnknownVariable` if `expr` references a name not in `variables`.
pub fn convert(expr: &Expr, variables: &[String]) -> EngineResult<StateVector> {
    let n = variables.len();
    let mut result = convert_inner(expr, variables, n)?;
    result.simplify();
    Ok(result)
}

fn index_of(name: &str, variables: &[String]) -> EngineResult<usize> {
    variables
        .iter()
        .position(|v| v == name)
        .ok_or_else(|| EngineError::UnknownVariable(name.to_string()))
}

fn union(a: StateVector, b: StateVector) -> StateVector {
    let n = a.arity();
    let mut out = StateVector::empty(n);
    for t in a.iter().chain(b.iter()) {
        out.push(t.clone());
    }
    out.simplify();
    out
}

fn convert_inner(expr: &Expr, variables: &[String], n: usize) -> EngineResult<StateVector> {
    match expr {
        Expr::Var(name) => {
            let idx = index_of(name, variables)?;
            Ok(StateVector::from_single(TObject::with_pinned(n, idx, true)))
        }
        // ¬e is converted by re-invoking the converter on its structural
        // negation, never by enumerating assignments. A negated variable is
        // the base case: `negated()` on a bare Var wraps it in another Not,
        // so recursing on it directly here would never terminate.
        Expr::Not(inner) => match inner.as_ref() {
            Expr::Var(name) => {
                let idx = index_of(name, variables)?;
                Ok(StateVector::from_single(TObject::with_pinned(n, idx, false)))
            }
            other => convert_inner(&other.negated(), variables, n),
        },
        Expr::Bin(op, l, r) => {
            let left = convert_inner(l, variables, n)?;
            let right = convert_inner(r, variables, n)?;
            match op {
                BinOp::And => Ok(left.multiply(&right)),
                BinOp::Or => Ok(union(left, right)),
                BinOp::Xor => {
                    let not_left = convert_inner(&l.negated(), variables, n)?;
                    let not_right = convert_inner(&r.negated(), variables, n)?;
                    let lhs = left.multiply(&not_right);
                    let rhs = not_left.multiply(&right);
                    Ok(union(lhs, rhs))
                }
                BinOp::Implies => {
                    let not_left = convert_inner(&l.negated(), variables, n)?;
                    Ok(union(not_left, right))
                }
                BinOp::ReverseImplies => {
                    let not_right = convert_inner(&r.negated(), variables, n)?;
                    Ok(union(left, not_right))
                }
                BinOp::Equivalence => {
                    let not_left = convert_inner(&l.negated(), variables, n)?;
                    let not_right = convert_inner(&r.negated(), variables, n)?;
                    let lhs = left.multiply(&right);
                    let rhs = not_left.multiply(&not_right);
                    Ok(union(lhs, rhs))
                }
            }
        }
    }
}
