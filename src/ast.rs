//! Boolean expression AST consumed by the rule converter.
//!
//! This is the concrete type the internal [`crate::parser`] produces; any
//! parser yielding this shape from the rule grammar is an acceptable
//! front end.

use serde::{Deserialize, Serialize};

/// A binary connective, ordered low-to-high precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinOp {
    /// `=`
    Equivalence,
    /// `=>`
    Implies,
    /// `<=`
    ReverseImplies,
    /// `^^`
    Xor,
    /// `||`
    Or,
    /// `&&`
    And,
}

/// A boolean expression node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expr {
    /// A reference to a declared variable by name.
    Var(String),
    /// Logical negation, highest precedence.
    Not(Box<Expr>),
    /// A binary connective over two subexpressions.
    Bin(BinOp, Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Structural De Morgan negation of this expression, computed
    /// compositionally over the AST (never by enumerating assignments) so
    /// the rule converter can obtain a rule's complement by re-converting
    /// this negated tree.
    pub fn negated(&self) -> Expr {
        match self {
            Expr::Var(name) => Expr::Not(Box::new(Expr::Var(name.clone()))),
            Expr::Not(inner) => (**inner).clone(),
            Expr::Bin(op, l, r) => match op {
                BinOp::And => Expr::Bin(BinOp::Or, Box::new(l.negated()), Box::new(r.negated())),
                BinOp::Or => Expr::Bin(BinOp::And, Box::new(l.negated()), Box::new(r.negated())),
                // ¬(A = B) = A ^^ B; ¬(A => B) = A && ¬B; ¬(A <= B) = ¬A && B;
                // ¬(A ^^ B) = A = B. These follow directly from the
                // connectives' truth tables.
                BinOp::Equivalence => Expr::Bin(BinOp::Xor, l.clone(), r.clone()),
                BinOp::Xor => Expr::Bin(BinOp::Equivalence, l.clone(), r.clone()),
                BinOp::Implies => Expr::Bin(BinOp::And, l.clone(), Box::new(r.negated())),
                BinOp::ReverseImplies => Expr::Bin(BinOp::And, Box::new(l.negated()), r.clone()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_negation_of_var_rebuilds_not() {
        let v = Expr::Var("a".to_string());
        assert_eq!(v.negated(), Expr::Not(Box::new(Expr::Var("a".to_string()))));
    }

    #[test]
    fn negating_not_strips_it() {
        let v = Expr::Not(Box::new(Expr::Var("a".to_string())));
        assert_eq!(v.negated(), Expr::Var("a".to_string()));
    }

    #[test]
    fn de_morgan_and_or() {
        let a = Expr::Var("a".to_string());
        let b = Expr::Var("b".to_string());
        let and = Expr::Bin(BinOp::And, Box::new(a.clone()), Box::new(b.clone()));
        assert_eq!(
            and.negated(),
            Expr::Bin(BinOp::Or, Box::new(a.negated()), Box::new(b.negated()))
        );
    }
}
