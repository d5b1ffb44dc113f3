//! Builders for expression trees.
//!
//! Keeps tests and callers from spelling out nested `Expr::Function` literals.
//!
//! # Example
//! ```ignore
//! use crate::sql_ast::combinators::{and, col, eq, gt, int};
//!
//! // a.x = b.y AND a.z > 5
//! let predicate = and(vec![eq(col("a", "x"), col("b", "y")), gt(col("a", "z"), int(5))]);
//! ```

use super::{Expr, Function, Identifier, Literal, SelectStatement};

pub const AND: &str = "and";
pub const OR: &str = "or";
pub const EQUALS: &str = "equals";

/// Combine predicates into one `and` call.
///
/// - Empty vec → None
/// - Single predicate → Some(predicate)
/// - Multiple → Some(and(pred1, pred2, ...)), order preserved
pub fn and(predicates: Vec<Expr>) -> Option<Expr> {
    combine_predicates(predicates, AND)
}

pub fn or(predicates: Vec<Expr>) -> Option<Expr> {
    combine_predicates(predicates, OR)
}

fn combine_predicates(predicates: Vec<Expr>, name: &str) -> Option<Expr> {
    match predicates.len() {
        0 => None,
        1 => predicates.into_iter().next(),
        _ => Some(func(name, predicates)),
    }
}

pub fn func(name: impl Into<String>, arguments: Vec<Expr>) -> Expr {
    Expr::Function(Function::new(name, arguments))
}

pub fn eq(lhs: Expr, rhs: Expr) -> Expr {
    func(EQUALS, vec![lhs, rhs])
}

pub fn gt(lhs: Expr, rhs: Expr) -> Expr {
    func("greater", vec![lhs, rhs])
}

/// Qualified column reference: `table.column`
pub fn col(table: impl Into<String>, column: impl Into<String>) -> Expr {
    Expr::Identifier(Identifier::qualified(table, column))
}

/// Unqualified column reference
pub fn short(column: impl Into<String>) -> Expr {
    Expr::Identifier(Identifier::short(column))
}

pub fn int(value: i64) -> Expr {
    Expr::Literal(Literal::Integer(value))
}

pub fn string(value: impl Into<String>) -> Expr {
    Expr::Literal(Literal::String(value.into()))
}

pub fn subquery(select: SelectStatement) -> Expr {
    Expr::Subquery(Box::new(select))
}
