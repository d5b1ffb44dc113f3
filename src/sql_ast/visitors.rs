//! Expression Visitor Pattern
//!
//! A visitor trait for walking [`Expr`] trees, so passes that only care about
//! one node kind (identifiers, function calls) share the traversal.
//!
//! The walk stops at subqueries: their bodies are compiled independently and
//! are reported to [`ExpressionVisitor::visit_subquery`] without descending.
//!
//! # Example
//!
//! ```ignore
//! use crate::sql_ast::visitors::IdentifiersCollector;
//!
//! let idents = IdentifiersCollector::collect(&expr);
//! // idents = [a.x, b.y] for `a.x = b.y`
//! ```

use super::{Expr, Function, Identifier, Literal, SelectStatement};

/// Trait for visiting [`Expr`] nodes.
///
/// All methods default to doing nothing, so implementors override only what
/// they need. `'a` is the lifetime of the walked tree, which lets visitors keep
/// references to the nodes they see.
pub trait ExpressionVisitor<'a> {
    fn visit_function(&mut self, _func: &'a Function) {}

    fn visit_identifier(&mut self, _ident: &'a Identifier) {}

    fn visit_literal(&mut self, _literal: &'a Literal) {}

    fn visit_subquery(&mut self, _select: &'a SelectStatement) {}

    fn visit_asterisk(&mut self) {}
}

/// Walk an expression tree in pre-order, calling visitor methods for each node.
pub fn walk_expression<'a, V: ExpressionVisitor<'a>>(expr: &'a Expr, visitor: &mut V) {
    match expr {
        Expr::Function(func) => {
            visitor.visit_function(func);
            for arg in &func.arguments {
                walk_expression(arg, visitor);
            }
        }
        Expr::Identifier(ident) => visitor.visit_identifier(ident),
        Expr::Literal(literal) => visitor.visit_literal(literal),
        Expr::Subquery(select) => visitor.visit_subquery(select),
        Expr::Asterisk => visitor.visit_asterisk(),
    }
}

/// Collects every identifier in an expression, in source order.
#[derive(Default)]
pub struct IdentifiersCollector<'a> {
    pub identifiers: Vec<&'a Identifier>,
}

impl<'a> IdentifiersCollector<'a> {
    pub fn collect(expr: &'a Expr) -> Vec<&'a Identifier> {
        let mut collector = Self::default();
        walk_expression(expr, &mut collector);
        collector.identifiers
    }
}

impl<'a> ExpressionVisitor<'a> for IdentifiersCollector<'a> {
    fn visit_identifier(&mut self, ident: &'a Identifier) {
        self.identifiers.push(ident);
    }
}
