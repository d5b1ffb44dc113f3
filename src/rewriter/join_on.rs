//! Picks the WHERE conjuncts that can become join conditions.

use std::collections::BTreeMap;

use crate::{
    analysis::{get_idents_membership, split_conjunctions, Aliases, TableWithColumns},
    sql_ast::{
        combinators::{self, EQUALS},
        Expr,
    },
};

use super::{joined_element::JoinedElement, safety::is_allowed_to_rewrite_cross_join};

/// Table position → WHERE conjuncts to put in that table's `ON`, in source order.
pub type JoinOnExpressions<'e> = BTreeMap<usize, Vec<&'e Expr>>;

/// Find the equalities in `where_clause` that connect two different tables.
///
/// Each one is assigned to the later of its two tables, the join that can
/// carry it. The result is all or nothing: if any conjunct targets a join
/// that already has a condition, or fails
/// [`is_allowed_to_rewrite_cross_join`], an empty map comes back.
pub fn move_expression_to_join_on<'e>(
    where_clause: &'e Expr,
    joined_tables: &[JoinedElement<'_>],
    tables: &[TableWithColumns],
    aliases: &Aliases,
) -> JoinOnExpressions<'e> {
    let mut asts_to_join_on = JoinOnExpressions::new();

    for node in split_conjunctions(where_clause) {
        if let Expr::Function(func) = node {
            if func.is(EQUALS) {
                let [left, right] = func.arguments.as_slice() else {
                    log::trace!("CrossToInnerJoin: `equals` without two arguments, giving up");
                    return JoinOnExpressions::new();
                };

                // Identifiers from different tables move to JOIN ON.
                // A self join can only be told apart through aliases.
                let left_table_pos = get_idents_membership(left, tables, aliases);
                let right_table_pos = get_idents_membership(right, tables, aliases);

                if let (Some(left_pos), Some(right_pos)) = (left_table_pos, right_table_pos) {
                    if left_pos != right_pos {
                        let table_pos = left_pos.max(right_pos);
                        let can_attach = joined_tables
                            .get(table_pos)
                            .is_some_and(JoinedElement::can_attach_on_expression);
                        if !can_attach {
                            log::trace!(
                                "CrossToInnerJoin: join {} already has a condition, giving up",
                                table_pos
                            );
                            return JoinOnExpressions::new();
                        }
                        asts_to_join_on.entry(table_pos).or_default().push(node);
                    }
                }
            }
        }

        if !is_allowed_to_rewrite_cross_join(node, aliases) {
            log::trace!("CrossToInnerJoin: conjunct is not safe to keep, giving up");
            return JoinOnExpressions::new();
        }
    }

    asts_to_join_on
}

/// Build a standalone ON expression from the collected conjuncts.
///
/// The conjuncts are cloned: they also stay in WHERE.
pub fn make_on_expression(expressions: &[&Expr]) -> Option<Expr> {
    combinators::and(expressions.iter().map(|expr| (*expr).clone()).collect())
}
