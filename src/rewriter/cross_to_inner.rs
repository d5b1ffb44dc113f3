//! Rewrites `CROSS JOIN` and comma joins into `INNER JOIN ... ON` when the
//! WHERE clause holds equalities between the joined tables.
//!
//! Example transformation:
//! ```text
//! SELECT * FROM a, b WHERE a.x = b.y AND a.z > 5
//! ```
//! becomes:
//! ```text
//! SELECT * FROM a ALL INNER JOIN b ON a.x = b.y WHERE a.x = b.y AND a.z > 5
//! ```
//!
//! The WHERE clause is left as is; the ON condition is a copy.

use crate::{
    config::CrossToInnerJoinRewrite,
    sql_ast::{to_sql::ToSql, Expr, JoinKind, SelectStatement},
};

use super::{
    context::RewriteContext,
    errors::{RewriteError, RewriteResult},
    join_on::{make_on_expression, move_expression_to_join_on},
    joined_tables::get_tables,
    RewritePass, Transformed,
};

/// The cross-to-inner join rewrite for a single SELECT.
pub struct CrossToInnerJoin;

impl CrossToInnerJoin {
    pub fn new() -> Self {
        CrossToInnerJoin
    }

    /// Subqueries are compiled on their own; a walker must not descend into them.
    pub fn needs_child_visit(node: &Expr) -> bool {
        !matches!(node, Expr::Subquery(_))
    }
}

impl Default for CrossToInnerJoin {
    fn default() -> Self {
        Self::new()
    }
}

impl RewritePass for CrossToInnerJoin {
    fn rewrite(
        &self,
        select: &mut SelectStatement,
        ctx: &RewriteContext,
    ) -> RewriteResult<Transformed<Vec<usize>>> {
        let SelectStatement {
            tables,
            where_clause,
            ..
        } = select;

        let mut joined_tables = get_tables(tables)?;
        if joined_tables.is_empty() {
            return Ok(Transformed::No(Vec::new()));
        }

        // The FROM list must agree with what name resolution saw.
        if joined_tables.len() != ctx.tables_with_columns.len() {
            return Err(RewriteError::InconsistentTableCount {
                joined: joined_tables.len(),
                known: ctx.tables_with_columns.len(),
            });
        }
        for (joined, known) in joined_tables.iter().zip(&ctx.tables_with_columns) {
            joined.check_table_name(&known.table, &ctx.current_database)?;
        }

        let policy = ctx.cross_to_inner_join_rewrite;
        let where_clause = match where_clause.as_ref() {
            Some(predicate) if policy.is_enabled() => predicate,
            _ => return Ok(Transformed::No(Vec::new())),
        };

        let asts_to_join_on = move_expression_to_join_on(
            where_clause,
            &joined_tables,
            &ctx.tables_with_columns,
            &ctx.aliases,
        );
        log::trace!(
            "CrossToInnerJoin: {} join(s) have candidate ON conditions",
            asts_to_join_on.len()
        );

        // Decide every join before touching any, so a rejection leaves the
        // statement as collected.
        let mut planned = Vec::new();
        for (i, joined) in joined_tables.iter().enumerate().skip(1) {
            if joined.kind() != Some(JoinKind::Cross) {
                continue;
            }

            match asts_to_join_on
                .get(&i)
                .and_then(|exprs| make_on_expression(exprs))
            {
                Some(on_expression) => planned.push((i, on_expression)),
                None if joined.original_kind() == Some(JoinKind::Comma)
                    && policy == CrossToInnerJoinRewrite::Mandatory =>
                {
                    return Err(RewriteError::CommaJoinNotRewritten {
                        join: joined.element().to_sql(),
                        where_clause: where_clause.to_sql(),
                    });
                }
                None => {}
            }
        }

        let mut rewritten_positions = Vec::with_capacity(planned.len());
        for (i, on_expression) in planned {
            let joined = &mut joined_tables[i];
            let query_before = joined.element().to_sql();
            if joined.rewrite_cross_to_inner(on_expression) {
                log::debug!(
                    "Rewritten '{}' to '{}'",
                    query_before,
                    joined.element().to_sql()
                );
                rewritten_positions.push(i);
            }
        }

        if rewritten_positions.is_empty() {
            Ok(Transformed::No(rewritten_positions))
        } else {
            Ok(Transformed::Yes(rewritten_positions))
        }
    }
}

/// Rewrite `select` in place. See [`CrossToInnerJoin`].
pub fn rewrite(select: &mut SelectStatement, ctx: &RewriteContext) -> RewriteResult<()> {
    CrossToInnerJoin::new().rewrite(select, ctx).map(|_| ())
}
