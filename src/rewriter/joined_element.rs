use crate::{
    analysis::TableIdentity,
    sql_ast::{
        ArrayJoin, Expr, JoinConstraint, JoinKind, JoinStrictness, QualifiedJoin,
        QualifiedJoinKind, TableJoin, TablesElement,
    },
};

use super::errors::{RewriteError, RewriteResult};

/// One FROM-list element as seen by the rewrite, plus the join kind it had
/// before any normalization.
pub struct JoinedElement<'a> {
    element: &'a mut TablesElement,
    original_kind: Option<JoinKind>,
}

impl<'a> JoinedElement<'a> {
    pub fn new(element: &'a mut TablesElement) -> Self {
        let original_kind = element.table_join.as_ref().map(TableJoin::kind);
        Self {
            element,
            original_kind,
        }
    }

    pub fn check_table_name(
        &self,
        table: &TableIdentity,
        current_database: &str,
    ) -> RewriteResult<()> {
        let table_expression = self
            .element
            .table_expression
            .as_ref()
            .ok_or(RewriteError::NotATableExpression)?;

        let found = TableIdentity::from_table_expression(table_expression, current_database);
        if !table.same(&found) {
            return Err(RewriteError::InconsistentTableNames {
                expected: table.to_string(),
                found: found.to_string(),
            });
        }
        Ok(())
    }

    /// A comma join is a cross join without a condition yet.
    pub fn rewrite_comma_to_cross(&mut self) {
        if let Some(join @ TableJoin::Comma) = &mut self.element.table_join {
            *join = TableJoin::Cross;
        }
    }

    /// Turn a CROSS join into `ALL INNER JOIN ... ON on_expression`.
    ///
    /// Returns false, leaving the element untouched, for any other kind.
    pub fn rewrite_cross_to_inner(&mut self, on_expression: Expr) -> bool {
        match &mut self.element.table_join {
            Some(join @ TableJoin::Cross) => {
                *join = TableJoin::Qualified(QualifiedJoin {
                    kind: QualifiedJoinKind::Inner,
                    strictness: JoinStrictness::All,
                    constraint: JoinConstraint::On(on_expression),
                });
                true
            }
            _ => false,
        }
    }

    pub fn original_kind(&self) -> Option<JoinKind> {
        self.original_kind
    }

    pub fn kind(&self) -> Option<JoinKind> {
        self.table_join().map(TableJoin::kind)
    }

    pub fn array_join(&self) -> Option<&ArrayJoin> {
        self.element.array_join.as_ref()
    }

    pub fn table_join(&self) -> Option<&TableJoin> {
        self.element.table_join.as_ref()
    }

    pub fn element(&self) -> &TablesElement {
        &*self.element
    }

    pub fn can_attach_on_expression(&self) -> bool {
        self.table_join()
            .is_some_and(|join| join.on_expression().is_none())
    }

    pub fn has_using(&self) -> bool {
        self.table_join()
            .is_some_and(|join| join.using_list().is_some())
    }
}
