//! Collects the FROM list into [`JoinedElement`]s and checks it can be rewritten.

use crate::sql_ast::TablesElement;

use super::{
    errors::{RewriteError, RewriteResult},
    joined_element::JoinedElement,
};

/// Wrap every FROM-list element, normalizing comma joins to CROSS on the way.
///
/// Returns an empty list when there is nothing to rewrite: fewer than two
/// tables, or an ARRAY JOIN anywhere in the list. In the ARRAY JOIN case the
/// elements before it have already been normalized and stay that way.
///
/// A comma or cross join carrying a condition cannot be represented by
/// [`crate::sql_ast::TableJoin`], so that check happened when the join was built.
pub fn get_tables(tables: &mut [TablesElement]) -> RewriteResult<Vec<JoinedElement<'_>>> {
    let num_tables = tables.len();
    if num_tables < 2 {
        return Ok(Vec::new());
    }

    let mut joined_tables = Vec::with_capacity(num_tables);
    let mut has_using = false;

    for (position, element) in tables.iter_mut().enumerate() {
        if element.table_expression.is_none() && element.array_join.is_none() {
            return Err(RewriteError::UnexpectedElement { position });
        }

        let mut joined = JoinedElement::new(element);
        joined.rewrite_comma_to_cross();

        if joined.array_join().is_some() {
            log::trace!(
                "CrossToInnerJoin: ARRAY JOIN at position {}, skipping statement",
                position
            );
            return Ok(Vec::new());
        }

        if joined.has_using() {
            if has_using {
                return Err(RewriteError::MultipleUsing);
            }
            has_using = true;
        }

        joined_tables.push(joined);
    }

    Ok(joined_tables)
}
