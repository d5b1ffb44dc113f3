//! Which FROM-list table an identifier (or a whole expression) refers to.
//!
//! Qualified identifiers are matched by their qualifier: an alias match wins
//! over a table-name match, so self joins resolve as long as both sides are
//! aliased. Short identifiers are looked up in the column lists and must be
//! found in exactly one table.

use crate::sql_ast::{visitors::IdentifiersCollector, Expr, Identifier};

use super::{Aliases, TableWithColumns};

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
enum TableMatch {
    None,
    TableName,
    Alias,
}

fn qualifier_match(qualifier: &[String], table: &TableWithColumns) -> TableMatch {
    let identity = &table.table;
    match qualifier {
        [name] => {
            if identity.alias.as_deref() == Some(name.as_str()) {
                TableMatch::Alias
            } else if identity.table.as_deref() == Some(name.as_str()) {
                TableMatch::TableName
            } else {
                TableMatch::None
            }
        }
        [database, name] => {
            if identity.database.as_deref() == Some(database.as_str())
                && identity.table.as_deref() == Some(name.as_str())
            {
                TableMatch::TableName
            } else {
                TableMatch::None
            }
        }
        _ => TableMatch::None,
    }
}

/// Position of the table `ident` belongs to, if exactly one table fits.
pub fn get_ident_membership(ident: &Identifier, tables: &[TableWithColumns]) -> Option<usize> {
    if ident.is_short() {
        let mut found = tables
            .iter()
            .enumerate()
            .filter(|(_, table)| table.has_column(ident.short_name()))
            .map(|(pos, _)| pos);
        let first = found.next()?;
        return match found.next() {
            Some(_) => None,
            None => Some(first),
        };
    }

    let ranked: Vec<(usize, TableMatch)> = tables
        .iter()
        .enumerate()
        .map(|(pos, table)| (pos, qualifier_match(ident.qualifier(), table)))
        .filter(|(_, rank)| *rank != TableMatch::None)
        .collect();

    let best = ranked.iter().map(|(_, rank)| *rank).max()?;
    let mut best_positions = ranked
        .iter()
        .filter(|(_, rank)| *rank == best)
        .map(|(pos, _)| *pos);
    let first = best_positions.next()?;
    match best_positions.next() {
        Some(_) => None,
        None => Some(first),
    }
}

/// The single table every identifier in `expr` belongs to.
///
/// None when the expression has no identifiers, when a short identifier is
/// shadowed by an alias (aliased expressions are never moved), when any
/// identifier is unresolved, or when identifiers span several tables.
pub fn get_idents_membership(
    expr: &Expr,
    tables: &[TableWithColumns],
    aliases: &Aliases,
) -> Option<usize> {
    let mut result = None;
    for ident in IdentifiersCollector::collect(expr) {
        if ident.is_short() && aliases.contains(ident.short_name()) {
            return None;
        }
        let pos = get_ident_membership(ident, tables)?;
        if result.is_some_and(|prev| prev != pos) {
            return None;
        }
        result = Some(pos);
    }
    result
}
