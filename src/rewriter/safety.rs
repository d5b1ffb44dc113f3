use crate::{
    analysis::Aliases,
    sql_ast::{visitors::IdentifiersCollector, Expr},
};

/// Whether a top-level WHERE conjunct may stay put while others move to ON.
///
/// A bare identifier that shares its name with an alias could refer to the
/// aliased expression rather than a column, so any function containing one is
/// rejected. Anything other than a function, identifier or literal (a
/// subquery, `*`) is rejected outright.
pub fn is_allowed_to_rewrite_cross_join(node: &Expr, aliases: &Aliases) -> bool {
    match node {
        Expr::Function(_) => IdentifiersCollector::collect(node)
            .into_iter()
            .all(|ident| !(ident.is_short() && aliases.contains(ident.short_name()))),
        Expr::Identifier(_) | Expr::Literal(_) => true,
        Expr::Subquery(_) | Expr::Asterisk => false,
    }
}
