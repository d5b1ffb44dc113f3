use crate::sql_ast::{combinators::AND, Expr};

/// Split a predicate into its top-level AND conjuncts, left to right.
///
/// Nested `and` calls are flattened: `(a AND (b AND c))` → `[a, b, c]`.
/// A predicate without a top-level AND comes back as a single element.
pub fn split_conjunctions(predicate: &Expr) -> Vec<&Expr> {
    let mut conjuncts = Vec::new();
    collect_conjuncts(predicate, &mut conjuncts);
    conjuncts
}

fn collect_conjuncts<'a>(expr: &'a Expr, out: &mut Vec<&'a Expr>) {
    match expr {
        Expr::Function(func) if func.is(AND) && !func.arguments.is_empty() => {
            for arg in &func.arguments {
                collect_conjuncts(arg, out);
            }
        }
        other => out.push(other),
    }
}
