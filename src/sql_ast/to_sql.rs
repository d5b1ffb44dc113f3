//! One-line SQL rendering of statement nodes.
//!
//! Used for the debug trace of each rewritten join and for error messages, so
//! the output favours readability over round-trip exactness.

use super::{
    ArrayJoin, ArrayJoinKind, Expr, Function, Identifier, JoinConstraint, JoinStrictness,
    Literal, QualifiedJoin, SelectStatement, TableExpression, TableJoin, TableSource,
    TablesElement,
};

pub trait ToSql {
    fn to_sql(&self) -> String;
}

/// Infix spelling and binding strength of the functions rendered as operators.
fn infix_operator(name: &str) -> Option<(&'static str, u8)> {
    let op = match name {
        "or" => ("OR", 1),
        "and" => ("AND", 2),
        "equals" => ("=", COMPARISON_PRECEDENCE),
        "notEquals" => ("!=", COMPARISON_PRECEDENCE),
        "less" => ("<", COMPARISON_PRECEDENCE),
        "greater" => (">", COMPARISON_PRECEDENCE),
        "lessOrEquals" => ("<=", COMPARISON_PRECEDENCE),
        "greaterOrEquals" => (">=", COMPARISON_PRECEDENCE),
        "like" => ("LIKE", COMPARISON_PRECEDENCE),
        "in" => ("IN", COMPARISON_PRECEDENCE),
        "plus" => ("+", 5),
        "minus" => ("-", 5),
        "multiply" => ("*", 6),
        "divide" => ("/", 6),
        _ => return None,
    };
    Some(op)
}

const NOT_PRECEDENCE: u8 = 3;
const COMPARISON_PRECEDENCE: u8 = 4;

/// Operators whose nested calls of the same name can drop their parentheses.
fn is_associative(name: &str) -> bool {
    matches!(name, "and" | "or" | "plus" | "multiply")
}

fn precedence(expr: &Expr) -> u8 {
    match expr {
        Expr::Function(func) if func.is("not") && func.arguments.len() == 1 => NOT_PRECEDENCE,
        Expr::Function(func) if func.arguments.len() >= 2 => {
            infix_operator(&func.name).map_or(u8::MAX, |(_, p)| p)
        }
        _ => u8::MAX,
    }
}

/// Render an operand of `parent`, grouping it when the text would otherwise
/// parse differently. Operators are left associative, so only the leftmost
/// operand may share the parent's precedence ungrouped; comparisons never chain.
fn operand_to_sql(expr: &Expr, parent: &str, parent_precedence: u8, leftmost: bool) -> String {
    let child_precedence = precedence(expr);
    let same_associative =
        matches!(expr, Expr::Function(func) if func.is(parent) && is_associative(parent));
    let grouped = child_precedence < parent_precedence
        || (child_precedence == parent_precedence
            && !same_associative
            && (!leftmost || parent_precedence == COMPARISON_PRECEDENCE));
    if grouped {
        format!("({})", expr.to_sql())
    } else {
        expr.to_sql()
    }
}

impl ToSql for Function {
    fn to_sql(&self) -> String {
        if self.is("not") && self.arguments.len() == 1 {
            return format!(
                "NOT {}",
                operand_to_sql(&self.arguments[0], &self.name, NOT_PRECEDENCE, true)
            );
        }
        if self.arguments.len() >= 2 {
            if let Some((symbol, prec)) = infix_operator(&self.name) {
                return self
                    .arguments
                    .iter()
                    .enumerate()
                    .map(|(i, arg)| operand_to_sql(arg, &self.name, prec, i == 0))
                    .collect::<Vec<_>>()
                    .join(&format!(" {} ", symbol));
            }
        }
        let args = self
            .arguments
            .iter()
            .map(ToSql::to_sql)
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}({})", self.name, args)
    }
}

fn quote_name_part(part: &str) -> String {
    let mut chars = part.chars();
    let plain = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };
    if plain {
        part.to_string()
    } else {
        format!("`{}`", part.replace('`', "\\`"))
    }
}

impl ToSql for Identifier {
    fn to_sql(&self) -> String {
        self.name_parts
            .iter()
            .map(|part| quote_name_part(part))
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl ToSql for Literal {
    fn to_sql(&self) -> String {
        match self {
            Literal::Integer(i) => i.to_string(),
            Literal::Float(f) => f.to_string(),
            Literal::Boolean(b) => b.to_string(),
            Literal::String(s) => format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'")),
            Literal::Null => "NULL".to_string(),
        }
    }
}

impl ToSql for Expr {
    fn to_sql(&self) -> String {
        match self {
            Expr::Function(func) => func.to_sql(),
            Expr::Identifier(ident) => ident.to_sql(),
            Expr::Literal(literal) => literal.to_sql(),
            Expr::Subquery(select) => format!("({})", select.to_sql()),
            Expr::Asterisk => "*".to_string(),
        }
    }
}

impl ToSql for TableExpression {
    fn to_sql(&self) -> String {
        let source = match &self.source {
            TableSource::Table { database, table } => match database {
                Some(db) => format!("{}.{}", quote_name_part(db), quote_name_part(table)),
                None => quote_name_part(table),
            },
            TableSource::Subquery(select) => format!("({})", select.to_sql()),
            TableSource::TableFunction(func) => func.to_sql(),
        };
        match &self.alias {
            Some(alias) => format!("{} AS {}", source, quote_name_part(alias)),
            None => source,
        }
    }
}

fn strictness_prefix(strictness: JoinStrictness) -> &'static str {
    match strictness {
        JoinStrictness::Unspecified => "",
        JoinStrictness::All => "ALL ",
        JoinStrictness::Any => "ANY ",
        JoinStrictness::Asof => "ASOF ",
        JoinStrictness::Semi => "SEMI ",
        JoinStrictness::Anti => "ANTI ",
    }
}

/// Everything that goes before the joined table.
fn join_head(join: &TableJoin) -> String {
    match join {
        TableJoin::Comma => ",".to_string(),
        TableJoin::Cross => "CROSS JOIN".to_string(),
        TableJoin::Qualified(QualifiedJoin {
            kind, strictness, ..
        }) => format!(
            "{}{} JOIN",
            strictness_prefix(*strictness),
            super::JoinKind::from(*kind)
        ),
    }
}

/// ON / USING part, rendered after the joined table.
fn join_tail(join: &TableJoin) -> Option<String> {
    match join {
        TableJoin::Qualified(QualifiedJoin { constraint, .. }) => Some(match constraint {
            JoinConstraint::On(expr) => format!("ON {}", expr.to_sql()),
            JoinConstraint::Using(list) => format!(
                "USING ({})",
                list.iter().map(ToSql::to_sql).collect::<Vec<_>>().join(", ")
            ),
        }),
        _ => None,
    }
}

impl ToSql for TableJoin {
    fn to_sql(&self) -> String {
        match join_tail(self) {
            Some(tail) => format!("{} {}", join_head(self), tail),
            None => join_head(self),
        }
    }
}

impl ToSql for ArrayJoin {
    fn to_sql(&self) -> String {
        let prefix = match self.kind {
            ArrayJoinKind::Inner => "ARRAY JOIN",
            ArrayJoinKind::Left => "LEFT ARRAY JOIN",
        };
        let exprs = self
            .expressions
            .iter()
            .map(ToSql::to_sql)
            .collect::<Vec<_>>()
            .join(", ");
        format!("{} {}", prefix, exprs)
    }
}

impl ToSql for TablesElement {
    fn to_sql(&self) -> String {
        let table = self.table_expression.as_ref().map(ToSql::to_sql);
        let joined = match (&self.table_join, table) {
            (None, Some(table)) => table,
            (None, None) => String::new(),
            (Some(TableJoin::Comma), Some(table)) => format!(", {}", table),
            (Some(join), Some(table)) => match join_tail(join) {
                Some(tail) => format!("{} {} {}", join_head(join), table, tail),
                None => format!("{} {}", join_head(join), table),
            },
            (Some(join), None) => join.to_sql(),
        };
        match &self.array_join {
            Some(array_join) if joined.is_empty() => array_join.to_sql(),
            Some(array_join) => format!("{} {}", joined, array_join.to_sql()),
            None => joined,
        }
    }
}

impl ToSql for SelectStatement {
    fn to_sql(&self) -> String {
        let projection = if self.projection.is_empty() {
            "*".to_string()
        } else {
            self.projection
                .iter()
                .map(ToSql::to_sql)
                .collect::<Vec<_>>()
                .join(", ")
        };

        let mut sql = format!("SELECT {}", projection);
        let mut elements = self.tables.iter().map(ToSql::to_sql);
        if let Some(first) = elements.next() {
            sql.push_str(" FROM ");
            sql.push_str(&first);
            for element in elements {
                if !element.starts_with(',') {
                    sql.push(' ');
                }
                sql.push_str(&element);
            }
        }
        if let Some(predicate) = &self.where_clause {
            sql.push_str(" WHERE ");
            sql.push_str(&predicate.to_sql());
        }
        sql
    }
}
