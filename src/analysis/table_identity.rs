use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sql_ast::{TableExpression, TableSource};

/// Database, table and alias of one FROM-list position.
///
/// Subqueries and table functions only carry an alias.
#[derive(Debug, PartialEq, Eq, Clone, Default, Serialize, Deserialize)]
pub struct TableIdentity {
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub table: Option<String>,
    #[serde(default)]
    pub alias: Option<String>,
}

impl TableIdentity {
    pub fn new(database: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            database: Some(database.into()),
            table: Some(table.into()),
            alias: None,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Identity of a table expression; unqualified tables live in `current_database`.
    pub fn from_table_expression(expr: &TableExpression, current_database: &str) -> Self {
        let (database, table) = match &expr.source {
            TableSource::Table { database, table } => (
                Some(
                    database
                        .clone()
                        .unwrap_or_else(|| current_database.to_string()),
                ),
                Some(table.clone()),
            ),
            TableSource::Subquery(_) | TableSource::TableFunction(_) => (None, None),
        };
        Self {
            database,
            table,
            alias: expr.alias.clone(),
        }
    }

    pub fn same(&self, other: &TableIdentity) -> bool {
        self == other
    }
}

impl fmt::Display for TableIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.database, &self.table) {
            (Some(db), Some(table)) => write!(f, "{}.{}", db, table)?,
            (None, Some(table)) => write!(f, "{}", table)?,
            _ => write!(f, "<subquery>")?,
        }
        if let Some(alias) = &self.alias {
            write!(f, " AS {}", alias)?;
        }
        Ok(())
    }
}

/// A FROM-list table together with the columns it exposes.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct TableWithColumns {
    pub table: TableIdentity,
    #[serde(default)]
    pub columns: Vec<String>,
}

impl TableWithColumns {
    pub fn new(table: TableIdentity, columns: Vec<String>) -> Self {
        Self { table, columns }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }
}
