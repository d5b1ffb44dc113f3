use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::sql_ast::Expr;

/// Alias name → the expression (or table) that defines it.
///
/// The rewriter only asks whether a short name is taken; it never resolves
/// through this table.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Aliases(HashMap<String, Expr>);

impl Aliases {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    pub fn insert(&mut self, alias: impl Into<String>, definition: Expr) {
        self.0.insert(alias.into(), definition);
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.0.contains_key(alias)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Expr)> for Aliases {
    fn from_iter<I: IntoIterator<Item = (S, Expr)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
