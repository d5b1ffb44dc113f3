use crate::{
    analysis::{Aliases, TableWithColumns},
    config::{ConfigError, CrossToInnerJoinRewrite, RewriteConfig},
};

/// Settings and resolved names for rewriting one SELECT.
///
/// `tables_with_columns` lines up positionally with the statement's FROM list.
#[derive(Debug, Clone, PartialEq)]
pub struct RewriteContext {
    pub current_database: String,
    pub tables_with_columns: Vec<TableWithColumns>,
    pub aliases: Aliases,
    pub cross_to_inner_join_rewrite: CrossToInnerJoinRewrite,
}

impl RewriteContext {
    pub fn new(
        cross_to_inner_join_rewrite: CrossToInnerJoinRewrite,
        current_database: impl Into<String>,
        tables_with_columns: Vec<TableWithColumns>,
        aliases: Aliases,
    ) -> Self {
        Self {
            current_database: current_database.into(),
            tables_with_columns,
            aliases,
            cross_to_inner_join_rewrite,
        }
    }

    pub fn from_config(
        config: &RewriteConfig,
        tables_with_columns: Vec<TableWithColumns>,
        aliases: Aliases,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(
            config.policy()?,
            config.current_database.clone(),
            tables_with_columns,
            aliases,
        ))
    }
}
