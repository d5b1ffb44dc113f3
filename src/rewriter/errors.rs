//! Error types for the cross-to-inner join rewrite.
//!
//! Every failure falls in one of three classes, see [`FaultCategory`]:
//! planner defects, unsupported SQL, and queries the user has to change.

use std::fmt::Display;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultCategory {
    /// Inputs disagree with each other; a bug upstream of the rewriter.
    InternalConsistency,
    /// Valid SQL the rewriter does not handle.
    UnsupportedFeature,
    /// The query is rejected under the current settings.
    QueryRejection,
}

impl Display for FaultCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FaultCategory::InternalConsistency => write!(f, "LOGICAL_ERROR"),
            FaultCategory::UnsupportedFeature => write!(f, "NOT_IMPLEMENTED"),
            FaultCategory::QueryRejection => write!(f, "INCORRECT_QUERY"),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum RewriteError {
    #[error("Inconsistent number of tables: {joined} != {known}")]
    InconsistentTableCount { joined: usize, known: usize },

    #[error("Inconsistent table names: '{found}' in FROM, '{expected}' resolved")]
    InconsistentTableNames { expected: String, found: String },

    #[error("Not a table expression in JOIN (ARRAY JOIN?)")]
    NotATableExpression,

    #[error("Tables element {position} has neither a table expression nor ARRAY JOIN")]
    UnexpectedElement { position: usize },

    #[error("Multiple USING statements are not supported")]
    MultipleUsing,

    #[error(
        "Failed to rewrite comma join to INNER. \
         Please, try to simplify WHERE section \
         or set the setting `cross_to_inner_join_rewrite` to 1 to allow slow CROSS JOIN for this case \
         (cannot rewrite '{join} WHERE {where_clause}' to INNER JOIN)"
    )]
    CommaJoinNotRewritten { join: String, where_clause: String },
}

impl RewriteError {
    pub fn category(&self) -> FaultCategory {
        match self {
            RewriteError::InconsistentTableCount { .. }
            | RewriteError::InconsistentTableNames { .. }
            | RewriteError::NotATableExpression
            | RewriteError::UnexpectedElement { .. } => FaultCategory::InternalConsistency,
            RewriteError::MultipleUsing => FaultCategory::UnsupportedFeature,
            RewriteError::CommaJoinNotRewritten { .. } => FaultCategory::QueryRejection,
        }
    }
}

pub type RewriteResult<T> = Result<T, RewriteError>;
