//! Error types for building statement nodes from loosely typed parts.

use thiserror::Error;

use super::JoinKind;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AstError {
    #[error("CROSS JOIN has {count} expressions: [{first}, ...]")]
    ConditionOnCrossJoin { count: usize, first: String },

    #[error("{kind} JOIN requires an ON or USING clause")]
    MissingJoinConstraint { kind: JoinKind },

    #[error("{kind} JOIN cannot have both ON and USING clauses")]
    ConflictingJoinConstraint { kind: JoinKind },
}
