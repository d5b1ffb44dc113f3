//! Cross-to-inner join rewriting for SQL SELECT statements.
//!
//! This crate provides:
//! - A statement model for SELECT FROM lists and predicates
//! - Table-membership resolution for identifiers
//! - The CROSS/comma → INNER JOIN rewrite under a configurable policy
//! - SQL rendering for diagnostics

pub mod analysis;
pub mod config;
pub mod input;
pub mod rewriter;
pub mod sql_ast;

pub use rewriter::{rewrite, CrossToInnerJoin, RewriteContext, RewriteError};
