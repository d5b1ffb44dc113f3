//! Name-resolution helpers the rewriter consumes.
//!
//! - [`table_identity`]: which table a FROM-list position stands for
//! - [`aliases`]: the statement's alias table
//! - [`conjunctions`]: splitting a predicate on its top-level ANDs
//! - [`identifier_semantic`]: which FROM-list table an expression refers to

pub mod aliases;
pub mod conjunctions;
pub mod identifier_semantic;
pub mod table_identity;

pub use aliases::Aliases;
pub use conjunctions::split_conjunctions;
pub use identifier_semantic::{get_ident_membership, get_idents_membership};
pub use table_identity::{TableIdentity, TableWithColumns};
