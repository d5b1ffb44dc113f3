//! Cross-to-inner join rewriting.
//!
//! Turns `FROM a, b WHERE a.x = b.y` (or `a CROSS JOIN b`) into
//! `FROM a INNER JOIN b ON a.x = b.y` when doing so provably returns the same
//! rows. The pieces, bottom up:
//!
//! - [`joined_element`]: one FROM-list element and its join kind history
//! - [`joined_tables`]: collecting and validating the FROM list
//! - [`safety`]: which WHERE conjuncts block the rewrite
//! - [`join_on`]: choosing and building ON conditions
//! - [`cross_to_inner`]: driving it all under the configured policy

pub mod context;
pub mod cross_to_inner;
pub mod errors;
pub mod join_on;
pub mod joined_element;
pub mod joined_tables;
pub mod safety;

pub use context::RewriteContext;
pub use cross_to_inner::{rewrite, CrossToInnerJoin};
pub use errors::{FaultCategory, RewriteError, RewriteResult};

use crate::sql_ast::SelectStatement;

/// Outcome of a pass: whether it changed anything, plus what it reports.
#[derive(Debug, Clone, PartialEq)]
pub enum Transformed<T> {
    Yes(T),
    No(T),
}

/// A rewrite applied to one SELECT at a time.
///
/// Implementations mutate the statement in place and never look into
/// subquery bodies.
pub trait RewritePass {
    fn rewrite(
        &self,
        select: &mut SelectStatement,
        ctx: &RewriteContext,
    ) -> RewriteResult<Transformed<Vec<usize>>>;
}
