//! Integration tests for the cross-to-inner join rewrite.
//!
//! Statements are built through the public API and run through
//! [`cross_join_rewrite::rewrite`] end to end.

mod cross_to_inner_properties;
mod policy_levels;
