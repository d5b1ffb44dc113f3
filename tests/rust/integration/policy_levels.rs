use cross_join_rewrite::{
    config::CrossToInnerJoinRewrite,
    rewrite,
    rewriter::FaultCategory,
    sql_ast::{
        combinators::{and, col, eq, gt, int},
        Expr, JoinKind, TableJoin,
    },
};
use test_case::test_case;

use super::common::{context, statement, A, B};

fn provable() -> Expr {
    eq(col("a", "x"), col("b", "y"))
}

fn unprovable() -> Expr {
    gt(col("a", "x"), col("b", "y"))
}

#[test_case(CrossToInnerJoinRewrite::Disabled, JoinKind::Cross ; "disabled leaves cross")]
#[test_case(CrossToInnerJoinRewrite::BestEffort, JoinKind::Inner ; "best effort rewrites")]
#[test_case(CrossToInnerJoinRewrite::Mandatory, JoinKind::Inner ; "mandatory rewrites")]
fn comma_join_with_equality(policy: CrossToInnerJoinRewrite, expected: JoinKind) {
    let mut select = statement(&[A, B], TableJoin::Comma, Some(provable()));

    rewrite(&mut select, &context(policy, &[A, B])).unwrap();

    assert_eq!(select.tables[1].table_join.as_ref().map(TableJoin::kind), Some(expected));
}

#[test_case(CrossToInnerJoinRewrite::Disabled ; "disabled")]
#[test_case(CrossToInnerJoinRewrite::BestEffort ; "best effort")]
fn unprovable_comma_join_stays_cross(policy: CrossToInnerJoinRewrite) {
    let mut select = statement(&[A, B], TableJoin::Comma, Some(unprovable()));

    rewrite(&mut select, &context(policy, &[A, B])).unwrap();

    assert_eq!(select.tables[1].table_join, Some(TableJoin::Cross));
}

#[test]
fn unprovable_comma_join_rejected_when_mandatory() {
    let mut select = statement(&[A, B], TableJoin::Comma, Some(unprovable()));

    let err = rewrite(&mut select, &context(CrossToInnerJoinRewrite::Mandatory, &[A, B]))
        .unwrap_err();

    assert_eq!(err.category(), FaultCategory::QueryRejection);
    let message = err.to_string();
    assert!(message.contains("Failed to rewrite comma join to INNER"));
    assert!(message.contains("cannot rewrite 'CROSS JOIN b WHERE a.x > b.y' to INNER JOIN"));
}

#[test_case(CrossToInnerJoinRewrite::Disabled ; "disabled")]
#[test_case(CrossToInnerJoinRewrite::BestEffort ; "best effort")]
#[test_case(CrossToInnerJoinRewrite::Mandatory ; "mandatory")]
fn explicit_cross_join_is_never_an_error(policy: CrossToInnerJoinRewrite) {
    let mut select = statement(&[A, B], TableJoin::Cross, Some(unprovable()));

    rewrite(&mut select, &context(policy, &[A, B])).unwrap();

    assert_eq!(select.tables[1].table_join, Some(TableJoin::Cross));
}

#[test]
fn mandatory_without_where_keeps_cartesian_product() {
    let mut select = statement(&[A, B], TableJoin::Comma, None);

    rewrite(&mut select, &context(CrossToInnerJoinRewrite::Mandatory, &[A, B])).unwrap();

    assert_eq!(select.tables[1].table_join, Some(TableJoin::Cross));
}

#[test]
fn mandatory_names_first_unrewritable_join() {
    // b gets its ON, c has nothing
    let where_clause = and(vec![eq(col("a", "x"), col("b", "y")), gt(col("c", "w"), int(1))]);
    let c = ("c", None, &["w"][..]);
    let mut select = statement(&[A, B, c], TableJoin::Comma, where_clause);

    let err = rewrite(&mut select, &context(CrossToInnerJoinRewrite::Mandatory, &[A, B, c]))
        .unwrap_err();

    assert!(err.to_string().contains("'CROSS JOIN c WHERE a.x = b.y AND c.w > 1'"));
    // the rejected statement keeps b unrewritten; only comma normalization happened
    assert_eq!(select.tables[1].table_join, Some(TableJoin::Cross));
    assert_eq!(select.tables[2].table_join, Some(TableJoin::Cross));
}
