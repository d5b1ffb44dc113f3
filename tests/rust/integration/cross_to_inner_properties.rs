use cross_join_rewrite::{
    analysis::Aliases,
    config::CrossToInnerJoinRewrite,
    rewrite,
    rewriter::{RewritePass, Transformed},
    sql_ast::{
        combinators::{and, col, eq, func, gt, int, short, subquery},
        to_sql::ToSql,
        ArrayJoin, ArrayJoinKind, JoinKind, JoinStrictness, SelectStatement, TableJoin,
        TablesElement,
    },
    CrossToInnerJoin,
};

use super::common::{
    context, context_with_aliases, on_expression, statement, table_expression, A, B, C, D,
};

#[test]
fn two_table_comma_join_becomes_inner() {
    let where_clause = and(vec![eq(col("a", "x"), col("b", "y")), gt(col("a", "z"), int(5))]);
    let mut select = statement(&[A, B], TableJoin::Comma, where_clause.clone());

    rewrite(&mut select, &context(CrossToInnerJoinRewrite::Mandatory, &[A, B])).unwrap();

    let join = select.tables[1].table_join.as_ref().unwrap();
    assert_eq!(join.kind(), JoinKind::Inner);
    assert_eq!(join.strictness(), JoinStrictness::All);
    assert_eq!(join.on_expression(), Some(&eq(col("a", "x"), col("b", "y"))));
    // WHERE keeps both conjuncts untouched
    assert_eq!(select.where_clause, where_clause);
    assert_eq!(
        select.to_sql(),
        "SELECT * FROM a ALL INNER JOIN b ON a.x = b.y WHERE a.x = b.y AND a.z > 5"
    );
}

#[test]
fn multi_hop_cross_join_chain() {
    let where_clause = and(vec![eq(col("a", "id"), col("b", "id")), eq(col("b", "id"), col("c", "id"))]);
    let mut select = statement(&[A, B, C], TableJoin::Cross, where_clause);

    rewrite(&mut select, &context(CrossToInnerJoinRewrite::BestEffort, &[A, B, C])).unwrap();

    assert_eq!(on_expression(&select, 1), Some(&eq(col("a", "id"), col("b", "id"))));
    assert_eq!(on_expression(&select, 2), Some(&eq(col("b", "id"), col("c", "id"))));
}

#[test]
fn conjuncts_for_one_table_are_anded_in_source_order() {
    let first = eq(col("a", "x"), col("b", "y"));
    let second = eq(col("b", "id"), col("a", "id"));
    let where_clause = and(vec![first.clone(), gt(col("b", "y"), int(0)), second.clone()]);
    let mut select = statement(&[A, B], TableJoin::Comma, where_clause);

    rewrite(&mut select, &context(CrossToInnerJoinRewrite::Mandatory, &[A, B])).unwrap();

    assert_eq!(on_expression(&select, 1), and(vec![first, second]).as_ref());
}

#[test]
fn rewrite_is_idempotent() {
    let where_clause = and(vec![
        eq(col("a", "id"), col("b", "id")),
        eq(col("b", "id"), col("c", "id")),
        gt(col("c", "w"), int(3)),
    ]);
    let ctx = context(CrossToInnerJoinRewrite::Mandatory, &[A, B, C]);
    let mut select = statement(&[A, B, C], TableJoin::Comma, where_clause);

    let first = CrossToInnerJoin::new().rewrite(&mut select, &ctx).unwrap();
    let once = select.clone();
    let second = CrossToInnerJoin::new().rewrite(&mut select, &ctx).unwrap();

    assert_eq!(first, Transformed::Yes(vec![1, 2]));
    assert_eq!(second, Transformed::No(vec![]));
    assert_eq!(select, once);
}

#[test]
fn best_effort_leftovers_are_stable_on_rerun() {
    // c has no equality to anyone: stays CROSS, and a second run changes nothing
    let where_clause = eq(col("a", "id"), col("b", "id"));
    let ctx = context(CrossToInnerJoinRewrite::BestEffort, &[A, B, C]);
    let mut select = statement(&[A, B, C], TableJoin::Comma, Some(where_clause));

    rewrite(&mut select, &ctx).unwrap();
    let once = select.clone();
    rewrite(&mut select, &ctx).unwrap();

    assert_eq!(select, once);
    assert_eq!(select.tables[2].table_join, Some(TableJoin::Cross));
}

#[test]
fn unsafe_conjunct_discards_all_candidates() {
    let where_clause = and(vec![
        eq(col("a", "id"), col("b", "id")),
        eq(col("b", "id"), col("c", "id")),
        subquery(SelectStatement::default()),
    ]);
    let mut select = statement(&[A, B, C], TableJoin::Cross, where_clause);

    rewrite(&mut select, &context(CrossToInnerJoinRewrite::BestEffort, &[A, B, C])).unwrap();

    for element in &select.tables[1..] {
        assert_eq!(element.table_join, Some(TableJoin::Cross));
    }
}

#[test]
fn alias_collision_blocks_every_rewrite() {
    let aliases: Aliases = [("b", func("plus", vec![col("a", "x"), int(1)]))]
        .into_iter()
        .collect();
    let where_clause = and(vec![
        eq(col("a", "id"), col("b", "id")),
        eq(col("b", "id"), col("c", "id")),
        gt(func("abs", vec![short("b")]), int(0)),
    ]);
    let mut select = statement(&[A, B, C], TableJoin::Comma, where_clause);

    let ctx = context_with_aliases(CrossToInnerJoinRewrite::BestEffort, &[A, B, C], aliases);
    rewrite(&mut select, &ctx).unwrap();

    assert!(on_expression(&select, 1).is_none());
    assert!(on_expression(&select, 2).is_none());
}

#[test]
fn array_join_short_circuits_after_partial_normalization() {
    let mut select = SelectStatement {
        projection: vec![],
        tables: vec![
            TablesElement::table(table_expression(A)),
            TablesElement::joined(table_expression(B), TableJoin::Comma),
            TablesElement::array_join(ArrayJoin {
                kind: ArrayJoinKind::Inner,
                expressions: vec![col("a", "arr")],
            }),
            TablesElement::joined(table_expression(D), TableJoin::Comma),
        ],
        where_clause: and(vec![eq(col("a", "id"), col("b", "id")), eq(col("a", "id"), col("d", "id"))]),
    };

    // Mandatory, yet no error: the statement is simply not eligible
    rewrite(&mut select, &context(CrossToInnerJoinRewrite::Mandatory, &[A, B, D])).unwrap();

    assert_eq!(select.tables[0].table_join, None);
    assert_eq!(select.tables[1].table_join, Some(TableJoin::Cross));
    assert_eq!(select.tables[2].table_join, None);
    assert_eq!(select.tables[3].table_join, Some(TableJoin::Comma));
    assert!((0..4).all(|i| on_expression(&select, i).is_none()));
}

#[test]
fn self_join_with_aliases() {
    let left = ("t", Some("l"), &["id", "parent"][..]);
    let right = ("t", Some("r"), &["id", "parent"][..]);
    let mut select = statement(
        &[left, right],
        TableJoin::Comma,
        Some(eq(col("l", "id"), col("r", "parent"))),
    );

    rewrite(&mut select, &context(CrossToInnerJoinRewrite::Mandatory, &[left, right])).unwrap();

    assert_eq!(
        select.to_sql(),
        "SELECT * FROM t AS l ALL INNER JOIN t AS r ON l.id = r.parent WHERE l.id = r.parent"
    );
}

#[test]
fn self_join_without_aliases_is_not_rewritten() {
    let t = ("t", None, &["id", "parent"][..]);
    let mut select = statement(&[t, t], TableJoin::Cross, Some(eq(col("t", "id"), col("t", "parent"))));

    rewrite(&mut select, &context(CrossToInnerJoinRewrite::Mandatory, &[t, t])).unwrap();

    assert_eq!(select.tables[1].table_join, Some(TableJoin::Cross));
}

#[test]
fn short_identifiers_resolve_through_columns() {
    let mut select = statement(&[A, B], TableJoin::Comma, Some(eq(short("x"), short("y"))));

    rewrite(&mut select, &context(CrossToInnerJoinRewrite::Mandatory, &[A, B])).unwrap();

    assert_eq!(on_expression(&select, 1), Some(&eq(short("x"), short("y"))));
}

#[test]
fn equality_targeting_a_join_with_condition_aborts() {
    // b is already INNER JOIN ... ON; an equality for b blocks c as well
    let mut select = statement(&[A, B, C], TableJoin::Comma, None);
    select.tables[1].table_join = Some(
        TableJoin::from_parts(
            JoinKind::Inner,
            JoinStrictness::All,
            Some(eq(col("a", "id"), col("b", "id"))),
            None,
        )
        .unwrap(),
    );
    select.where_clause = and(vec![eq(col("a", "x"), col("b", "y")), eq(col("a", "id"), col("c", "id"))]);

    rewrite(&mut select, &context(CrossToInnerJoinRewrite::BestEffort, &[A, B, C])).unwrap();

    assert_eq!(select.tables[2].table_join, Some(TableJoin::Cross));
}
