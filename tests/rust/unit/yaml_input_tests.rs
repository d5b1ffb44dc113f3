//! Tests for reading statements from YAML input files.

#[cfg(test)]
mod yaml_input_tests {
    use cross_join_rewrite::{
        config::CrossToInnerJoinRewrite,
        input::RewriteInput,
        rewrite,
        sql_ast::{to_sql::ToSql, JoinKind, TableJoin},
        RewriteContext,
    };

    const INPUT: &str = r#"
current_database: sales
aliases: {}
statement:
  tables:
    - table_expression:
        source: !Table
          table: a
    - table_expression:
        source: !Table
          database: sales
          table: b
      table_join:
        kind: Comma
  where_clause: !Function
    name: equals
    arguments:
      - !Identifier a.x
      - !Identifier b.y
tables:
  - table: {database: sales, table: a}
    columns: [x]
  - table: {database: sales, table: b}
    columns: [y]
"#;

    #[test]
    fn test_yaml_statement_parses() {
        let input = RewriteInput::from_yaml_str(INPUT).unwrap();

        assert_eq!(input.current_database.as_deref(), Some("sales"));
        assert_eq!(input.statement.tables.len(), 2);
        assert_eq!(
            input.statement.tables[1].table_join.as_ref().map(TableJoin::kind),
            Some(JoinKind::Comma)
        );
        assert_eq!(
            input.statement.where_clause.as_ref().map(ToSql::to_sql).as_deref(),
            Some("a.x = b.y")
        );
    }

    #[test]
    fn test_yaml_statement_rewrites() {
        let input = RewriteInput::from_yaml_str(INPUT).unwrap();
        let ctx = RewriteContext::new(
            CrossToInnerJoinRewrite::Mandatory,
            "sales",
            input.tables,
            input.aliases,
        );
        let mut statement = input.statement;

        rewrite(&mut statement, &ctx).unwrap();

        assert_eq!(
            statement.to_sql(),
            "SELECT * FROM a ALL INNER JOIN sales.b ON a.x = b.y WHERE a.x = b.y"
        );
    }

    #[test]
    fn test_yaml_cross_join_with_on_is_rejected() {
        let bad = INPUT.replace(
            "        kind: Comma",
            "        kind: Cross\n        on: !Identifier a.x",
        );
        assert!(RewriteInput::from_yaml_str(&bad).is_err());
    }
}
