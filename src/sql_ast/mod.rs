//! SQL statement model consumed by the join rewriter.
//!
//! The shapes follow a parsed ClickHouse `SELECT`: an ordered FROM list of
//! [`TablesElement`]s, each optionally joined to everything before it, and an
//! optional WHERE predicate built out of generic [`Expr`] nodes.
//!
//! Join specifications are a closed sum type ([`TableJoin`]): a comma or cross
//! join cannot hold a condition, so that invariant is checked once, when a
//! join is built from its loose parts (see [`TableJoin::from_parts`]).

pub mod combinators;
pub mod errors;
pub mod to_sql;
pub mod visitors;

use std::fmt;

use serde::{Deserialize, Serialize};

use errors::AstError;
use to_sql::ToSql;

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum Expr {
    Function(Function),

    Identifier(Identifier),

    Literal(Literal),

    /// Opaque subquery. Compiled on its own; the rewriter never looks inside.
    Subquery(Box<SelectStatement>),

    Asterisk,
}

/// Function call. Operators are functions too (`equals`, `and`, `greater`, ...).
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    #[serde(default)]
    pub arguments: Vec<Expr>,
}

impl Function {
    pub fn new(name: impl Into<String>, arguments: Vec<Expr>) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }
}

/// Possibly compound identifier: `x`, `t.x` or `db.t.x`.
///
/// Serialized as its dotted form so fixtures can write `"a.x"`.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Identifier {
    pub name_parts: Vec<String>,
}

impl Identifier {
    pub fn new(name_parts: Vec<String>) -> Self {
        Self { name_parts }
    }

    pub fn short(name: impl Into<String>) -> Self {
        Self {
            name_parts: vec![name.into()],
        }
    }

    pub fn qualified(qualifier: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name_parts: vec![qualifier.into(), name.into()],
        }
    }

    /// True when the identifier has no table (or database) qualifier.
    pub fn is_short(&self) -> bool {
        self.name_parts.len() <= 1
    }

    /// Last name part, i.e. the column name.
    pub fn short_name(&self) -> &str {
        self.name_parts.last().map(String::as_str).unwrap_or_default()
    }

    /// Everything before the column name.
    pub fn qualifier(&self) -> &[String] {
        match self.name_parts.split_last() {
            Some((_, qualifier)) => qualifier,
            None => &[],
        }
    }

    pub fn full_name(&self) -> String {
        self.name_parts.join(".")
    }
}

/// Parts are separated by `.`; a part wrapped in backticks may itself contain
/// `.`, and a doubled backtick inside it stands for one backtick.
impl From<String> for Identifier {
    fn from(value: String) -> Self {
        let mut name_parts = Vec::new();
        let mut current = String::new();
        let mut chars = value.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '`' => {
                    while let Some(quoted) = chars.next() {
                        if quoted != '`' {
                            current.push(quoted);
                        } else if chars.peek() == Some(&'`') {
                            chars.next();
                            current.push('`');
                        } else {
                            break;
                        }
                    }
                }
                '.' => name_parts.push(std::mem::take(&mut current)),
                c => current.push(c),
            }
        }
        name_parts.push(current);
        Identifier::new(name_parts)
    }
}

impl From<Identifier> for String {
    fn from(value: Identifier) -> Self {
        value
            .name_parts
            .iter()
            .map(|part| {
                if part.contains(['.', '`']) {
                    format!("`{}`", part.replace('`', "``"))
                } else {
                    part.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(".")
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum Literal {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    String(String),
    Null,
}

#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct SelectStatement {
    #[serde(default)]
    pub projection: Vec<Expr>,
    pub tables: Vec<TablesElement>,
    #[serde(default)]
    pub where_clause: Option<Expr>,
}

/// One position of the FROM list.
///
/// The first element normally has no `table_join`. An `ARRAY JOIN` shows up as
/// its own element carrying only `array_join`.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct TablesElement {
    #[serde(default)]
    pub table_expression: Option<TableExpression>,
    #[serde(default)]
    pub table_join: Option<TableJoin>,
    #[serde(default)]
    pub array_join: Option<ArrayJoin>,
}

impl TablesElement {
    pub fn table(table_expression: TableExpression) -> Self {
        Self {
            table_expression: Some(table_expression),
            table_join: None,
            array_join: None,
        }
    }

    pub fn joined(table_expression: TableExpression, table_join: TableJoin) -> Self {
        Self {
            table_expression: Some(table_expression),
            table_join: Some(table_join),
            array_join: None,
        }
    }

    pub fn array_join(array_join: ArrayJoin) -> Self {
        Self {
            table_expression: None,
            table_join: None,
            array_join: Some(array_join),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct TableExpression {
    pub source: TableSource,
    #[serde(default)]
    pub alias: Option<String>,
}

impl TableExpression {
    pub fn named(table: impl Into<String>) -> Self {
        Self {
            source: TableSource::Table {
                database: None,
                table: table.into(),
            },
            alias: None,
        }
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        if let TableSource::Table { database: db, .. } = &mut self.source {
            *db = Some(database.into());
        }
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum TableSource {
    Table {
        #[serde(default)]
        database: Option<String>,
        table: String,
    },
    Subquery(Box<SelectStatement>),
    TableFunction(Function),
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum JoinKind {
    Comma,
    Cross,
    Inner,
    Left,
    Right,
    Full,
}

impl JoinKind {
    pub fn is_cross_or_comma(self) -> bool {
        matches!(self, JoinKind::Comma | JoinKind::Cross)
    }
}

impl fmt::Display for JoinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinKind::Comma => write!(f, "COMMA"),
            JoinKind::Cross => write!(f, "CROSS"),
            JoinKind::Inner => write!(f, "INNER"),
            JoinKind::Left => write!(f, "LEFT"),
            JoinKind::Right => write!(f, "RIGHT"),
            JoinKind::Full => write!(f, "FULL"),
        }
    }
}

/// Kinds that take an ON or USING constraint.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum QualifiedJoinKind {
    Inner,
    Left,
    Right,
    Full,
}

impl From<QualifiedJoinKind> for JoinKind {
    fn from(value: QualifiedJoinKind) -> Self {
        match value {
            QualifiedJoinKind::Inner => JoinKind::Inner,
            QualifiedJoinKind::Left => JoinKind::Left,
            QualifiedJoinKind::Right => JoinKind::Right,
            QualifiedJoinKind::Full => JoinKind::Full,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize, Deserialize)]
pub enum JoinStrictness {
    #[default]
    Unspecified,
    /// Keep every matching row pair.
    All,
    /// Keep one match per left row.
    Any,
    Asof,
    Semi,
    Anti,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum JoinConstraint {
    On(Expr),
    Using(Vec<Identifier>),
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct QualifiedJoin {
    pub kind: QualifiedJoinKind,
    pub strictness: JoinStrictness,
    pub constraint: JoinConstraint,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawTableJoin", into = "RawTableJoin")]
pub enum TableJoin {
    Comma,
    Cross,
    Qualified(QualifiedJoin),
}

impl TableJoin {
    /// Build a join from loosely typed parts, as a parser would hand them over.
    ///
    /// Comma and cross joins must come without children; qualified joins need
    /// exactly one of ON / USING.
    pub fn from_parts(
        kind: JoinKind,
        strictness: JoinStrictness,
        on_expression: Option<Expr>,
        using_list: Option<Vec<Identifier>>,
    ) -> Result<Self, AstError> {
        let qualified_kind = match kind {
            JoinKind::Comma | JoinKind::Cross => {
                let mut children = Vec::new();
                if let Some(on) = &on_expression {
                    children.push(on.to_sql());
                }
                if let Some(using) = &using_list {
                    children.push(format!(
                        "USING ({})",
                        using.iter().map(ToSql::to_sql).collect::<Vec<_>>().join(", ")
                    ));
                }
                if let Some(first) = children.first() {
                    return Err(AstError::ConditionOnCrossJoin {
                        count: children.len(),
                        first: first.clone(),
                    });
                }
                return Ok(if kind == JoinKind::Comma {
                    TableJoin::Comma
                } else {
                    TableJoin::Cross
                });
            }
            JoinKind::Inner => QualifiedJoinKind::Inner,
            JoinKind::Left => QualifiedJoinKind::Left,
            JoinKind::Right => QualifiedJoinKind::Right,
            JoinKind::Full => QualifiedJoinKind::Full,
        };

        let constraint = match (on_expression, using_list) {
            (Some(on), None) => JoinConstraint::On(on),
            (None, Some(using)) => JoinConstraint::Using(using),
            (Some(_), Some(_)) => return Err(AstError::ConflictingJoinConstraint { kind }),
            (None, None) => return Err(AstError::MissingJoinConstraint { kind }),
        };

        Ok(TableJoin::Qualified(QualifiedJoin {
            kind: qualified_kind,
            strictness,
            constraint,
        }))
    }

    pub fn kind(&self) -> JoinKind {
        match self {
            TableJoin::Comma => JoinKind::Comma,
            TableJoin::Cross => JoinKind::Cross,
            TableJoin::Qualified(join) => join.kind.into(),
        }
    }

    pub fn strictness(&self) -> JoinStrictness {
        match self {
            TableJoin::Qualified(join) => join.strictness,
            _ => JoinStrictness::Unspecified,
        }
    }

    pub fn on_expression(&self) -> Option<&Expr> {
        match self {
            TableJoin::Qualified(QualifiedJoin {
                constraint: JoinConstraint::On(expr),
                ..
            }) => Some(expr),
            _ => None,
        }
    }

    pub fn using_list(&self) -> Option<&[Identifier]> {
        match self {
            TableJoin::Qualified(QualifiedJoin {
                constraint: JoinConstraint::Using(list),
                ..
            }) => Some(list),
            _ => None,
        }
    }
}

/// Wire form of [`TableJoin`]: what YAML/JSON fixtures carry.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawTableJoin {
    kind: JoinKind,
    #[serde(default)]
    strictness: JoinStrictness,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    on: Option<Expr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    using: Option<Vec<Identifier>>,
}

impl TryFrom<RawTableJoin> for TableJoin {
    type Error = AstError;

    fn try_from(raw: RawTableJoin) -> Result<Self, Self::Error> {
        TableJoin::from_parts(raw.kind, raw.strictness, raw.on, raw.using)
    }
}

impl From<TableJoin> for RawTableJoin {
    fn from(join: TableJoin) -> Self {
        let kind = join.kind();
        let strictness = join.strictness();
        let (on, using) = match join {
            TableJoin::Comma | TableJoin::Cross => (None, None),
            TableJoin::Qualified(QualifiedJoin { constraint, .. }) => match constraint {
                JoinConstraint::On(expr) => (Some(expr), None),
                JoinConstraint::Using(list) => (None, Some(list)),
            },
        };
        RawTableJoin {
            kind,
            strictness,
            on,
            using,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize, Deserialize)]
pub enum ArrayJoinKind {
    #[default]
    Inner,
    Left,
}

/// `ARRAY JOIN arr [, ...]`. Multiplies rows; not a join between two tables.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ArrayJoin {
    #[serde(default)]
    pub kind: ArrayJoinKind,
    pub expressions: Vec<Expr>,
}
