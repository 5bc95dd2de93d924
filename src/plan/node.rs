//! Statement structure

use crate::query::SortDirection;
use super::expr::{Column, Expr, Predicate};

/// One SELECT statement
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub select: Vec<SelectItem>,
    pub from: Source,
    pub array_join: Option<ArrayJoin>,
    /// Conjunction of predicates; no `WHERE` when empty
    pub filter: Vec<Predicate>,
    pub group_by: Vec<String>,
    pub order_by: Option<OrderBy>,
    pub limit: Option<u64>,
}

impl Statement {
    pub fn new(select: Vec<SelectItem>, from: Source) -> Self {
        Self {
            select,
            from,
            array_join: None,
            filter: Vec::new(),
            group_by: Vec::new(),
            order_by: None,
            limit: None,
        }
    }

    /// True when the source tree contains a nested SELECT
    pub fn has_subquery(&self) -> bool {
        self.from.has_subquery()
    }

    /// Names of the columns the statement returns
    pub fn output_names(&self) -> Vec<String> {
        self.select.iter().map(SelectItem::output_name).collect()
    }
}

/// An entry in the select list
#[derive(Debug, Clone, PartialEq)]
pub enum SelectItem {
    /// `*`
    Wildcard,
    Expr(Expr),
    /// `<expr> AS <alias>`
    Aliased { expr: Expr, alias: String },
}

impl SelectItem {
    pub fn column(name: impl Into<String>) -> Self {
        SelectItem::Expr(Expr::column(name))
    }

    pub fn aliased(expr: Expr, alias: impl Into<String>) -> Self {
        SelectItem::Aliased {
            expr,
            alias: alias.into(),
        }
    }

    /// Name ClickHouse gives the result column
    pub fn output_name(&self) -> String {
        match self {
            SelectItem::Wildcard => "*".to_string(),
            SelectItem::Aliased { alias, .. } => alias.clone(),
            SelectItem::Expr(Expr::Column(col)) => col.name.clone(),
            SelectItem::Expr(Expr::Aggregate { func, arg }) => match arg {
                Some(col) => format!("{}({})", func, col.qualified_name()),
                None => format!("{}()", func),
            },
            SelectItem::Expr(Expr::Call { func, args }) => {
                let args: Vec<String> = args
                    .iter()
                    .map(|a| SelectItem::Expr(a.clone()).output_name())
                    .collect();
                format!("{}({})", func, args.join(", "))
            }
        }
    }
}

/// A relation in the `FROM` clause
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    Table {
        name: String,
        alias: Option<String>,
    },
    Subquery {
        statement: Box<Statement>,
        alias: String,
    },
    Join {
        left: Box<Source>,
        right: Box<Source>,
        on: Vec<JoinCondition>,
    },
}

impl Source {
    pub fn table(name: impl Into<String>) -> Self {
        Source::Table {
            name: name.into(),
            alias: None,
        }
    }

    pub fn aliased_table(name: impl Into<String>, alias: impl Into<String>) -> Self {
        Source::Table {
            name: name.into(),
            alias: Some(alias.into()),
        }
    }

    pub fn subquery(statement: Statement, alias: impl Into<String>) -> Self {
        Source::Subquery {
            statement: Box::new(statement),
            alias: alias.into(),
        }
    }

    /// Inner join `self` with `right`
    pub fn join(self, right: Source, on: Vec<JoinCondition>) -> Self {
        Source::Join {
            left: Box::new(self),
            right: Box::new(right),
            on,
        }
    }

    fn has_subquery(&self) -> bool {
        match self {
            Source::Table { .. } => false,
            Source::Subquery { .. } => true,
            Source::Join { left, right, .. } => left.has_subquery() || right.has_subquery(),
        }
    }
}

/// `<left> = <right>` in a join's ON clause
#[derive(Debug, Clone, PartialEq)]
pub struct JoinCondition {
    pub left: Column,
    pub right: Column,
}

impl JoinCondition {
    pub fn new(left: Column, right: Column) -> Self {
        Self { left, right }
    }
}

/// `ARRAY JOIN <column> AS <alias>`: one output row per array element
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayJoin {
    pub column: String,
    pub alias: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub column: String,
    pub direction: SortDirection,
}
