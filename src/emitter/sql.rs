//! SQL emitter
//!
//! Renders a Statement as a single-line ClickHouse SQL string.

use crate::plan::{
    ArrayJoin, Expr, Field, JoinCondition, OrderBy, Predicate, SelectItem, Source, Statement,
    Value,
};
use super::compiled::{BoundParam, CompiledQuery};
use super::error::EmitError;

/// How filter values are written into the statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmitMode {
    /// Literals in the text; strings single-quoted as-is
    #[default]
    Inline,
    /// `{pN:Type}` placeholders with the values returned separately
    Bound,
}

/// Emit a statement as SQL text.
///
/// Statements are rendered left to right, so bound placeholders are
/// numbered in the order they appear in the text.
pub fn emit_sql(statement: &Statement, mode: EmitMode) -> Result<CompiledQuery, EmitError> {
    let mut emitter = Emitter {
        mode,
        params: Vec::new(),
    };
    let sql = emitter.statement(statement)?;
    Ok(CompiledQuery::new(
        sql,
        emitter.params,
        statement.output_names(),
        statement.has_subquery(),
    ))
}

struct Emitter {
    mode: EmitMode,
    params: Vec<BoundParam>,
}

impl Emitter {
    fn statement(&mut self, stmt: &Statement) -> Result<String, EmitError> {
        if stmt.select.is_empty() {
            return Err(EmitError::EmptySelect);
        }

        let items: Vec<String> = stmt.select.iter().map(emit_select_item).collect();
        let mut sql = format!("SELECT {} FROM {}", items.join(", "), self.source(&stmt.from)?);

        if let Some(ArrayJoin { column, alias }) = &stmt.array_join {
            sql.push_str(&format!(" ARRAY JOIN {} AS {}", column, alias));
        }

        if !stmt.filter.is_empty() {
            let parts: Vec<String> = stmt.filter.iter().map(|p| self.predicate(p)).collect();
            sql.push_str(&format!(" WHERE ({})", parts.join(" AND ")));
        }

        if !stmt.group_by.is_empty() {
            sql.push_str(&format!(" GROUP BY {}", stmt.group_by.join(", ")));
        }

        if let Some(OrderBy { column, direction }) = &stmt.order_by {
            sql.push_str(&format!(" ORDER BY {} {}", column, direction.as_str()));
        }

        if let Some(limit) = stmt.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        Ok(sql)
    }

    fn source(&mut self, source: &Source) -> Result<String, EmitError> {
        match source {
            Source::Table { name, alias: None } => Ok(name.clone()),
            Source::Table { name, alias: Some(alias) } => Ok(format!("{} AS {}", name, alias)),
            Source::Subquery { statement, alias } => {
                Ok(format!("({}) AS {}", self.statement(statement)?, alias))
            }
            Source::Join { left, right, on } => {
                if on.is_empty() {
                    return Err(EmitError::EmptyJoinCondition);
                }
                let left = self.source(left)?;
                let right = self.source(right)?;
                let conds: Vec<String> = on.iter().map(emit_join_condition).collect();
                Ok(format!("{} JOIN {} ON {}", left, right, conds.join(" AND ")))
            }
        }
    }

    fn predicate(&mut self, predicate: &Predicate) -> String {
        match predicate {
            Predicate::Compare { field, op, value } => {
                format!("{} {} {}", filter_operand(*field), op.as_str(), self.value(value))
            }
            Predicate::Contains { field, value } => {
                format!("has({}, {})", field.name(), self.value(value))
            }
            Predicate::TimeWindow { column, low, high } => format!(
                "toUnixTimestamp({}) BETWEEN {} AND {}",
                column.qualified_name(),
                self.value(low),
                self.value(high),
            ),
        }
    }

    fn value(&mut self, value: &Value) -> String {
        match self.mode {
            // values are inserted verbatim; the validators' grammars exclude quotes
            EmitMode::Inline => match value {
                Value::Str(s) => format!("'{}'", s),
                other => other.to_string(),
            },
            EmitMode::Bound => {
                let name = format!("p{}", self.params.len());
                let placeholder = format!("{{{}:{}}}", name, value.clickhouse_type());
                self.params.push(BoundParam {
                    name,
                    clickhouse_type: value.clickhouse_type(),
                    value: value.clone(),
                });
                placeholder
            }
        }
    }
}

/// Left-hand side of a comparison; timestamps compare as epoch seconds
fn filter_operand(field: Field) -> String {
    if field.is_timestamp() {
        format!("toUnixTimestamp({})", field.name())
    } else {
        field.name().to_string()
    }
}

fn emit_select_item(item: &SelectItem) -> String {
    match item {
        SelectItem::Wildcard => "*".to_string(),
        SelectItem::Expr(expr) => emit_expr(expr),
        SelectItem::Aliased { expr, alias } => format!("{} AS {}", emit_expr(expr), alias),
    }
}

fn emit_expr(expr: &Expr) -> String {
    match expr {
        Expr::Column(col) => col.qualified_name(),
        Expr::Call { func, args } => {
            let args: Vec<String> = args.iter().map(emit_expr).collect();
            format!("{}({})", func, args.join(", "))
        }
        Expr::Aggregate { func, arg: Some(col) } => format!("{}({})", func, col.qualified_name()),
        Expr::Aggregate { func, arg: None } => format!("{}()", func),
    }
}

fn emit_join_condition(cond: &JoinCondition) -> String {
    format!("{} = {}", cond.left.qualified_name(), cond.right.qualified_name())
}
