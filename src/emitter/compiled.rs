use serde::Serialize;

use crate::plan::Value;

/// A value bound to a `{name:Type}` placeholder
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundParam {
    pub name: String,
    #[serde(rename = "type")]
    pub clickhouse_type: &'static str,
    pub value: Value,
}

impl BoundParam {
    /// Name and value as sent to the ClickHouse HTTP interface (`param_<name>=<value>`)
    pub fn http_pair(&self) -> (String, String) {
        (format!("param_{}", self.name), self.value.to_string())
    }
}

/// The final SQL statement handed to the execution layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledQuery {
    sql: String,
    params: Vec<BoundParam>,
    columns: Vec<String>,
    uses_subquery: bool,
}

impl CompiledQuery {
    pub(crate) fn new(sql: String, params: Vec<BoundParam>, columns: Vec<String>, uses_subquery: bool) -> Self {
        Self {
            sql,
            params,
            columns,
            uses_subquery,
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Bound values, in placeholder order; empty for inline emission
    pub fn params(&self) -> &[BoundParam] {
        &self.params
    }

    /// Names of the returned columns
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// True when the `FROM` clause nests a SELECT
    pub fn uses_subquery(&self) -> bool {
        self.uses_subquery
    }

    pub fn into_sql(self) -> String {
        self.sql
    }
}
