//! Visual query model
//!
//! A visual query is the structured description the query builder canvas
//! produces: tables, joins, filters and ordering picked by the user. It is
//! converted to a single SQL string before analysis.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Statement used when the canvas is empty
pub const EMPTY_QUERY_SQL: &str = "SELECT * FROM users LIMIT 10";

/// Sort direction of an ORDER BY entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderDirection {
    #[default]
    #[serde(rename = "ASC", alias = "asc")]
    Asc,
    #[serde(rename = "DESC", alias = "desc")]
    Desc,
}

impl OrderDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

fn default_join_type() -> String {
    "INNER".to_string()
}

fn default_operator() -> String {
    "=".to_string()
}

fn default_value() -> Value {
    Value::String(String::new())
}

/// A join drawn between two tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualJoin {
    /// Join keyword prefix, e.g. `INNER`, `LEFT`
    #[serde(rename = "type", default = "default_join_type")]
    pub join_type: String,
    #[serde(default)]
    pub table: String,
    /// Raw ON condition
    #[serde(default)]
    pub condition: String,
}

impl VisualJoin {
    pub fn new(
        join_type: impl Into<String>,
        table: impl Into<String>,
        condition: impl Into<String>,
    ) -> Self {
        Self {
            join_type: join_type.into(),
            table: table.into(),
            condition: condition.into(),
        }
    }
}

/// A single `column operator value` filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualCondition {
    #[serde(default)]
    pub column: String,
    #[serde(default = "default_operator")]
    pub operator: String,
    #[serde(default = "default_value")]
    pub value: Value,
}

impl VisualCondition {
    pub fn new(column: impl Into<String>, operator: impl Into<String>, value: Value) -> Self {
        Self {
            column: column.into(),
            operator: operator.into(),
            value,
        }
    }

    fn to_sql(&self) -> String {
        format!("{} {} {}", self.column, self.operator, sql_literal(&self.value))
    }
}

/// An ORDER BY entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualOrder {
    #[serde(default)]
    pub column: String,
    #[serde(default)]
    pub direction: OrderDirection,
}

impl VisualOrder {
    pub fn new(column: impl Into<String>, direction: OrderDirection) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }
}

/// Structured query description produced by the builder canvas
///
/// Every field is optional. A field that is present counts as placed on the
/// canvas even when it holds an empty list, so `{"tables": []}` still builds
/// a `SELECT *` statement instead of the empty-canvas default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VisualQuery {
    /// Selected tables; only the first one becomes the FROM target
    pub tables: Option<Vec<String>>,
    /// Projected columns; `None` or empty selects `*`
    pub columns: Option<Vec<String>>,
    pub joins: Option<Vec<VisualJoin>>,
    #[serde(rename = "where")]
    pub conditions: Option<Vec<VisualCondition>>,
    pub group_by: Option<Vec<String>>,
    pub order_by: Option<Vec<VisualOrder>>,
    pub limit: Option<u64>,
}

impl VisualQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a visual query from its JSON form
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.tables.get_or_insert_with(Vec::new).push(table.into());
        self
    }

    pub fn with_columns(mut self, columns: Vec<String>) -> Self {
        self.columns = Some(columns);
        self
    }

    pub fn with_join(mut self, join: VisualJoin) -> Self {
        self.joins.get_or_insert_with(Vec::new).push(join);
        self
    }

    pub fn with_condition(mut self, condition: VisualCondition) -> Self {
        self.conditions.get_or_insert_with(Vec::new).push(condition);
        self
    }

    pub fn with_group_by(mut self, column: impl Into<String>) -> Self {
        self.group_by.get_or_insert_with(Vec::new).push(column.into());
        self
    }

    pub fn with_order_by(mut self, order: VisualOrder) -> Self {
        self.order_by.get_or_insert_with(Vec::new).push(order);
        self
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns true if no field has been set at all
    pub fn is_empty(&self) -> bool {
        self.tables.is_none()
            && self.columns.is_none()
            && self.joins.is_none()
            && self.conditions.is_none()
            && self.group_by.is_none()
            && self.order_by.is_none()
            && self.limit.is_none()
    }

    /// Renders the query as a single-line SQL statement
    pub fn to_sql(&self) -> String {
        if self.is_empty() {
            return EMPTY_QUERY_SQL.to_string();
        }

        let mut parts = Vec::new();

        match self.columns.as_deref() {
            Some(columns) if !columns.is_empty() => {
                parts.push(format!("SELECT {}", columns.join(", ")))
            }
            _ => parts.push("SELECT *".to_string()),
        }

        if let Some(table) = self.tables.as_deref().and_then(|tables| tables.first()) {
            parts.push(format!("FROM {}", table));
        }

        for join in self.joins.as_deref().unwrap_or_default() {
            parts.push(format!(
                "{} JOIN {} ON {}",
                join.join_type, join.table, join.condition
            ));
        }

        let conditions = self.conditions.as_deref().unwrap_or_default();
        if !conditions.is_empty() {
            let conditions: Vec<_> = conditions.iter().map(|c| c.to_sql()).collect();
            parts.push(format!("WHERE {}", conditions.join(" AND ")));
        }

        let group_by = self.group_by.as_deref().unwrap_or_default();
        if !group_by.is_empty() {
            parts.push(format!("GROUP BY {}", group_by.join(", ")));
        }

        let order_by = self.order_by.as_deref().unwrap_or_default();
        if !order_by.is_empty() {
            let orders: Vec<_> = order_by
                .iter()
                .map(|o| format!("{} {}", o.column, o.direction.as_str()))
                .collect();
            parts.push(format!("ORDER BY {}", orders.join(", ")));
        }

        if let Some(limit) = self.limit.filter(|&l| l > 0) {
            parts.push(format!("LIMIT {}", limit));
        }

        let sql = parts.join(" ");
        tracing::debug!(sql = %sql, "Built SQL from visual query");
        sql
    }
}

/// Renders a JSON value as a SQL literal
fn sql_literal(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(true) => "TRUE".to_string(),
        Value::Bool(false) => "FALSE".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote(s),
        Value::Array(items) => {
            let items: Vec<_> = items.iter().map(sql_literal).collect();
            format!("({})", items.join(", "))
        }
        Value::Object(_) => quote(&value.to_string()),
    }
}

fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}
