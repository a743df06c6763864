use serde_json::Value;

use super::filter::SchoolFilter;
use super::types::{FilterOp, FilterTable, FilterWhereInfo};

/// Builds the conjunctive review-row condition for [`SchoolFilter`]
pub struct FilterWhere {
    param_values: Vec<Value>,
    param_index: usize,
    conditions: Vec<FilterWhereInfo>,
}

impl FilterWhere {
    fn new() -> Self {
        Self {
            param_values: vec![],
            param_index: 0,
            conditions: vec![],
        }
    }

    /// Returns the `AND`-joined condition and its positional parameters
    pub fn generate(filter: &SchoolFilter) -> (String, Vec<Value>) {
        let mut filter_where = Self::new();
        filter_where.collect(filter);
        filter_where.build()
    }

    fn collect(&mut self, filter: &SchoolFilter) {
        if let Some(name) = filter.school_name_term() {
            self.conditions.push(FilterWhereInfo {
                table: FilterTable::School,
                column: "school_name",
                operator: FilterOp::ILike,
                data: Value::String(name.to_string()),
            });
        }
        if let Some(coach) = filter.coach_term() {
            self.conditions.push(FilterWhereInfo {
                table: FilterTable::Review,
                column: "head_coach_name",
                operator: FilterOp::ILike,
                data: Value::String(coach.to_string()),
            });
        }
        for (category, threshold) in filter.thresholds() {
            self.conditions.push(FilterWhereInfo {
                table: FilterTable::Review,
                column: category.column(),
                operator: FilterOp::Gte,
                data: Value::from(threshold),
            });
        }
    }

    fn build(&mut self) -> (String, Vec<Value>) {
        let conditions = std::mem::take(&mut self.conditions);
        let sql_conditions: Vec<String> = conditions
            .iter()
            .map(|condition| self.build_sql_condition(condition))
            .collect();
        let where_clause = if sql_conditions.is_empty() { "1=1".to_string() } else { sql_conditions.join(" AND ") };
        (where_clause, std::mem::take(&mut self.param_values))
    }

    fn build_sql_condition(&mut self, condition: &FilterWhereInfo) -> String {
        let quoted_column = format!("{}.\"{}\"", condition.table.alias(), condition.column);
        match condition.operator {
            FilterOp::ILike => {
                let term = condition.data.as_str().unwrap_or_default();
                let pattern = format!("%{}%", escape_like(term));
                format!("{} ILIKE {}", quoted_column, self.param(Value::String(pattern)))
            }
            FilterOp::Gte => format!("{} >= {}", quoted_column, self.param(condition.data.clone())),
        }
    }

    fn param(&mut self, value: Value) -> String {
        self.param_values.push(value);
        self.param_index += 1;
        format!("${}", self.param_index)
    }
}

/// Escape LIKE wildcards so user text only matches literally
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
