//! Field filters, ordering, and limits over JSON records.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOp {
    Eq,
    Ne,
    /// Substring for strings, membership for arrays.
    Contains,
}

/// A single predicate on a (possibly dotted) field path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub field: String,
    pub op: FilterOp,
    pub value: Value,
}

impl Filter {
    pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self { field: field.into(), op: FilterOp::Eq, value: value.into() }
    }

    pub fn not_equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self { field: field.into(), op: FilterOp::Ne, value: value.into() }
    }

    pub fn contains(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self { field: field.into(), op: FilterOp::Contains, value: value.into() }
    }

    pub fn matches(&self, record: &Value) -> bool {
        let field = lookup(record, &self.field);
        match self.op {
            FilterOp::Eq => field == Some(&self.value),
            FilterOp::Ne => field != Some(&self.value),
            FilterOp::Contains => match (field, &self.value) {
                (Some(Value::String(haystack)), Value::String(needle)) => haystack.contains(needle.as_str()),
                (Some(Value::Array(items)), needle) => items.contains(needle),
                _ => false,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    pub field: String,
    #[serde(default)]
    pub direction: Direction,
}

/// Filters (all must match), optional ordering, optional limit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Query {
    #[serde(default)]
    pub filters: Vec<Filter>,
    #[serde(default)]
    pub order_by: Option<OrderBy>,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order_by = Some(OrderBy { field: field.into(), direction });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, record: &Value) -> bool {
        matches_all(&self.filters, record)
    }

    /// Filter, order (stable), and truncate `records`.
    pub fn apply<'a, I>(&self, records: I) -> Vec<Value>
    where
        I: IntoIterator<Item = &'a Value>,
    {
        let mut out: Vec<Value> = records
            .into_iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect();

        if let Some(order) = &self.order_by {
            out.sort_by(|a, b| {
                let ord = compare_fields(lookup(a, &order.field), lookup(b, &order.field));
                match order.direction {
                    Direction::Asc => ord,
                    Direction::Desc => ord.reverse(),
                }
            });
        }
        if let Some(limit) = self.limit {
            out.truncate(limit);
        }
        out
    }
}

pub fn matches_all(filters: &[Filter], record: &Value) -> bool {
    filters.iter().all(|f| f.matches(record))
}

/// Resolve `a.b.c` inside nested objects.
pub fn lookup<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(record, |current, key| current.get(key))
}

/// Missing < null < bool < number < string; arrays/objects compare equal.
fn compare_fields(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    fn rank(v: Option<&Value>) -> u8 {
        match v {
            None => 0,
            Some(Value::Null) => 1,
            Some(Value::Bool(_)) => 2,
            Some(Value::Number(_)) => 3,
            Some(Value::String(_)) => 4,
            Some(_) => 5,
        }
    }

    match (a, b) {
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn records() -> Vec<Value> {
        vec![
            json!({"id": "1", "type": "lesson", "title": "Plants", "settings": {"score": 80}, "tags": ["science"]}),
            json!({"id": "2", "type": "assessment", "title": "Counting", "settings": {"score": 60}}),
            json!({"id": "3", "type": "assessment", "title": "Animals", "settings": {"score": 90}, "tags": ["science", "quiz"]}),
            json!({"id": "4", "type": "game", "title": "Bingo"}),
        ]
    }

    fn ids(values: &[Value]) -> Vec<&str> {
        values.iter().map(|v| v["id"].as_str().unwrap()).collect()
    }

    #[test]
    fn eq_and_ne() {
        let data = records();
        let q = Query::new().filter(Filter::equals("type", "assessment"));
        assert_eq!(ids(&q.apply(&data)), vec!["2", "3"]);
        let q = Query::new().filter(Filter::not_equals("type", "assessment"));
        assert_eq!(ids(&q.apply(&data)), vec!["1", "4"]);
    }

    #[test]
    fn contains_on_strings_and_arrays() {
        let data = records();
        let q = Query::new().filter(Filter::contains("title", "ing"));
        assert_eq!(ids(&q.apply(&data)), vec!["2", "4"]);
        let q = Query::new().filter(Filter::contains("tags", "quiz"));
        assert_eq!(ids(&q.apply(&data)), vec!["3"]);
    }

    #[test]
    fn dotted_paths() {
        let data = records();
        let q = Query::new().filter(Filter::equals("settings.score", 60));
        assert_eq!(ids(&q.apply(&data)), vec!["2"]);
        assert!(lookup(&data[3], "settings.score").is_none());
    }

    #[test]
    fn numeric_ordering_with_missing_first() {
        let data = records();
        let q = Query::new().order_by("settings.score", Direction::Asc);
        assert_eq!(ids(&q.apply(&data)), vec!["4", "2", "1", "3"]);
        let q = Query::new().order_by("settings.score", Direction::Desc).limit(2);
        assert_eq!(ids(&q.apply(&data)), vec!["3", "1"]);
    }

    #[test]
    fn string_ordering() {
        let data = records();
        let q = Query::new().order_by("title", Direction::Asc);
        assert_eq!(ids(&q.apply(&data)), vec!["3", "4", "2", "1"]);
    }

    #[test]
    fn empty_query_keeps_insertion_order() {
        let data = records();
        assert_eq!(ids(&Query::new().apply(&data)), vec!["1", "2", "3", "4"]);
    }
}
