use rusqlite::types::Value as SqlValue;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::StoreError;

/// Equality match on top-level document keys. All pairs must match; an
/// empty filter matches every document.
///
/// Matching is literal against the stored document, so a key omitted
/// because it held a zero value only matches `null`. Booleans and numbers
/// also match on JSON type: `1` never matches `true`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Filter(Map<String, Value>);

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by_id(id: Uuid) -> Self {
        Self::new().eq("_id", id.to_string())
    }

    pub fn eq(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// SQL boolean expression over the `doc` column plus its bound values.
    pub(crate) fn to_sql(&self) -> Result<(String, Vec<SqlValue>), StoreError> {
        let mut clauses = Vec::with_capacity(self.0.len());
        let mut params = Vec::with_capacity(self.0.len());

        for (key, value) in &self.0 {
            let path = json_path(key).map_err(StoreError::InvalidFilter)?;
            let target = format!("json_extract(doc, '{path}')");
            let kind = format!("json_type(doc, '{path}')");
            match value {
                Value::Null => clauses.push(format!("{target} IS NULL")),
                Value::Bool(b) => clauses.push(format!("{kind} = '{b}'")),
                Value::Number(n) => {
                    clauses.push(format!("{kind} IN ('integer', 'real') AND {target} = ?"));
                    if let Some(i) = n.as_i64() {
                        params.push(SqlValue::Integer(i));
                    } else if let Some(f) = n.as_f64() {
                        params.push(SqlValue::Real(f));
                    } else {
                        return Err(StoreError::InvalidFilter(format!(
                            "number out of range for key {key}: {n}"
                        )));
                    }
                }
                Value::String(s) => {
                    clauses.push(format!("{target} = ?"));
                    params.push(SqlValue::Text(s.clone()));
                }
                Value::Array(_) | Value::Object(_) => {
                    return Err(StoreError::InvalidFilter(format!(
                        "only scalar values can be matched, got {value} for key {key}"
                    )));
                }
            }
        }

        if clauses.is_empty() {
            return Ok(("1".to_string(), params));
        }
        Ok((clauses.join(" AND "), params))
    }
}

impl From<Map<String, Value>> for Filter {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// JSON path addressing a single top-level key. Dots stay literal.
pub(crate) fn json_path(key: &str) -> Result<String, String> {
    if key.is_empty() {
        return Err("empty key".to_string());
    }
    if key.contains('"') || key.contains('\'') {
        return Err(format!("quotes are not allowed in keys: {key}"));
    }
    // Quoted path labels are taken verbatim, so an escape could never match.
    if key.contains('\\') {
        return Err(format!("backslashes are not allowed in keys: {key}"));
    }
    Ok(format!("$.\"{key}\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_filter_matches_everything() {
        let (sql, params) = Filter::new().to_sql().unwrap();
        assert_eq!(sql, "1");
        assert!(params.is_empty());
    }

    #[test]
    fn pairs_are_joined_with_and() {
        let filter = Filter::new().eq("owner", "alice").eq("isFolder", true);
        let (sql, params) = filter.to_sql().unwrap();
        assert_eq!(
            sql,
            "json_type(doc, '$.\"isFolder\"') = 'true' AND json_extract(doc, '$.\"owner\"') = ?"
        );
        assert_eq!(params, vec![SqlValue::Text("alice".to_string())]);
    }

    #[test]
    fn numbers_are_matched_by_json_type() {
        let (sql, params) = Filter::new().eq("size", 1).to_sql().unwrap();
        assert_eq!(
            sql,
            "json_type(doc, '$.\"size\"') IN ('integer', 'real') AND json_extract(doc, '$.\"size\"') = ?"
        );
        assert_eq!(params, vec![SqlValue::Integer(1)]);
    }

    #[test]
    fn null_matches_missing_keys() {
        let (sql, params) = Filter::new().eq("path", Value::Null).to_sql().unwrap();
        assert_eq!(sql, "json_extract(doc, '$.\"path\"') IS NULL");
        assert!(params.is_empty());
    }

    #[test]
    fn by_id_matches_hyphenated_uuid() {
        let id = Uuid::new_v4();
        let (_, params) = Filter::by_id(id).to_sql().unwrap();
        assert_eq!(params, vec![SqlValue::Text(id.to_string())]);
    }

    #[test]
    fn rejects_operators_and_bad_keys() {
        let nested = Filter::new().eq("name", json!({ "$ne": "x" }));
        assert!(matches!(nested.to_sql(), Err(StoreError::InvalidFilter(_))));

        let quoted = Filter::new().eq("na\"me", "x");
        assert!(matches!(quoted.to_sql(), Err(StoreError::InvalidFilter(_))));

        let escaped = Filter::new().eq("a\\b", "v");
        assert!(matches!(escaped.to_sql(), Err(StoreError::InvalidFilter(_))));

        let empty_key = Filter::new().eq("", "x");
        assert!(matches!(empty_key.to_sql(), Err(StoreError::InvalidFilter(_))));
    }

    #[test]
    fn builds_from_json_map() {
        let map = json!({ "owner": "alice" }).as_object().cloned().unwrap();
        let filter = Filter::from(map);
        assert_eq!(filter, Filter::new().eq("owner", "alice"));
    }
}
