use serde::{Deserialize, Serialize};

use crate::error::StoreError;

pub const DEFAULT_DATABASE: &str = "main";
pub const DEFAULT_COLLECTION: &str = "files";

/// Where a `FileStore` keeps its documents.
///
/// `database` is a SQLite schema name: `main`, `temp`, or the alias of an
/// attached database. `collection` is the table inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub database: String,
    pub collection: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database: DEFAULT_DATABASE.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
        }
    }
}

impl StoreConfig {
    pub fn new(database: &str, collection: &str) -> Self {
        Self {
            database: database.to_string(),
            collection: collection.to_string(),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, StoreError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        validate_identifier("database", &self.database)?;
        validate_identifier("collection", &self.collection)?;
        Ok(())
    }

    /// Quoted `"database"."collection"` for use in SQL. Only valid after
    /// `validate` has passed.
    pub(crate) fn qualified_collection(&self) -> String {
        format!("\"{}\".\"{}\"", self.database, self.collection)
    }
}

fn validate_identifier(label: &str, value: &str) -> Result<(), StoreError> {
    let first = value
        .chars()
        .next()
        .ok_or_else(|| StoreError::InvalidConfig(format!("{label} name is empty")))?;

    if first.is_ascii_digit() {
        return Err(StoreError::InvalidConfig(format!(
            "{label} name must not start with a digit: {value}"
        )));
    }
    if !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(StoreError::InvalidConfig(format!(
            "{label} name may only contain letters, digits and '_': {value}"
        )));
    }
    Ok(())
}
