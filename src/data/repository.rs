use rusqlite::{params, params_from_iter, types::Value as SqlValue, Connection, OptionalExtension};

use crate::config::StoreConfig;
use crate::data::migrations::ensure_collection;
use crate::error::StoreError;
use crate::models::file::File;
use crate::models::file_update::{FieldChange, FileUpdate};
use crate::models::filter::{json_path, Filter};

/// Persistence for `File` documents in one collection. Borrows the
/// caller's connection and never opens, closes or locks it.
pub struct FileStore<'conn> {
    conn: &'conn Connection,
    config: StoreConfig,
    table: String,
}

impl<'conn> FileStore<'conn> {
    pub fn new(conn: &'conn Connection, config: StoreConfig) -> Result<Self, StoreError> {
        ensure_collection(conn, &config)?;
        let table = config.qualified_collection();
        Ok(Self {
            conn,
            config,
            table,
        })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn insert(&self, mut file: File) -> Result<File, StoreError> {
        if file.id.is_nil() {
            file.id = uuid::Uuid::new_v4();
        }
        let doc = serde_json::to_string(&file)?;

        self.conn.execute(
            &format!("INSERT INTO {} (id, doc) VALUES (?1, ?2)", self.table),
            params![file.id.to_string(), doc],
        )?;

        tracing::debug!(collection = %self.config.collection, id = %file.id, "inserted file");
        Ok(file)
    }

    /// Applies `update` to the first document matching `filter` and returns
    /// the document as stored afterwards.
    pub fn update(&self, update: &FileUpdate, filter: &Filter) -> Result<File, StoreError> {
        let changes = update.changes();
        if changes.is_empty() {
            return Err(StoreError::InvalidUpdate(
                "no fields selected for update".to_string(),
            ));
        }

        let mut removed = Vec::new();
        let mut assignments = Vec::new();
        let mut params: Vec<SqlValue> = Vec::new();
        for (key, change) in changes {
            let path = json_path(key).map_err(StoreError::InvalidUpdate)?;
            match change {
                FieldChange::Unset => removed.push(format!("'{path}'")),
                FieldChange::Set(value) => {
                    assignments.push(format!("'{path}', json(?)"));
                    params.push(SqlValue::Text(serde_json::to_string(&value)?));
                }
            }
        }

        let mut doc_expr = "doc".to_string();
        if !removed.is_empty() {
            doc_expr = format!("json_remove({doc_expr}, {})", removed.join(", "));
        }
        if !assignments.is_empty() {
            doc_expr = format!("json_set({doc_expr}, {})", assignments.join(", "));
        }

        let (predicate, filter_params) = filter.to_sql()?;
        params.extend(filter_params);

        let sql = format!(
            "UPDATE {table} SET doc = {doc_expr}
             WHERE seq = (SELECT seq FROM {table} WHERE {predicate} LIMIT 1)
             RETURNING doc",
            table = self.table,
        );
        let doc: Option<String> = self
            .conn
            .query_row(&sql, params_from_iter(params.iter()), |row| row.get(0))
            .optional()?;

        let doc = doc.ok_or_else(|| {
            StoreError::NotFound(format!(
                "no document in {} matches the update filter",
                self.config.collection
            ))
        })?;
        let file = self.decode(&doc)?;

        tracing::debug!(collection = %self.config.collection, id = %file.id, "updated file");
        Ok(file)
    }

    pub fn find_one(&self, filter: &Filter) -> Result<File, StoreError> {
        let (predicate, params) = filter.to_sql()?;
        let doc: Option<String> = self
            .conn
            .query_row(
                &format!("SELECT doc FROM {} WHERE {predicate} LIMIT 1", self.table),
                params_from_iter(params.iter()),
                |row| row.get(0),
            )
            .optional()?;

        let doc = doc.ok_or_else(|| {
            StoreError::NotFound(format!(
                "could not find file in {} with supplied filter",
                self.config.collection
            ))
        })?;
        self.decode(&doc)
    }

    /// Every matching document in the order the table yields them. One
    /// undecodable document fails the whole call.
    pub fn find_all(&self, filter: &Filter) -> Result<Vec<File>, StoreError> {
        let (predicate, params) = filter.to_sql()?;
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT doc FROM {} WHERE {predicate}", self.table))?;

        let docs = stmt
            .query_map(params_from_iter(params.iter()), |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        let files = docs
            .iter()
            .map(|doc| self.decode(doc))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(collection = %self.config.collection, count = files.len(), "found files");
        Ok(files)
    }

    fn decode(&self, doc: &str) -> Result<File, StoreError> {
        serde_json::from_str(doc).map_err(|e| {
            tracing::warn!(collection = %self.config.collection, "undecodable document: {e}");
            StoreError::Decode(e.to_string())
        })
    }
}
