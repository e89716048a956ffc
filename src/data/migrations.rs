use rusqlite::Connection;

use crate::config::StoreConfig;
use crate::error::StoreError;

/// Creates the collection table if it does not exist yet. `seq` keeps
/// insertion order; `id` mirrors the document's `_id` for uniqueness.
pub fn ensure_collection(conn: &Connection, config: &StoreConfig) -> Result<(), StoreError> {
    config.validate()?;
    conn.execute_batch(&format!(
        "CREATE TABLE IF NOT EXISTS {} (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            id TEXT UNIQUE NOT NULL,
            doc TEXT NOT NULL
        );",
        config.qualified_collection()
    ))?;
    Ok(())
}
