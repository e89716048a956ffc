//! File and folder documents kept in a SQLite-backed collection.
//!
//! The caller owns the `rusqlite::Connection`; a [`FileStore`] borrows it and
//! runs one statement per operation against the configured collection.

pub mod config;
pub mod data;
pub mod error;
pub mod models;

pub use config::StoreConfig;
pub use data::repository::FileStore;
pub use error::{ErrorKind, StoreError};
pub use models::file::File;
pub use models::file_update::{FieldChange, FileUpdate};
pub use models::filter::Filter;
