pub mod file;
pub mod file_update;
pub mod filter;
