//! Storage infrastructure: the preferences document on disk.
//!
//! - `config` resolves where the document lives (platform directory or an
//!   explicit override).
//! - `file_repository` implements `SnapshotRepository` on top of that path
//!   with an atomic write-then-rename save.

pub mod config;
pub mod file_repository;

pub use config::{ConfigError, StorageConfig};
pub use file_repository::FileSnapshotRepository;
