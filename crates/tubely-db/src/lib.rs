//! Tubely database layer
//!
//! Repositories over a SQLite pool plus the embedded schema migrations.

pub mod db;

pub use db::VideoRepository;

/// Schema migrations from the workspace `migrations/` directory, embedded at compile time.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");
