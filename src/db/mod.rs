//! Database module: models and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: `WheelStorage`, the only place SQL is issued

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{DbUser, NameEntry, WheelConfigRow};
pub use schema::SQLITE_INIT;
pub use sqlite::{SqlitePool, WheelStorage};
