//! SQL DDL for initializing the wheel storage.

/// SQLite schema with:
/// - `users`: admin credentials, `username` UNIQUE, argon2 PHC string in `password_hash`
/// - `names`: wheel entries; duplicates are allowed at this layer
/// - `wheel_config`: singleton-by-convention row holding the pending locked result
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS names (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
);

-- Import checks existence by exact name.
CREATE INDEX IF NOT EXISTS idx_names_name ON names(name);

CREATE TABLE IF NOT EXISTS wheel_config (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    locked_result TEXT NULL
);
"#;
