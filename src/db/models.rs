use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DbUser {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, FromRow)]
pub struct NameEntry {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct WheelConfigRow {
    pub id: i64,
    pub locked_result: Option<String>,
}

impl WheelConfigRow {
    /// The pending lock, if any. An empty string does not count as a lock.
    pub fn pending_lock(&self) -> Option<&str> {
        self.locked_result.as_deref().filter(|v| !v.is_empty())
    }
}
