use crate::db::models::{DbUser, NameEntry, WheelConfigRow};
use crate::db::schema::SQLITE_INIT;
use crate::error::WheelError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use tracing::debug;

pub type SqlitePool = Pool<Sqlite>;

#[derive(Clone)]
pub struct WheelStorage {
    pool: SqlitePool,
}

impl WheelStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if missing) the database at `database_url` and ensure the schema exists.
    pub async fn connect(database_url: &str) -> Result<Self, WheelError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
        let storage = Self::new(pool);
        storage.init_schema().await?;
        Ok(storage)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), WheelError> {
        // sqlx::query runs a single statement
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    pub async fn count_users(&self) -> Result<i64, WheelError> {
        let rec: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(rec.0)
    }

    pub async fn insert_user(&self, username: &str, password_hash: &str) -> Result<i64, WheelError> {
        let res = sqlx::query("INSERT INTO users (username, password_hash) VALUES (?, ?)")
            .bind(username)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;
        Ok(res.last_insert_rowid())
    }

    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<DbUser>, WheelError> {
        let user = sqlx::query_as::<_, DbUser>(
            "SELECT id, username, password_hash FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn get_user_by_id(&self, id: i64) -> Result<Option<DbUser>, WheelError> {
        let user = sqlx::query_as::<_, DbUser>(
            "SELECT id, username, password_hash FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// All entries in insertion order.
    pub async fn list_entries(&self) -> Result<Vec<NameEntry>, WheelError> {
        let rows = sqlx::query_as::<_, NameEntry>("SELECT id, name FROM names ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn list_names(&self) -> Result<Vec<String>, WheelError> {
        let rows: Vec<(String,)> = sqlx::query_as("SELECT name FROM names ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    /// Unconditional insert; duplicates are accepted here.
    pub async fn add_name(&self, name: &str) -> Result<i64, WheelError> {
        let res = sqlx::query("INSERT INTO names (name) VALUES (?)")
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(res.last_insert_rowid())
    }

    /// Returns the number of rows removed; zero is not an error.
    pub async fn delete_names_by_value(&self, name: &str) -> Result<u64, WheelError> {
        let res = sqlx::query("DELETE FROM names WHERE name = ?")
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }

    pub async fn delete_name_by_id(&self, id: i64) -> Result<u64, WheelError> {
        let res = sqlx::query("DELETE FROM names WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }

    pub async fn rename_by_id(&self, id: i64, new_name: &str) -> Result<u64, WheelError> {
        let res = sqlx::query("UPDATE names SET name = ? WHERE id = ?")
            .bind(new_name)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }

    /// Insert every name not already present, in order, inside one transaction.
    /// Names repeated within `names` are inserted once. Returns the number added.
    pub async fn import_names(&self, names: &[String]) -> Result<u64, WheelError> {
        let mut tx = self.pool.begin().await?;
        let mut added = 0u64;

        for name in names {
            let existing: Option<(i64,)> =
                sqlx::query_as("SELECT id FROM names WHERE name = ? LIMIT 1")
                    .bind(name)
                    .fetch_optional(&mut *tx)
                    .await?;
            if existing.is_some() {
                continue;
            }
            sqlx::query("INSERT INTO names (name) VALUES (?)")
                .bind(name)
                .execute(&mut *tx)
                .await?;
            added += 1;
        }

        tx.commit().await?;
        Ok(added)
    }

    /// The first config row, if one has ever been written.
    pub async fn wheel_config(&self) -> Result<Option<WheelConfigRow>, WheelError> {
        let row = sqlx::query_as::<_, WheelConfigRow>(
            "SELECT id, locked_result FROM wheel_config ORDER BY id LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Get-or-create the config row and store `value` (NULL clears the lock).
    pub async fn set_locked_result(&self, value: Option<&str>) -> Result<(), WheelError> {
        let mut tx = self.pool.begin().await?;
        let existing: Option<(i64,)> =
            sqlx::query_as("SELECT id FROM wheel_config ORDER BY id LIMIT 1")
                .fetch_optional(&mut *tx)
                .await?;

        match existing {
            Some((id,)) => {
                sqlx::query("UPDATE wheel_config SET locked_result = ? WHERE id = ?")
                    .bind(value)
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
            }
            None => {
                sqlx::query("INSERT INTO wheel_config (locked_result) VALUES (?)")
                    .bind(value)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        tx.commit().await?;
        Ok(())
    }

    /// Consume the pending lock. The clear is a conditional update on the value
    /// that was read, so of two racing callers only one gets `Some`.
    pub async fn take_locked_result(&self) -> Result<Option<String>, WheelError> {
        loop {
            let Some(cfg) = self.wheel_config().await? else {
                return Ok(None);
            };
            let Some(locked) = cfg.pending_lock().map(str::to_owned) else {
                return Ok(None);
            };

            let res = sqlx::query(
                "UPDATE wheel_config SET locked_result = NULL WHERE id = ? AND locked_result = ?",
            )
            .bind(cfg.id)
            .bind(&locked)
            .execute(&self.pool)
            .await?;

            if res.rows_affected() == 1 {
                return Ok(Some(locked));
            }
            debug!(config_id = cfg.id, "locked result changed underneath; re-reading");
        }
    }
}
