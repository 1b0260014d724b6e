use crate::config::{AdminConfig, DEFAULT_ADMIN_PASSWORD};
use crate::db::WheelStorage;
use crate::error::WheelError;
use crate::service::password::hash_password;
use tracing::{info, warn};

/// Create the configured admin when no user exists yet. Returns whether one was created.
pub async fn seed_admin(storage: &WheelStorage, admin: &AdminConfig) -> Result<bool, WheelError> {
    if storage.count_users().await? > 0 {
        return Ok(false);
    }

    let hash = hash_password(&admin.password).await?;
    let id = storage.insert_user(&admin.username, &hash).await?;
    info!(user_id = id, username = %admin.username, "seeded default admin");

    if admin.password == DEFAULT_ADMIN_PASSWORD {
        warn!(
            username = %admin.username,
            "admin is using the built-in default password; set WHEEL_ADMIN__PASSWORD"
        );
    }
    Ok(true)
}
