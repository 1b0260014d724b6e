use axum_extra::extract::cookie::Key;
use base64::Engine;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use crate::error::WheelError;

pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// 16 MiB, the upload ceiling for spreadsheet imports.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub basic: BasicConfig,
    pub admin: AdminConfig,
    pub upload: UploadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicConfig {
    /// Plain HTTP. Browsers drop `Secure` cookies on non-localhost HTTP, so a
    /// non-loopback address without TLS in front needs `insecure_cookie = true`.
    pub listen_addr: String,
    pub database_url: String,
    pub loglevel: String,
    /// Base64 key material for the session cookie; at least 64 bytes once decoded.
    pub cookie_secret: Option<String>,
    /// Omit the `Secure` attribute from the session cookie.
    pub insecure_cookie: bool,
    pub session_ttl_hours: i64,
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:5000".to_string(),
            database_url: "sqlite:wheel.db".to_string(),
            loglevel: "info".to_string(),
            cookie_secret: None,
            insecure_cookie: false,
            session_ttl_hours: 24,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub username: String,
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: DEFAULT_ADMIN_USERNAME.to_string(),
            password: DEFAULT_ADMIN_PASSWORD.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    pub dir: String,
    pub max_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: "uploads".to_string(),
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Config {
    /// Defaults, then `config.toml`, then `WHEEL_*` environment variables
    /// (`WHEEL_BASIC__LOGLEVEL=debug`).
    pub fn load() -> Result<Self, WheelError> {
        Self::figment().extract().map_err(|e| WheelError::Config(Box::new(e)))
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("WHEEL_").split("__"))
    }

    /// Session cookie key. Without a configured secret every process run gets a
    /// fresh key, so restarts log everyone out.
    pub fn cookie_key(&self) -> Result<Key, WheelError> {
        let Some(secret) = self.basic.cookie_secret.as_deref() else {
            return Ok(Key::generate());
        };
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(secret.trim())
            .map_err(|e| WheelError::CookieKey(e.to_string()))?;
        Key::try_from(bytes.as_slice()).map_err(|e| WheelError::CookieKey(e.to_string()))
    }

    /// True when sessions are `Secure`-only but the listener is plain HTTP on a
    /// non-loopback address, where logins from other hosts will not stick
    /// unless a TLS proxy sits in front.
    pub fn secure_cookie_on_public_http(&self) -> bool {
        if self.basic.insecure_cookie {
            return false;
        }
        self.basic
            .listen_addr
            .parse::<SocketAddr>()
            .map(|addr| !addr.ip().is_loopback())
            .unwrap_or_else(|_| !self.basic.listen_addr.starts_with("localhost:"))
    }

    pub fn session_ttl(&self) -> time::Duration {
        time::Duration::hours(self.basic.session_ttl_hours)
    }
}
