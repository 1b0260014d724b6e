use serde::{Deserialize, Serialize};

/// `{"name": ...}` for add and delete-by-value.
#[derive(Debug, Deserialize)]
pub struct NameBody {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct RenameBody {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct IdBody {
    pub id: i64,
}

/// A missing or null `result` stores NULL, clearing any pending lock.
#[derive(Debug, Default, Deserialize)]
pub struct LockBody {
    #[serde(default)]
    pub result: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct Ack {
    pub success: bool,
}

impl Ack {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

#[derive(Debug, Serialize)]
pub struct SpinResponse {
    pub result: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
}
