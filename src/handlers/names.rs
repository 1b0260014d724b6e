use axum::{Json, extract::State};
use tracing::info;

use crate::types::api::{Ack, NameBody};
use crate::{WheelError, router::WheelState};

pub async fn list_names(State(state): State<WheelState>) -> Result<Json<Vec<String>>, WheelError> {
    Ok(Json(state.storage.list_names().await?))
}

/// DELETE /api/names -> removes every entry equal to `name`.
///
/// Unlike the `/api/admin` routes this one needs no session.
pub async fn delete_name_by_value(
    State(state): State<WheelState>,
    Json(body): Json<NameBody>,
) -> Result<Json<Ack>, WheelError> {
    let removed = state.storage.delete_names_by_value(&body.name).await?;
    info!(name = %body.name, removed, "deleted names by value");
    Ok(Json(Ack::ok()))
}
