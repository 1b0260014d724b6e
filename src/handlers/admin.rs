use axum::{Json, extract::State};
use tracing::info;

use crate::middleware::auth::AdminSession;
use crate::types::api::{Ack, IdBody, LockBody, NameBody, RenameBody};
use crate::{WheelError, router::WheelState};

pub async fn add_name(
    _session: AdminSession,
    State(state): State<WheelState>,
    Json(body): Json<NameBody>,
) -> Result<Json<Ack>, WheelError> {
    let id = state.storage.add_name(&body.name).await?;
    info!(id, name = %body.name, "name added");
    Ok(Json(Ack::ok()))
}

pub async fn rename_name(
    _session: AdminSession,
    State(state): State<WheelState>,
    Json(body): Json<RenameBody>,
) -> Result<Json<Ack>, WheelError> {
    let updated = state.storage.rename_by_id(body.id, &body.name).await?;
    info!(id = body.id, name = %body.name, updated, "name renamed");
    Ok(Json(Ack::ok()))
}

pub async fn delete_name(
    _session: AdminSession,
    State(state): State<WheelState>,
    Json(body): Json<IdBody>,
) -> Result<Json<Ack>, WheelError> {
    let removed = state.storage.delete_name_by_id(body.id).await?;
    info!(id = body.id, removed, "name deleted");
    Ok(Json(Ack::ok()))
}

/// POST /api/admin/lock-result -> the next spin returns `result` verbatim.
pub async fn lock_result(
    _session: AdminSession,
    State(state): State<WheelState>,
    Json(body): Json<LockBody>,
) -> Result<Json<Ack>, WheelError> {
    state.storage.set_locked_result(body.result.as_deref()).await?;
    info!(locked = ?body.result, "locked result updated");
    Ok(Json(Ack::ok()))
}
