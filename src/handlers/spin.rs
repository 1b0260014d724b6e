use axum::{Json, extract::State};

use crate::types::api::SpinResponse;
use crate::{WheelError, router::WheelState};

pub async fn spin(State(state): State<WheelState>) -> Result<Json<SpinResponse>, WheelError> {
    let result = state.spinner.spin().await?;
    Ok(Json(SpinResponse { result }))
}
