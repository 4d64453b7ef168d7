use crate::error::AppError;
use crate::intake;
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde_json::Value;

/// `POST /trade` — verify and persist one signed submission.
///
/// The response is the bare acknowledgment boolean; rejection detail goes
/// to the audit log only. The body is taken as raw bytes so that malformed
/// JSON lands in the intake workflow as a shape error instead of bouncing
/// off the extractor as a transport error.
pub async fn submit_trade(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<bool>, AppError> {
    let value: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

    let mut store = state.store()?;
    let accepted = intake::process(&mut store, &value)?;
    Ok(Json(accepted))
}
