use crate::error::AppError;
use crate::models::OrderBookResponse;
use crate::state::AppState;
use axum::extract::State;
use axum::Json;

/// `GET /order_book` — every verified order, in insertion order.
pub async fn order_book(State(state): State<AppState>) -> Result<Json<OrderBookResponse>, AppError> {
    let store = state.store()?;
    Ok(Json(OrderBookResponse {
        data: store.orders().to_vec(),
    }))
}
