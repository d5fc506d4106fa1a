//! Payment API handlers

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::services::{PaymentFilter, PaymentService};
use shared::error::AppResult;
use shared::models::{Payment, SettleRequest};

fn service(state: &ServerState) -> PaymentService {
    PaymentService::new(state.get_db(), state.table_locks.clone())
}

/// POST /api/payments - settle an order
pub async fn settle(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<SettleRequest>,
) -> AppResult<Json<Payment>> {
    Ok(Json(service(&state).settle(&user, req).await?))
}

/// GET /api/payments - list payments by order or date range
pub async fn list(
    State(state): State<ServerState>,
    Query(filter): Query<PaymentFilter>,
) -> AppResult<Json<Vec<Payment>>> {
    Ok(Json(service(&state).list(filter).await?))
}

/// GET /api/payments/{id} - fetch one payment
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Payment>> {
    Ok(Json(service(&state).get(&id).await?))
}
