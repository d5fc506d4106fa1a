//! Order API handlers

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::services::{OrderFilter, OrderService};
use shared::error::AppResult;
use shared::models::{Order, OrderCreate, OrderItemInput, OrderItemPatch};

/// Body for PUT /api/orders/{id}/status
///
/// The status arrives as a raw string; the service validates it against the
/// closed enumeration.
#[derive(Debug, Deserialize)]
pub struct AdvanceStatusRequest {
    pub status: String,
}

fn service(state: &ServerState) -> OrderService {
    OrderService::new(state.get_db(), state.table_locks.clone())
}

/// GET /api/orders - list orders, filtered by table/status/waiter/range
pub async fn list(
    State(state): State<ServerState>,
    Query(filter): Query<OrderFilter>,
) -> AppResult<Json<Vec<Order>>> {
    Ok(Json(service(&state).list(filter).await?))
}

/// GET /api/orders/{id} - fetch one order
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    Ok(Json(service(&state).get(&id).await?))
}

/// POST /api/orders - submit items against an occupied table
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<Order>> {
    Ok(Json(service(&state).create(&user, payload).await?))
}

/// PUT /api/orders/{id}/status - move the order through its lifecycle
pub async fn advance_status(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(req): Json<AdvanceStatusRequest>,
) -> AppResult<Json<Order>> {
    Ok(Json(
        service(&state).advance_status(&user, &id, &req.status).await?,
    ))
}

/// POST /api/orders/{id}/items - append an item
pub async fn add_item(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(input): Json<OrderItemInput>,
) -> AppResult<Json<Order>> {
    Ok(Json(service(&state).add_item(&user, &id, input).await?))
}

/// PUT /api/orders/{id}/items/{item_id} - replace a line in place
pub async fn update_item(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path((id, item_id)): Path<(String, String)>,
    Json(patch): Json<OrderItemPatch>,
) -> AppResult<Json<Order>> {
    Ok(Json(
        service(&state)
            .update_item(&user, &id, &item_id, patch)
            .await?,
    ))
}
