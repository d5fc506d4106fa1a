//! Table API handlers

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::services::{TableFilter, TableService};
use shared::error::AppResult;
use shared::models::{Table, TableCreate, TableUpdate};

/// Body for PUT /api/tables/{id}/waiter
#[derive(Debug, Deserialize)]
pub struct AssignWaiterRequest {
    pub waiter_id: String,
}

/// GET /api/tables - list tables, optionally filtered by status/floor
pub async fn list(
    State(state): State<ServerState>,
    Query(filter): Query<TableFilter>,
) -> AppResult<Json<Vec<Table>>> {
    let service = TableService::new(state.get_db());
    Ok(Json(service.list(filter).await?))
}

/// GET /api/tables/{id} - fetch one table
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Table>> {
    let service = TableService::new(state.get_db());
    Ok(Json(service.get(&id).await?))
}

/// POST /api/tables - create a table (manager tier and above)
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<TableCreate>,
) -> AppResult<Json<Table>> {
    let service = TableService::new(state.get_db());
    Ok(Json(service.create(&user, payload).await?))
}

/// PUT /api/tables/{id}/status - occupancy patch
pub async fn update_status(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(patch): Json<TableUpdate>,
) -> AppResult<Json<Table>> {
    let service = TableService::new(state.get_db());
    Ok(Json(service.update_status(&user, &id, patch).await?))
}

/// PUT /api/tables/{id}/waiter - assign a server without touching status
pub async fn assign_waiter(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(req): Json<AssignWaiterRequest>,
) -> AppResult<Json<Table>> {
    let service = TableService::new(state.get_db());
    Ok(Json(service.assign_waiter(&user, &id, &req.waiter_id).await?))
}
