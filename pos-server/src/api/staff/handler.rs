//! Staff API handlers

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::services::StaffService;
use shared::error::AppResult;
use shared::models::{Role, StaffCreate, StaffRecord, StaffUpdate};

#[derive(Debug, Default, Deserialize)]
pub struct StaffQuery {
    pub role: Option<Role>,
}

/// GET /api/staff - list accounts (admins excluded unless requested by one)
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<StaffQuery>,
) -> AppResult<Json<Vec<StaffRecord>>> {
    let service = StaffService::new(state.get_db());
    Ok(Json(service.list(&user, query.role).await?))
}

/// GET /api/staff/{id} - fetch one account
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<StaffRecord>> {
    let service = StaffService::new(state.get_db());
    Ok(Json(service.get(&user, &id).await?))
}

/// POST /api/staff - provision an account
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<StaffCreate>,
) -> AppResult<Json<StaffRecord>> {
    let service = StaffService::new(state.get_db());
    Ok(Json(service.create(&user, payload).await?))
}

/// PUT /api/staff/{id} - update an account
pub async fn update(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(patch): Json<StaffUpdate>,
) -> AppResult<Json<StaffRecord>> {
    let service = StaffService::new(state.get_db());
    Ok(Json(service.update(&user, &id, patch).await?))
}

/// DELETE /api/staff/{id} - soft delete (sets active = false)
pub async fn deactivate(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<StaffRecord>> {
    let service = StaffService::new(state.get_db());
    Ok(Json(service.deactivate(&user, &id).await?))
}
