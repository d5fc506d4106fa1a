//! Menu API handlers

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::services::MenuService;
use shared::error::AppResult;
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};

#[derive(Debug, Default, Deserialize)]
pub struct MenuQuery {
    pub category: Option<String>,
}

/// GET /api/menu - browse the catalog
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<MenuQuery>,
) -> AppResult<Json<Vec<MenuItem>>> {
    let service = MenuService::new(state.get_db());
    Ok(Json(service.list(query.category).await?))
}

/// GET /api/menu/{id} - fetch one item
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MenuItem>> {
    let service = MenuService::new(state.get_db());
    Ok(Json(service.get(&id).await?))
}

/// POST /api/menu - create an item
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<MenuItem>> {
    let service = MenuService::new(state.get_db());
    Ok(Json(service.create(&user, payload).await?))
}

/// PUT /api/menu/{id} - update an item
pub async fn update(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(patch): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    let service = MenuService::new(state.get_db());
    Ok(Json(service.update(&user, &id, patch).await?))
}

/// DELETE /api/menu/{id} - remove an item
pub async fn delete(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let service = MenuService::new(state.get_db());
    Ok(Json(service.delete(&user, &id).await?))
}
