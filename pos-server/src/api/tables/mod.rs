//! Table API

mod handler;

use axum::{Router, middleware, routing::get, routing::put};

use crate::auth::{Permission, require_permission};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/tables", routes())
}

fn routes() -> Router<ServerState> {
    let table_routes = Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/status", put(handler::update_status))
        .layer(middleware::from_fn(require_permission(Permission::Tables)));

    let assign_routes = Router::new()
        .route("/{id}/waiter", put(handler::assign_waiter))
        .layer(middleware::from_fn(require_permission(
            Permission::AssignTables,
        )));

    table_routes.merge(assign_routes)
}
