//! Order API

mod handler;

use axum::{Router, middleware, routing::get, routing::post, routing::put};

use crate::auth::{Permission, require_permission};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/status", put(handler::advance_status))
        .route("/{id}/items", post(handler::add_item))
        .route("/{id}/items/{item_id}", put(handler::update_item))
        .layer(middleware::from_fn(require_permission(Permission::Orders)))
}
