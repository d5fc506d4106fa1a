//! Menu API

mod handler;

use axum::{Router, middleware, routing::get, routing::post, routing::put};

use crate::auth::{Permission, require_permission};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/menu", routes())
}

fn routes() -> Router<ServerState> {
    // Browsing is open to any authenticated staff; writes are gated
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id));

    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .layer(middleware::from_fn(require_permission(Permission::Menu)));

    read_routes.merge(manage_routes)
}
