//! API routing
//!
//! # Structure
//!
//! - [`health`] - liveness check
//! - [`auth`] - login, register, current identity
//! - [`tables`] - table lifecycle
//! - [`menu`] - menu catalog
//! - [`orders`] - order lifecycle
//! - [`payments`] - settlement
//! - [`staff`] - staff management
//! - [`reports`] - read models
//!
//! Authentication runs for every `/api/` route except the public ones;
//! permission tags are layered per route group, and the finer per-action
//! rules live in the services.

pub mod auth;
pub mod health;
pub mod menu;
pub mod orders;
pub mod payments;
pub mod reports;
pub mod staff;
pub mod tables;

use axum::{Router, middleware};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::require_auth;
use crate::core::ServerState;

/// Assemble the full application router
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(tables::router())
        .merge(menu::router())
        .merge(orders::router())
        .merge(payments::router())
        .merge(staff::router())
        .merge(reports::router())
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
