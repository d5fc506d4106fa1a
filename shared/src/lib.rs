//! Shared types for the POS backend
//!
//! This crate holds everything both the server and its callers agree on:
//!
//! - [`error`]: unified error codes, [`AppError`] and the [`ApiResponse`]
//!   envelope
//! - [`models`]: domain entities and their closed status enumerations
//! - [`client`]: request/response DTOs for the auth surface
//! - [`util`]: small time/id helpers

pub mod client;
pub mod error;
pub mod models;
pub mod util;

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::{
    MenuItem, Order, OrderItem, OrderStatus, Payment, PaymentMethod, Role, Table, TableStatus,
    User,
};
