//! Restaurant POS backend
//!
//! # Architecture overview
//!
//! Staff authenticate, manage tables, browse the menu, build orders against
//! occupied tables, route them through the kitchen and close them out with
//! payments. The load-bearing pieces are the role policy engine
//! (`auth::policy`) and the table/order/payment lifecycle services; HTTP is
//! a thin coat on top.
//!
//! # Module structure
//!
//! ```text
//! pos-server/src/
//! ├── core/          # Config, state, server assembly
//! ├── auth/          # JWT, argon2 credentials, middleware, role policy
//! ├── db/            # Repository traits + in-memory engine
//! ├── services/      # Table/order/payment/staff/menu/report lifecycles
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # Logger, error re-exports
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export common types
pub use auth::{CurrentUser, JwtService, Permission};
pub use core::{Config, Server, ServerState};
pub use db::Database;
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - structured fields through tracing
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Prepare the process environment: dotenv and logging.
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(std::env::var("RUST_LOG").ok().as_deref(), log_dir.as_deref());
    Ok(())
}
