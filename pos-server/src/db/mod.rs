//! Persistence layer
//!
//! The rest of the backend only ever talks to the repository traits in
//! [`repository`]; entity ids are opaque strings and no entity state is
//! cached across calls. [`Database`] bundles one repository per entity
//! collection and owns the explicit open/close lifecycle — there is no
//! ambient global storage handle.

pub mod repository;

use repository::{
    MenuItemRepository, OrderRepository, PaymentRepository, TableRepository, UserRepository,
    memory::{
        MemoryMenuItemRepository, MemoryOrderRepository, MemoryPaymentRepository,
        MemoryTableRepository, MemoryUserRepository,
    },
};
use shared::error::{AppError, ErrorCode};
use std::sync::Arc;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Database(msg) => AppError::database(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
        }
    }
}

/// The five entity collections behind shared handles
///
/// Cloning is cheap (Arc all the way down); every handler clones the
/// collections it needs instead of holding a global connection.
#[derive(Clone)]
pub struct Database {
    pub users: Arc<dyn UserRepository>,
    pub tables: Arc<dyn TableRepository>,
    pub menu_items: Arc<dyn MenuItemRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub payments: Arc<dyn PaymentRepository>,
}

impl Database {
    /// Open the store. Currently backed by the in-memory engine; the
    /// repository traits are the seam a persistent engine plugs into.
    pub async fn open() -> Result<Self, AppError> {
        let db = Self::in_memory();
        tracing::info!("Database opened (in-memory engine)");
        Ok(db)
    }

    /// Build an in-memory database (also used directly by tests)
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(MemoryUserRepository::new()),
            tables: Arc::new(MemoryTableRepository::new()),
            menu_items: Arc::new(MemoryMenuItemRepository::new()),
            orders: Arc::new(MemoryOrderRepository::new()),
            payments: Arc::new(MemoryPaymentRepository::new()),
        }
    }

    /// Flush and release the store. Must be the last call before shutdown.
    pub async fn close(&self) {
        tracing::info!("Database closed");
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").finish_non_exhaustive()
    }
}
