//! Server state

use std::sync::Arc;

use crate::auth::{JwtService, credential};
use crate::core::Config;
use crate::db::Database;
use crate::services::TableLocks;
use shared::models::{Role, User};
use shared::util::{now_millis, record_id};

/// Shared server state — one handle per service, cloned into every handler
///
/// All fields are cheap to clone (`Arc` underneath); handlers construct the
/// lifecycle services they need from these handles per request.
#[derive(Clone, Debug)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Entity collections behind the repository traits
    pub db: Database,
    /// JWT token service
    pub jwt_service: Arc<JwtService>,
    /// Per-table mutual exclusion for order creation and settlement
    pub table_locks: Arc<TableLocks>,
}

impl ServerState {
    /// Manual constructor; [`ServerState::initialize`] is the normal path
    pub fn new(
        config: Config,
        db: Database,
        jwt_service: Arc<JwtService>,
        table_locks: Arc<TableLocks>,
    ) -> Self {
        Self {
            config,
            db,
            jwt_service,
            table_locks,
        }
    }

    /// Initialize server state: open the store, set up services, and seed
    /// the bootstrap admin account when the store is empty.
    ///
    /// # Panics
    ///
    /// Panics when the store cannot be opened or seeded — the server cannot
    /// run without either.
    pub async fn initialize(config: &Config) -> Self {
        let db = Database::open().await.expect("Failed to open database");
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let table_locks = Arc::new(TableLocks::new());

        let state = Self::new(config.clone(), db, jwt_service, table_locks);
        state.seed_admin().await;
        state
    }

    /// Create the initial admin account on an empty store so the system is
    /// reachable on first boot.
    async fn seed_admin(&self) {
        let count = self
            .db
            .users
            .count()
            .await
            .expect("Failed to query user count");
        if count > 0 {
            return;
        }

        let password = match &self.config.admin_password {
            Some(password) => password.clone(),
            None => {
                let generated = uuid::Uuid::new_v4().to_string();
                tracing::warn!(
                    email = %self.config.admin_email,
                    password = %generated,
                    "ADMIN_PASSWORD not set - generated bootstrap admin credentials"
                );
                generated
            }
        };

        let password_hash =
            credential::hash_password(&password).expect("Failed to hash bootstrap password");
        let admin = User {
            id: record_id("user"),
            name: "Administrator".to_string(),
            email: self.config.admin_email.clone(),
            password_hash,
            role: Role::Admin,
            active: true,
            created_at: now_millis(),
        };

        self.db
            .users
            .insert(admin)
            .await
            .expect("Failed to seed bootstrap admin");
        tracing::info!(email = %self.config.admin_email, "Bootstrap admin account created");
    }

    /// Get the database handle
    pub fn get_db(&self) -> Database {
        self.db.clone()
    }

    /// Get the JWT service
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// Release resources on shutdown
    pub async fn shutdown(&self) {
        self.db.close().await;
    }
}
