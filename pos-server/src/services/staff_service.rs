//! Staff management and login
//!
//! Account provisioning follows its own hierarchy, distinct from the
//! general permission matrix: admin manages any role, owner manages manager
//! and below, manager manages floor staff, nobody else provisions accounts.
//! Deactivation is a soft delete; rows are never removed.

use crate::auth::{CurrentUser, Permission, credential, policy};
use crate::db::{Database, RepoError};
use shared::client::RoleHint;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Role, StaffCreate, StaffRecord, StaffUpdate, User};
use shared::util::{now_millis, record_id};
use std::time::Duration;
use validator::Validate;

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

#[derive(Clone)]
pub struct StaffService {
    db: Database,
}

impl StaffService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// List staff accounts.
    ///
    /// Without a filter, admin accounts are excluded from the result. The
    /// `waiter` filter is deliberately open to any authenticated caller so
    /// hosts can look up servers for table assignment; every other filter
    /// needs the view permission, and the admin filter needs admin.
    pub async fn list(
        &self,
        user: &CurrentUser,
        role_filter: Option<Role>,
    ) -> AppResult<Vec<StaffRecord>> {
        match role_filter {
            Some(Role::Waiter) => {}
            Some(Role::Admin) => {
                if !user.is_admin() {
                    return Err(AppError::new(ErrorCode::AdminRequired));
                }
            }
            _ => policy::require_permission(user, Permission::ViewStaff)?,
        }

        let users = match role_filter {
            Some(role) => self
                .db
                .users
                .find_by_role(role)
                .await
                .map_err(AppError::from)?,
            None => {
                let mut all = self.db.users.find_all().await.map_err(AppError::from)?;
                all.retain(|u| u.role != Role::Admin);
                all
            }
        };

        Ok(users.into_iter().map(StaffRecord::from).collect())
    }

    /// Fetch a single account. Admin records are visible only to admins;
    /// everyone may read their own record.
    pub async fn get(&self, user: &CurrentUser, id: &str) -> AppResult<StaffRecord> {
        let target = self.find_user(id).await?;
        if target.role == Role::Admin && !user.is_admin() {
            return Err(AppError::new(ErrorCode::CannotModifyAdmin));
        }
        if user.id != id {
            policy::require_permission(user, Permission::ViewStaff)?;
        }
        Ok(target.into())
    }

    /// Provision a new account. The target role is gated by the
    /// provisioning hierarchy, not the caller's general permissions.
    pub async fn create(&self, user: &CurrentUser, payload: StaffCreate) -> AppResult<StaffRecord> {
        payload
            .validate()
            .map_err(|e| AppError::validation(e.to_string()))?;
        policy::require_manage_role(user, payload.role)?;

        if self
            .db
            .users
            .find_by_email(&payload.email)
            .await
            .map_err(AppError::from)?
            .is_some()
        {
            return Err(AppError::with_message(
                ErrorCode::EmailTaken,
                format!("Email '{}' already registered", payload.email),
            ));
        }

        let password_hash = credential::hash_password(&payload.password)
            .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?;

        let account = User {
            id: record_id("user"),
            name: payload.name,
            email: payload.email,
            password_hash,
            role: payload.role,
            active: true,
            created_at: now_millis(),
        };

        let created = self.db.users.insert(account).await.map_err(|e| match e {
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::EmailTaken, msg),
            other => other.into(),
        })?;

        tracing::info!(
            staff_id = %created.id,
            role = %created.role,
            user_id = %user.id,
            "Staff account created"
        );
        Ok(created.into())
    }

    /// Update an account. Both the account's current role and any new role
    /// must be within the caller's provisioning authority.
    pub async fn update(
        &self,
        user: &CurrentUser,
        id: &str,
        patch: StaffUpdate,
    ) -> AppResult<StaffRecord> {
        let mut target = self.find_user(id).await?;

        if target.role == Role::Admin && !user.is_admin() {
            return Err(AppError::new(ErrorCode::CannotModifyAdmin));
        }
        policy::require_manage_role(user, target.role)?;

        if let Some(new_role) = patch.role {
            policy::require_manage_role(user, new_role)?;
            target.role = new_role;
        }
        if let Some(name) = patch.name {
            target.name = name;
        }
        if let Some(email) = patch.email {
            if !email.eq_ignore_ascii_case(&target.email)
                && self
                    .db
                    .users
                    .find_by_email(&email)
                    .await
                    .map_err(AppError::from)?
                    .is_some()
            {
                return Err(AppError::with_message(
                    ErrorCode::EmailTaken,
                    format!("Email '{}' already registered", email),
                ));
            }
            target.email = email;
        }
        if let Some(password) = patch.password {
            target.password_hash = credential::hash_password(&password)
                .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?;
        }
        if let Some(active) = patch.active {
            target.active = active;
        }

        let updated = self.db.users.update(target).await.map_err(AppError::from)?;
        tracing::info!(staff_id = %updated.id, user_id = %user.id, "Staff account updated");
        Ok(updated.into())
    }

    /// Soft-delete an account: sets `active = false`, never removes the row.
    pub async fn deactivate(&self, user: &CurrentUser, id: &str) -> AppResult<StaffRecord> {
        let mut target = self.find_user(id).await?;

        if target.role == Role::Admin && !user.is_admin() {
            return Err(AppError::new(ErrorCode::CannotModifyAdmin));
        }
        policy::require_manage_role(user, target.role)?;

        target.active = false;
        let updated = self.db.users.update(target).await.map_err(AppError::from)?;
        tracing::info!(staff_id = %updated.id, user_id = %user.id, "Staff account deactivated");
        Ok(updated.into())
    }

    /// Verify credentials and the optional login channel restriction.
    ///
    /// Unknown email and wrong password produce the same error, and the
    /// lookup result is only inspected after a fixed delay.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        role_hint: Option<RoleHint>,
    ) -> AppResult<User> {
        let account = self
            .db
            .users
            .find_by_email(email)
            .await
            .map_err(AppError::from)?;

        tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

        let account = match account {
            Some(account) => account,
            None => {
                tracing::warn!(email = %email, "Login failed - account not found");
                return Err(AppError::invalid_credentials());
            }
        };

        let password_valid = credential::verify_password(password, &account.password_hash)
            .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;
        if !password_valid {
            tracing::warn!(email = %email, "Login failed - invalid credentials");
            return Err(AppError::invalid_credentials());
        }

        if !account.active {
            return Err(AppError::new(ErrorCode::AccountDisabled));
        }

        match role_hint {
            Some(RoleHint::Admin) if account.role != Role::Admin => {
                tracing::warn!(email = %email, "Login rejected - admin channel requires admin role");
                return Err(AppError::with_message(
                    ErrorCode::AdminRequired,
                    "Admin login requires an admin account",
                ));
            }
            Some(RoleHint::Staff) if account.role == Role::Admin => {
                tracing::warn!(email = %email, "Login rejected - admin account on staff channel");
                return Err(AppError::permission_denied(
                    "Admin accounts cannot use the staff login",
                ));
            }
            _ => {}
        }

        tracing::info!(
            staff_id = %account.id,
            email = %account.email,
            role = %account.role,
            "Login successful"
        );
        Ok(account)
    }

    /// Privileged registration: admin-tier callers only.
    pub async fn register(
        &self,
        user: &CurrentUser,
        payload: StaffCreate,
    ) -> AppResult<StaffRecord> {
        policy::require_at_least(user, Role::Admin)?;
        self.create(user, payload).await
    }

    async fn find_user(&self, id: &str) -> AppResult<User> {
        self.db
            .users
            .find_by_id(id)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::StaffNotFound,
                    format!("Staff account {} not found", id),
                )
            })
    }
}
