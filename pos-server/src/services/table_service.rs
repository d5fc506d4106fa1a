//! Table lifecycle
//!
//! Owns the occupancy state machine and its invariants:
//! - an occupied table always has an assigned server
//! - an available table carries no waiter, guest count or reservation data
//!
//! Tables are never deleted.

use crate::auth::{CurrentUser, Permission, policy};
use crate::db::{Database, RepoError};
use serde::Deserialize;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Role, Table, TableCreate, TableStatus, TableUpdate};
use shared::util::{now_millis, record_id};
use validator::Validate;

/// List filter, bound from query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TableFilter {
    pub status: Option<TableStatus>,
    pub floor: Option<u32>,
}

#[derive(Clone)]
pub struct TableService {
    db: Database,
}

impl TableService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Create a new table. Manager tier and above; table numbers are unique
    /// across the whole floor plan, enforced here and again by the store.
    pub async fn create(&self, user: &CurrentUser, payload: TableCreate) -> AppResult<Table> {
        policy::require_at_least(user, Role::Manager)?;
        payload
            .validate()
            .map_err(|e| AppError::validation(e.to_string()))?;

        if self
            .db
            .tables
            .find_by_number(payload.number)
            .await
            .map_err(AppError::from)?
            .is_some()
        {
            return Err(AppError::with_message(
                ErrorCode::TableNumberTaken,
                format!("Table number {} already in use", payload.number),
            ));
        }

        let table = Table {
            id: record_id("table"),
            number: payload.number,
            capacity: payload.capacity,
            floor: payload.floor,
            status: TableStatus::Available,
            waiter_id: None,
            guest_count: None,
            reservation_name: None,
            reservation_phone: None,
            reservation_time: None,
            created_at: now_millis(),
        };

        let created = self.db.tables.insert(table).await.map_err(|e| match e {
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::TableNumberTaken, msg),
            other => other.into(),
        })?;

        tracing::info!(
            table_id = %created.id,
            number = created.number,
            user_id = %user.id,
            "Table created"
        );
        Ok(created)
    }

    pub async fn get(&self, id: &str) -> AppResult<Table> {
        self.db
            .tables
            .find_by_id(id)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| {
                AppError::with_message(ErrorCode::TableNotFound, format!("Table {} not found", id))
            })
    }

    pub async fn list(&self, filter: TableFilter) -> AppResult<Vec<Table>> {
        let mut tables = self.db.tables.find_all().await.map_err(AppError::from)?;
        if let Some(status) = filter.status {
            tables.retain(|t| t.status == status);
        }
        if let Some(floor) = filter.floor {
            tables.retain(|t| t.floor == floor);
        }
        Ok(tables)
    }

    /// Apply an occupancy patch.
    ///
    /// A transition to `Occupied` requires a waiter in the patch or already
    /// on the table. A transition to `Available` clears occupancy fields
    /// server-side no matter what else the patch carries.
    pub async fn update_status(
        &self,
        user: &CurrentUser,
        id: &str,
        patch: TableUpdate,
    ) -> AppResult<Table> {
        policy::require_permission(user, Permission::Tables)?;
        let mut table = self.get(id).await?;

        if let Some(waiter_id) = patch.waiter_id {
            table.waiter_id = Some(waiter_id);
        }
        if let Some(guest_count) = patch.guest_count {
            table.guest_count = Some(guest_count);
        }
        if let Some(name) = patch.reservation_name {
            table.reservation_name = Some(name);
        }
        if let Some(phone) = patch.reservation_phone {
            table.reservation_phone = Some(phone);
        }
        if let Some(time) = patch.reservation_time {
            table.reservation_time = Some(time);
        }

        if let Some(status) = patch.status {
            if status == TableStatus::Occupied && table.waiter_id.is_none() {
                return Err(AppError::with_message(
                    ErrorCode::TableWaiterRequired,
                    "Occupied table must have an assigned server",
                ));
            }
            table.status = status;
        }

        // Available tables never carry occupancy state, whatever the patch said
        if table.status == TableStatus::Available {
            table.clear_occupancy();
        }

        let updated = self.db.tables.update(table).await.map_err(AppError::from)?;
        tracing::info!(
            table_id = %updated.id,
            status = %updated.status,
            user_id = %user.id,
            "Table updated"
        );
        Ok(updated)
    }

    /// Assign a server to a table without touching its status.
    pub async fn assign_waiter(
        &self,
        user: &CurrentUser,
        id: &str,
        waiter_id: &str,
    ) -> AppResult<Table> {
        policy::require_permission(user, Permission::AssignTables)?;

        let waiter = self
            .db
            .users
            .find_by_id(waiter_id)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::StaffNotFound,
                    format!("Staff account {} not found", waiter_id),
                )
            })?;
        if !waiter.active {
            return Err(AppError::validation("Cannot assign an inactive server"));
        }
        if !policy::is_at_least(waiter.role, Role::Waiter) {
            return Err(AppError::validation(format!(
                "Role {} cannot serve tables",
                waiter.role
            )));
        }

        let mut table = self.get(id).await?;
        table.waiter_id = Some(waiter.id.clone());
        let updated = self.db.tables.update(table).await.map_err(AppError::from)?;

        tracing::info!(
            table_id = %updated.id,
            waiter_id = %waiter.id,
            user_id = %user.id,
            "Server assigned to table"
        );
        Ok(updated)
    }
}
