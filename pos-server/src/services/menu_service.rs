//! Menu catalog
//!
//! Plain catalog CRUD; no state machine. Writes are manager tier and above.

use crate::auth::{CurrentUser, Permission, policy};
use crate::db::Database;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use shared::util::{now_millis, record_id};
use validator::Validate;

#[derive(Clone)]
pub struct MenuService {
    db: Database,
}

impl MenuService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn create(&self, user: &CurrentUser, payload: MenuItemCreate) -> AppResult<MenuItem> {
        policy::require_permission(user, Permission::Menu)?;
        payload
            .validate()
            .map_err(|e| AppError::validation(e.to_string()))?;
        if payload.price.is_sign_negative() {
            return Err(AppError::validation("Price must not be negative"));
        }

        let item = MenuItem {
            id: record_id("menu"),
            name: payload.name,
            description: payload.description,
            price: payload.price,
            category: payload.category,
            available: payload.available,
            is_special: payload.is_special,
            created_at: now_millis(),
        };

        let created = self
            .db
            .menu_items
            .insert(item)
            .await
            .map_err(AppError::from)?;
        tracing::info!(menu_item_id = %created.id, user_id = %user.id, "Menu item created");
        Ok(created)
    }

    pub async fn get(&self, id: &str) -> AppResult<MenuItem> {
        self.db
            .menu_items
            .find_by_id(id)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::MenuItemNotFound,
                    format!("Menu item {} not found", id),
                )
            })
    }

    pub async fn list(&self, category: Option<String>) -> AppResult<Vec<MenuItem>> {
        match category {
            Some(category) => self
                .db
                .menu_items
                .find_by_category(&category)
                .await
                .map_err(AppError::from),
            None => self.db.menu_items.find_all().await.map_err(AppError::from),
        }
    }

    pub async fn update(
        &self,
        user: &CurrentUser,
        id: &str,
        patch: MenuItemUpdate,
    ) -> AppResult<MenuItem> {
        policy::require_permission(user, Permission::Menu)?;
        let mut item = self.get(id).await?;

        if let Some(name) = patch.name {
            item.name = name;
        }
        if let Some(description) = patch.description {
            item.description = Some(description);
        }
        if let Some(price) = patch.price {
            if price.is_sign_negative() {
                return Err(AppError::validation("Price must not be negative"));
            }
            item.price = price;
        }
        if let Some(category) = patch.category {
            item.category = category;
        }
        if let Some(available) = patch.available {
            item.available = available;
        }
        if let Some(is_special) = patch.is_special {
            item.is_special = is_special;
        }

        let updated = self
            .db
            .menu_items
            .update(item)
            .await
            .map_err(AppError::from)?;
        tracing::info!(menu_item_id = %updated.id, user_id = %user.id, "Menu item updated");
        Ok(updated)
    }

    pub async fn delete(&self, user: &CurrentUser, id: &str) -> AppResult<bool> {
        policy::require_permission(user, Permission::Menu)?;
        // Ensure a not-found error rather than a silent false
        self.get(id).await?;
        let deleted = self
            .db
            .menu_items
            .delete(id)
            .await
            .map_err(AppError::from)?;
        if deleted {
            tracing::info!(menu_item_id = %id, user_id = %user.id, "Menu item deleted");
        }
        Ok(deleted)
    }
}
