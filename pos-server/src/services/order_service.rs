//! Order lifecycle
//!
//! Owns the order state machine, item attachment and the single-active-order
//! invariant: at most one order in the active set per table, enforced by
//! serializing the reuse-or-create decision on the table's lock.

use crate::auth::{CurrentUser, Permission, policy};
use crate::db::Database;
use crate::services::TableLocks;
use serde::Deserialize;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    ItemStatus, Order, OrderCreate, OrderItem, OrderItemInput, OrderItemPatch, OrderStatus,
    TableStatus,
};
use shared::util::{now_millis, record_id};
use std::sync::Arc;

/// List filter, bound from query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderFilter {
    pub table_id: Option<String>,
    pub status: Option<OrderStatus>,
    pub waiter_id: Option<String>,
    pub from: Option<i64>,
    pub to: Option<i64>,
}

#[derive(Clone)]
pub struct OrderService {
    db: Database,
    locks: Arc<TableLocks>,
}

impl OrderService {
    pub fn new(db: Database, locks: Arc<TableLocks>) -> Self {
        Self { db, locks }
    }

    /// Submit items against an occupied table.
    ///
    /// If the table already has an active order the items are appended to it
    /// instead of opening a duplicate. The whole read-decide-write sequence
    /// runs under the table's lock.
    pub async fn create(&self, user: &CurrentUser, payload: OrderCreate) -> AppResult<Order> {
        policy::require_permission(user, Permission::Orders)?;

        let _guard = self.locks.acquire(&payload.table_id).await;

        let table = self
            .db
            .tables
            .find_by_id(&payload.table_id)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::TableNotFound,
                    format!("Table {} not found", payload.table_id),
                )
            })?;
        if table.status != TableStatus::Occupied {
            return Err(AppError::with_message(
                ErrorCode::TableNotOccupied,
                format!("Table {} is not occupied", table.number),
            ));
        }

        let existing = self
            .db
            .orders
            .find_active_by_table(&table.id)
            .await
            .map_err(AppError::from)?;

        let mut order = match existing {
            Some(order) => {
                tracing::debug!(order_id = %order.id, table_id = %table.id, "Reusing active order");
                order
            }
            None => {
                let waiter_id = payload
                    .waiter_id
                    .clone()
                    .or_else(|| table.waiter_id.clone())
                    .unwrap_or_else(|| user.id.clone());
                let order = Order {
                    id: record_id("order"),
                    table_id: table.id.clone(),
                    waiter_id,
                    status: OrderStatus::New,
                    items: Vec::new(),
                    created_at: now_millis(),
                };
                let order = self.db.orders.insert(order).await.map_err(AppError::from)?;
                tracing::info!(order_id = %order.id, table_id = %table.id, "Order opened");
                order
            }
        };

        if !payload.items.is_empty() {
            for input in &payload.items {
                let item = self.build_item(input).await?;
                order.items.push(item);
            }
            order = self.db.orders.update(order).await.map_err(AppError::from)?;
        }

        Ok(order)
    }

    pub async fn get(&self, id: &str) -> AppResult<Order> {
        self.db
            .orders
            .find_by_id(id)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| {
                AppError::with_message(ErrorCode::OrderNotFound, format!("Order {} not found", id))
            })
    }

    pub async fn list(&self, filter: OrderFilter) -> AppResult<Vec<Order>> {
        let mut orders = match (&filter.table_id, filter.status, &filter.waiter_id) {
            (Some(table_id), _, _) => self
                .db
                .orders
                .find_by_table(table_id)
                .await
                .map_err(AppError::from)?,
            (None, Some(status), _) => self
                .db
                .orders
                .find_by_status(status)
                .await
                .map_err(AppError::from)?,
            (None, None, Some(waiter_id)) => self
                .db
                .orders
                .find_by_waiter(waiter_id)
                .await
                .map_err(AppError::from)?,
            (None, None, None) => match (filter.from, filter.to) {
                (Some(from), Some(to)) => self
                    .db
                    .orders
                    .find_by_date_range(from, to)
                    .await
                    .map_err(AppError::from)?,
                _ => self.db.orders.find_all().await.map_err(AppError::from)?,
            },
        };

        if let Some(status) = filter.status {
            orders.retain(|o| o.status == status);
        }
        if let Some(waiter_id) = &filter.waiter_id {
            orders.retain(|o| &o.waiter_id == waiter_id);
        }
        if let Some(from) = filter.from {
            orders.retain(|o| o.created_at >= from);
        }
        if let Some(to) = filter.to {
            orders.retain(|o| o.created_at <= to);
        }
        Ok(orders)
    }

    /// Move an order to a new status.
    ///
    /// The requested status arrives as a raw string and must parse into the
    /// closed enumeration. Kitchen statuses (`in_progress`, `done`) and
    /// cancellation have their own role gates; `paid` is owned by payment
    /// settlement and rejected here.
    pub async fn advance_status(
        &self,
        user: &CurrentUser,
        id: &str,
        requested: &str,
    ) -> AppResult<Order> {
        policy::require_permission(user, Permission::Orders)?;
        let status: OrderStatus = requested
            .parse()
            .map_err(|e: shared::models::order::UnknownOrderStatus| {
                AppError::validation(e.to_string())
            })?;

        if status == OrderStatus::Paid {
            return Err(AppError::validation(
                "Orders are settled through a payment, not a status update",
            ));
        }

        let mut order = self.get(id).await?;
        self.guard_mutable(&order)?;

        if !policy::may_advance_to(user.role, status) {
            return Err(AppError::permission_denied(format!(
                "Role {} may not set order status {}",
                user.role, status
            )));
        }

        order.status = status;
        let updated = self.db.orders.update(order).await.map_err(AppError::from)?;
        tracing::info!(
            order_id = %updated.id,
            status = %updated.status,
            user_id = %user.id,
            "Order status changed"
        );
        Ok(updated)
    }

    /// Append an item to an order.
    pub async fn add_item(
        &self,
        user: &CurrentUser,
        order_id: &str,
        input: OrderItemInput,
    ) -> AppResult<Order> {
        policy::require_permission(user, Permission::Orders)?;
        let mut order = self.get(order_id).await?;
        self.guard_mutable(&order)?;

        let item = self.build_item(&input).await?;
        order.items.push(item);
        self.db.orders.update(order).await.map_err(AppError::from)
    }

    /// Replace an existing order line in place.
    ///
    /// Settled orders reject this the same way they reject `add_item`.
    pub async fn update_item(
        &self,
        user: &CurrentUser,
        order_id: &str,
        item_id: &str,
        patch: OrderItemPatch,
    ) -> AppResult<Order> {
        policy::require_permission(user, Permission::Orders)?;
        let mut order = self.get(order_id).await?;
        self.guard_mutable(&order)?;

        let item = order
            .items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::OrderItemNotFound,
                    format!("Item {} not found on order {}", item_id, order_id),
                )
            })?;

        if let Some(quantity) = patch.quantity {
            if quantity == 0 {
                return Err(AppError::validation("Quantity must be at least 1"));
            }
            item.quantity = quantity;
        }
        if let Some(notes) = patch.notes {
            item.notes = Some(notes);
        }
        if let Some(status) = patch.status {
            item.status = status;
        }

        self.db.orders.update(order).await.map_err(AppError::from)
    }

    /// Reject mutation of terminal orders
    fn guard_mutable(&self, order: &Order) -> AppResult<()> {
        match order.status {
            OrderStatus::Paid => Err(AppError::with_message(
                ErrorCode::OrderAlreadyPaid,
                "Cannot modify a settled order",
            )),
            OrderStatus::Cancelled => Err(AppError::with_message(
                ErrorCode::OrderAlreadyCancelled,
                "Cannot modify a cancelled order",
            )),
            _ => Ok(()),
        }
    }

    /// Resolve an incoming line against the menu: the item must exist and be
    /// available, the price defaults to the current menu price.
    async fn build_item(&self, input: &OrderItemInput) -> AppResult<OrderItem> {
        if input.quantity == 0 {
            return Err(AppError::validation("Quantity must be at least 1"));
        }

        let menu_item = self
            .db
            .menu_items
            .find_by_id(&input.menu_item_id)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::MenuItemNotFound,
                    format!("Menu item {} not found", input.menu_item_id),
                )
            })?;
        if !menu_item.available {
            return Err(AppError::with_message(
                ErrorCode::MenuItemUnavailable,
                format!("Menu item '{}' is not available", menu_item.name),
            ));
        }

        Ok(OrderItem {
            id: record_id("item"),
            menu_item_id: menu_item.id,
            name: menu_item.name,
            price: input.price.unwrap_or(menu_item.price),
            quantity: input.quantity,
            notes: input.notes.clone(),
            status: ItemStatus::New,
        })
    }
}
