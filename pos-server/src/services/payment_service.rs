//! Payment settlement
//!
//! One operation owns the whole cascade: record the payment, mark the order
//! paid, and release the table when nothing else holds it. The sequence runs
//! under the table's lock so a concurrent settlement or order mutation for
//! the same table cannot observe a half-applied state.

use crate::auth::{CurrentUser, Permission, policy};
use crate::db::Database;
use crate::services::TableLocks;
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Order, OrderStatus, Payment, SettleRequest, TableStatus};
use shared::util::{now_millis, record_id};
use std::sync::Arc;

/// List filter, bound from query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentFilter {
    pub order_id: Option<String>,
    pub from: Option<i64>,
    pub to: Option<i64>,
}

#[derive(Clone)]
pub struct PaymentService {
    db: Database,
    locks: Arc<TableLocks>,
}

impl PaymentService {
    pub fn new(db: Database, locks: Arc<TableLocks>) -> Self {
        Self { db, locks }
    }

    /// Settle an order.
    ///
    /// Waiter-tier callers may only take cash; manager tier and above may
    /// take any method. Exactly one payment finalizes one order — repeated
    /// settlement attempts fail after the first success.
    pub async fn settle(&self, user: &CurrentUser, req: SettleRequest) -> AppResult<Payment> {
        policy::require_permission(user, Permission::Payments)?;
        if !policy::may_settle_with(user.role, req.method) {
            return Err(AppError::permission_denied(format!(
                "Role {} may not settle {} payments",
                user.role, req.method
            )));
        }

        if req.amount <= Decimal::ZERO {
            return Err(AppError::with_message(
                ErrorCode::PaymentInvalidAmount,
                "Payment amount must be positive",
            ));
        }
        let tip = req.tip.unwrap_or(Decimal::ZERO);
        if tip < Decimal::ZERO {
            return Err(AppError::with_message(
                ErrorCode::PaymentInvalidAmount,
                "Tip must not be negative",
            ));
        }

        // Resolve the table before locking, then re-read under the lock
        let order = self.find_order(&req.order_id).await?;
        let _guard = self.locks.acquire(&order.table_id).await;

        let mut order = self.find_order(&req.order_id).await?;
        match order.status {
            OrderStatus::Paid => {
                return Err(AppError::with_message(
                    ErrorCode::OrderAlreadyPaid,
                    format!("Order {} has already been paid", order.id),
                ));
            }
            OrderStatus::Cancelled => {
                return Err(AppError::with_message(
                    ErrorCode::OrderAlreadyCancelled,
                    "Cannot settle a cancelled order",
                ));
            }
            _ => {}
        }

        let payment = Payment {
            id: record_id("payment"),
            order_id: order.id.clone(),
            amount: req.amount,
            tip,
            method: req.method,
            paid_at: now_millis(),
        };
        let payment = self
            .db
            .payments
            .insert(payment)
            .await
            .map_err(AppError::from)?;

        order.status = OrderStatus::Paid;
        let order = self.db.orders.update(order).await.map_err(AppError::from)?;

        self.release_table_if_clear(&order).await?;

        tracing::info!(
            payment_id = %payment.id,
            order_id = %order.id,
            amount = %payment.amount,
            method = %payment.method,
            user_id = %user.id,
            "Order settled"
        );
        Ok(payment)
    }

    pub async fn get(&self, id: &str) -> AppResult<Payment> {
        self.db
            .payments
            .find_by_id(id)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| AppError::not_found(format!("Payment {}", id)))
    }

    pub async fn list(&self, filter: PaymentFilter) -> AppResult<Vec<Payment>> {
        let payments = match &filter.order_id {
            Some(order_id) => self
                .db
                .payments
                .find_by_order(order_id)
                .await
                .map_err(AppError::from)?,
            None => self
                .db
                .payments
                .find_by_date_range(
                    filter.from.unwrap_or(0),
                    filter.to.unwrap_or_else(now_millis),
                )
                .await
                .map_err(AppError::from)?,
        };
        Ok(payments)
    }

    async fn find_order(&self, id: &str) -> AppResult<Order> {
        self.db
            .orders
            .find_by_id(id)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| {
                AppError::with_message(ErrorCode::OrderNotFound, format!("Order {} not found", id))
            })
    }

    /// Release the order's table when no active order remains on it.
    async fn release_table_if_clear(&self, order: &Order) -> AppResult<()> {
        let remaining = self
            .db
            .orders
            .find_by_table(&order.table_id)
            .await
            .map_err(AppError::from)?;
        if remaining.iter().any(Order::is_active) {
            return Ok(());
        }

        let table = self
            .db
            .tables
            .find_by_id(&order.table_id)
            .await
            .map_err(AppError::from)?;
        if let Some(mut table) = table
            && table.status == TableStatus::Occupied
        {
            table.status = TableStatus::Available;
            table.clear_occupancy();
            self.db.tables.update(table).await.map_err(AppError::from)?;
            tracing::info!(table_id = %order.table_id, "Table released after settlement");
        }
        Ok(())
    }
}
