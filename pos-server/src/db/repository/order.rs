//! Order repository

use crate::db::RepoResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::models::{Order, OrderStatus};

/// Aggregate row for the item-order-frequency query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemFrequencyRow {
    pub menu_item_id: String,
    pub name: String,
    /// Number of orders the item appeared on
    pub orders: u64,
    /// Total quantity across those orders
    pub quantity: u64,
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn insert(&self, order: Order) -> RepoResult<Order>;

    /// Replace an existing order by id
    async fn update(&self, order: Order) -> RepoResult<Order>;

    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>>;

    /// All orders, newest first
    async fn find_all(&self) -> RepoResult<Vec<Order>>;

    async fn find_by_table(&self, table_id: &str) -> RepoResult<Vec<Order>>;

    /// The at-most-one order holding the table (status in the active set)
    async fn find_active_by_table(&self, table_id: &str) -> RepoResult<Option<Order>>;

    async fn find_by_status(&self, status: OrderStatus) -> RepoResult<Vec<Order>>;

    async fn find_by_waiter(&self, waiter_id: &str) -> RepoResult<Vec<Order>>;

    /// Orders created within `[from, to]`, epoch milliseconds
    async fn find_by_date_range(&self, from: i64, to: i64) -> RepoResult<Vec<Order>>;

    /// How often each menu item was ordered within `[from, to]`,
    /// most-ordered first. Cancelled orders are excluded.
    async fn item_frequency(&self, from: i64, to: i64) -> RepoResult<Vec<ItemFrequencyRow>>;
}
