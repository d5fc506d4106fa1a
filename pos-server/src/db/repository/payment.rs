//! Payment repository

use crate::db::RepoResult;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::Payment;

/// Aggregate row for the revenue-by-date-range query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueTotals {
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tips: Decimal,
    pub count: u64,
}

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn insert(&self, payment: Payment) -> RepoResult<Payment>;

    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Payment>>;

    async fn find_by_order(&self, order_id: &str) -> RepoResult<Vec<Payment>>;

    /// Payments settled within `[from, to]`, epoch milliseconds
    async fn find_by_date_range(&self, from: i64, to: i64) -> RepoResult<Vec<Payment>>;

    /// Summed revenue and tips within `[from, to]`
    async fn revenue_by_date_range(&self, from: i64, to: i64) -> RepoResult<RevenueTotals>;
}
