//! Report read models
//!
//! Pure derived views over a date range: item frequency, revenue breakdown
//! and order statistics. No invariants of their own; cancelled orders are
//! excluded from revenue and averages.

use crate::db::Database;
use crate::db::repository::ItemFrequencyRow;
use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use shared::error::{AppError, AppResult};
use shared::models::{Order, OrderStatus, PaymentMethod};
use std::collections::BTreeMap;

/// Revenue for one payment method
#[derive(Debug, Clone, Serialize)]
pub struct MethodRevenue {
    pub method: PaymentMethod,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub count: u64,
}

/// Revenue for one calendar day (UTC)
#[derive(Debug, Clone, Serialize)]
pub struct DailyRevenue {
    /// `YYYY-MM-DD`
    pub date: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// Revenue breakdown over a date range
#[derive(Debug, Clone, Serialize)]
pub struct RevenueReport {
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tips: Decimal,
    pub payment_count: u64,
    pub by_method: Vec<MethodRevenue>,
    pub daily: Vec<DailyRevenue>,
}

/// Order count for one status
#[derive(Debug, Clone, Serialize)]
pub struct StatusCount {
    pub status: OrderStatus,
    pub count: u64,
}

/// Order count for one day of the week
#[derive(Debug, Clone, Serialize)]
pub struct DayOfWeekCount {
    pub day: String,
    pub count: u64,
}

/// Order statistics over a date range
#[derive(Debug, Clone, Serialize)]
pub struct OrderStatistics {
    pub count: u64,
    pub by_status: Vec<StatusCount>,
    /// Average order total among settled orders
    #[serde(with = "rust_decimal::serde::float")]
    pub average_amount: Decimal,
    pub by_day_of_week: Vec<DayOfWeekCount>,
}

#[derive(Clone)]
pub struct ReportService {
    db: Database,
}

impl ReportService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// How often each menu item was ordered within `[from, to]`
    pub async fn item_frequency(&self, from: i64, to: i64) -> AppResult<Vec<ItemFrequencyRow>> {
        self.db
            .orders
            .item_frequency(from, to)
            .await
            .map_err(AppError::from)
    }

    /// Revenue breakdown within `[from, to]`
    pub async fn revenue(&self, from: i64, to: i64) -> AppResult<RevenueReport> {
        let totals = self
            .db
            .payments
            .revenue_by_date_range(from, to)
            .await
            .map_err(AppError::from)?;
        let payments = self
            .db
            .payments
            .find_by_date_range(from, to)
            .await
            .map_err(AppError::from)?;

        let mut by_method: Vec<MethodRevenue> =
            [PaymentMethod::Cash, PaymentMethod::Card, PaymentMethod::Mobile]
                .into_iter()
                .map(|method| MethodRevenue {
                    method,
                    amount: Decimal::ZERO,
                    count: 0,
                })
                .collect();
        let mut daily: BTreeMap<String, Decimal> = BTreeMap::new();

        for payment in &payments {
            if let Some(slot) = by_method.iter_mut().find(|m| m.method == payment.method) {
                slot.amount += payment.amount;
                slot.count += 1;
            }
            *daily.entry(day_key(payment.paid_at)).or_insert(Decimal::ZERO) += payment.amount;
        }

        Ok(RevenueReport {
            total: totals.total,
            tips: totals.tips,
            payment_count: totals.count,
            by_method,
            daily: daily
                .into_iter()
                .map(|(date, amount)| DailyRevenue { date, amount })
                .collect(),
        })
    }

    /// Order statistics within `[from, to]`
    pub async fn order_statistics(&self, from: i64, to: i64) -> AppResult<OrderStatistics> {
        let orders = self
            .db
            .orders
            .find_by_date_range(from, to)
            .await
            .map_err(AppError::from)?;

        const STATUSES: [OrderStatus; 6] = [
            OrderStatus::New,
            OrderStatus::InProgress,
            OrderStatus::Done,
            OrderStatus::Delivered,
            OrderStatus::Paid,
            OrderStatus::Cancelled,
        ];
        let by_status: Vec<StatusCount> = STATUSES
            .into_iter()
            .map(|status| StatusCount {
                status,
                count: orders.iter().filter(|o| o.status == status).count() as u64,
            })
            .collect();

        let settled: Vec<&Order> = orders
            .iter()
            .filter(|o| o.status == OrderStatus::Paid)
            .collect();
        let average_amount = if settled.is_empty() {
            Decimal::ZERO
        } else {
            settled.iter().map(|o| o.total()).sum::<Decimal>()
                / Decimal::from(settled.len() as u64)
        };

        let mut by_day: BTreeMap<u32, (String, u64)> = BTreeMap::new();
        for order in orders.iter().filter(|o| o.status != OrderStatus::Cancelled) {
            if let Some(dt) = DateTime::<Utc>::from_timestamp_millis(order.created_at) {
                let slot = by_day
                    .entry(dt.weekday().num_days_from_monday())
                    .or_insert_with(|| (dt.format("%A").to_string(), 0));
                slot.1 += 1;
            }
        }

        Ok(OrderStatistics {
            count: orders.len() as u64,
            by_status,
            average_amount,
            by_day_of_week: by_day
                .into_values()
                .map(|(day, count)| DayOfWeekCount { day, count })
                .collect(),
        })
    }
}

/// `YYYY-MM-DD` bucket key for a millisecond timestamp (UTC)
fn day_key(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
