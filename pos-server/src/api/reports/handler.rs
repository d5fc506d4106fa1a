//! Report API handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::ItemFrequencyRow;
use crate::services::{OrderStatistics, ReportService, RevenueReport};
use shared::error::AppResult;
use shared::util::now_millis;

/// Date range query, epoch milliseconds. Defaults to all-time.
#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    pub from: Option<i64>,
    pub to: Option<i64>,
}

impl RangeQuery {
    fn bounds(&self) -> (i64, i64) {
        (self.from.unwrap_or(0), self.to.unwrap_or_else(now_millis))
    }
}

/// GET /api/reports/item-frequency
pub async fn item_frequency(
    State(state): State<ServerState>,
    Query(range): Query<RangeQuery>,
) -> AppResult<Json<Vec<ItemFrequencyRow>>> {
    let (from, to) = range.bounds();
    let service = ReportService::new(state.get_db());
    Ok(Json(service.item_frequency(from, to).await?))
}

/// GET /api/reports/revenue
pub async fn revenue(
    State(state): State<ServerState>,
    Query(range): Query<RangeQuery>,
) -> AppResult<Json<RevenueReport>> {
    let (from, to) = range.bounds();
    let service = ReportService::new(state.get_db());
    Ok(Json(service.revenue(from, to).await?))
}

/// GET /api/reports/statistics
pub async fn order_statistics(
    State(state): State<ServerState>,
    Query(range): Query<RangeQuery>,
) -> AppResult<Json<OrderStatistics>> {
    let (from, to) = range.bounds();
    let service = ReportService::new(state.get_db());
    Ok(Json(service.order_statistics(from, to).await?))
}
