//! Dining table model

use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Table occupancy state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableStatus {
    Available,
    Occupied,
    Reserved,
    Cleaning,
}

impl fmt::Display for TableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TableStatus::Available => "available",
            TableStatus::Occupied => "occupied",
            TableStatus::Reserved => "reserved",
            TableStatus::Cleaning => "cleaning",
        };
        f.write_str(s)
    }
}

/// Dining table entity
///
/// Invariants maintained by the table lifecycle:
/// - `status == Occupied` implies `waiter_id` is set
/// - `status == Available` implies waiter, guest count and reservation
///   fields are all cleared
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    pub id: String,
    /// Unique among all tables
    pub number: u32,
    pub capacity: u32,
    pub floor: u32,
    pub status: TableStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waiter_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservation_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservation_phone: Option<String>,
    /// Reservation time, epoch milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservation_time: Option<i64>,
    pub created_at: i64,
}

impl Table {
    /// Clear everything a vacated table must not carry over
    pub fn clear_occupancy(&mut self) {
        self.waiter_id = None;
        self.guest_count = None;
        self.reservation_name = None;
        self.reservation_phone = None;
        self.reservation_time = None;
    }
}

/// Create table payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TableCreate {
    pub number: u32,
    #[validate(range(min = 1, message = "capacity must be at least 1"))]
    pub capacity: u32,
    pub floor: u32,
}

/// Status/occupancy update payload
///
/// Fields not present are left untouched, except that a transition to
/// `Available` clears occupancy fields server-side regardless of the patch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TableStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waiter_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservation_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservation_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservation_time: Option<i64>,
}
