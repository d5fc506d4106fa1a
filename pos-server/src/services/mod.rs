//! Lifecycle services
//!
//! One component per domain module:
//! - [`TableService`]: occupancy state machine
//! - [`OrderService`]: order state machine and item attachment
//! - [`PaymentService`]: settlement and its cascade
//! - [`StaffService`]: account provisioning hierarchy and login
//! - [`MenuService`]: catalog CRUD
//! - [`ReportService`]: derived read models
//!
//! Services own every business rule; handlers stay thin and repositories
//! stay dumb. All role checks go through [`crate::auth::policy`].

pub mod locks;
pub mod menu_service;
pub mod order_service;
pub mod payment_service;
pub mod report_service;
pub mod staff_service;
pub mod table_service;

#[cfg(test)]
mod tests;

pub use locks::TableLocks;
pub use menu_service::MenuService;
pub use order_service::{OrderFilter, OrderService};
pub use payment_service::{PaymentFilter, PaymentService};
pub use report_service::{
    DailyRevenue, DayOfWeekCount, MethodRevenue, OrderStatistics, ReportService, RevenueReport,
    StatusCount,
};
pub use staff_service::StaffService;
pub use table_service::{TableFilter, TableService};
