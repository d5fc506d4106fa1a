//! Service test harness
//!
//! Wires every lifecycle service to a fresh in-memory database. Callers are
//! built per role; seeded entities go through the same services the
//! handlers use.

mod test_payments;
mod test_staff;
mod test_tables;

use crate::auth::CurrentUser;
use crate::db::Database;
use crate::services::{
    MenuService, OrderService, PaymentService, ReportService, StaffService, TableLocks,
    TableService,
};
use rust_decimal::Decimal;
use shared::models::{
    MenuItem, MenuItemCreate, OrderItemInput, Role, Table, TableCreate, TableStatus, TableUpdate,
};
use shared::util::record_id;
use std::sync::Arc;

pub struct TestEnv {
    pub db: Database,
    pub tables: TableService,
    pub orders: OrderService,
    pub payments: PaymentService,
    pub staff: StaffService,
    pub menu: MenuService,
    pub reports: ReportService,
}

pub fn env() -> TestEnv {
    let db = Database::in_memory();
    let locks = Arc::new(TableLocks::new());
    TestEnv {
        tables: TableService::new(db.clone()),
        orders: OrderService::new(db.clone(), locks.clone()),
        payments: PaymentService::new(db.clone(), locks),
        staff: StaffService::new(db.clone()),
        menu: MenuService::new(db.clone()),
        reports: ReportService::new(db.clone()),
        db,
    }
}

/// An authenticated caller of the given role. Callers need not exist as
/// staff rows; the identity context is ephemeral.
pub fn caller(role: Role) -> CurrentUser {
    CurrentUser {
        id: record_id("user"),
        email: format!("{}@test.local", role),
        name: format!("Test {}", role),
        role,
    }
}

pub fn menu_item_create(name: &str, cents: i64) -> MenuItemCreate {
    MenuItemCreate {
        name: name.to_string(),
        description: None,
        price: Decimal::new(cents, 2),
        category: "mains".to_string(),
        available: true,
        is_special: false,
    }
}

pub async fn seed_menu_item(env: &TestEnv, name: &str, cents: i64) -> MenuItem {
    env.menu
        .create(&caller(Role::Manager), menu_item_create(name, cents))
        .await
        .unwrap()
}

pub fn item_input(menu_item: &MenuItem, quantity: u32) -> OrderItemInput {
    OrderItemInput {
        menu_item_id: menu_item.id.clone(),
        quantity,
        price: None,
        notes: None,
    }
}

/// Create table `number` and occupy it with a fresh waiter id.
/// Returns the occupied table.
pub async fn occupied_table(env: &TestEnv, number: u32, waiter_id: &str) -> Table {
    let manager = caller(Role::Manager);
    let table = env
        .tables
        .create(
            &manager,
            TableCreate {
                number,
                capacity: 4,
                floor: 1,
            },
        )
        .await
        .unwrap();

    env.tables
        .update_status(
            &manager,
            &table.id,
            TableUpdate {
                status: Some(TableStatus::Occupied),
                waiter_id: Some(waiter_id.to_string()),
                guest_count: Some(2),
                ..Default::default()
            },
        )
        .await
        .unwrap()
}
