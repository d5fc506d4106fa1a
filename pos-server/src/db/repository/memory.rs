//! In-memory repository engine
//!
//! DashMap-backed implementations of the repository traits. This is the
//! engine the server runs on out of the box and the one the test suites
//! drive; a persistent engine implements the same traits behind the same
//! `Database` handle.

use super::{
    ItemFrequencyRow, MenuItemRepository, OrderRepository, PaymentRepository, RevenueTotals,
    TableRepository, UserRepository,
};
use crate::db::{RepoError, RepoResult};
use async_trait::async_trait;
use dashmap::DashMap;
use rust_decimal::Decimal;
use shared::models::{MenuItem, Order, Payment, Role, Table, User};
use shared::models::OrderStatus;
use std::collections::HashMap;

// ==================== Users ====================

#[derive(Default)]
pub struct MemoryUserRepository {
    rows: DashMap<String, User>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn insert(&self, user: User) -> RepoResult<User> {
        if self
            .rows
            .iter()
            .any(|e| e.value().email.eq_ignore_ascii_case(&user.email))
        {
            return Err(RepoError::Duplicate(format!(
                "Email '{}' already registered",
                user.email
            )));
        }
        self.rows.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> RepoResult<User> {
        if !self.rows.contains_key(&user.id) {
            return Err(RepoError::NotFound(format!("User {} not found", user.id)));
        }
        self.rows.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        Ok(self.rows.get(id).map(|e| e.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self
            .rows
            .iter()
            .find(|e| e.value().email.eq_ignore_ascii_case(email))
            .map(|e| e.value().clone()))
    }

    async fn find_by_role(&self, role: Role) -> RepoResult<Vec<User>> {
        let mut users: Vec<User> = self
            .rows
            .iter()
            .filter(|e| e.value().role == role)
            .map(|e| e.value().clone())
            .collect();
        users.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(users)
    }

    async fn find_all(&self) -> RepoResult<Vec<User>> {
        let mut users: Vec<User> = self.rows.iter().map(|e| e.value().clone()).collect();
        users.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(users)
    }

    async fn count(&self) -> RepoResult<usize> {
        Ok(self.rows.len())
    }
}

// ==================== Tables ====================

#[derive(Default)]
pub struct MemoryTableRepository {
    rows: DashMap<String, Table>,
}

impl MemoryTableRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TableRepository for MemoryTableRepository {
    async fn insert(&self, table: Table) -> RepoResult<Table> {
        if self.rows.iter().any(|e| e.value().number == table.number) {
            return Err(RepoError::Duplicate(format!(
                "Table number {} already in use",
                table.number
            )));
        }
        self.rows.insert(table.id.clone(), table.clone());
        Ok(table)
    }

    async fn update(&self, table: Table) -> RepoResult<Table> {
        if !self.rows.contains_key(&table.id) {
            return Err(RepoError::NotFound(format!(
                "Table {} not found",
                table.id
            )));
        }
        self.rows.insert(table.id.clone(), table.clone());
        Ok(table)
    }

    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Table>> {
        Ok(self.rows.get(id).map(|e| e.value().clone()))
    }

    async fn find_by_number(&self, number: u32) -> RepoResult<Option<Table>> {
        Ok(self
            .rows
            .iter()
            .find(|e| e.value().number == number)
            .map(|e| e.value().clone()))
    }

    async fn find_all(&self) -> RepoResult<Vec<Table>> {
        let mut tables: Vec<Table> = self.rows.iter().map(|e| e.value().clone()).collect();
        tables.sort_by_key(|t| t.number);
        Ok(tables)
    }
}

// ==================== Menu items ====================

#[derive(Default)]
pub struct MemoryMenuItemRepository {
    rows: DashMap<String, MenuItem>,
}

impl MemoryMenuItemRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MenuItemRepository for MemoryMenuItemRepository {
    async fn insert(&self, item: MenuItem) -> RepoResult<MenuItem> {
        self.rows.insert(item.id.clone(), item.clone());
        Ok(item)
    }

    async fn update(&self, item: MenuItem) -> RepoResult<MenuItem> {
        if !self.rows.contains_key(&item.id) {
            return Err(RepoError::NotFound(format!(
                "Menu item {} not found",
                item.id
            )));
        }
        self.rows.insert(item.id.clone(), item.clone());
        Ok(item)
    }

    async fn delete(&self, id: &str) -> RepoResult<bool> {
        Ok(self.rows.remove(id).is_some())
    }

    async fn find_by_id(&self, id: &str) -> RepoResult<Option<MenuItem>> {
        Ok(self.rows.get(id).map(|e| e.value().clone()))
    }

    async fn find_all(&self) -> RepoResult<Vec<MenuItem>> {
        let mut items: Vec<MenuItem> = self.rows.iter().map(|e| e.value().clone()).collect();
        items.sort_by(|a, b| a.category.cmp(&b.category).then(a.name.cmp(&b.name)));
        Ok(items)
    }

    async fn find_by_category(&self, category: &str) -> RepoResult<Vec<MenuItem>> {
        let mut items: Vec<MenuItem> = self
            .rows
            .iter()
            .filter(|e| e.value().category == category)
            .map(|e| e.value().clone())
            .collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }
}

// ==================== Orders ====================

#[derive(Default)]
pub struct MemoryOrderRepository {
    rows: DashMap<String, Order>,
}

impl MemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted(&self, mut orders: Vec<Order>) -> Vec<Order> {
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        orders
    }
}

#[async_trait]
impl OrderRepository for MemoryOrderRepository {
    async fn insert(&self, order: Order) -> RepoResult<Order> {
        self.rows.insert(order.id.clone(), order.clone());
        Ok(order)
    }

    async fn update(&self, order: Order) -> RepoResult<Order> {
        if !self.rows.contains_key(&order.id) {
            return Err(RepoError::NotFound(format!(
                "Order {} not found",
                order.id
            )));
        }
        self.rows.insert(order.id.clone(), order.clone());
        Ok(order)
    }

    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        Ok(self.rows.get(id).map(|e| e.value().clone()))
    }

    async fn find_all(&self) -> RepoResult<Vec<Order>> {
        Ok(self.sorted(self.rows.iter().map(|e| e.value().clone()).collect()))
    }

    async fn find_by_table(&self, table_id: &str) -> RepoResult<Vec<Order>> {
        Ok(self.sorted(
            self.rows
                .iter()
                .filter(|e| e.value().table_id == table_id)
                .map(|e| e.value().clone())
                .collect(),
        ))
    }

    async fn find_active_by_table(&self, table_id: &str) -> RepoResult<Option<Order>> {
        let mut active: Vec<Order> = self
            .rows
            .iter()
            .filter(|e| e.value().table_id == table_id && e.value().is_active())
            .map(|e| e.value().clone())
            .collect();
        active.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(active.into_iter().next())
    }

    async fn find_by_status(&self, status: OrderStatus) -> RepoResult<Vec<Order>> {
        Ok(self.sorted(
            self.rows
                .iter()
                .filter(|e| e.value().status == status)
                .map(|e| e.value().clone())
                .collect(),
        ))
    }

    async fn find_by_waiter(&self, waiter_id: &str) -> RepoResult<Vec<Order>> {
        Ok(self.sorted(
            self.rows
                .iter()
                .filter(|e| e.value().waiter_id == waiter_id)
                .map(|e| e.value().clone())
                .collect(),
        ))
    }

    async fn find_by_date_range(&self, from: i64, to: i64) -> RepoResult<Vec<Order>> {
        Ok(self.sorted(
            self.rows
                .iter()
                .filter(|e| (from..=to).contains(&e.value().created_at))
                .map(|e| e.value().clone())
                .collect(),
        ))
    }

    async fn item_frequency(&self, from: i64, to: i64) -> RepoResult<Vec<ItemFrequencyRow>> {
        // menu_item_id -> (name, orders it appeared on, total quantity)
        let mut acc: HashMap<String, (String, u64, u64)> = HashMap::new();

        for entry in self.rows.iter() {
            let order = entry.value();
            if order.status == OrderStatus::Cancelled
                || !(from..=to).contains(&order.created_at)
            {
                continue;
            }
            let mut seen_in_order: Vec<&str> = Vec::new();
            for item in &order.items {
                let slot = acc
                    .entry(item.menu_item_id.clone())
                    .or_insert_with(|| (item.name.clone(), 0, 0));
                if !seen_in_order.contains(&item.menu_item_id.as_str()) {
                    slot.1 += 1;
                    seen_in_order.push(&item.menu_item_id);
                }
                slot.2 += u64::from(item.quantity);
            }
        }

        let mut rows: Vec<ItemFrequencyRow> = acc
            .into_iter()
            .map(|(menu_item_id, (name, orders, quantity))| ItemFrequencyRow {
                menu_item_id,
                name,
                orders,
                quantity,
            })
            .collect();
        rows.sort_by(|a, b| b.quantity.cmp(&a.quantity).then(a.name.cmp(&b.name)));
        Ok(rows)
    }
}

// ==================== Payments ====================

#[derive(Default)]
pub struct MemoryPaymentRepository {
    rows: DashMap<String, Payment>,
}

impl MemoryPaymentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentRepository for MemoryPaymentRepository {
    async fn insert(&self, payment: Payment) -> RepoResult<Payment> {
        self.rows.insert(payment.id.clone(), payment.clone());
        Ok(payment)
    }

    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Payment>> {
        Ok(self.rows.get(id).map(|e| e.value().clone()))
    }

    async fn find_by_order(&self, order_id: &str) -> RepoResult<Vec<Payment>> {
        let mut payments: Vec<Payment> = self
            .rows
            .iter()
            .filter(|e| e.value().order_id == order_id)
            .map(|e| e.value().clone())
            .collect();
        payments.sort_by_key(|p| p.paid_at);
        Ok(payments)
    }

    async fn find_by_date_range(&self, from: i64, to: i64) -> RepoResult<Vec<Payment>> {
        let mut payments: Vec<Payment> = self
            .rows
            .iter()
            .filter(|e| (from..=to).contains(&e.value().paid_at))
            .map(|e| e.value().clone())
            .collect();
        payments.sort_by_key(|p| p.paid_at);
        Ok(payments)
    }

    async fn revenue_by_date_range(&self, from: i64, to: i64) -> RepoResult<RevenueTotals> {
        let mut totals = RevenueTotals {
            total: Decimal::ZERO,
            tips: Decimal::ZERO,
            count: 0,
        };
        for entry in self.rows.iter() {
            let payment = entry.value();
            if (from..=to).contains(&payment.paid_at) {
                totals.total += payment.amount;
                totals.tips += payment.tip;
                totals.count += 1;
            }
        }
        Ok(totals)
    }
}
