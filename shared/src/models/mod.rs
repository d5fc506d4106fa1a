//! Domain models
//!
//! Entities are plain serde structs; every status-like field is a closed
//! enumeration so that new states cannot be introduced (or matched) silently.

pub mod menu_item;
pub mod order;
pub mod payment;
pub mod role;
pub mod staff;
pub mod table;

pub use menu_item::{MenuItem, MenuItemCreate, MenuItemUpdate};
pub use order::{
    ItemStatus, Order, OrderCreate, OrderItem, OrderItemInput, OrderItemPatch, OrderStatus,
};
pub use payment::{Payment, PaymentMethod, SettleRequest};
pub use role::Role;
pub use staff::{StaffCreate, StaffRecord, StaffUpdate, User};
pub use table::{Table, TableCreate, TableStatus, TableUpdate};
