//! Repository traits
//!
//! One trait per entity collection: CRUD plus the filtered queries and the
//! two aggregate queries the read models need. Implementations must not
//! enforce business rules beyond storage-level integrity; lifecycle rules
//! belong to the services.

pub mod memory;
pub mod menu_item;
pub mod order;
pub mod payment;
pub mod table;
pub mod user;

pub use menu_item::MenuItemRepository;
pub use order::{ItemFrequencyRow, OrderRepository};
pub use payment::{PaymentRepository, RevenueTotals};
pub use table::TableRepository;
pub use user::UserRepository;

// =============================================================================
// ID Convention: "kind:uuid" strings throughout (e.g. "order:9f3c...").
// Repositories treat ids as fully opaque; the prefix is informational only.
// =============================================================================
