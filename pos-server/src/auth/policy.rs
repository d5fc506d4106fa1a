//! Role policy engine
//!
//! Single home for every authorization rule in the backend: the tier
//! hierarchy, the per-role permission matrix, the staff provisioning
//! hierarchy, and the named per-action predicates that route handlers and
//! services call instead of hand-rolling role lists.
//!
//! Policy checks never touch entity state; a denied check returns an
//! [`AppError`] naming the missing permission or role and mutates nothing.

use crate::auth::CurrentUser;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{OrderStatus, PaymentMethod, Role};

/// Permission tags gating resource groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    Tables,
    Menu,
    Orders,
    Payments,
    Staff,
    Reports,
    AssignTables,
    ViewStaff,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::Tables => "tables",
            Permission::Menu => "menu",
            Permission::Orders => "orders",
            Permission::Payments => "payments",
            Permission::Staff => "staff",
            Permission::Reports => "reports",
            Permission::AssignTables => "assign_tables",
            Permission::ViewStaff => "view_staff",
        }
    }
}

/// Per-role permission sets. Admin is handled as a wildcard in
/// [`has_permission`] and deliberately has no entry here.
fn permissions(role: Role) -> &'static [Permission] {
    use Permission::*;
    match role {
        Role::Host => &[Tables, Orders, ViewStaff],
        Role::Waiter => &[Tables, Orders, Payments, ViewStaff],
        Role::Chef => &[Orders],
        Role::Manager | Role::Owner => &[
            Tables,
            Menu,
            Orders,
            Payments,
            Staff,
            Reports,
            AssignTables,
            ViewStaff,
        ],
        Role::Admin => &[],
    }
}

/// Check whether a role holds a permission tag. Admin satisfies everything.
pub fn has_permission(role: Role, permission: Permission) -> bool {
    if role.is_admin() {
        return true;
    }
    permissions(role).contains(&permission)
}

/// Coarse hierarchy check with lateral-role overrides.
///
/// Tier comparison is the fallback; the explicit rules come first:
/// - admin passes everything
/// - a requirement of exactly `chef` is lateral-exclusive: waiter does not
///   satisfy it despite the equal tier (nor does manager tier alone — kitchen
///   overrides are expressed through [`may_advance_to`], not here)
/// - a requirement of `waiter` is satisfied by waiter or manager-tier and
///   above, but not by chef (same tier, disjoint duties)
pub fn is_at_least(role: Role, required: Role) -> bool {
    if role.is_admin() {
        return true;
    }
    match required {
        Role::Chef => role == Role::Chef,
        Role::Waiter => role == Role::Waiter || role.tier() >= Role::Manager.tier(),
        _ => role.tier() >= required.tier(),
    }
}

/// Staff provisioning hierarchy, distinct from the general permission set.
///
/// Who may create/update/deactivate an account holding `target`:
/// - admin manages any role
/// - owner manages manager and below, never another owner or admin
/// - manager manages waiter, host and chef only
/// - nobody else provisions staff
pub fn can_manage_role(acting: Role, target: Role) -> bool {
    match acting {
        Role::Admin => true,
        Role::Owner => matches!(
            target,
            Role::Manager | Role::Waiter | Role::Host | Role::Chef
        ),
        Role::Manager => matches!(target, Role::Waiter | Role::Host | Role::Chef),
        _ => false,
    }
}

/// Kitchen transition gate: moving an order into `InProgress` or `Done`
/// requires the chef role or manager tier and above. Other statuses fall
/// under the general orders permission.
pub fn may_advance_to(role: Role, status: OrderStatus) -> bool {
    match status {
        OrderStatus::InProgress | OrderStatus::Done => {
            is_at_least(role, Role::Chef) || is_at_least(role, Role::Manager)
        }
        OrderStatus::Cancelled => is_at_least(role, Role::Manager),
        _ => has_permission(role, Permission::Orders),
    }
}

/// Settlement gate: waiter-tier callers may only take cash; manager tier and
/// above may take any method.
pub fn may_settle_with(role: Role, method: PaymentMethod) -> bool {
    if is_at_least(role, Role::Manager) {
        return true;
    }
    has_permission(role, Permission::Payments) && method == PaymentMethod::Cash
}

// ==================== Error-returning helpers ====================

/// Require a permission tag, or fail with the missing tag named
pub fn require_permission(user: &CurrentUser, permission: Permission) -> AppResult<()> {
    if has_permission(user.role, permission) {
        Ok(())
    } else {
        Err(AppError::permission_denied(format!(
            "Permission denied: {}",
            permission.as_str()
        )))
    }
}

/// Require a minimum role, or fail with the required role named
pub fn require_at_least(user: &CurrentUser, required: Role) -> AppResult<()> {
    if is_at_least(user.role, required) {
        Ok(())
    } else {
        Err(AppError::with_message(
            ErrorCode::RoleRequired,
            format!("Requires role: {}", required),
        ))
    }
}

/// Require provisioning authority over a target role
pub fn require_manage_role(user: &CurrentUser, target: Role) -> AppResult<()> {
    if can_manage_role(user.role, target) {
        Ok(())
    } else {
        Err(AppError::permission_denied(format!(
            "Role {} may not manage {} accounts",
            user.role, target
        )))
    }
}
