//! Staff roles
//!
//! Roles form a tiered hierarchy used for coarse "is at least" checks.
//! `Waiter` and `Chef` share a tier on purpose: they are lateral roles with
//! disjoint duties, and neither substitutes for the other. The fine-grained
//! rules live in the server's policy module; this type only carries the
//! ordering data.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Staff role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Host,
    Waiter,
    Chef,
    Manager,
    Owner,
    Admin,
}

impl Role {
    /// All roles, lowest tier first
    pub const ALL: [Role; 6] = [
        Role::Host,
        Role::Waiter,
        Role::Chef,
        Role::Manager,
        Role::Owner,
        Role::Admin,
    ];

    /// Hierarchy tier. Waiter and chef intentionally share tier 2.
    pub fn tier(&self) -> u8 {
        match self {
            Role::Host => 1,
            Role::Waiter | Role::Chef => 2,
            Role::Manager => 3,
            Role::Owner => 4,
            Role::Admin => 5,
        }
    }

    /// Whether this is the super-role bypassing all permission checks
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Host => "host",
            Role::Waiter => "waiter",
            Role::Chef => "chef",
            Role::Manager => "manager",
            Role::Owner => "owner",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised when parsing an unrecognized role name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "host" => Ok(Role::Host),
            "waiter" => Ok(Role::Waiter),
            "chef" => Ok(Role::Chef),
            "manager" => Ok(Role::Manager),
            "owner" => Ok(Role::Owner),
            "admin" => Ok(Role::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}
