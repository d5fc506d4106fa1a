//! Client-facing auth DTOs

use crate::models::{Role, StaffRecord};
use serde::{Deserialize, Serialize};

/// Login channel restriction
///
/// `Admin` succeeds only for actual admin accounts; `Staff` explicitly
/// excludes admin accounts from logging in through that channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleHint {
    Admin,
    Staff,
}

/// Login request data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_hint: Option<RoleHint>,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: StaffRecord,
}

/// Register request data (admin-only surface)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}
