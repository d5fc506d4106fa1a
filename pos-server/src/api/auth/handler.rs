//! Authentication handlers
//!
//! Login, registration, and current-identity lookup.

use axum::{Extension, Json, extract::State};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::services::StaffService;
use shared::client::{LoginRequest, LoginResponse, RegisterRequest};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{StaffCreate, StaffRecord};

/// POST /api/auth/login - verify credentials and issue a token
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let service = StaffService::new(state.get_db());
    let account = service
        .login(&req.email, &req.password, req.role_hint)
        .await?;

    let token = state
        .get_jwt_service()
        .generate_token(&account)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    Ok(Json(LoginResponse {
        token,
        user: account.into(),
    }))
}

/// POST /api/auth/register - provision an account (admin-tier callers)
pub async fn register(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<Json<StaffRecord>> {
    let service = StaffService::new(state.get_db());
    let created = service
        .register(
            &user,
            StaffCreate {
                name: req.name,
                email: req.email,
                password: req.password,
                role: req.role,
            },
        )
        .await?;
    Ok(Json(created))
}

/// GET /api/auth/me - current identity, refreshed from the store
pub async fn me(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<StaffRecord>> {
    let account = state
        .get_db()
        .users
        .find_by_id(&user.id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::new(ErrorCode::StaffNotFound))?;
    Ok(Json(account.into()))
}

/// POST /api/auth/logout - stateless; logs the event for the audit trail
pub async fn logout(Extension(user): Extension<CurrentUser>) -> AppResult<Json<()>> {
    tracing::info!(
        user_id = %user.id,
        email = %user.email,
        "User logged out"
    );
    Ok(Json(()))
}
