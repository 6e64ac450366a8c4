//! Handlers for the role dashboards.

use axum::{Extension, Json, extract::State};

use crate::api::dto::dashboard::{AdminDashboardResponse, UserDashboardResponse};
use crate::api::middleware::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Dashboard for any signed-in account.
///
/// # Endpoint
///
/// `GET /api/user/dashboard` (Bearer token required)
pub async fn user_dashboard_handler(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Json<UserDashboardResponse> {
    Json(UserDashboardResponse {
        greeting: format!("Welcome, {}", user.username),
        user: user.into(),
    })
}

/// Dashboard for administrators, listing every account.
///
/// # Endpoint
///
/// `GET /api/admin/dashboard` (Bearer token of an admin required)
///
/// # Errors
///
/// Returns 403 for non-admin accounts (see
/// [`crate::api::middleware::auth::require_admin`]).
pub async fn admin_dashboard_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<AdminDashboardResponse>, AppError> {
    let users = state.user_service.list_users().await?;

    Ok(Json(AdminDashboardResponse {
        greeting: format!("Welcome, {}", user.username),
        user: user.into(),
        total: users.len(),
        users: users.into_iter().map(Into::into).collect(),
    }))
}
