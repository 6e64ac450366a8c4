//! DTOs for the role dashboards.

use serde::{Deserialize, Serialize};

use super::auth::UserView;

/// Dashboard for any signed-in account.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserDashboardResponse {
    pub greeting: String,
    pub user: UserView,
}

/// Dashboard for administrators: the caller plus every account.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AdminDashboardResponse {
    pub greeting: String,
    pub user: UserView,
    pub total: usize,
    pub users: Vec<UserView>,
}
