use chrono::{DateTime, Utc};
use poem_openapi::Object;

use crate::services::UserOverview;

/// One row of the user-management overview grid
#[derive(Object, Debug)]
pub struct UserOverviewResponse {
    pub id: i32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub roles: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<UserOverview> for UserOverviewResponse {
    fn from(u: UserOverview) -> Self {
        Self {
            id: u.id,
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
            roles: u.roles,
            created_at: u.created_at,
            last_login_at: u.last_login_at,
        }
    }
}

/// Request model for admin-initiated registration
#[derive(Object, Debug)]
pub struct RegisterUserRequest {
    pub email: String,

    #[oai(validator(max_length = 100))]
    pub first_name: String,

    #[oai(validator(max_length = 100))]
    pub last_name: String,

    #[oai(validator(min_length = 8))]
    pub password: String,

    /// Role names to grant at creation
    pub roles: Vec<String>,
}

/// Current and available roles for the role-edit form
#[derive(Object, Debug)]
pub struct UserRolesResponse {
    pub user_id: i32,
    pub email: String,
    pub current_roles: Vec<String>,
    pub available_roles: Vec<String>,
}

/// Role update with SuperAdmin confirmation credentials
///
/// The confirmation is re-verified by the privileged guard; the session
/// token alone never authorizes this.
#[derive(Object, Debug)]
pub struct UpdateRolesRequest {
    /// Target role set; the user ends up with exactly these
    pub roles: Vec<String>,

    pub super_admin_email: String,
    pub super_admin_password: String,
}

/// User deletion with SuperAdmin confirmation credentials
#[derive(Object, Debug)]
pub struct DeleteUserRequest {
    pub super_admin_email: String,
    pub super_admin_password: String,
}

/// Grants and revocations applied by a role update
#[derive(Object, Debug)]
pub struct RoleUpdateResponse {
    pub user_id: i32,
    pub granted: Vec<String>,
    pub revoked: Vec<String>,
}
