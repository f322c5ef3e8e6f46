use chrono::{DateTime, Utc};
use poem_openapi::Object;

use crate::types::db::user;

/// The signed-in user's own profile
#[derive(Object, Debug)]
pub struct ProfileResponse {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<user::Model> for ProfileResponse {
    fn from(u: user::Model) -> Self {
        Self {
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
            created_at: u.created_at,
            last_login_at: u.last_login_at,
        }
    }
}

/// Profile name changes; email is not editable here
#[derive(Object, Debug)]
pub struct UpdateProfileRequest {
    #[oai(validator(max_length = 100))]
    pub first_name: String,

    #[oai(validator(max_length = 100))]
    pub last_name: String,
}
