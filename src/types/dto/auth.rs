use poem_openapi::Object;
use serde::{Deserialize, Serialize};

/// Request model for user login
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Email for authentication
    pub email: String,

    /// Password for authentication
    pub password: String,
}

/// Request model for self-service registration
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,

    #[oai(validator(max_length = 100))]
    pub first_name: String,

    #[oai(validator(max_length = 100))]
    pub last_name: String,

    #[oai(validator(min_length = 8))]
    pub password: String,
}

/// Response model containing the access token
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// JWT access token for API authentication
    pub access_token: String,

    /// Token type (always "Bearer")
    pub token_type: String,

    /// Number of seconds until the access token expires
    pub expires_in: i64,
}

/// Response model for whoami endpoint
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct WhoAmIResponse {
    pub user_id: i32,
    pub email: String,
    /// Role names held at token issue time
    pub roles: Vec<String>,
    /// Token expiration time (Unix timestamp)
    pub expires_at: i64,
}
