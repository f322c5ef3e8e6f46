use serde::{Deserialize, Serialize};

use crate::types::internal::roles::RoleName;

/// JWT claims carried by access tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id as a string
    pub sub: String,
    pub email: String,
    /// Role names held at token issue time
    pub roles: Vec<String>,
    /// Expiration (Unix timestamp)
    pub exp: i64,
    /// Issued-at (Unix timestamp)
    pub iat: i64,
    /// Token id
    pub jti: String,
}

impl Claims {
    /// Parse the subject claim back into a user id
    pub fn user_id(&self) -> Option<i32> {
        self.sub.parse().ok()
    }

    pub fn has_role(&self, role: RoleName) -> bool {
        self.roles.iter().any(|r| r == role.as_str())
    }
}

/// A re-authenticated privileged actor, resolved by the guard immediately
/// before a destructive operation
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: i32,
    pub email: String,
    pub roles: Vec<String>,
}

impl Actor {
    pub fn has_role(&self, role: RoleName) -> bool {
        self.roles.iter().any(|r| r == role.as_str())
    }
}
