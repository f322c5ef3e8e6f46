use std::fmt;

/// Closed set of auditable actions
///
/// Kept as an enum rather than free text so the trail stays
/// machine-verifiable; `as_str` yields the canonical string stored in the
/// `action` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    Login,
    Logout,
    Register,
    RegisterUser,
    UpdateUserRole,
    DeleteUser,
    CreateMovie,
    UpdateMovie,
    DeleteMovie,
}

impl AuditAction {
    /// Canonical string stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Logout => "Logout",
            Self::Register => "Register",
            Self::RegisterUser => "RegisterUser",
            Self::UpdateUserRole => "UpdateUserRole",
            Self::DeleteUser => "DeleteUser",
            Self::CreateMovie => "CreateMovie",
            Self::UpdateMovie => "UpdateMovie",
            Self::DeleteMovie => "DeleteMovie",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of entity an audit record describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Movie,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Movie => "Movie",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
