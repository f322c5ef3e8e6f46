use std::fmt;

/// Fixed role vocabulary
///
/// Role rows are created lazily, but the set of names the application
/// grants is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RoleName {
    SuperAdmin,
    Admin,
    Viewer,
}

impl RoleName {
    pub const ALL: [RoleName; 3] = [RoleName::SuperAdmin, RoleName::Admin, RoleName::Viewer];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "SuperAdmin",
            Self::Admin => "Admin",
            Self::Viewer => "Viewer",
        }
    }

    /// Parse an exact role name; unknown names are rejected at the API
    /// boundary before reaching the reconciler.
    pub fn parse(name: &str) -> Option<RoleName> {
        match name {
            "SuperAdmin" => Some(Self::SuperAdmin),
            "Admin" => Some(Self::Admin),
            "Viewer" => Some(Self::Viewer),
            _ => None,
        }
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
