use crate::errors::internal::TokenError;
use crate::services::TokenService;
use crate::types::internal::auth::Claims;
use crate::types::internal::roles::RoleName;

/// Validate a bearer token and return its claims
///
/// Every endpoint group maps the `TokenError` into its own 401 response
/// type, so this stays response-type agnostic.
pub fn claims_from_token(token_service: &TokenService, token: &str) -> Result<Claims, TokenError> {
    token_service.validate(token)
}

/// Parse the subject claim back into a user id, rejecting tokens whose
/// subject is not numeric
pub fn subject_id(claims: &Claims) -> Result<i32, TokenError> {
    claims
        .user_id()
        .ok_or_else(|| TokenError::Invalid(format!("non-numeric subject: {}", claims.sub)))
}

/// True when the claims carry at least one of the given roles
pub fn holds_any(claims: &Claims, roles: &[RoleName]) -> bool {
    roles.iter().any(|role| claims.has_role(*role))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(sub: &str, roles: &[&str]) -> Claims {
        Claims {
            sub: sub.to_string(),
            email: "user@movievault.test".to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            exp: 0,
            iat: 0,
            jti: "test".to_string(),
        }
    }

    #[test]
    fn subject_id_parses_numeric_subjects() {
        assert_eq!(subject_id(&claims("17", &[])).unwrap(), 17);
        assert!(subject_id(&claims("abc", &[])).is_err());
    }

    #[test]
    fn holds_any_matches_role_names() {
        let c = claims("1", &["Admin"]);
        assert!(holds_any(&c, &[RoleName::Admin, RoleName::SuperAdmin]));
        assert!(!holds_any(&c, &[RoleName::SuperAdmin]));
    }
}
