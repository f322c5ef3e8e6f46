use std::env;

use thiserror::Error;

/// Application settings, loaded once at startup and passed explicitly to
/// the components that need them
#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_addr: String,
    pub database_url: String,
    pub jwt_secret: String,
    pub password_pepper: String,
    /// Bootstrap SuperAdmin created at seed time when no SuperAdmin exists
    pub superadmin_email: Option<String>,
    pub superadmin_password: Option<String>,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Required environment variable {0} is not set")]
    MissingVar(&'static str),
}

impl Settings {
    /// Load settings from environment variables
    ///
    /// `JWT_SECRET` and `PASSWORD_PEPPER` are required; everything else
    /// has a development default.
    pub fn from_env() -> Result<Self, SettingsError> {
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://movievault.db?mode=rwc".to_string());

        let jwt_secret =
            env::var("JWT_SECRET").map_err(|_| SettingsError::MissingVar("JWT_SECRET"))?;

        let password_pepper = env::var("PASSWORD_PEPPER")
            .map_err(|_| SettingsError::MissingVar("PASSWORD_PEPPER"))?;

        let superadmin_email = env::var("SUPERADMIN_EMAIL").ok();
        let superadmin_password = env::var("SUPERADMIN_PASSWORD").ok();

        Ok(Self {
            bind_addr,
            database_url,
            jwt_secret,
            password_pepper,
            superadmin_email,
            superadmin_password,
        })
    }
}
