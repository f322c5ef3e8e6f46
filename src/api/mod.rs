// API layer - poem-openapi endpoint groups
pub mod audit;
pub mod auth;
pub mod health;
pub mod helpers;
pub mod movies;
pub mod profile;
pub mod users;

pub use audit::AuditApi;
pub use auth::{AuthApi, BearerAuth};
pub use health::HealthApi;
pub use movies::MoviesApi;
pub use profile::ProfileApi;
pub use users::UsersApi;
