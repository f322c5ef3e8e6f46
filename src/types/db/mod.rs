pub mod audit_log;
pub mod movie;
pub mod role;
pub mod user;
pub mod user_role;
