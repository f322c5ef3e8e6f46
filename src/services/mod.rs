// Services layer - Business logic and orchestration
pub mod audit_recorder;
pub mod identity_service;
pub mod movie_service;
pub mod privileged_guard;
pub mod role_reconciler;
pub mod token_service;
pub mod user_service;

pub use audit_recorder::AuditRecorder;
pub use identity_service::{IdentityService, LoginOutcome};
pub use movie_service::MovieService;
pub use privileged_guard::{PrivilegedGuard, Requirement};
pub use role_reconciler::{ReconcileOutcome, RoleReconciler};
pub use token_service::TokenService;
pub use user_service::{UserOverview, UserService};
