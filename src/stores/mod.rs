// Stores layer - Data access and repository pattern
pub mod audit_store;
pub mod movie_store;
pub mod paging;
pub mod role_store;
pub mod user_store;

pub use audit_store::{AuditStore, NewAuditRecord};
pub use movie_store::{ImagePatch, MovieChanges, MovieStore, NewMovie};
pub use paging::{Page, PageRequest};
pub use role_store::RoleStore;
pub use user_store::{NewUser, UserStore};
