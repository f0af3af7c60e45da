//! Identity module: users, roles and authentication
//!
//! Each service implements the matching port from `domain::ports` on top of
//! SeaORM. Reads go through the active-row helpers in
//! `infrastructure::database::queries`; writes go through
//! `write_in_transaction`.

pub mod auth_service;
pub mod role_service;
pub mod user_service;

pub use auth_service::AuthService;
pub use role_service::RoleService;
pub use user_service::UserService;
