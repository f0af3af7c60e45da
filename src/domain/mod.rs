//! Domain layer: identity models, DTOs and the service ports the HTTP layer
//! depends on.

pub mod audit;
pub mod ports;
pub mod role;
pub mod user;

pub use audit::{Actor, AuditInfo};
pub use ports::{AuthResult, AuthServicePort, RoleServicePort, UserServicePort};
pub use role::{CreateRoleDto, Role, DEFAULT_ROLE_NAME};
pub use user::{AuthenticateDto, CreateUserDto, UpdateUserDto, User};

pub use crate::shared::errors::{ServiceError, ServiceResult};
