pub mod identity;

pub use identity::{AuthService, RoleService, UserService};
