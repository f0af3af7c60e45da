//! Role aggregate

mod dto_create;
mod model;

pub use dto_create::CreateRoleDto;
pub use model::{Role, DEFAULT_ROLE_NAME};
