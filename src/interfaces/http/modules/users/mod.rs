//! User module: profile CRUD, password and role assignment

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
