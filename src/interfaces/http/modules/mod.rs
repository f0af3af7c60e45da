pub mod auth;
pub mod roles;
pub mod users;
pub mod version;
