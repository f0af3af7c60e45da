//! User aggregate
//!
//! Contains the User model and the DTOs consumed by `UserServicePort`.

mod dto_authenticate;
mod dto_create;
mod dto_update;
mod model;

pub use dto_authenticate::AuthenticateDto;
pub use dto_create::CreateUserDto;
pub use dto_update::UpdateUserDto;
pub use model::User;
