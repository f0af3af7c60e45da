//! Inbound ports: the contracts HTTP handlers program against.
//!
//! Production implementations live in `application::identity`; handler
//! tests substitute mocks.

use async_trait::async_trait;

use super::{
    Actor, AuthenticateDto, CreateRoleDto, CreateUserDto, Role, ServiceResult, UpdateUserDto,
    User,
};

#[async_trait]
pub trait UserServicePort: Send + Sync {
    async fn get_user_by_id(&self, id: i32) -> ServiceResult<Option<User>>;
    async fn get_user_by_guid(&self, guid: &str) -> ServiceResult<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> ServiceResult<Option<User>>;

    /// Active user whose stored hash matches `password`.
    async fn get_user_by_email_and_password(
        &self,
        email: &str,
        password: &str,
    ) -> ServiceResult<Option<User>>;

    /// True when no active user owns `email`, or the owner is `exclude_guid`.
    /// An empty `exclude_guid` excludes nobody.
    async fn check_email_valid(&self, email: &str, exclude_guid: &str) -> ServiceResult<bool>;

    async fn create_user(
        &self,
        data: CreateUserDto,
        role: Role,
        actor: Actor,
    ) -> ServiceResult<Option<User>>;
    async fn update_user(&self, data: UpdateUserDto, user: User, actor: Actor)
        -> ServiceResult<User>;
    async fn update_user_password(
        &self,
        user: User,
        password: &str,
        actor: Actor,
    ) -> ServiceResult<User>;
    async fn update_user_role(&self, user: User, role: Role, actor: Actor) -> ServiceResult<User>;

    /// Soft delete.
    async fn delete_user(&self, user: User, actor: Actor) -> ServiceResult<bool>;
}

#[async_trait]
pub trait RoleServicePort: Send + Sync {
    async fn get_role_by_id(&self, id: i32) -> ServiceResult<Option<Role>>;
    async fn get_role_by_guid(&self, guid: &str) -> ServiceResult<Option<Role>>;
    async fn get_role_by_name(&self, name: &str) -> ServiceResult<Option<Role>>;

    /// Same exclude-self rule as `UserServicePort::check_email_valid`.
    async fn check_name_valid(&self, name: &str, exclude_guid: &str) -> ServiceResult<bool>;

    async fn create_role(&self, data: CreateRoleDto, actor: Actor)
        -> ServiceResult<Option<Role>>;

    /// Returns `role` untouched when it is not editable.
    async fn update_role(&self, data: CreateRoleDto, role: Role, actor: Actor)
        -> ServiceResult<Role>;

    /// Role for a new user: the "Default" role when `guid` is empty,
    /// otherwise the active role with that guid.
    async fn get_role_for_user(&self, guid: &str) -> ServiceResult<Option<Role>>;

    /// Soft delete.
    async fn delete_role(&self, role: Role, actor: Actor) -> ServiceResult<bool>;
}

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: User,
}

#[async_trait]
pub trait AuthServicePort: Send + Sync {
    /// `Ok(None)` when the credentials match no active user.
    async fn authenticate(&self, data: AuthenticateDto) -> ServiceResult<Option<AuthResult>>;
}
