//! Reusable "active rows" selects.
//!
//! Soft-deleted rows never leave these helpers; every lookup the services
//! perform starts from one of them.

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Select};

use super::entities::{role, user};

pub fn active_users() -> Select<user::Entity> {
    user::Entity::find().filter(user::Column::IsDeleted.eq(false))
}

pub fn active_user_by_id(id: i32) -> Select<user::Entity> {
    active_users().filter(user::Column::Id.eq(id))
}

pub fn active_user_by_guid(guid: &str) -> Select<user::Entity> {
    active_users().filter(user::Column::Guid.eq(guid))
}

/// Exact, case-sensitive match.
pub fn active_user_by_email(email: &str) -> Select<user::Entity> {
    active_users().filter(user::Column::Email.eq(email))
}

pub fn active_roles() -> Select<role::Entity> {
    role::Entity::find().filter(role::Column::IsDeleted.eq(false))
}

pub fn active_role_by_id(id: i32) -> Select<role::Entity> {
    active_roles().filter(role::Column::Id.eq(id))
}

pub fn active_role_by_guid(guid: &str) -> Select<role::Entity> {
    active_roles().filter(role::Column::Guid.eq(guid))
}

/// Exact, case-sensitive match.
pub fn active_role_by_name(name: &str) -> Select<role::Entity> {
    active_roles().filter(role::Column::Name.eq(name))
}
