//! User entity for database

use sea_orm::entity::prelude::*;

use crate::domain::{AuditInfo, Role, User};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub guid: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub password_salt: String,
    pub role_id: i32,
    pub is_deleted: bool,
    pub is_test_user: bool,
    pub creation_time: DateTimeUtc,
    pub creation_user_id: Option<i32>,
    pub update_time: Option<DateTimeUtc>,
    pub update_user_id: Option<i32>,
    pub deletion_time: Option<DateTimeUtc>,
    pub deletion_user_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::role::Entity",
        from = "Column::RoleId",
        to = "super::role::Column::Id"
    )]
    Role,
}

impl Related<super::role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Role.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_domain(self, role: Role) -> User {
        User {
            id: self.id,
            guid: self.guid,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            password_hash: self.password_hash,
            password_salt: self.password_salt,
            role,
            is_deleted: self.is_deleted,
            is_test_user: self.is_test_user,
            audit: AuditInfo {
                creation_time: self.creation_time,
                creation_user_id: self.creation_user_id,
                update_time: self.update_time,
                update_user_id: self.update_user_id,
                deletion_time: self.deletion_time,
                deletion_user_id: self.deletion_user_id,
            },
        }
    }
}

impl From<&User> for ActiveModel {
    /// Active model with every column marked unchanged, ready for partial updates.
    fn from(user: &User) -> Self {
        Model {
            id: user.id,
            guid: user.guid.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            password_hash: user.password_hash.clone(),
            password_salt: user.password_salt.clone(),
            role_id: user.role.id,
            is_deleted: user.is_deleted,
            is_test_user: user.is_test_user,
            creation_time: user.audit.creation_time,
            creation_user_id: user.audit.creation_user_id,
            update_time: user.audit.update_time,
            update_user_id: user.audit.update_user_id,
            deletion_time: user.audit.deletion_time,
            deletion_user_id: user.audit.deletion_user_id,
        }
        .into()
    }
}
