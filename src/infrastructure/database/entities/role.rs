//! Role entity

use sea_orm::entity::prelude::*;

use crate::domain::{AuditInfo, Role};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "roles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub guid: String,
    pub name: String,
    pub is_not_editable: bool,
    pub is_deleted: bool,
    pub creation_time: DateTimeUtc,
    pub creation_user_id: Option<i32>,
    pub update_time: Option<DateTimeUtc>,
    pub update_user_id: Option<i32>,
    pub deletion_time: Option<DateTimeUtc>,
    pub deletion_user_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user::Entity")]
    Users,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Role {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            guid: model.guid,
            name: model.name,
            is_not_editable: model.is_not_editable,
            is_deleted: model.is_deleted,
            audit: AuditInfo {
                creation_time: model.creation_time,
                creation_user_id: model.creation_user_id,
                update_time: model.update_time,
                update_user_id: model.update_user_id,
                deletion_time: model.deletion_time,
                deletion_user_id: model.deletion_user_id,
            },
        }
    }
}

impl From<&Role> for ActiveModel {
    /// Active model with every column marked unchanged, ready for partial updates.
    fn from(role: &Role) -> Self {
        Model {
            id: role.id,
            guid: role.guid.clone(),
            name: role.name.clone(),
            is_not_editable: role.is_not_editable,
            is_deleted: role.is_deleted,
            creation_time: role.audit.creation_time,
            creation_user_id: role.audit.creation_user_id,
            update_time: role.audit.update_time,
            update_user_id: role.audit.update_user_id,
            deletion_time: role.audit.deletion_time,
            deletion_user_id: role.audit.deletion_user_id,
        }
        .into()
    }
}
