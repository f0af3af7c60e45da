//! Role management service

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Select, Set};
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::{Actor, CreateRoleDto, Role, RoleServicePort, ServiceResult, DEFAULT_ROLE_NAME};
use crate::infrastructure::database::entities::role;
use crate::infrastructure::database::queries::{
    active_role_by_guid, active_role_by_id, active_role_by_name,
};
use crate::infrastructure::database::transaction::{write_in_transaction, WriteKind};

pub struct RoleService {
    db: DatabaseConnection,
}

impl RoleService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_one(&self, select: Select<role::Entity>) -> ServiceResult<Option<Role>> {
        Ok(select.one(&self.db).await?.map(Role::from))
    }
}

#[async_trait]
impl RoleServicePort for RoleService {
    async fn get_role_by_id(&self, id: i32) -> ServiceResult<Option<Role>> {
        self.find_one(active_role_by_id(id)).await
    }

    async fn get_role_by_guid(&self, guid: &str) -> ServiceResult<Option<Role>> {
        self.find_one(active_role_by_guid(guid)).await
    }

    async fn get_role_by_name(&self, name: &str) -> ServiceResult<Option<Role>> {
        self.find_one(active_role_by_name(name)).await
    }

    async fn check_name_valid(&self, name: &str, exclude_guid: &str) -> ServiceResult<bool> {
        let Some(role) = self.get_role_by_name(name).await? else {
            return Ok(true);
        };

        Ok(!exclude_guid.is_empty() && role.guid == exclude_guid && role.name == name)
    }

    async fn create_role(&self, data: CreateRoleDto, actor: Actor) -> ServiceResult<Option<Role>> {
        let model = role::ActiveModel {
            guid: Set(Uuid::new_v4().to_string()),
            name: Set(data.name),
            is_not_editable: Set(data.is_not_editable),
            is_deleted: Set(false),
            creation_time: Set(Utc::now()),
            creation_user_id: Set(actor.user_id),
            update_time: Set(None),
            update_user_id: Set(None),
            deletion_time: Set(None),
            deletion_user_id: Set(None),
            ..Default::default()
        };

        let created = write_in_transaction(
            &self.db,
            WriteKind::Create,
            "role",
            "RoleService::create_role",
            move |txn| Box::pin(async move { model.insert(txn).await }),
        )
        .await?;

        info!(role_guid = %created.guid, name = %created.name, "Role created");
        Ok(Some(Role::from(created)))
    }

    async fn update_role(&self, data: CreateRoleDto, role: Role, actor: Actor) -> ServiceResult<Role> {
        if role.is_not_editable {
            debug!(role_guid = %role.guid, "Role is not editable, update skipped");
            return Ok(role);
        }

        let mut active = role::ActiveModel::from(&role);
        active.name = Set(data.name);
        active.is_not_editable = Set(data.is_not_editable);
        active.update_time = Set(Some(Utc::now()));
        active.update_user_id = Set(actor.user_id);

        let updated = write_in_transaction(
            &self.db,
            WriteKind::Update,
            "role",
            "RoleService::update_role",
            move |txn| Box::pin(async move { active.update(txn).await }),
        )
        .await?;

        info!(role_guid = %updated.guid, "Role updated");
        Ok(Role::from(updated))
    }

    async fn get_role_for_user(&self, guid: &str) -> ServiceResult<Option<Role>> {
        if guid.trim().is_empty() {
            self.get_role_by_name(DEFAULT_ROLE_NAME).await
        } else {
            self.get_role_by_guid(guid).await
        }
    }

    async fn delete_role(&self, role: Role, actor: Actor) -> ServiceResult<bool> {
        let mut active = role::ActiveModel::from(&role);
        active.is_deleted = Set(true);
        active.deletion_time = Set(Some(Utc::now()));
        active.deletion_user_id = Set(actor.user_id);

        write_in_transaction(
            &self.db,
            WriteKind::Delete,
            "role",
            "RoleService::delete_role",
            move |txn| Box::pin(async move { active.update(txn).await }),
        )
        .await?;

        info!(role_guid = %role.guid, "Role deleted");
        Ok(true)
    }
}
