//! User management service: application-layer orchestration
//!
//! All user-related business logic lives here. HTTP handlers are thin
//! wrappers that validate input and delegate through `UserServicePort`.

use async_trait::async_trait;
use bcrypt::DEFAULT_COST;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Select, Set};
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{
    Actor, CreateUserDto, Role, ServiceError, ServiceResult, UpdateUserDto, User,
    UserServicePort,
};
use crate::infrastructure::crypto::password::{hash_password_with_cost, verify_password};
use crate::infrastructure::database::entities::{role, user};
use crate::infrastructure::database::queries::{
    active_user_by_email, active_user_by_guid, active_user_by_id,
};
use crate::infrastructure::database::transaction::{write_in_transaction, WriteKind};

pub struct UserService {
    db: DatabaseConnection,
    password_cost: u32,
}

impl UserService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            password_cost: DEFAULT_COST,
        }
    }

    /// Override the bcrypt cost used when storing passwords.
    pub fn with_password_cost(mut self, cost: u32) -> Self {
        self.password_cost = cost;
        self
    }

    async fn find_one(&self, select: Select<user::Entity>) -> ServiceResult<Option<User>> {
        let Some((user, role)) = select.find_also_related(role::Entity).one(&self.db).await? else {
            return Ok(None);
        };

        let role = role.ok_or_else(|| {
            ServiceError::Unexpected(format!("User {} references a missing role", user.guid))
        })?;

        Ok(Some(user.into_domain(Role::from(role))))
    }

    async fn save(
        &self,
        active: user::ActiveModel,
        role: Role,
        kind: WriteKind,
        scope: &'static str,
    ) -> ServiceResult<User> {
        let saved = write_in_transaction(&self.db, kind, "user", scope, move |txn| {
            Box::pin(async move { active.update(txn).await })
        })
        .await?;

        Ok(saved.into_domain(role))
    }
}

#[async_trait]
impl UserServicePort for UserService {
    async fn get_user_by_id(&self, id: i32) -> ServiceResult<Option<User>> {
        self.find_one(active_user_by_id(id)).await
    }

    async fn get_user_by_guid(&self, guid: &str) -> ServiceResult<Option<User>> {
        self.find_one(active_user_by_guid(guid)).await
    }

    async fn get_user_by_email(&self, email: &str) -> ServiceResult<Option<User>> {
        self.find_one(active_user_by_email(email)).await
    }

    async fn get_user_by_email_and_password(
        &self,
        email: &str,
        password: &str,
    ) -> ServiceResult<Option<User>> {
        let Some(user) = self.get_user_by_email(email).await? else {
            return Ok(None);
        };

        let valid = verify_password(password, &user.password_hash).unwrap_or_else(|e| {
            warn!(user_guid = %user.guid, error = %e, "Stored password hash is unreadable");
            false
        });

        Ok(valid.then_some(user))
    }

    async fn check_email_valid(&self, email: &str, exclude_guid: &str) -> ServiceResult<bool> {
        let Some(user) = self.get_user_by_email(email).await? else {
            return Ok(true);
        };

        Ok(!exclude_guid.is_empty() && user.guid == exclude_guid && user.email == email)
    }

    async fn create_user(
        &self,
        data: CreateUserDto,
        role: Role,
        actor: Actor,
    ) -> ServiceResult<Option<User>> {
        let model = user::ActiveModel {
            guid: Set(Uuid::new_v4().to_string()),
            email: Set(data.email),
            first_name: Set(data.first_name),
            last_name: Set(data.last_name),
            password_hash: Set(String::new()),
            password_salt: Set(String::new()),
            role_id: Set(role.id),
            is_deleted: Set(false),
            is_test_user: Set(false),
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
            "user",
            "UserService::create_user",
            move |txn| Box::pin(async move { model.insert(txn).await }),
        )
        .await?;

        info!(user_guid = %created.guid, role = %role.name, "User created");
        self.get_user_by_guid(&created.guid).await
    }

    async fn update_user(
        &self,
        data: UpdateUserDto,
        user: User,
        actor: Actor,
    ) -> ServiceResult<User> {
        let mut active = user::ActiveModel::from(&user);
        active.email = Set(data.email);
        active.first_name = Set(data.first_name);
        active.last_name = Set(data.last_name);
        active.update_time = Set(Some(Utc::now()));
        active.update_user_id = Set(actor.user_id);

        let updated = self
            .save(active, user.role, WriteKind::Update, "UserService::update_user")
            .await?;
        info!(user_guid = %updated.guid, "User updated");
        Ok(updated)
    }

    async fn update_user_password(
        &self,
        user: User,
        password: &str,
        actor: Actor,
    ) -> ServiceResult<User> {
        let digest = hash_password_with_cost(password, self.password_cost)?;

        let mut active = user::ActiveModel::from(&user);
        active.password_hash = Set(digest.hash);
        active.password_salt = Set(digest.salt);
        active.update_time = Set(Some(Utc::now()));
        active.update_user_id = Set(actor.user_id);

        let updated = self
            .save(
                active,
                user.role,
                WriteKind::Update,
                "UserService::update_user_password",
            )
            .await?;
        info!(user_guid = %updated.guid, "Password changed");
        Ok(updated)
    }

    async fn update_user_role(&self, user: User, role: Role, actor: Actor) -> ServiceResult<User> {
        let mut active = user::ActiveModel::from(&user);
        active.role_id = Set(role.id);
        active.update_time = Set(Some(Utc::now()));
        active.update_user_id = Set(actor.user_id);

        let role_name = role.name.clone();
        let updated = self
            .save(active, role, WriteKind::Update, "UserService::update_user_role")
            .await?;
        info!(user_guid = %updated.guid, role = %role_name, "User role changed");
        Ok(updated)
    }

    async fn delete_user(&self, user: User, actor: Actor) -> ServiceResult<bool> {
        let mut active = user::ActiveModel::from(&user);
        active.is_deleted = Set(true);
        active.deletion_time = Set(Some(Utc::now()));
        active.deletion_user_id = Set(actor.user_id);

        self.save(active, user.role, WriteKind::Delete, "UserService::delete_user")
            .await?;
        info!(user_guid = %user.guid, "User deleted");
        Ok(true)
    }
}
