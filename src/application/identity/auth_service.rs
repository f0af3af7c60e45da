//! Credential check and token issuing

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::{AuthResult, AuthServicePort, AuthenticateDto, ServiceResult, UserServicePort};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};

pub struct AuthService {
    users: Arc<dyn UserServicePort>,
    jwt_config: JwtConfig,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserServicePort>, jwt_config: JwtConfig) -> Self {
        Self { users, jwt_config }
    }
}

#[async_trait]
impl AuthServicePort for AuthService {
    async fn authenticate(&self, data: AuthenticateDto) -> ServiceResult<Option<AuthResult>> {
        let Some(user) = self
            .users
            .get_user_by_email_and_password(&data.email, &data.password)
            .await?
        else {
            return Ok(None);
        };

        let token = create_token(&user, &self.jwt_config)?;
        info!(user_guid = %user.guid, "User authenticated");

        Ok(Some(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expiration_hours * 3600,
            user,
        }))
    }
}
