use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

/// Errors raised by the identity services.
///
/// Absence of an entity is never an error here: lookups return `Ok(None)`
/// and the HTTP layer decides between 400 and 404.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("An error occurred while saving the {entity} for transaction ID {transaction_id}.")]
    Create {
        entity: &'static str,
        transaction_id: Uuid,
        #[source]
        source: DbErr,
    },

    #[error("An error occurred while updating the {entity} for transaction ID {transaction_id}.")]
    Update {
        entity: &'static str,
        transaction_id: Uuid,
        #[source]
        source: DbErr,
    },

    #[error("An error occurred while deleting the {entity} for transaction ID {transaction_id}.")]
    Delete {
        entity: &'static str,
        transaction_id: Uuid,
        #[source]
        source: DbErr,
    },

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Password hashing failed: {0}")]
    Password(#[from] bcrypt::BcryptError),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("{0}")]
    Unexpected(String),
}

impl ServiceError {
    /// Transaction id attached to a failed write, if any.
    pub fn transaction_id(&self) -> Option<Uuid> {
        match self {
            Self::Create { transaction_id, .. }
            | Self::Update { transaction_id, .. }
            | Self::Delete { transaction_id, .. } => Some(*transaction_id),
            _ => None,
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
