//! # Basic Template Service
//!
//! Backend template exposing CRUD endpoints for users and roles, with JWT
//! authentication, TOML configuration and generated OpenAPI documentation.
//!
//! ## Architecture
//!
//! - **domain**: identity models, DTOs and the service ports
//! - **application**: user, role and auth services
//! - **infrastructure**: SeaORM entities, migrations, transactions, crypto
//! - **interfaces**: axum REST API with Swagger documentation
//! - **shared**: errors, validation rules, shutdown signalling

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export API router
pub use interfaces::http::create_api_router;
