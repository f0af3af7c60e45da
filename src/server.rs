//! Reusable server runtime.
//!
//! Provides [`ServerHandle`] that encapsulates the full server lifecycle:
//! database init, migrations, default role and admin seeding, REST API and
//! graceful shutdown.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use crate::application::{AuthService, RoleService, UserService};
use crate::config::{AdminConfig, AppConfig};
use crate::domain::{
    Actor, AuthServicePort, CreateRoleDto, CreateUserDto, Role, RoleServicePort, ServiceError,
    ServiceResult, UserServicePort, DEFAULT_ROLE_NAME,
};
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::{init_database, DatabaseConfig};
use crate::interfaces::http::{create_api_router, AppState};
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

pub const ADMINISTRATOR_ROLE_NAME: &str = "Administrator";

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the service.
pub struct ServerOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
    /// Seed system roles and the configured admin user (default: true).
    pub seed_defaults: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
            seed_defaults: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running service.
///
/// # Examples
///
/// ```rust,no_run
/// use basic_template::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.install_signal_handler();
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// API port the server is listening on.
    pub api_port: u16,

    db: DatabaseConnection,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Start the service with the given options.
    ///
    /// This will:
    /// 1. Connect to the database and run migrations
    /// 2. Seed the system roles and the admin user (if enabled)
    /// 3. Start the REST API server (with Swagger UI)
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;

        info!(name = %app_cfg.settings.name, version = %app_cfg.settings.version, "Starting service");
        if app_cfg.uses_default_secret() {
            warn!("security.jwt_secret is the shipped default, set a real secret");
        }

        // ── Database ───────────────────────────────────────────
        let db_config = DatabaseConfig::from(&app_cfg.database);
        let db = init_database(&db_config).await?;

        if opts.auto_migrate {
            info!("Running database migrations...");
            Migrator::up(&db, None).await?;
            info!("Migrations completed");
        }

        // ── Services ───────────────────────────────────────────
        let jwt_config = JwtConfig::from(&app_cfg.security);
        info!(
            "JWT configured with {}h token expiration",
            jwt_config.expiration_hours
        );

        let roles: Arc<dyn RoleServicePort> = Arc::new(RoleService::new(db.clone()));
        let users: Arc<dyn UserServicePort> = Arc::new(
            UserService::new(db.clone()).with_password_cost(app_cfg.security.bcrypt_cost),
        );
        let auth: Arc<dyn AuthServicePort> =
            Arc::new(AuthService::new(Arc::clone(&users), jwt_config.clone()));

        if opts.seed_defaults {
            seed_defaults(roles.as_ref(), users.as_ref(), &app_cfg.admin).await?;
        }

        // ── REST API server ────────────────────────────────────
        let state = AppState {
            users,
            roles,
            auth,
            jwt_config,
            version: app_cfg.settings.version.clone(),
        };
        let api_router = create_api_router(state, &app_cfg.open_api);

        let api_addr = app_cfg.server.address();
        let listener = tokio::net::TcpListener::bind(&api_addr).await?;
        let api_port = listener.local_addr()?.port();
        info!("REST API server listening on http://{}", api_addr);
        info!("Swagger UI available at http://{}/swagger-ui/", api_addr);

        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let api_shutdown = shutdown.signal();
        let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            config: app_cfg,
            api_port,
            db,
            shutdown,
            api_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown (non-blocking).
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the server to stop, then close the database.
    ///
    /// In-flight requests get the configured shutdown timeout once the
    /// signal fires; after that the server task is aborted.
    pub async fn wait(self) {
        let Self {
            db,
            shutdown,
            mut api_task,
            ..
        } = self;
        let signal = shutdown.signal();

        tokio::select! {
            result = &mut api_task => log_api_exit(result),
            _ = signal.wait() => {
                info!("Waiting for in-flight requests to complete...");
                match tokio::time::timeout(shutdown.timeout(), &mut api_task).await {
                    Ok(result) => log_api_exit(result),
                    Err(_) => {
                        warn!("Shutdown timeout elapsed, aborting REST API server");
                        api_task.abort();
                    }
                }
            }
        }

        if let Err(e) = db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("Database connection closed");
        }

        info!("Shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("Shutting down...");
        self.trigger_shutdown();
        self.wait().await;
    }

    /// Check if the server is still running.
    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

fn log_api_exit(result: Result<(), tokio::task::JoinError>) {
    match result {
        Ok(()) => info!("REST API server stopped"),
        Err(e) => error!("REST API server task panicked: {}", e),
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// Ensure the system roles exist and the configured admin user is present.
///
/// Idempotent: existing roles and an admin with a password are left untouched.
/// An admin left without a password gets the configured one.
pub async fn seed_defaults(
    roles: &dyn RoleServicePort,
    users: &dyn UserServicePort,
    admin: &AdminConfig,
) -> ServiceResult<()> {
    ensure_system_role(roles, DEFAULT_ROLE_NAME).await?;
    let admin_role = ensure_system_role(roles, ADMINISTRATOR_ROLE_NAME).await?;

    if let Some(existing) = users.get_user_by_email(&admin.email).await? {
        if !existing.has_password() {
            warn!(email = %admin.email, "Admin user has no password, setting the configured one");
            users
                .update_user_password(existing, &admin.password, Actor::system())
                .await?;
        }
        return Ok(());
    }

    info!("Creating default admin user...");
    let data = CreateUserDto {
        email: admin.email.clone(),
        first_name: admin.first_name.clone(),
        last_name: admin.last_name.clone(),
    };
    let user = users
        .create_user(data, admin_role, Actor::system())
        .await?
        .ok_or_else(|| ServiceError::Unexpected("admin user was not created".into()))?;
    users
        .update_user_password(user, &admin.password, Actor::system())
        .await?;

    info!("Default admin created: {}", admin.email);
    warn!("Please change the admin password immediately!");
    Ok(())
}

async fn ensure_system_role(
    roles: &dyn RoleServicePort,
    name: &str,
) -> ServiceResult<Role> {
    if let Some(role) = roles.get_role_by_name(name).await? {
        return Ok(role);
    }

    info!(role = name, "Creating system role");
    let data = CreateRoleDto {
        name: name.to_string(),
        is_not_editable: true,
    };
    roles
        .create_role(data, Actor::system())
        .await?
        .ok_or_else(|| ServiceError::Unexpected(format!("role {name} was not created")))
}

/// Initialize tracing (logging) from the application config.
///
/// Call this once at process startup (before [`ServerHandle::start`]).
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}
