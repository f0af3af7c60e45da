//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::openapi::ContactBuilder;
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::config::OpenApiConfig;
use crate::domain::{AuthServicePort, RoleServicePort, UserServicePort};
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::interfaces::http::common::EmptyData;
use crate::interfaces::http::middleware::{auth_middleware, AuthState};
use crate::interfaces::http::modules::{auth, roles, users, version};

/// Unified router state. Each handler extracts its own slice via `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserServicePort>,
    pub roles: Arc<dyn RoleServicePort>,
    pub auth: Arc<dyn AuthServicePort>,
    pub jwt_config: JwtConfig,
    /// Served by `/version`
    pub version: String,
}

impl FromRef<AppState> for users::UserHandlerState {
    fn from_ref(s: &AppState) -> Self {
        users::UserHandlerState {
            users: Arc::clone(&s.users),
            roles: Arc::clone(&s.roles),
        }
    }
}

impl FromRef<AppState> for roles::RoleHandlerState {
    fn from_ref(s: &AppState) -> Self {
        roles::RoleHandlerState {
            roles: Arc::clone(&s.roles),
        }
    }
}

impl FromRef<AppState> for auth::AuthHandlerState {
    fn from_ref(s: &AppState) -> Self {
        auth::AuthHandlerState {
            auth: Arc::clone(&s.auth),
        }
    }
}

impl FromRef<AppState> for version::VersionState {
    fn from_ref(s: &AppState) -> Self {
        version::VersionState {
            version: s.version.clone(),
        }
    }
}

impl FromRef<AppState> for AuthState {
    fn from_ref(s: &AppState) -> Self {
        AuthState {
            jwt_config: s.jwt_config.clone(),
        }
    }
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token from /auth/authenticate"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation. Title, description and contact are filled from
/// configuration by `api_doc`.
#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::authenticate,
        // Users
        users::get_user,
        users::create_user,
        users::update_user,
        users::update_user_password,
        users::update_user_role,
        users::delete_user,
        // Roles
        roles::get_role,
        roles::create_role,
        roles::update_role,
        roles::delete_role,
        // Version
        version::get_version,
    ),
    components(
        schemas(
            EmptyData,
            auth::AuthenticateRequest,
            auth::AuthenticateResponse,
            users::UserDto,
            users::CreateUserRequest,
            users::UpdateUserRequest,
            users::UpdateUserPasswordRequest,
            roles::RoleDto,
            roles::CreateRoleRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Credential check and JWT issuing"),
        (name = "Users", description = "User management: profile, password, role assignment"),
        (name = "Roles", description = "Role management"),
        (name = "Version", description = "Application version"),
    )
)]
pub struct ApiDoc;

/// OpenAPI document with the configured metadata applied.
pub fn api_doc(docs: &OpenApiConfig, version: &str) -> utoipa::openapi::OpenApi {
    let mut openapi = ApiDoc::openapi();
    openapi.info.title = docs.title.clone();
    openapi.info.version = version.to_string();
    openapi.info.description = Some(docs.description.clone()).filter(|d| !d.is_empty());
    openapi.info.terms_of_service = docs.terms_of_service.clone();
    if docs.contact_name.is_some() || docs.contact_url.is_some() {
        openapi.info.contact = Some(
            ContactBuilder::new()
                .name(docs.contact_name.clone())
                .url(docs.contact_url.clone())
                .build(),
        );
    }
    openapi
}

/// Create the API router with all routes
pub fn create_api_router(state: AppState, docs: &OpenApiConfig) -> Router {
    let auth_state = AuthState::from_ref(&state);
    let openapi = api_doc(docs, &state.version);

    // Everything under /user and /role needs a bearer token
    let protected_routes = Router::new()
        .route("/user", post(users::create_user))
        .route(
            "/user/{guid}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/user/{guid}/password", put(users::update_user_password))
        .route(
            "/user/{guid}/role/{role_guid}",
            put(users::update_user_role),
        )
        .route("/role", post(roles::create_role))
        .route(
            "/role/{guid}",
            get(roles::get_role)
                .put(roles::update_role)
                .delete(roles::delete_role),
        )
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware));

    let public_routes = Router::new()
        .route("/auth/authenticate", post(auth::authenticate))
        .route("/version", get(version::get_version));

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .merge(public_routes.with_state(state.clone()))
        .merge(protected_routes.with_state(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
