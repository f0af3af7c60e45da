use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use mockall::mock;
use serde_json::{json, Value};
use tower::ServiceExt;

use basic_template::config::OpenApiConfig;
use basic_template::domain::{
    Actor, AuditInfo, AuthResult, AuthServicePort, AuthenticateDto, CreateRoleDto, CreateUserDto,
    Role, RoleServicePort, ServiceError, ServiceResult, UpdateUserDto, User, UserServicePort,
};
use basic_template::infrastructure::crypto::jwt::{create_token, JwtConfig};
use basic_template::interfaces::http::{create_api_router, AppState};

// ==================== MOCKS ====================

mock! {
    pub UserService {}

    #[async_trait]
    impl UserServicePort for UserService {
        async fn get_user_by_id(&self, id: i32) -> ServiceResult<Option<User>>;
        async fn get_user_by_guid(&self, guid: &str) -> ServiceResult<Option<User>>;
        async fn get_user_by_email(&self, email: &str) -> ServiceResult<Option<User>>;
        async fn get_user_by_email_and_password(&self, email: &str, password: &str) -> ServiceResult<Option<User>>;
        async fn check_email_valid(&self, email: &str, exclude_guid: &str) -> ServiceResult<bool>;
        async fn create_user(&self, data: CreateUserDto, role: Role, actor: Actor) -> ServiceResult<Option<User>>;
        async fn update_user(&self, data: UpdateUserDto, user: User, actor: Actor) -> ServiceResult<User>;
        async fn update_user_password(&self, user: User, password: &str, actor: Actor) -> ServiceResult<User>;
        async fn update_user_role(&self, user: User, role: Role, actor: Actor) -> ServiceResult<User>;
        async fn delete_user(&self, user: User, actor: Actor) -> ServiceResult<bool>;
    }
}

mock! {
    pub RoleService {}

    #[async_trait]
    impl RoleServicePort for RoleService {
        async fn get_role_by_id(&self, id: i32) -> ServiceResult<Option<Role>>;
        async fn get_role_by_guid(&self, guid: &str) -> ServiceResult<Option<Role>>;
        async fn get_role_by_name(&self, name: &str) -> ServiceResult<Option<Role>>;
        async fn check_name_valid(&self, name: &str, exclude_guid: &str) -> ServiceResult<bool>;
        async fn create_role(&self, data: CreateRoleDto, actor: Actor) -> ServiceResult<Option<Role>>;
        async fn update_role(&self, data: CreateRoleDto, role: Role, actor: Actor) -> ServiceResult<Role>;
        async fn get_role_for_user(&self, guid: &str) -> ServiceResult<Option<Role>>;
        async fn delete_role(&self, role: Role, actor: Actor) -> ServiceResult<bool>;
    }
}

mock! {
    pub AuthService {}

    #[async_trait]
    impl AuthServicePort for AuthService {
        async fn authenticate(&self, data: AuthenticateDto) -> ServiceResult<Option<AuthResult>>;
    }
}

// ==================== TEST HELPERS ====================

const CALLER_ID: i32 = 42;

fn role(guid: &str, name: &str) -> Role {
    Role {
        id: 1,
        guid: guid.to_string(),
        name: name.to_string(),
        is_not_editable: false,
        is_deleted: false,
        audit: AuditInfo::created_by(Actor::system(), Utc::now()),
    }
}

fn user(guid: &str, email: &str) -> User {
    User {
        id: 7,
        guid: guid.to_string(),
        email: email.to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        password_hash: String::new(),
        password_salt: String::new(),
        role: role("role-guid", "Default"),
        is_deleted: false,
        is_test_user: false,
        audit: AuditInfo::created_by(Actor::system(), Utc::now()),
    }
}

struct Mocks {
    users: MockUserService,
    roles: MockRoleService,
    auth: MockAuthService,
}

impl Mocks {
    fn new() -> Self {
        Self {
            users: MockUserService::new(),
            roles: MockRoleService::new(),
            auth: MockAuthService::new(),
        }
    }

    fn into_app(self) -> Router {
        let state = AppState {
            users: Arc::new(self.users),
            roles: Arc::new(self.roles),
            auth: Arc::new(self.auth),
            jwt_config: JwtConfig::default(),
            version: "1.2.3".to_string(),
        };
        create_api_router(state, &OpenApiConfig::default())
    }
}

fn bearer() -> String {
    let mut caller = user("caller-guid", "caller@example.com");
    caller.id = CALLER_ID;
    let token = create_token(&caller, &JwtConfig::default()).unwrap();
    format!("Bearer {token}")
}

fn request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, bearer());
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

async fn send_json(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, req).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn create_user_body() -> Value {
    json!({ "data": { "email": "a@b.com", "password": "Xx1!aaaa" } })
}

// ==================== CREATE USER ====================

#[tokio::test]
async fn create_user_returns_the_new_user() {
    let mut mocks = Mocks::new();
    mocks
        .users
        .expect_check_email_valid()
        .withf(|email, exclude| email.to_string() == "a@b.com" && exclude.is_empty())
        .times(1)
        .returning(|_, _| Ok(true));
    mocks
        .roles
        .expect_get_role_for_user()
        .withf(|guid| guid.is_empty())
        .times(1)
        .returning(|_| Ok(Some(role("role-guid", "Default"))));
    mocks
        .users
        .expect_create_user()
        .withf(|data, role, actor| {
            data.email == "a@b.com" && role.name == "Default" && *actor == Actor::user(CALLER_ID)
        })
        .times(1)
        .returning(|data, _, _| Ok(Some(user("new-guid", &data.email))));

    let (status, body) = send_json(
        mocks.into_app(),
        request(Method::POST, "/user", Some(create_user_body())),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], 200);
    assert_eq!(body["data"]["email"], "a@b.com");
    assert_eq!(body["data"]["guid"], "new-guid");
    assert_eq!(body["data"]["role"]["name"], "Default");
    assert!(body["data"].get("passwordHash").is_none());
}

#[tokio::test]
async fn create_user_with_taken_email_is_rejected() {
    let mut mocks = Mocks::new();
    mocks
        .users
        .expect_check_email_valid()
        .returning(|_, _| Ok(false));
    mocks.users.expect_create_user().never();

    let (status, body) = send_json(
        mocks.into_app(),
        request(Method::POST, "/user", Some(create_user_body())),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert_eq!(body["message"], "Invalid email");
}

#[tokio::test]
async fn create_user_with_unknown_role_is_rejected() {
    let mut mocks = Mocks::new();
    mocks
        .users
        .expect_check_email_valid()
        .returning(|_, _| Ok(true));
    mocks
        .roles
        .expect_get_role_for_user()
        .withf(|guid| guid.to_string() == "missing-role")
        .returning(|_| Ok(None));
    mocks.users.expect_create_user().never();

    let body = json!({
        "data": { "email": "a@b.com", "password": "Xx1!aaaa", "roleGuid": "missing-role" }
    });
    let (status, body) = send_json(
        mocks.into_app(),
        request(Method::POST, "/user", Some(body)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Role not found");
}

#[tokio::test]
async fn create_user_yielding_nothing_is_not_created() {
    let mut mocks = Mocks::new();
    mocks
        .users
        .expect_check_email_valid()
        .returning(|_, _| Ok(true));
    mocks
        .roles
        .expect_get_role_for_user()
        .returning(|_| Ok(Some(role("role-guid", "Default"))));
    mocks
        .users
        .expect_create_user()
        .returning(|_, _, _| Ok(None));

    let (status, body) = send_json(
        mocks.into_app(),
        request(Method::POST, "/user", Some(create_user_body())),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Not created");
}

#[tokio::test]
async fn malformed_create_requests_are_not_well_formed() {
    for body in [
        json!({}),
        json!({ "data": null }),
        json!({ "data": { "email": "not-an-email", "password": "Xx1!aaaa" } }),
        json!({ "data": { "email": "a@b.com", "password": "weak" } }),
    ] {
        let mut mocks = Mocks::new();
        mocks.users.expect_check_email_valid().never();

        let (status, json) = send_json(
            mocks.into_app(),
            request(Method::POST, "/user", Some(body.clone())),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(json["message"], "Request is not well formed", "{body}");
    }
}

// ==================== GET USER ====================

#[tokio::test]
async fn get_user_returns_dto() {
    let mut mocks = Mocks::new();
    mocks
        .users
        .expect_get_user_by_guid()
        .withf(|guid| guid.to_string() == "user-guid")
        .returning(|guid| Ok(Some(user(guid, "a@b.com"))));

    let (status, body) = send_json(
        mocks.into_app(),
        request(Method::GET, "/user/user-guid", None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["guid"], "user-guid");
    assert_eq!(body["data"]["firstName"], "Ada");
}

#[tokio::test]
async fn get_unknown_user_is_404_with_empty_body() {
    let mut mocks = Mocks::new();
    mocks
        .users
        .expect_get_user_by_guid()
        .returning(|_| Ok(None));

    let (status, body) = send(
        mocks.into_app(),
        request(Method::GET, "/user/unknown-guid", None),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
}

#[tokio::test]
async fn blank_guid_is_not_well_formed() {
    let mut mocks = Mocks::new();
    mocks.users.expect_get_user_by_guid().never();

    let (status, body) = send_json(
        mocks.into_app(),
        request(Method::GET, "/user/%20", None),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Request is not well formed");
}

// ==================== UPDATE USER ====================

#[tokio::test]
async fn update_failure_is_500_with_prefixed_message() {
    let mut mocks = Mocks::new();
    mocks
        .users
        .expect_get_user_by_guid()
        .returning(|guid| Ok(Some(user(guid, "a@b.com"))));
    mocks
        .users
        .expect_check_email_valid()
        .withf(|_, exclude| exclude.to_string() == "user-guid")
        .returning(|_, _| Ok(true));
    mocks
        .users
        .expect_update_user()
        .returning(|_, _, _| Err(ServiceError::Unexpected("Unexpected error".to_string())));

    let body = json!({ "data": { "email": "a@b.com", "firstName": "Grace", "lastName": "Hopper" } });
    let (status, body) = send_json(
        mocks.into_app(),
        request(Method::PUT, "/user/user-guid", Some(body)),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], 500);
    assert_eq!(body["message"], "Something went wrong. Unexpected error");
}

#[tokio::test]
async fn update_to_taken_email_is_rejected() {
    let mut mocks = Mocks::new();
    mocks
        .users
        .expect_get_user_by_guid()
        .returning(|guid| Ok(Some(user(guid, "a@b.com"))));
    mocks
        .users
        .expect_check_email_valid()
        .returning(|_, _| Ok(false));
    mocks.users.expect_update_user().never();

    let body = json!({ "data": { "email": "taken@b.com" } });
    let (status, body) = send_json(
        mocks.into_app(),
        request(Method::PUT, "/user/user-guid", Some(body)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid email");
}

#[tokio::test]
async fn update_password_returns_user() {
    let mut mocks = Mocks::new();
    mocks
        .users
        .expect_get_user_by_guid()
        .returning(|guid| Ok(Some(user(guid, "a@b.com"))));
    mocks
        .users
        .expect_update_user_password()
        .withf(|_, password, _| password.to_string() == "N3w!pass")
        .times(1)
        .returning(|user, _, _| Ok(user));

    let body = json!({ "data": { "password": "N3w!pass" } });
    let (status, body) = send_json(
        mocks.into_app(),
        request(Method::PUT, "/user/user-guid/password", Some(body)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["guid"], "user-guid");
}

#[tokio::test]
async fn assigning_unknown_role_is_rejected() {
    let mut mocks = Mocks::new();
    mocks
        .users
        .expect_get_user_by_guid()
        .returning(|guid| Ok(Some(user(guid, "a@b.com"))));
    mocks
        .roles
        .expect_get_role_by_guid()
        .returning(|_| Ok(None));
    mocks.users.expect_update_user_role().never();

    let (status, body) = send_json(
        mocks.into_app(),
        request(Method::PUT, "/user/user-guid/role/missing", None),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Role not found");
}

#[tokio::test]
async fn assigning_role_returns_updated_user() {
    let mut mocks = Mocks::new();
    mocks
        .users
        .expect_get_user_by_guid()
        .returning(|guid| Ok(Some(user(guid, "a@b.com"))));
    mocks
        .roles
        .expect_get_role_by_guid()
        .returning(|guid| Ok(Some(role(guid, "Editors"))));
    mocks
        .users
        .expect_update_user_role()
        .returning(|mut user, role, _| {
            user.role = role;
            Ok(user)
        });

    let (status, body) = send_json(
        mocks.into_app(),
        request(Method::PUT, "/user/user-guid/role/editors-guid", None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["role"]["guid"], "editors-guid");
    assert_eq!(body["data"]["role"]["name"], "Editors");
}

// ==================== DELETE USER ====================

#[tokio::test]
async fn delete_user_returns_null_data() {
    let mut mocks = Mocks::new();
    mocks
        .users
        .expect_get_user_by_guid()
        .returning(|guid| Ok(Some(user(guid, "a@b.com"))));
    mocks
        .users
        .expect_delete_user()
        .withf(|user, actor| user.guid == "user-guid" && *actor == Actor::user(CALLER_ID))
        .times(1)
        .returning(|_, _| Ok(true));

    let (status, body) = send_json(
        mocks.into_app(),
        request(Method::DELETE, "/user/user-guid", None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], 200);
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn delete_unknown_user_is_404() {
    let mut mocks = Mocks::new();
    mocks
        .users
        .expect_get_user_by_guid()
        .returning(|_| Ok(None));
    mocks.users.expect_delete_user().never();

    let (status, _) = send(
        mocks.into_app(),
        request(Method::DELETE, "/user/unknown", None),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ==================== AUTHORIZATION ====================

#[tokio::test]
async fn protected_routes_require_a_token() {
    let app = Mocks::new().into_app();
    let req = Request::builder()
        .method(Method::GET)
        .uri("/user/user-guid")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send_json(app, req).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], 401);
    assert_eq!(body["message"], "Missing authentication token");
}

#[tokio::test]
async fn tokens_signed_with_another_secret_are_rejected() {
    let app = Mocks::new().into_app();
    let foreign = JwtConfig {
        secret: "someone-else".to_string(),
        ..JwtConfig::default()
    };
    let token = create_token(&user("x", "x@y.z"), &foreign).unwrap();
    let req = Request::builder()
        .method(Method::GET)
        .uri("/role/role-guid")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();

    let (status, body) = send_json(app, req).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid authentication token");
}

// ==================== ROLES ====================

#[tokio::test]
async fn get_role_returns_dto() {
    let mut mocks = Mocks::new();
    mocks
        .roles
        .expect_get_role_by_guid()
        .returning(|guid| Ok(Some(role(guid, "Editors"))));

    let (status, body) = send_json(
        mocks.into_app(),
        request(Method::GET, "/role/editors-guid", None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Editors");
    assert_eq!(body["data"]["isNotEditable"], false);
}

#[tokio::test]
async fn create_role_with_taken_name_is_rejected() {
    let mut mocks = Mocks::new();
    mocks
        .roles
        .expect_check_name_valid()
        .withf(|name, exclude| name.to_string() == "Editors" && exclude.is_empty())
        .returning(|_, _| Ok(false));
    mocks.roles.expect_create_role().never();

    let body = json!({ "data": { "name": "  Editors " } });
    let (status, body) = send_json(
        mocks.into_app(),
        request(Method::POST, "/role", Some(body)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid name");
}

#[tokio::test]
async fn create_role_returns_the_new_role() {
    let mut mocks = Mocks::new();
    mocks
        .roles
        .expect_check_name_valid()
        .returning(|_, _| Ok(true));
    mocks
        .roles
        .expect_create_role()
        .withf(|data, actor| data.name == "Editors" && *actor == Actor::user(CALLER_ID))
        .returning(|data, _| Ok(Some(role("editors-guid", &data.name))));

    let body = json!({ "data": { "name": "Editors" } });
    let (status, body) = send_json(
        mocks.into_app(),
        request(Method::POST, "/role", Some(body)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["guid"], "editors-guid");
}

#[tokio::test]
async fn blank_role_name_is_not_well_formed() {
    let mut mocks = Mocks::new();
    mocks.roles.expect_check_name_valid().never();

    let body = json!({ "data": { "name": "   " } });
    let (status, body) = send_json(
        mocks.into_app(),
        request(Method::POST, "/role", Some(body)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Request is not well formed");
}

#[tokio::test]
async fn update_role_excludes_itself_from_the_name_check() {
    let mut mocks = Mocks::new();
    mocks
        .roles
        .expect_get_role_by_guid()
        .returning(|guid| Ok(Some(role(guid, "Editors"))));
    mocks
        .roles
        .expect_check_name_valid()
        .withf(|_, exclude| exclude.to_string() == "editors-guid")
        .returning(|_, _| Ok(true));
    mocks
        .roles
        .expect_update_role()
        .returning(|data, mut role, _| {
            role.name = data.name;
            Ok(role)
        });

    let body = json!({ "data": { "name": "Writers" } });
    let (status, body) = send_json(
        mocks.into_app(),
        request(Method::PUT, "/role/editors-guid", Some(body)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Writers");
}

#[tokio::test]
async fn delete_unknown_role_is_404() {
    let mut mocks = Mocks::new();
    mocks
        .roles
        .expect_get_role_by_guid()
        .returning(|_| Ok(None));

    let (status, body) = send(
        mocks.into_app(),
        request(Method::DELETE, "/role/unknown", None),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
}

// ==================== AUTH & VERSION ====================

#[tokio::test]
async fn authenticate_returns_token_and_user() {
    let mut mocks = Mocks::new();
    mocks
        .auth
        .expect_authenticate()
        .withf(|data| data.email == "a@b.com" && data.password == "Xx1!aaaa")
        .returning(|_| {
            Ok(Some(AuthResult {
                token: "jwt".to_string(),
                token_type: "Bearer".to_string(),
                expires_in: 3600,
                user: user("user-guid", "a@b.com"),
            }))
        });

    let req = Request::builder()
        .method(Method::POST)
        .uri("/auth/authenticate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "data": { "email": "a@b.com", "password": "Xx1!aaaa" } }).to_string(),
        ))
        .unwrap();
    let (status, body) = send_json(mocks.into_app(), req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["token"], "jwt");
    assert_eq!(body["data"]["tokenType"], "Bearer");
    assert_eq!(body["data"]["expiresIn"], 3600);
    assert_eq!(body["data"]["user"]["email"], "a@b.com");
}

#[tokio::test]
async fn authenticate_without_match_is_404() {
    let mut mocks = Mocks::new();
    mocks.auth.expect_authenticate().returning(|_| Ok(None));

    let req = Request::builder()
        .method(Method::POST)
        .uri("/auth/authenticate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "data": { "email": "a@b.com", "password": "wrong" } }).to_string(),
        ))
        .unwrap();
    let (status, body) = send(mocks.into_app(), req).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
}

#[tokio::test]
async fn version_is_public() {
    let req = Request::builder()
        .uri("/version")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send_json(Mocks::new().into_app(), req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], "1.2.3");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let req = Request::builder()
        .uri("/api-docs/openapi.json")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send_json(Mocks::new().into_app(), req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["version"], "1.2.3");
    assert!(body["paths"]["/user/{guid}"].is_object());
}
