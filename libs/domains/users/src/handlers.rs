use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::post,
};
use axum_helpers::{
    ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, DuplicateEmailResponse, ForbiddenResponse,
        InternalServerErrorResponse, InvalidCredentialsResponse, NotFoundResponse,
        UnauthorizedResponse,
    },
    jwt_auth_middleware, require_role,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{
    LoginRequest, LoginResponse, MessageResponse, PromoteRequest, Role, SignupRequest,
};
use crate::repository::UserRepository;
use crate::service::UserService;

/// OpenAPI documentation for the Users API
#[derive(OpenApi)]
#[openapi(
    paths(signup, login, promote),
    components(
        schemas(SignupRequest, LoginRequest, LoginResponse, PromoteRequest, MessageResponse, Role),
        responses(
            BadRequestValidationResponse,
            DuplicateEmailResponse,
            InvalidCredentialsResponse,
            NotFoundResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Users", description = "Signup, login and role management")
    )
)]
pub struct ApiDoc;

/// Create the users router.
///
/// With `promote_requires_admin`, `/promote` demands a bearer token whose
/// role claim is `admin`. Without it the route is open.
pub fn router<R: UserRepository + 'static>(
    service: UserService<R>,
    promote_requires_admin: bool,
) -> Router {
    let mut promote_routes = Router::new().route("/promote", post(promote));
    if promote_requires_admin {
        promote_routes = promote_routes
            .route_layer(from_fn_with_state(Role::Admin.as_str(), require_role))
            .route_layer(from_fn_with_state(service.jwt().clone(), jwt_auth_middleware));
    } else {
        tracing::warn!("POST /promote is not protected; set PROMOTE_REQUIRES_ADMIN=true to guard it");
    }

    let shared_service = Arc::new(service);

    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .merge(promote_routes)
        .with_state(shared_service)
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/signup",
    tag = "Users",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User created", body = MessageResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn signup<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<SignupRequest>,
) -> UserResult<impl IntoResponse> {
    service.signup(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User created successfully")),
    ))
}

/// Exchange credentials for a bearer token
#[utoipa::path(
    post,
    path = "/login",
    tag = "Users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 400, response = InvalidCredentialsResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn login<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> UserResult<Json<LoginResponse>> {
    let response = service.login(input).await?;
    Ok(Json(response))
}

/// Give a user the admin role
///
/// Open by default. When the server runs with `PROMOTE_REQUIRES_ADMIN=true`
/// an admin bearer token is required.
#[utoipa::path(
    post,
    path = "/promote",
    tag = "Users",
    request_body = PromoteRequest,
    responses(
        (status = 200, description = "User promoted", body = MessageResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn promote<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<PromoteRequest>,
) -> UserResult<Json<MessageResponse>> {
    let user = service.promote(&input.username).await?;
    Ok(Json(MessageResponse::new(format!(
        "User {} is now an admin.",
        user.username
    ))))
}
