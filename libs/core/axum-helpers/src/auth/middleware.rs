use super::jwt::{JwtAuth, JwtClaims};
use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Verifies the bearer token and inserts [`JwtClaims`] into request extensions.
///
/// Missing or invalid tokens are rejected with `401`.
pub async fn jwt_auth_middleware(
    State(auth): State<JwtAuth>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = bearer_token(request.headers()) else {
        tracing::debug!("No bearer token on request");
        return Err(AppError::Unauthorized("No token provided".to_string()));
    };

    let claims = auth.verify_token(token).map_err(|e| {
        tracing::debug!(error = %e, "JWT verification failed");
        AppError::Unauthorized("Invalid or expired token".to_string())
    })?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Rejects with `403` unless the verified claims carry `role`.
///
/// Must run after [`jwt_auth_middleware`]; without claims it answers `401`.
pub async fn require_role(
    State(role): State<&'static str>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(claims) = request.extensions().get::<JwtClaims>() else {
        return Err(AppError::Unauthorized("Authentication required".to_string()));
    };

    if !claims.has_role(role) {
        tracing::info!(user_id = %claims.sub, required = role, "Role check failed");
        return Err(AppError::Forbidden(format!("Requires {role} role")));
    }

    Ok(next.run(request).await)
}

/// Handlers behind [`jwt_auth_middleware`] can take `JwtClaims` directly.
impl<S> FromRequestParts<S> for JwtClaims
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<JwtClaims>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::JwtConfig;
    use axum::{
        Router,
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        middleware::from_fn_with_state,
        routing::get,
    };
    use tower::ServiceExt;

    fn auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("middleware-secret-at-least-32-characters").unwrap())
    }

    async fn whoami(claims: JwtClaims) -> String {
        claims.sub
    }

    fn app(auth: JwtAuth) -> Router {
        let admin = Router::new()
            .route("/admin", get(whoami))
            .layer(from_fn_with_state("admin", require_role));

        Router::new()
            .route("/me", get(whoami))
            .merge(admin)
            .layer(from_fn_with_state(auth, jwt_auth_middleware))
    }

    async fn call(uri: &str, token: Option<&str>) -> StatusCode {
        let mut builder = HttpRequest::get(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        app(auth())
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        assert_eq!(call("/me", None).await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_invalid_token_is_unauthorized() {
        assert_eq!(call("/me", Some("garbage")).await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_valid_token_reaches_handler() {
        let token = auth().create_token("user-1", "user").unwrap();
        assert_eq!(call("/me", Some(&token)).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_role_gate() {
        let user = auth().create_token("user-1", "user").unwrap();
        let admin = auth().create_token("user-2", "admin").unwrap();

        assert_eq!(call("/admin", Some(&user)).await, StatusCode::FORBIDDEN);
        assert_eq!(call("/admin", Some(&admin)).await, StatusCode::OK);
    }

    #[test]
    fn test_bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, "Basic abc".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, "Bearer abc.def".parse().unwrap());
        assert_eq!(bearer_token(&headers), Some("abc.def"));
    }
}
