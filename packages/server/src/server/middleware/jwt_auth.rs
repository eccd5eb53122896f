use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use tracing::debug;

use crate::common::Actor;
use crate::domains::auth::JwtService;

/// Authenticated user information from JWT
#[derive(Clone, Debug)]
pub struct AuthUser(pub Actor);

/// JWT authentication middleware
///
/// Extracts the JWT from the Authorization header, verifies it, and adds
/// AuthUser to request extensions. Requests without a valid token continue
/// without AuthUser; protected handlers reject them at extraction time.
pub async fn jwt_auth_middleware(
    jwt_service: Arc<JwtService>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    if let Some(user) = extract_auth_user(&request, &jwt_service) {
        debug!(username = %user.0.username, "authenticated request");
        request.extensions_mut().insert(user);
    } else {
        debug!("no valid authentication token");
    }

    next.run(request).await
}

/// Extract and verify JWT token from request
fn extract_auth_user(
    request: &axum::http::Request<axum::body::Body>,
    jwt_service: &JwtService,
) -> Option<AuthUser> {
    let auth_header = request.headers().get("authorization")?;
    let auth_str = auth_header.to_str().ok()?;

    // Accept both "Bearer <token>" and a raw token
    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str);

    let claims = jwt_service.verify_token(token).ok()?;
    Some(AuthUser(claims.actor()))
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<AuthUser>().cloned().ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Autenticación requerida." })),
            )
                .into_response()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::UserId;

    fn token_for(service: &JwtService) -> String {
        service
            .create_token(UserId::from_i64(7), "maria", "admin", "Intendencia")
            .unwrap()
    }

    #[test]
    fn extracts_bearer_token() {
        let service = JwtService::new("test_secret", "test_issuer".to_string());
        let request = axum::http::Request::builder()
            .header("authorization", format!("Bearer {}", token_for(&service)))
            .body(axum::body::Body::empty())
            .unwrap();

        let user = extract_auth_user(&request, &service).unwrap();
        assert_eq!(user.0.username, "maria");
        assert!(user.0.can_transfer());
    }

    #[test]
    fn extracts_raw_token() {
        let service = JwtService::new("test_secret", "test_issuer".to_string());
        let request = axum::http::Request::builder()
            .header("authorization", token_for(&service))
            .body(axum::body::Body::empty())
            .unwrap();

        assert!(extract_auth_user(&request, &service).is_some());
    }

    #[test]
    fn missing_or_invalid_tokens_yield_none() {
        let service = JwtService::new("test_secret", "test_issuer".to_string());

        let bare = axum::http::Request::builder()
            .body(axum::body::Body::empty())
            .unwrap();
        assert!(extract_auth_user(&bare, &service).is_none());

        let bad = axum::http::Request::builder()
            .header("authorization", "Bearer not_a_token")
            .body(axum::body::Body::empty())
            .unwrap();
        assert!(extract_auth_user(&bad, &service).is_none());
    }
}
