use super::jwt::JwtAuth;
use crate::audit::{AuditEvent, AuditOutcome};
use crate::errors::AppError;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Bearer token from `Authorization`, falling back to an `access_token` cookie.
fn extract_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .or_else(|| {
            headers
                .get(header::COOKIE)
                .and_then(|v| v.to_str().ok())
                .and_then(|cookies| {
                    cookies.split(';').find_map(|cookie| {
                        cookie
                            .trim()
                            .strip_prefix("access_token=")
                            .map(str::to_string)
                    })
                })
        })
        .filter(|t| !t.is_empty())
}

/// Rejects requests without a valid token; on success inserts
/// [`JwtClaims`](super::JwtClaims) into the request extensions.
pub async fn jwt_auth_middleware(
    State(auth): State<JwtAuth>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = extract_token(request.headers()) else {
        return AppError::Unauthorized("no bearer token".to_string()).into_response();
    };

    match auth.verify_token(&token) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(e) => {
            tracing::debug!("JWT verification failed: {}", e);
            AuditEvent::new(
                "auth.verify",
                Some(request.uri().path().to_string()),
                AuditOutcome::Denied,
            )
            .with_request(request.headers())
            .with_details(serde_json::json!({ "reason": e.to_string() }))
            .log();
            AppError::Unauthorized(e.to_string()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{JwtClaims, JwtConfig};
    use axum::{Extension, Router, body::Body, http::Request, http::StatusCode, routing::get};
    use tower::ServiceExt;

    fn auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("middleware-secret-middleware-secret-00").unwrap())
    }

    fn app(auth: JwtAuth) -> Router {
        Router::new()
            .route(
                "/me",
                get(|Extension(claims): Extension<JwtClaims>| async move { claims.email }),
            )
            .route_layer(axum::middleware::from_fn_with_state(auth, jwt_auth_middleware))
    }

    #[test]
    fn test_extract_token_sources() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_token(&headers), None);

        headers.insert(header::COOKIE, "theme=dark; access_token=abc".parse().unwrap());
        assert_eq!(extract_token(&headers).as_deref(), Some("abc"));

        headers.insert(header::AUTHORIZATION, "Bearer xyz".parse().unwrap());
        assert_eq!(extract_token(&headers).as_deref(), Some("xyz"));
    }

    #[tokio::test]
    async fn test_missing_token_is_401() {
        let response = app(auth())
            .oneshot(Request::get("/me").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_valid_token_passes_claims() {
        let auth = auth();
        let token = auth.create_token("1", "Ada", "ada@example.com").unwrap();
        let response = app(auth)
            .oneshot(
                Request::get("/me")
                    .header("authorization", format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
