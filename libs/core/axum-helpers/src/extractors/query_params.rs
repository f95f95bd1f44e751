//! Query string extractor with enveloped rejections.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

/// Deserializes the query string into `T`.
///
/// A query string that does not fit `T` (duplicate keys, wrong shapes) is
/// rejected with a `400` envelope carrying axum's rejection text.
///
/// ```ignore
/// #[derive(Deserialize)]
/// struct Filter {
///     search: Option<String>,
/// }
///
/// async fn list(QueryParams(filter): QueryParams<Filter>) -> String {
///     filter.search.unwrap_or_default()
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()).into_response())?;

        Ok(QueryParams(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::get};
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use serde_json::Value;
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct Filter {
        search: Option<String>,
    }

    fn app() -> Router {
        Router::new().route(
            "/",
            get(|QueryParams(filter): QueryParams<Filter>| async move {
                filter.search.unwrap_or_default()
            }),
        )
    }

    #[tokio::test]
    async fn test_parses_query() {
        let response = app()
            .oneshot(Request::get("/?search=pen").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_duplicate_key_is_400_envelope() {
        let response = app()
            .oneshot(Request::get("/?search=a&search=b").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["data"], Value::Null);
        assert!(body["message"].as_str().unwrap().contains("duplicate field"));
    }
}
