use super::error::ApiError;
use axum::extract::rejection::QueryRejection;
use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

/// `Query` whose rejection renders as the usual `{"error": "..."}` body.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(ApiQuery(value))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(e: QueryRejection) -> Self {
        ApiError::BadRequest(e.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::pagination::PageParams;
    use crate::api::users::subscribe::RecipesLimitParams;
    use axum::body::to_bytes;
    use axum::http::{Request, StatusCode};
    use axum::response::IntoResponse;

    fn parts(uri: &str) -> Parts {
        Request::builder().uri(uri).body(()).unwrap().into_parts().0
    }

    async fn rejection<T: DeserializeOwned>(uri: &str) -> ApiError {
        match ApiQuery::<T>::from_request_parts(&mut parts(uri), &()).await {
            Ok(_) => panic!("{uri} should be rejected"),
            Err(e) => e,
        }
    }

    #[tokio::test]
    async fn test_parses_valid_query() {
        let ApiQuery(params) =
            ApiQuery::<PageParams>::from_request_parts(&mut parts("/?page=2&limit=10"), &())
                .await
                .unwrap();
        assert_eq!(params.page, Some(2));
        assert_eq!(params.limit, Some(10));
    }

    #[tokio::test]
    async fn test_negative_recipes_limit_is_json_bad_request() {
        let err = rejection::<RecipesLimitParams>("/?recipes_limit=-1").await;
        assert!(matches!(err, ApiError::BadRequest(_)));

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json["error"]
            .as_str()
            .unwrap()
            .starts_with("Failed to deserialize query string"));
    }

    #[tokio::test]
    async fn test_non_numeric_page_is_bad_request() {
        let err = rejection::<PageParams>("/?page=abc").await;
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}
