use super::ErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use diesel::result::DatabaseErrorKind;
use foodgram_core::{ImageError, RenderError, ShortLinkError, ToggleError, ValidationError};
use thiserror::Error;

/// Error returned by every JSON handler, rendered as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    BadRequest(String),

    /// The relation or unique value already exists.
    #[error("{0}")]
    Duplicate(String),

    /// Removing a relation that was never added.
    #[error("{0}")]
    NotActive(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Forbidden(&'static str),

    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn internal(message: impl std::fmt::Display) -> Self {
        ApiError::Internal(anyhow::anyhow!("{message}"))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_)
            | ApiError::BadRequest(_)
            | ApiError::Duplicate(_)
            | ApiError::NotActive(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(ref e) = self {
            tracing::error!("{:#}", e);
        }

        (
            self.status(),
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

impl From<diesel::r2d2::PoolError> for ApiError {
    fn from(e: diesel::r2d2::PoolError) -> Self {
        ApiError::Internal(anyhow::Error::new(e).context("Database connection failed"))
    }
}

impl From<diesel::result::Error> for ApiError {
    fn from(e: diesel::result::Error) -> Self {
        match e {
            diesel::result::Error::NotFound => ApiError::NotFound("Resource"),
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info) => {
                tracing::debug!(constraint = ?info.constraint_name(), "unique violation");
                ApiError::Duplicate(unique_violation_message(info.constraint_name()).to_string())
            }
            other => ApiError::Internal(anyhow::Error::new(other).context("Database query failed")),
        }
    }
}

/// Human-readable message for the named unique constraint.
fn unique_violation_message(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some("users_email_key") => "A user with this email already exists",
        Some("users_username_key") => "A user with this username already exists",
        Some("tags_name_key") => "A tag with this name already exists",
        Some("tags_slug_key") => "A tag with this slug already exists",
        Some("unique_recipe_ingredient") => "Ingredient is listed more than once",
        Some("unique_recipe_tag") => "Tag is listed more than once",
        _ => "Already exists",
    }
}

impl From<ShortLinkError> for ApiError {
    fn from(e: ShortLinkError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

impl From<ImageError> for ApiError {
    fn from(e: ImageError) -> Self {
        ApiError::Validation(ValidationError::InvalidImage(e))
    }
}

impl From<RenderError> for ApiError {
    fn from(e: RenderError) -> Self {
        ApiError::Internal(anyhow::Error::new(e))
    }
}

impl From<ToggleError<diesel::result::Error>> for ApiError {
    fn from(e: ToggleError<diesel::result::Error>) -> Self {
        match e {
            ToggleError::AlreadyActive(_) => ApiError::Duplicate(e.to_string()),
            ToggleError::NotActive(_) => ApiError::NotActive(e.to_string()),
            ToggleError::SelfSubscription => ApiError::BadRequest(e.to_string()),
            ToggleError::Store(inner) => inner.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foodgram_core::RelationKind;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::from(ValidationError::NoTags).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFound("Recipe").status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Forbidden("nope").status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::Unauthorized("who").status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::internal("boom").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(ApiError::NotFound("Recipe").to_string(), "Recipe not found");
    }

    #[test]
    fn test_internal_message_is_generic() {
        let err = ApiError::internal("password for postgres is hunter2");
        assert_eq!(err.to_string(), "Internal server error");
    }

    type DbToggleError = ToggleError<diesel::result::Error>;

    #[test]
    fn test_toggle_errors() {
        let err = ApiError::from(DbToggleError::AlreadyActive(RelationKind::Favorite));
        assert!(matches!(err, ApiError::Duplicate(_)));
        assert_eq!(err.to_string(), "Recipe is already in favorites");

        let err = ApiError::from(DbToggleError::NotActive(RelationKind::Subscription));
        assert!(matches!(err, ApiError::NotActive(_)));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = ApiError::from(DbToggleError::SelfSubscription);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = ApiError::from(DbToggleError::Store(diesel::result::Error::NotFound));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_short_link_error_is_bad_request() {
        let err = ApiError::from(ShortLinkError::InvalidCharacter('-'));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_image_error_is_validation() {
        let err = ApiError::from(ImageError::NotDataUri);
        assert!(matches!(
            err,
            ApiError::Validation(ValidationError::InvalidImage(_))
        ));
    }

    #[test]
    fn test_unique_violation_messages() {
        assert_eq!(
            unique_violation_message(Some("users_email_key")),
            "A user with this email already exists"
        );
        assert_eq!(unique_violation_message(None), "Already exists");
    }
}
