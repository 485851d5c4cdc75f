pub mod error;
pub mod ingredients;
pub mod pagination;
pub mod photos;
pub mod query;
pub mod recipes;
pub mod relations;
pub mod short_links;
pub mod tags;
pub mod users;

use serde::Serialize;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{OpenApi, ToSchema};

use crate::models::{Ingredient, Tag};
use pagination::PaginationMetadata;

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    // Base spec with shared components and security
    #[derive(OpenApi)]
    #[openapi(
        info(title = "Foodgram API", description = "Recipes, subscriptions and shopping lists"),
        components(schemas(ErrorResponse, PaginationMetadata, Ingredient, Tag))
    )]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    if let Some(components) = spec.components.as_mut() {
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }

    let modules: Vec<utoipa::openapi::OpenApi> = vec![
        recipes::ApiDoc::openapi(),
        ingredients::ApiDoc::openapi(),
        tags::ApiDoc::openapi(),
        users::ApiDoc::openapi(),
        photos::ApiDoc::openapi(),
        short_links::ApiDoc::openapi(),
    ];

    for module_spec in modules {
        spec.paths.paths.extend(module_spec.paths.paths);

        if let Some(module_components) = module_spec.components {
            if let Some(spec_components) = spec.components.as_mut() {
                spec_components.schemas.extend(module_components.schemas);
            }
        }
    }

    spec
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_covers_every_resource() {
        let spec = openapi();
        for path in [
            "/api/recipes",
            "/api/recipes/{id}",
            "/api/recipes/download_shopping_cart",
            "/api/recipes/{id}/get-link",
            "/api/ingredients",
            "/api/tags",
            "/api/users",
            "/api/users/me/avatar",
            "/api/users/subscriptions",
            "/api/users/{id}/subscribe",
            "/api/photos/{id}",
            "/r/{code}/",
        ] {
            assert!(spec.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn test_bearer_scheme_registered() {
        let spec = openapi();
        let components = spec.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
        assert!(components.schemas.contains_key("ErrorResponse"));
    }
}
