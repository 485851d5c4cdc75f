mod api;
mod auth;
mod config;
mod db;
mod models;
mod raw_sql;
mod schema;
mod telemetry;

use anyhow::Context;
use axum::extract::{FromRef, MatchedPath};
use axum::http::Request;
use axum::Router;
use config::Settings;
use foodgram_core::PdfFonts;
use std::env;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::Span;
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across all handlers
#[derive(Clone, FromRef)]
pub struct AppState {
    pub pool: Arc<db::DbPool>,
    pub settings: Arc<Settings>,
    pub fonts: Arc<PdfFonts>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Check for --openapi flag to dump spec and exit
    if env::args().any(|arg| arg == "--openapi") {
        let spec = api::openapi()
            .to_pretty_json()
            .context("Failed to serialize OpenAPI spec")?;
        println!("{}", spec);
        return Ok(());
    }

    telemetry::init_telemetry()?;

    let settings = Settings::from_env()?;
    let pool = db::create_pool(&settings.database_url)?;
    let fonts = match &settings.font_path {
        Some(path) => PdfFonts::load(path).context("PDF_FONT_PATH is not readable")?,
        None => PdfFonts::embedded(),
    };
    foodgram_core::render_shopping_list(&[], &fonts)
        .context("Shopping list font is not a usable TrueType face")?;

    let bind_addr = settings.bind_addr;
    let public_url = settings.public_url.clone();

    let state = AppState {
        pool: Arc::new(pool),
        settings: Arc::new(settings),
        fonts: Arc::new(fonts),
    };

    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api::openapi());

    let app = Router::new()
        .nest("/api/recipes", api::recipes::router())
        .nest("/api/ingredients", api::ingredients::router())
        .nest("/api/tags", api::tags::router())
        .nest("/api/users", api::users::router())
        .nest("/api/photos", api::photos::router())
        .nest("/r", api::short_links::router())
        .merge(swagger_ui)
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let matched_path = request
                        .extensions()
                        .get::<MatchedPath>()
                        .map(MatchedPath::as_str)
                        .unwrap_or(request.uri().path());

                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %matched_path,
                    )
                })
                .on_request(|_request: &Request<_>, _span: &Span| {})
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     _span: &Span| {
                        let status = response.status().as_u16();
                        if status >= 500 {
                            tracing::error!(
                                status = %status,
                                latency_ms = %latency.as_millis(),
                                "request failed with server error"
                            );
                        } else {
                            tracing::info!(
                                status = %status,
                                latency_ms = %latency.as_millis(),
                                "request completed"
                            );
                        }
                    },
                )
                .on_failure(
                    |error: tower_http::classify::ServerErrorsFailureClass,
                     latency: std::time::Duration,
                     _span: &Span| {
                        tracing::error!(
                            error = %error,
                            latency_ms = %latency.as_millis(),
                            "request failed"
                        );
                    },
                ),
        );

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("Failed to bind {bind_addr}"))?;

    tracing::info!("Server listening on {}", listener.local_addr()?);
    tracing::info!("Swagger UI available at {}/swagger-ui/", public_url);
    tracing::info!("OpenAPI spec available at {}/api-docs/openapi.json", public_url);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
