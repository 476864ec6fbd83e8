//! Axum router construction.
//!
//! Builds the full application router with the gallery API, middleware
//! layers, OpenAPI docs, and optional static file serving for the client UI.

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, patch};
use axum::Router;
use std::path::PathBuf;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::context::AppContext;
use crate::middleware::auth::admin_middleware;
use crate::middleware::request_id::request_id_middleware;
use crate::routes;

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::health::health_check,
        routes::galleries::create_gallery,
        routes::galleries::list_galleries,
        routes::galleries::get_gallery,
        routes::galleries::append_images,
        routes::galleries::remove_images,
    ),
    components(schemas(
        routes::health::HealthResponse,
        routes::galleries::CreateGalleryRequest,
        routes::galleries::AppendImagesRequest,
        routes::galleries::RemoveImagesRequest,
        routes::galleries::GalleryResponse,
        routes::galleries::GalleryEnvelope,
        routes::galleries::GalleryListEnvelope,
    ))
)]
struct ApiDoc;

/// Build the complete Axum router.
pub fn build_router(ctx: AppContext, static_dir: Option<PathBuf>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = DefaultBodyLimit::max(ctx.config.server.max_body_bytes);

    let api = Router::new()
        .route(
            "/galleries",
            get(routes::galleries::list_galleries)
                .post(routes::galleries::create_gallery)
                .patch(routes::galleries::remove_images),
        )
        .route("/galleries/{id}", get(routes::galleries::get_gallery))
        .route(
            "/galleries/{id}/images",
            patch(routes::galleries::append_images),
        )
        .layer(body_limit)
        .layer(middleware::from_fn_with_state(ctx.clone(), admin_middleware));

    let mut app = Router::new()
        .route("/health", get(routes::health::health_check))
        .nest("/api", api)
        .merge(SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx);

    // Static file serving for the client UI build. Unknown paths get
    // index.html so client-side routes resolve.
    if let Some(dir) = static_dir {
        if dir.exists() {
            tracing::info!("Serving static files from {:?}", dir);
            let index_path = dir.join("index.html");
            app = app.fallback_service(
                tower_http::services::ServeDir::new(&dir)
                    .append_index_html_on_directories(true)
                    .fallback(tower_http::services::ServeFile::new(index_path)),
            );
        } else {
            tracing::warn!("Static directory {:?} does not exist; UI will not be served", dir);
        }
    }

    app
}
