// File: crates/services/citaflow_backend/src/main.rs
use axum::{routing::get, Router};
use citaflow_common::{is_feature_enabled, logging};
use citaflow_config::load_config;
#[cfg(feature = "gcal")]
use citaflow_gcal::routes as gcal_routes;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

#[tokio::main]
async fn main() {
    logging::init();
    let config = Arc::new(load_config().expect("Failed to load config"));

    let api_router = Router::new()
        .route("/", get(|| async { "Welcome to the Citaflow API!" }))
        .with_state(config.clone());

    let api_router = Router::new().nest("/api", {
        #[allow(unused_mut)] // mutated only when feature crates are compiled in
        let mut router = api_router;
        #[cfg(feature = "gcal")]
        {
            if is_feature_enabled(&config, config.use_gcal, config.oauth.as_ref()) {
                info!("Google Calendar booking routes enabled");
                router = router.merge(gcal_routes::routes(config.clone()));
            } else {
                info!("Google Calendar booking routes disabled by configuration");
            }
        }
        router
    });

    // The booking frontend is served from another origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let mut app = api_router.layer(cors);

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        #[cfg(feature = "gcal")]
        use citaflow_gcal::doc::GcalApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Citaflow API",
                version = "0.1.0",
                description = "Appointment booking service API docs"
            ),
            components(),
            tags((name = "Citaflow", description = "Core service endpoints")),
            servers((url = "/api", description = "Main API prefix")),
        )]
        struct ApiDoc;

        #[allow(unused_mut)] // merged only when feature crates are compiled in
        let mut openapi_doc = ApiDoc::openapi();
        #[cfg(feature = "gcal")]
        openapi_doc.merge(GcalApiDoc::openapi());

        info!("Swagger UI available at /api/docs");
        let swagger_ui =
            SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc.clone());
        app = app.merge(swagger_ui);
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await.expect("Failed to bind address");
    info!("Starting server at http://{addr}");
    info!("API endpoints available at http://{addr}/api");

    axum::serve(listener, app.into_make_service())
        .await
        .expect("Server error");
}
