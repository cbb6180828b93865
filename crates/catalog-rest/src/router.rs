//! Main application router.

use crate::{
    controllers::{health_controller, product_controller},
    middleware::{logging_middleware, rate_limit_middleware},
    openapi::ApiDoc,
    state::AppState,
};
use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::get,
    Router,
};
use catalog_config::{AppConfig, ServerConfig};
use catalog_repository::DatabasePoolInterface;
use catalog_resilience::{ClientRateLimiter, DEFAULT_PRUNE_INTERVAL};
use catalog_service::ProductService;
use shaku::{HasComponent, Module};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Creates the main application router from a Shaku module.
pub fn create_router<M>(module: &M, config: &AppConfig) -> Router
where
    M: Module + HasComponent<dyn ProductService> + HasComponent<dyn DatabasePoolInterface>,
{
    create_router_with_state(AppState::from_module(module), config)
}

/// Creates the main application router around prepared state.
pub fn create_router_with_state(state: AppState, config: &AppConfig) -> Router {
    let cors = create_cors_layer(&config.server);
    let limiter = ClientRateLimiter::new(config.server.rate_limit_per_second);
    if limiter.spawn_pruner(DEFAULT_PRUNE_INTERVAL).is_none() {
        warn!("No async runtime, idle rate limiter state will not be pruned");
    }

    let api_router = Router::new()
        .nest("/products", product_controller::router())
        .layer(middleware::from_fn_with_state(limiter, rate_limit_middleware));

    let mut router = Router::new()
        // Health endpoints (not rate limited)
        .merge(health_controller::router())
        // API v1
        .nest("/api/v1", api_router)
        .route("/", get(root))
        .with_state(state);

    if config.app.is_production() {
        info!("Swagger UI disabled in production");
    } else {
        router = router
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));
        info!("Swagger UI available at /swagger-ui");
    }

    router
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// Creates a CORS layer based on server configuration.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if !server_config.cors_enabled {
        return CorsLayer::new();
    }

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    if server_config.cors_origins.iter().any(|o| o == "*") {
        layer.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = server_config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        layer.allow_origin(origins)
    }
}

/// Root endpoint handler.
async fn root() -> &'static str {
    "Catalog API v1"
}
