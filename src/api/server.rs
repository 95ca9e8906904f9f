//! HTTP server implementation

use axum::http::HeaderValue;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::handlers::AppState;
use crate::api::routes;
use crate::config::ServerConfig;
use crate::errors::RehabRagError;
use crate::Result;

/// CORS layer for the configured origins, any method and header
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|_| {
                RehabRagError::Config(format!("Invalid CORS origin: {origin}"))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any))
}

/// Full application router with tracing, compression and CORS layers
pub fn build_app(config: &ServerConfig, state: AppState) -> Result<Router> {
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors_layer(&config.cors_origins)?);

    Ok(routes::app_routes(state).layer(middleware))
}

/// Start the API server
pub async fn serve_api(
    config: &ServerConfig,
    state: AppState,
    host: &str,
    port: u16,
) -> Result<()> {
    info!("🚀 Starting rehabilitation assistant API server...");

    let app = build_app(config, state)?;
    info!("✅ CORS enabled for: {}", config.cors_origins.join(", "));

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 API server listening on http://{}", addr);
    info!("Available endpoints:");
    info!("  GET  /                   - Service banner");
    info!("  GET  /api/health         - Health check");
    info!("  POST /api/chat           - Ask the assistant");
    info!("  GET  /api/rehab-plan     - Current rehabilitation plan");
    info!("  GET  /api/progress       - Progress log (?exercise_id=)");
    info!("  POST /api/progress       - Record progress");
    info!("  GET  /api/resources      - Resource center");

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_layer_accepts_default_origins() {
        let config = ServerConfig::default();
        assert!(cors_layer(&config.cors_origins).is_ok());
    }

    #[test]
    fn test_cors_layer_rejects_invalid_origin() {
        let result = cors_layer(&["http://bad\norigin".to_string()]);
        assert!(matches!(result, Err(RehabRagError::Config(_))));
    }
}
