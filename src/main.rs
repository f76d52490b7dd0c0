use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use search_term_analyzer::{api, AppConfig, SearchTermAnalyzer};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{fmt::time::ChronoLocal, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logging: local time, RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .with_level(true)
        .init();

    // Configuration
    let config = AppConfig::from_env()?;
    info!("Starting server with config: {:?}", config);

    // The analyzer only holds settings, so requests share one instance
    let analyzer = Arc::new(SearchTermAnalyzer::new(config.analysis.clone()));

    let app = Router::new()
        .route("/", get(api::health_check))
        .route("/health", get(api::health_check))
        .route("/process", post(api::process))
        .route("/download", post(api::download))
        .with_state(analyzer)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(config.server.max_upload_bytes)),
        );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  POST /process   - classified buckets as JSON");
    info!("  POST /download  - classified buckets as CSV sections");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
