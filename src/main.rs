use coupon_service_rust::config::ServerConfig;
use coupon_service_rust::coupon::AppState;
use coupon_service_rust::logger::init_logger;
use coupon_service_rust::router::create_app_router;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration before anything else so logging honours it
    let config = ServerConfig::from_env()?;
    init_logger(config.log_format);

    // Initialize application state
    let state = Arc::new(AppState::new());
    if let Some(path) = &config.seed_file {
        state.load_seed_file(path).await?;
    }

    // Build application router with all routes and middleware
    let app = create_app_router(state);

    // Start the server
    let addr = config.socket_addr();
    tracing::info!("Server running on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
