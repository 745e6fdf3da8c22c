use axum::{Server, middleware::from_fn};
use std::{net::SocketAddr, sync::Arc};
use taskboard_backend::{
    AppState, config::Config, cors_layer, db, init_tracing, middleware::request_tracking_middleware,
    routes,
};

#[tokio::main]
async fn main() {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    init_tracing(&config);

    let pool = match db::build_pool(&config) {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {}", e);
            std::process::exit(1);
        }
    };

    let addr: SocketAddr = match config.server_address().parse() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!("Invalid server address {}: {}", config.server_address(), e);
            std::process::exit(1);
        }
    };

    let cors = cors_layer(&config.cors_origins);
    let state = Arc::new(AppState::new(pool, config));

    let app = routes::create_router(state)
        .layer(cors)
        .layer(from_fn(request_tracking_middleware));

    tracing::info!("Server running at http://{}", addr);
    if let Err(e) = Server::bind(&addr).serve(app.into_make_service()).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
