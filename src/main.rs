//! Hello World API server.
//!
//! A small REST service that stores greetings for different languages in a
//! single JSON document on disk.
//!
//! # Configuration
//!
//! Environment variables:
//! - `HELLO_API_PORT`: Port to listen on (default: 3000)
//! - `HELLO_API_DATA_DIR`: Directory for the data file (default: ~/.local/share/hello-api)
//!
//! # Endpoints
//!
//! - `GET /`: Service metadata
//! - `GET /health`: Health check
//! - `GET /api/greetings`: List greetings, optional `language`/`formal` filters
//! - `GET /api/greetings/{id}`: Get one greeting
//! - `POST /api/greetings`: Create a greeting
//! - `PUT /api/greetings/{id}`: Update a greeting
//! - `DELETE /api/greetings/{id}`: Delete a greeting

use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod models;
mod server;

use config::Config;
use server::GreetingStore;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hello_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();

    // Ensure the data directory exists and seed an empty collection on
    // first run
    if let Err(e) = std::fs::create_dir_all(&config.data_dir) {
        tracing::error!("Failed to create data directory: {}", e);
        std::process::exit(1);
    }

    let data_file = config.data_file();
    let store = GreetingStore::new(&data_file);

    if !data_file.exists() {
        if let Err(e) = store.save(&[]) {
            tracing::error!("Failed to create data file: {}", e);
            std::process::exit(1);
        }
    }

    tracing::info!("Data file: {}", store.path().display());

    // Build router
    let app = server::router(store);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
