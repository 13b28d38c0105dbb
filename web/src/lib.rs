use axum::http::{header, HeaderValue, Method};
use log::{info, warn};
use tower_http::cors::{AllowOrigin, CorsLayer};

pub use error::{Error, Result};
pub use service::AppState;

pub mod controller;
mod error;
pub(crate) mod params;
pub mod router;
pub(crate) mod sse;

pub async fn init_server(app_state: AppState) -> std::io::Result<()> {
    let host = app_state
        .config
        .interface
        .clone()
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let port = app_state.config.port;
    let server_url = format!("{host}:{port}");

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
        .allow_origin(AllowOrigin::list(allowed_origins(&app_state)));

    let router = router::define_routes(app_state).layer(cors);

    let listener = tokio::net::TcpListener::bind(&server_url).await?;
    info!("Server starting... Listening on: {server_url}");

    axum::serve(listener, router).await
}

fn allowed_origins(app_state: &AppState) -> Vec<HeaderValue> {
    app_state
        .config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Skipping invalid allowed origin: {origin}");
                None
            }
        })
        .collect()
}
