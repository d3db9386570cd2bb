use axum::http::{header, HeaderValue, Method};
use log::*;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

pub(crate) use service::AppState;

mod controller;
mod error;
mod extractors;
mod params;
mod response;
pub mod router;

pub use error::{Error, Result};

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {origin}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}

pub async fn init_server(app_state: AppState) -> std::io::Result<()> {
    let cors = cors_layer(&app_state.config.allowed_origins);
    let server_url = format!(
        "{}:{}",
        app_state.config.interface, app_state.config.port
    );

    let listener = TcpListener::bind(&server_url).await?;
    info!("Server starting... listening for connections on http://{server_url}");

    axum::serve(listener, router::define_routes(app_state).layer(cors)).await
}
