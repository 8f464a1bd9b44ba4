use std::net::{IpAddr, Ipv6Addr, SocketAddr};

use axum::error_handling::HandleErrorLayer;
use axum::http::StatusCode;
use axum::Router;
use tower::timeout::TimeoutLayer;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use docconvert::config::Settings;
use docconvert::routes;
use docconvert::state::ServiceCollection;

#[tokio::main]
async fn main() {
    let subscriber = tracing_subscriber::fmt().json().finish();
    tracing::subscriber::set_global_default(subscriber).expect("Could not init tracing.");

    let settings = Settings::from_env();
    let port = settings.port;
    let timeout = settings.request_timeout;

    let services = match ServiceCollection::build(settings).await {
        Ok(services) => services,
        Err(err) => {
            error!("startup failed: {}", err);
            std::process::exit(1);
        }
    };

    let app = Router::new()
        .merge(routes::root::create_route())
        .merge(routes::documents::create_route(services))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(HandleErrorLayer::new(|_| async { StatusCode::REQUEST_TIMEOUT }))
                .layer(TimeoutLayer::new(timeout)),
        );

    let addr = SocketAddr::new(IpAddr::V6(Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0, 0)), port);
    info!("listening on {}", &addr);
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .unwrap();
}
