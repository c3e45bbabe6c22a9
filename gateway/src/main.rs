//! API Gateway Server Entry Point

use std::sync::Arc;
use std::time::Duration;

use mesh_common::config::GatewayConfig;
use mesh_common::shutdown::{ctrl_c_signal, ShutdownController};
use mesh_gateway::{api, discovery::DiscoveryClient, routes::RouteTable, AppState};
use tracing::info;

#[tokio::main]
async fn main() {
    mesh_common::logging::init();

    let config = GatewayConfig::from_env();
    info!(
        discovery_url = %config.discovery_url,
        "starting api gateway"
    );

    let state = AppState {
        routes: Arc::new(RouteTable::from_config(&config)),
        discovery: DiscoveryClient::new(
            &config.discovery_url,
            Duration::from_secs(config.discovery_timeout_secs),
        ),
        http_client: reqwest::Client::builder()
            .timeout(Duration::from_secs(config.forward_timeout_secs))
            .build()
            .expect("failed to build HTTP client"),
    };

    let app = api::create_router(state);
    let shutdown = ShutdownController::default();

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .expect("failed to bind to address");
    info!(addr = %config.bind_addr(), "api gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(ctrl_c_signal(shutdown))
        .await
        .expect("server error");
}
