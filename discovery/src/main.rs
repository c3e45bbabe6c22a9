//! Service Discovery Server Entry Point

use std::time::Duration;

use mesh_common::config::DiscoveryConfig;
use mesh_common::shutdown::{ctrl_c_signal, ShutdownController};
use mesh_discovery::{api, registry::ServiceRegistry, sweeper::RegistryCleanup, AppState};
use tracing::info;

#[tokio::main]
async fn main() {
    mesh_common::logging::init();

    let config = DiscoveryConfig::from_env();
    info!(
        ttl_secs = config.registration_ttl_secs,
        cleanup_interval_secs = config.cleanup_interval_secs,
        "starting service discovery"
    );

    let registry =
        ServiceRegistry::with_ttl(chrono::Duration::seconds(config.registration_ttl_secs as i64));

    // クリーンアップタスク起動
    let shutdown = ShutdownController::default();
    let cleanup_handle = RegistryCleanup::new(registry.clone())
        .with_interval(Duration::from_secs(config.cleanup_interval_secs))
        .start(shutdown.clone());

    let state = AppState { registry };
    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .expect("failed to bind to address");
    info!(addr = %config.bind_addr(), "service discovery listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(ctrl_c_signal(shutdown.clone()))
        .await
        .expect("server error");

    // サーバー停止後、クリーンアップタスクの終了を待つ
    shutdown.trigger();
    let _ = cleanup_handle.await;
}
