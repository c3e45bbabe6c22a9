//! Order Service Entry Point

use mesh_common::config::BackendConfig;
use mesh_common::registrar::ServiceAnnouncer;
use mesh_common::shutdown::{ctrl_c_signal, ShutdownController};
use mesh_order_service::{api, store::OrderStore, AppState};
use tracing::info;

/// デフォルトのリッスンポート
const DEFAULT_PORT: u16 = 5002;

#[tokio::main]
async fn main() {
    mesh_common::logging::init();

    let config = BackendConfig::from_env(DEFAULT_PORT);

    // 登録クライアント起動（起動猶予の後にアナウンスを開始する）
    let shutdown = ShutdownController::default();
    let announcer_handle =
        ServiceAnnouncer::from_config("OrderService", &config).start(shutdown.clone());

    let state = AppState {
        store: OrderStore::new(),
    };
    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .expect("failed to bind to address");
    info!(addr = %config.bind_addr(), "order service listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(ctrl_c_signal(shutdown.clone()))
        .await
        .expect("server error");

    // 登録解除（ベストエフォート）の完了を待ってから終了する
    shutdown.trigger();
    let _ = announcer_handle.await;
}
