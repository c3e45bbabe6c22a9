//! ルーター構築
//!
//! 死活確認エンドポイントとフォワードフォールバック

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::{proxy, AppState};

/// ゲートウェイのルーターを作成する
///
/// 明示ルートは `/health` のみ。それ以外のパスはフォールバックで
/// ルーティングテーブルと照合され、一致すれば転送される。
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .fallback(proxy::forward)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - 死活確認（レジストリには触れない）
async fn health() -> &'static str {
    "API Gateway is running"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::DiscoveryClient;
    use crate::routes::RouteTable;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use mesh_common::config::GatewayConfig;
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_returns_static_text() {
        let state = AppState {
            routes: Arc::new(RouteTable::from_config(&GatewayConfig::default())),
            // ディスカバリが落ちていてもhealthは応答する
            discovery: DiscoveryClient::new("http://127.0.0.1:1", Duration::from_millis(100)),
            http_client: reqwest::Client::new(),
        };

        let response = create_router(state)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"API Gateway is running");
    }
}
