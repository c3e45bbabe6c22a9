//! REST APIハンドラー
//!
//! 登録・登録解除・ディスカバリAPI

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use mesh_common::protocol::{DiscoverParams, RegistrationParams};
use tower_http::trace::TraceLayer;

use crate::AppState;

/// APIルーターを作成する
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/registry/register", post(register_service))
        .route("/api/registry/unregister", post(unregister_service))
        .route("/api/registry/discover", get(discover_service))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// POST /api/registry/register - サービス登録（冪等）
async fn register_service(
    State(state): State<AppState>,
    Query(params): Query<RegistrationParams>,
) -> String {
    state
        .registry
        .register(&params.service_name, &params.service_url)
        .await;
    format!(
        "Service {} registered at {}",
        params.service_name, params.service_url
    )
}

/// POST /api/registry/unregister - サービス登録解除（冪等）
async fn unregister_service(
    State(state): State<AppState>,
    Query(params): Query<RegistrationParams>,
) -> String {
    state
        .registry
        .unregister(&params.service_name, &params.service_url)
        .await;
    format!(
        "Service {} unregistered from {}",
        params.service_name, params.service_url
    )
}

/// GET /api/registry/discover - 稼働中インスタンスのURL一覧
async fn discover_service(
    State(state): State<AppState>,
    Query(params): Query<DiscoverParams>,
) -> Json<Vec<String>> {
    Json(state.registry.discover(&params.service_name).await)
}

/// GET /health - 死活確認
async fn health() -> &'static str {
    "Service Discovery is running"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ServiceRegistry;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn test_app() -> (Router, ServiceRegistry) {
        let registry = ServiceRegistry::new();
        let app = create_router(AppState {
            registry: registry.clone(),
        });
        (app, registry)
    }

    async fn body_string(body: Body) -> String {
        let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_register_then_discover_roundtrip() {
        let (app, _) = test_app();

        let response = app
            .clone()
            .oneshot(
                Request::post(
                    "/api/registry/register?serviceName=OrderService&serviceUrl=http://host:5002",
                )
                .body(Body::empty())
                .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_string(response.into_body()).await,
            "Service OrderService registered at http://host:5002"
        );

        let response = app
            .oneshot(
                Request::get("/api/registry/discover?serviceName=OrderService")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let urls: Vec<String> =
            serde_json::from_str(&body_string(response.into_body()).await).unwrap();
        assert_eq!(urls, vec!["http://host:5002".to_string()]);
    }

    #[tokio::test]
    async fn test_discover_unknown_service_returns_empty_array() {
        let (app, _) = test_app();

        let response = app
            .oneshot(
                Request::get("/api/registry/discover?serviceName=NoSuchService")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response.into_body()).await, "[]");
    }

    #[tokio::test]
    async fn test_unregister_removes_registration() {
        let (app, registry) = test_app();
        registry
            .register("ProductService", "http://host:5001")
            .await;

        let response = app
            .oneshot(
                Request::post(
                    "/api/registry/unregister?serviceName=ProductService&serviceUrl=http://host:5001",
                )
                .body(Body::empty())
                .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(registry.discover("ProductService").await.is_empty());
    }

    #[tokio::test]
    async fn test_register_missing_params_is_bad_request() {
        let (app, _) = test_app();

        let response = app
            .oneshot(
                Request::post("/api/registry/register?serviceName=OrderService")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_health_does_not_touch_registry() {
        let (app, _) = test_app();

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_string(response.into_body()).await,
            "Service Discovery is running"
        );
    }
}
