//! REST APIハンドラー

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use mesh_common::types::Order;
use tower_http::trace::TraceLayer;

use crate::store::NewOrder;
use crate::AppState;

/// APIルーターを作成する
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/orders", get(list_orders).post(create_order))
        .route("/api/orders/:id", get(get_order))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /api/orders - 全注文
async fn list_orders(State(state): State<AppState>) -> Json<Vec<Order>> {
    Json(state.store.list().await)
}

/// GET /api/orders/:id - 注文取得
async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<Order>, StatusCode> {
    state
        .store
        .get(id)
        .await
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// POST /api/orders - 注文追加
async fn create_order(
    State(state): State<AppState>,
    Json(new): Json<NewOrder>,
) -> (StatusCode, Json<Order>) {
    let order = state.store.add(new).await;
    (StatusCode::CREATED, Json(order))
}

/// GET /health - 死活確認
async fn health() -> &'static str {
    "OrderService is healthy"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::OrderStore;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn test_app() -> Router {
        create_router(AppState {
            store: OrderStore::new(),
        })
    }

    async fn body_json(body: Body) -> serde_json::Value {
        let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_list_orders_empty() {
        let response = test_app()
            .oneshot(Request::get("/api/orders").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let orders = body_json(response.into_body()).await;
        assert_eq!(orders.as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_create_then_get_order() {
        let app = test_app();

        let response = app
            .clone()
            .oneshot(
                Request::post("/api/orders")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"product_id":1,"quantity":2}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response.into_body()).await;
        assert_eq!(created["id"], 1);
        assert_eq!(created["quantity"], 2);

        let response = app
            .oneshot(Request::get("/api/orders/1").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let order = body_json(response.into_body()).await;
        assert_eq!(order["product_id"], 1);
    }

    #[tokio::test]
    async fn test_get_missing_order_returns_404() {
        let response = test_app()
            .oneshot(Request::get("/api/orders/42").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
