//! REST APIハンドラー

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use mesh_common::types::Product;
use tower_http::trace::TraceLayer;

use crate::store::NewProduct;
use crate::AppState;

/// APIルーターを作成する
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/products", get(list_products).post(create_product))
        .route("/api/products/:id", get(get_product))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /api/products - 全商品
async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.store.list().await)
}

/// GET /api/products/:id - 商品取得
async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<Product>, StatusCode> {
    state
        .store
        .get(id)
        .await
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// POST /api/products - 商品追加
async fn create_product(
    State(state): State<AppState>,
    Json(new): Json<NewProduct>,
) -> (StatusCode, Json<Product>) {
    let product = state.store.add(new).await;
    (StatusCode::CREATED, Json(product))
}

/// GET /health - 死活確認
async fn health() -> &'static str {
    "ProductService is healthy"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ProductStore;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn test_app() -> Router {
        create_router(AppState {
            store: ProductStore::new(),
        })
    }

    async fn body_json(body: Body) -> serde_json::Value {
        let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_list_products() {
        let response = test_app()
            .oneshot(Request::get("/api/products").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let products = body_json(response.into_body()).await;
        assert_eq!(products.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_get_product_by_id() {
        let response = test_app()
            .oneshot(Request::get("/api/products/2").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let product = body_json(response.into_body()).await;
        assert_eq!(product["name"], "Mouse");
    }

    #[tokio::test]
    async fn test_get_missing_product_returns_404() {
        let response = test_app()
            .oneshot(
                Request::get("/api/products/999")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_product_returns_201() {
        let response = test_app()
            .oneshot(
                Request::post("/api/products")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"name":"Monitor","price":199.99}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let product = body_json(response.into_body()).await;
        assert_eq!(product["id"], 4);
    }

    #[tokio::test]
    async fn test_health() {
        let response = test_app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
