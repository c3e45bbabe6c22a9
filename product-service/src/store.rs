//! インメモリ商品ストア

use std::sync::Arc;

use mesh_common::types::Product;
use serde::Deserialize;
use tokio::sync::RwLock;

/// 商品作成リクエスト
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    /// 商品名
    pub name: String,
    /// 価格
    pub price: f64,
}

/// インメモリ商品ストア
///
/// プロセス再起動で消える（永続化は対象外）。
#[derive(Clone)]
pub struct ProductStore {
    products: Arc<RwLock<Vec<Product>>>,
}

impl ProductStore {
    /// 初期データ入りのストアを作成する
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(vec![
                Product {
                    id: 1,
                    name: "Laptop".to_string(),
                    price: 999.99,
                },
                Product {
                    id: 2,
                    name: "Mouse".to_string(),
                    price: 19.99,
                },
                Product {
                    id: 3,
                    name: "Keyboard".to_string(),
                    price: 49.99,
                },
            ])),
        }
    }

    /// 全商品を返す
    pub async fn list(&self) -> Vec<Product> {
        self.products.read().await.clone()
    }

    /// IDで商品を取得する
    pub async fn get(&self, id: u32) -> Option<Product> {
        self.products
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    /// 商品を追加し、採番済みの商品を返す
    pub async fn add(&self, new: NewProduct) -> Product {
        let mut products = self.products.write().await;
        let id = products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let product = Product {
            id,
            name: new.name,
            price: new.price,
        };
        products.push(product.clone());
        product
    }
}

impl Default for ProductStore {
    fn default() -> Self {
        Self::new()
    }
}
