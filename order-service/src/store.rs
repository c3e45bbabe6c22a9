//! インメモリ注文ストア

use std::sync::Arc;

use chrono::Utc;
use mesh_common::types::Order;
use serde::Deserialize;
use tokio::sync::RwLock;

/// 注文作成リクエスト
#[derive(Debug, Clone, Deserialize)]
pub struct NewOrder {
    /// 注文対象の商品ID
    pub product_id: u32,
    /// 数量
    pub quantity: u32,
}

/// ストア内部状態
#[derive(Default)]
struct Inner {
    orders: Vec<Order>,
    next_id: u32,
}

/// インメモリ注文ストア
///
/// 起動時は空。IDは1から連番で採番する。
#[derive(Clone)]
pub struct OrderStore {
    inner: Arc<RwLock<Inner>>,
}

impl OrderStore {
    /// 空のストアを作成する
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                orders: Vec::new(),
                next_id: 1,
            })),
        }
    }

    /// 全注文を返す
    pub async fn list(&self) -> Vec<Order> {
        self.inner.read().await.orders.clone()
    }

    /// IDで注文を取得する
    pub async fn get(&self, id: u32) -> Option<Order> {
        self.inner
            .read()
            .await
            .orders
            .iter()
            .find(|o| o.id == id)
            .cloned()
    }

    /// 注文を追加し、採番・日時設定済みの注文を返す
    pub async fn add(&self, new: NewOrder) -> Order {
        let mut inner = self.inner.write().await;
        let order = Order {
            id: inner.next_id,
            product_id: new.product_id,
            quantity: new.quantity,
            order_date: Utc::now(),
        };
        inner.next_id += 1;
        inner.orders.push(order.clone());
        order
    }
}

impl Default for OrderStore {
    fn default() -> Self {
        Self::new()
    }
}
