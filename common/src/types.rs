//! 共通型定義
//!
//! ServiceRegistration, Product, Order等のコアデータ型

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// サービス登録レコード
///
/// 1つの稼働中バックエンドインスタンスを表す。
/// `(service_name, service_url)` の組み合わせごとに最大1件。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceRegistration {
    /// 論理サービス名（ディスカバリのキー）
    pub service_name: String,
    /// インスタンスの到達可能なURL
    pub service_url: String,
    /// 初回登録日時
    pub registered_at: DateTime<Utc>,
    /// 最終ハートビート受信時刻
    pub last_seen: DateTime<Utc>,
}

impl ServiceRegistration {
    /// 新しい登録レコードを作成する
    pub fn new(service_name: impl Into<String>, service_url: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            service_name: service_name.into(),
            service_url: service_url.into(),
            registered_at: now,
            last_seen: now,
        }
    }

    /// TTL内にハートビートを受信しているか判定する
    ///
    /// `now - last_seen < ttl` のとき生存とみなす。
    pub fn is_live(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.last_seen) < ttl
    }
}

/// 商品
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// 一意識別子
    pub id: u32,
    /// 商品名
    pub name: String,
    /// 価格
    pub price: f64,
}

/// 注文
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// 一意識別子
    pub id: u32,
    /// 注文対象の商品ID
    pub product_id: u32,
    /// 数量
    pub quantity: u32,
    /// 注文日時
    pub order_date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registration_sets_both_timestamps() {
        let reg = ServiceRegistration::new("ProductService", "http://localhost:5001");

        assert_eq!(reg.service_name, "ProductService");
        assert_eq!(reg.service_url, "http://localhost:5001");
        assert_eq!(reg.registered_at, reg.last_seen);
    }

    #[test]
    fn test_is_live_within_ttl() {
        let reg = ServiceRegistration::new("OrderService", "http://localhost:5002");
        let now = reg.last_seen + Duration::seconds(89);

        assert!(reg.is_live(Duration::seconds(90), now));
    }

    #[test]
    fn test_is_stale_at_ttl_boundary() {
        let reg = ServiceRegistration::new("OrderService", "http://localhost:5002");
        let now = reg.last_seen + Duration::seconds(90);

        // now - last_seen == ttl は既に期限切れ
        assert!(!reg.is_live(Duration::seconds(90), now));
    }

    #[test]
    fn test_registration_serialization_roundtrip() {
        let reg = ServiceRegistration::new("ProductService", "http://localhost:5001");
        let json = serde_json::to_string(&reg).unwrap();
        let parsed: ServiceRegistration = serde_json::from_str(&json).unwrap();

        assert_eq!(reg, parsed);
    }
}
