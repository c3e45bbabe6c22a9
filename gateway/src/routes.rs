//! ルーティングテーブル
//!
//! パスプレフィックス → 論理サービス名・静的フォールバックの順序付き対応表

use mesh_common::config::GatewayConfig;

/// 1つのルート定義
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRoute {
    /// パスプレフィックス（末尾スラッシュなし、例: "/api/products"）
    pub prefix: String,
    /// ディスカバリに渡す論理サービス名
    pub service_name: String,
    /// ディスカバリ失敗時の静的フォールバックURL
    pub fallback_url: String,
}

impl ServiceRoute {
    /// 新しいルート定義を作成する
    pub fn new(
        prefix: impl Into<String>,
        service_name: impl Into<String>,
        fallback_url: impl Into<String>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            service_name: service_name.into(),
            fallback_url: fallback_url.into(),
        }
    }
}

/// 順序付きルーティングテーブル
///
/// マッチングはテーブル順の先頭一致。プレフィックスが重なり得るため、
/// 順序が決定性を保証する。
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<ServiceRoute>,
}

impl RouteTable {
    /// ルート一覧からテーブルを作成する
    pub fn new(routes: Vec<ServiceRoute>) -> Self {
        Self { routes }
    }

    /// ゲートウェイ設定から標準のテーブルを作成する
    pub fn from_config(config: &GatewayConfig) -> Self {
        Self::new(vec![
            ServiceRoute::new(
                "/api/products",
                "ProductService",
                &config.product_fallback_url,
            ),
            ServiceRoute::new("/api/orders", "OrderService", &config.order_fallback_url),
        ])
    }

    /// パスに一致する最初のルートを返す
    ///
    /// プレフィックスはパスセグメント境界で一致させる
    /// （"/api/products" は "/api/products/42" に一致し "/api/productsx" には一致しない）。
    pub fn match_path(&self, path: &str) -> Option<&ServiceRoute> {
        self.routes.iter().find(|route| {
            path == route.prefix
                || (path.starts_with(&route.prefix)
                    && path.as_bytes().get(route.prefix.len()) == Some(&b'/'))
        })
    }
}

/// ベースURLを末尾スラッシュ1つに正規化する
///
/// パス連結の前に必ず適用する。
pub fn normalize_base_url(base: &str) -> String {
    format!("{}/", base.trim_end_matches('/'))
}
