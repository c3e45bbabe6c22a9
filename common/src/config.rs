//! 設定管理
//!
//! DiscoveryConfig, GatewayConfig, BackendConfig等の設定構造体

use serde::{Deserialize, Serialize};

/// 環境変数を読み、無ければデフォルト値を返す
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// 環境変数を読んでパースし、無ければ・壊れていればデフォルト値を返す
pub fn env_parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// サービスディスカバリ設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// ホストアドレス (デフォルト: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// ポート番号 (デフォルト: 5000)
    #[serde(default = "default_discovery_port")]
    pub port: u16,

    /// 登録レコードのTTL（秒）(デフォルト: 90)
    #[serde(default = "default_registration_ttl")]
    pub registration_ttl_secs: u64,

    /// クリーンアップ間隔（秒）(デフォルト: 30)
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_discovery_port() -> u16 {
    5000
}

fn default_registration_ttl() -> u64 {
    90
}

fn default_cleanup_interval() -> u64 {
    30
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_discovery_port(),
            registration_ttl_secs: default_registration_ttl(),
            cleanup_interval_secs: default_cleanup_interval(),
        }
    }
}

impl DiscoveryConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Self {
        Self {
            host: env_or("DISCOVERY_HOST", &default_host()),
            port: env_parse_or("DISCOVERY_PORT", default_discovery_port()),
            registration_ttl_secs: env_parse_or("REGISTRATION_TTL", default_registration_ttl()),
            cleanup_interval_secs: env_parse_or("CLEANUP_INTERVAL", default_cleanup_interval()),
        }
    }

    /// バインドアドレスを返す
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// APIゲートウェイ設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// ホストアドレス (デフォルト: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// ポート番号 (デフォルト: 8080)
    #[serde(default = "default_gateway_port")]
    pub port: u16,

    /// サービスディスカバリのURL (デフォルト: "http://localhost:5000")
    #[serde(default = "default_discovery_url")]
    pub discovery_url: String,

    /// ディスカバリ呼び出しのタイムアウト（秒）(デフォルト: 3)
    #[serde(default = "default_discovery_timeout")]
    pub discovery_timeout_secs: u64,

    /// フォワード時のリクエストタイムアウト（秒）(デフォルト: 30)
    #[serde(default = "default_forward_timeout")]
    pub forward_timeout_secs: u64,

    /// ProductServiceの静的フォールバックURL (デフォルト: "http://localhost:5001")
    #[serde(default = "default_product_fallback")]
    pub product_fallback_url: String,

    /// OrderServiceの静的フォールバックURL (デフォルト: "http://localhost:5002")
    #[serde(default = "default_order_fallback")]
    pub order_fallback_url: String,
}

fn default_gateway_port() -> u16 {
    8080
}

fn default_discovery_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_discovery_timeout() -> u64 {
    3
}

fn default_forward_timeout() -> u64 {
    30
}

fn default_product_fallback() -> String {
    "http://localhost:5001".to_string()
}

fn default_order_fallback() -> String {
    "http://localhost:5002".to_string()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_gateway_port(),
            discovery_url: default_discovery_url(),
            discovery_timeout_secs: default_discovery_timeout(),
            forward_timeout_secs: default_forward_timeout(),
            product_fallback_url: default_product_fallback(),
            order_fallback_url: default_order_fallback(),
        }
    }
}

impl GatewayConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Self {
        Self {
            host: env_or("GATEWAY_HOST", &default_host()),
            port: env_parse_or("GATEWAY_PORT", default_gateway_port()),
            discovery_url: env_or("DISCOVERY_URL", &default_discovery_url()),
            discovery_timeout_secs: env_parse_or(
                "DISCOVERY_TIMEOUT",
                default_discovery_timeout(),
            ),
            forward_timeout_secs: env_parse_or("FORWARD_TIMEOUT", default_forward_timeout()),
            product_fallback_url: env_or("PRODUCT_SERVICE_URL", &default_product_fallback()),
            order_fallback_url: env_or("ORDER_SERVICE_URL", &default_order_fallback()),
        }
    }

    /// バインドアドレスを返す
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// バックエンドサービス設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// ホストアドレス (デフォルト: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// ポート番号
    pub port: u16,

    /// 外部から到達可能な自身のURL
    pub service_url: String,

    /// サービスディスカバリのURL (デフォルト: "http://localhost:5000")
    #[serde(default = "default_discovery_url")]
    pub discovery_url: String,

    /// 登録アナウンス間隔（秒）(デフォルト: 30)
    #[serde(default = "default_announce_interval")]
    pub announce_interval_secs: u64,

    /// 失敗時のリトライ間隔（秒）(デフォルト: 10)
    #[serde(default = "default_retry_interval")]
    pub retry_interval_secs: u64,

    /// 起動後、初回アナウンスまでの猶予（秒）(デフォルト: 5)
    #[serde(default = "default_startup_grace")]
    pub startup_grace_secs: u64,

    /// シャットダウン時の登録解除タイムアウト（秒）(デフォルト: 3)
    #[serde(default = "default_unregister_timeout")]
    pub unregister_timeout_secs: u64,
}

fn default_announce_interval() -> u64 {
    30
}

fn default_retry_interval() -> u64 {
    10
}

fn default_startup_grace() -> u64 {
    5
}

fn default_unregister_timeout() -> u64 {
    3
}

impl BackendConfig {
    /// 環境変数から設定を読み込む
    ///
    /// `default_port` はサービスごとに異なる（ProductService: 5001, OrderService: 5002）。
    pub fn from_env(default_port: u16) -> Self {
        let port = env_parse_or("SERVICE_PORT", default_port);
        let service_url = env_or("SERVICE_URL", &format!("http://localhost:{}", port));
        Self {
            host: env_or("SERVICE_HOST", &default_host()),
            port,
            service_url,
            discovery_url: env_or("DISCOVERY_URL", &default_discovery_url()),
            announce_interval_secs: env_parse_or(
                "ANNOUNCE_INTERVAL",
                default_announce_interval(),
            ),
            retry_interval_secs: env_parse_or("RETRY_INTERVAL", default_retry_interval()),
            startup_grace_secs: env_parse_or("STARTUP_GRACE", default_startup_grace()),
            unregister_timeout_secs: env_parse_or(
                "UNREGISTER_TIMEOUT",
                default_unregister_timeout(),
            ),
        }
    }

    /// バインドアドレスを返す
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
