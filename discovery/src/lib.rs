//! サービスディスカバリサーバー
//!
//! バックエンドサービスの登録・ハートビート・解決を担う中央ディレクトリ

#![warn(missing_docs)]

/// REST APIハンドラー
pub mod api;

/// サービス登録管理
pub mod registry;

/// 期限切れ登録のクリーンアップタスク
pub mod sweeper;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// サービスレジストリ
    pub registry: registry::ServiceRegistry,
}
