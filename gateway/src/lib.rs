//! APIゲートウェイ
//!
//! パスプレフィックスでバックエンドサービスを判定し、ディスカバリで解決した
//! アドレス（失敗時は静的フォールバック）へリクエストをフォワードする

#![warn(missing_docs)]

/// ルーター構築
pub mod api;

/// ディスカバリクライアント
pub mod discovery;

/// リクエストフォワーダー
pub mod proxy;

/// ルーティングテーブル
pub mod routes;

use std::sync::Arc;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// ルーティングテーブル
    pub routes: Arc<routes::RouteTable>,
    /// ディスカバリクライアント
    pub discovery: discovery::DiscoveryClient,
    /// 共有HTTPクライアント（フォワード用、接続プーリング有効）
    pub http_client: reqwest::Client,
}
