//! 注文サービス
//!
//! インメモリの注文CRUDを提供するバックエンドサービス。
//! 起動時にサービスディスカバリへ自身を登録する。

#![warn(missing_docs)]

/// REST APIハンドラー
pub mod api;

/// インメモリ注文ストア
pub mod store;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// 注文ストア
    pub store: store::OrderStore,
}
