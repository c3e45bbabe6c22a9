//! 商品サービス
//!
//! インメモリの商品CRUDを提供するバックエンドサービス。
//! 起動時にサービスディスカバリへ自身を登録する。

#![warn(missing_docs)]

/// REST APIハンドラー
pub mod api;

/// インメモリ商品ストア
pub mod store;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// 商品ストア
    pub store: store::ProductStore,
}
