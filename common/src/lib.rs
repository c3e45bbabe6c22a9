//! Mesh共通クレート
//!
//! 各サービス（discovery/gateway/バックエンド）で共有する型・設定・ユーティリティ

#![warn(missing_docs)]

/// 共通型定義（登録レコード、ビジネスモデル）
pub mod types;

/// レジストリAPIの通信プロトコル定義
pub mod protocol;

/// エラー型定義
pub mod error;

/// 設定管理
pub mod config;

/// 協調シャットダウン制御
pub mod shutdown;

/// 周期タスク実行ユーティリティ
pub mod task;

/// サービス登録クライアント（登録・ハートビート・登録解除）
pub mod registrar;

/// ロギング初期化ユーティリティ
pub mod logging;
