//! 周期タスク実行ユーティリティ
//!
//! クリーンアップタスクと登録クライアントが共有する「間隔 + キャンセル可能スリープ +
//! 1単位の処理」ループ

use std::future::Future;
use std::time::Duration;

use crate::shutdown::ShutdownController;

/// シャットダウン対応の周期ループを実行する
///
/// `work` は1単位の処理を行い、次回実行までの待機時間を返す。
/// 戻り値を可変にすることで、成功時と失敗時で間隔を変える呼び出し側
/// （登録クライアントの30秒/10秒切り替え）に対応する。
///
/// ループはイテレーションごとにシャットダウンを確認し、発火後は
/// 残りのスリープを完了せずに即座に抜ける。
pub async fn run_periodic<F, Fut>(shutdown: &ShutdownController, mut work: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Duration>,
{
    while !shutdown.is_triggered() {
        let delay = work().await;

        tokio::select! {
            _ = shutdown.wait() => break,
            _ = tokio::time::sleep(delay) => {}
        }
    }
}

/// シャットダウンで中断可能なスリープ
///
/// スリープを完了したら `true`、シャットダウンで中断されたら `false` を返す。
pub async fn cancellable_sleep(shutdown: &ShutdownController, delay: Duration) -> bool {
    tokio::select! {
        _ = shutdown.wait() => false,
        _ = tokio::time::sleep(delay) => true,
    }
}
