//! 協調シャットダウン制御
//!
//! 各バイナリのmainがOSシグナルと組み合わせてグレースフルシャットダウンを行う

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use tokio::sync::Notify;

/// 協調シャットダウンシグナル
///
/// バックグラウンドループ（クリーンアップ・登録クライアント）は
/// 毎イテレーションでこのシグナルを確認し、発火後は即座に終了する。
#[derive(Clone, Debug, Default)]
pub struct ShutdownController {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    triggered: AtomicBool,
    notify: Notify,
}

impl ShutdownController {
    /// シャットダウンが要求済みか返す
    pub fn is_triggered(&self) -> bool {
        self.inner.triggered.load(Ordering::Relaxed)
    }

    /// シャットダウンを要求し、待機中のタスクを全て起こす
    pub fn trigger(&self) {
        self.inner.triggered.store(true, Ordering::SeqCst);
        self.inner.notify.notify_waiters();
    }

    /// シャットダウン要求まで待機する
    pub async fn wait(&self) {
        // フラグ確認より先に通知待ちを有効化する。逆順だと確認と登録の
        // 間に入ったtrigger()の通知を取りこぼす。
        let notified = self.inner.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();

        if self.is_triggered() {
            return;
        }
        notified.await;
    }
}

/// Ctrl-C受信でシャットダウンを発火する
///
/// `axum::serve(..).with_graceful_shutdown(..)` に渡す想定。
/// 別経路で既にシャットダウンが要求された場合も完了する。
pub async fn ctrl_c_signal(controller: ShutdownController) {
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::warn!(error = %e, "failed to listen for ctrl-c");
            }
            controller.trigger();
        }
        _ = controller.wait() => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_trigger_wakes_waiters() {
        let controller = ShutdownController::default();
        let waiter = controller.clone();

        let handle = tokio::spawn(async move {
            waiter.wait().await;
        });

        assert!(!controller.is_triggered());
        controller.trigger();
        assert!(controller.is_triggered());

        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_wait_returns_immediately_after_trigger() {
        let controller = ShutdownController::default();
        controller.trigger();

        // 既に発火済みなのでブロックしない
        controller.wait().await;
    }

    #[tokio::test]
    async fn test_concurrent_trigger_is_never_lost() {
        // trigger()とwait()の競合で通知を取りこぼさないこと
        for _ in 0..100 {
            let controller = ShutdownController::default();
            let waiter = controller.clone();
            let handle = tokio::spawn(async move {
                waiter.wait().await;
            });

            controller.trigger();
            tokio::time::timeout(std::time::Duration::from_secs(1), handle)
                .await
                .expect("waiter missed the shutdown notification")
                .unwrap();
        }
    }
}
