//! 期限切れ登録のクリーンアップタスク
//!
//! 一定間隔でレジストリの期限切れレコードを物理削除する

use std::time::Duration;

use mesh_common::shutdown::ShutdownController;
use mesh_common::task::run_periodic;
use tokio::task::JoinHandle;
use tracing::info;

use crate::registry::ServiceRegistry;

/// デフォルトのクリーンアップ間隔（秒）
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 30;

/// レジストリクリーンアップタスク
///
/// ホストプロセスの生存期間中動作し、シャットダウンシグナルで
/// 速やかに終了する。失敗モードは存在しない（空ストアはno-op）。
#[derive(Clone)]
pub struct RegistryCleanup {
    registry: ServiceRegistry,
    interval: Duration,
}

impl RegistryCleanup {
    /// 新しいクリーンアップタスクを作成する
    pub fn new(registry: ServiceRegistry) -> Self {
        Self {
            registry,
            interval: Duration::from_secs(DEFAULT_SWEEP_INTERVAL_SECS),
        }
    }

    /// クリーンアップ間隔を設定する
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// バックグラウンドでクリーンアップループを開始する
    pub fn start(self, shutdown: ShutdownController) -> JoinHandle<()> {
        tokio::spawn(async move {
            info!(
                interval_secs = self.interval.as_secs(),
                "registry cleanup task started"
            );

            let sweeper = self.clone();
            run_periodic(&shutdown, move || {
                let sweeper = sweeper.clone();
                async move {
                    sweeper.registry.cleanup().await;
                    sweeper.interval
                }
            })
            .await;

            info!("registry cleanup task stopped");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;

    #[tokio::test]
    async fn test_sweep_loop_evicts_stale_records() {
        let registry = ServiceRegistry::with_ttl(ChronoDuration::zero());
        registry
            .register("OrderService", "http://host:5002")
            .await;
        assert_eq!(registry.count("OrderService").await, 1);

        let shutdown = ShutdownController::default();
        let handle = RegistryCleanup::new(registry.clone())
            .with_interval(Duration::from_millis(10))
            .start(shutdown.clone());

        // 最初のスイープはループ開始直後に走る
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(registry.count("OrderService").await, 0);

        shutdown.trigger();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_sweep_loop_stops_on_shutdown() {
        let registry = ServiceRegistry::new();
        let shutdown = ShutdownController::default();
        let handle = RegistryCleanup::new(registry)
            .with_interval(Duration::from_secs(30))
            .start(shutdown.clone());

        shutdown.trigger();
        // スリープ中でも即座に終了する
        handle.await.unwrap();
    }
}
