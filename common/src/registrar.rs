//! サービス登録クライアント
//!
//! 各バックエンドサービス内で動作し、サービスディスカバリへ定期的に
//! 自身の登録（兼ハートビート）を送信するバックグラウンドタスク

use std::time::Duration;

use reqwest::Client;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::BackendConfig;
use crate::error::{MeshError, MeshResult};
use crate::shutdown::ShutdownController;
use crate::task::{cancellable_sleep, run_periodic};

/// アナウンス呼び出しのHTTPタイムアウト（秒）
const ANNOUNCE_TIMEOUT_SECS: u64 = 5;

/// デフォルトのアナウンス間隔（秒）
const DEFAULT_ANNOUNCE_INTERVAL_SECS: u64 = 30;

/// 失敗時のデフォルトリトライ間隔（秒）
const DEFAULT_RETRY_INTERVAL_SECS: u64 = 10;

/// 起動から初回アナウンスまでのデフォルト猶予（秒）
const DEFAULT_STARTUP_GRACE_SECS: u64 = 5;

/// シャットダウン時の登録解除タイムアウト（秒）
const DEFAULT_UNREGISTER_TIMEOUT_SECS: u64 = 3;

/// サービス登録クライアント
///
/// 起動猶予の後、登録APIへのアナウンスを成功時30秒・失敗時10秒間隔で
/// 繰り返す。リトライ回数に上限はなく、キャンセルされるまで続行する。
/// 停止時は自身のタイムアウト付きで1回だけ登録解除を試みる。
#[derive(Clone)]
pub struct ServiceAnnouncer {
    client: Client,
    service_name: String,
    service_url: String,
    registry_url: String,
    announce_interval: Duration,
    retry_interval: Duration,
    startup_grace: Duration,
    unregister_timeout: Duration,
}

impl ServiceAnnouncer {
    /// 新しい登録クライアントを作成する
    pub fn new(
        service_name: impl Into<String>,
        service_url: impl Into<String>,
        registry_url: impl Into<String>,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(ANNOUNCE_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            service_name: service_name.into(),
            service_url: service_url.into(),
            registry_url: registry_url.into(),
            announce_interval: Duration::from_secs(DEFAULT_ANNOUNCE_INTERVAL_SECS),
            retry_interval: Duration::from_secs(DEFAULT_RETRY_INTERVAL_SECS),
            startup_grace: Duration::from_secs(DEFAULT_STARTUP_GRACE_SECS),
            unregister_timeout: Duration::from_secs(DEFAULT_UNREGISTER_TIMEOUT_SECS),
        }
    }

    /// バックエンド設定から登録クライアントを作成する
    pub fn from_config(service_name: impl Into<String>, config: &BackendConfig) -> Self {
        Self::new(service_name, &config.service_url, &config.discovery_url)
            .with_timing(
                Duration::from_secs(config.announce_interval_secs),
                Duration::from_secs(config.retry_interval_secs),
                Duration::from_secs(config.startup_grace_secs),
                Duration::from_secs(config.unregister_timeout_secs),
            )
    }

    /// 各種間隔を設定する（主にテスト用）
    pub fn with_timing(
        mut self,
        announce_interval: Duration,
        retry_interval: Duration,
        startup_grace: Duration,
        unregister_timeout: Duration,
    ) -> Self {
        self.announce_interval = announce_interval;
        self.retry_interval = retry_interval;
        self.startup_grace = startup_grace;
        self.unregister_timeout = unregister_timeout;
        self
    }

    /// バックグラウンドでアナウンスループを開始する
    pub fn start(self, shutdown: ShutdownController) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.run(shutdown).await;
        })
    }

    /// アナウンスループ本体
    async fn run(self, shutdown: ShutdownController) {
        info!(
            service = %self.service_name,
            url = %self.service_url,
            registry = %self.registry_url,
            "service announcer started"
        );

        // 自サービスのポートバインド完了を待つ起動猶予
        if !cancellable_sleep(&shutdown, self.startup_grace).await {
            debug!(service = %self.service_name, "announcer cancelled during startup grace");
        } else {
            let announcer = self.clone();
            run_periodic(&shutdown, move || {
                let announcer = announcer.clone();
                async move {
                    match announcer.announce_once().await {
                        Ok(()) => {
                            debug!(
                                service = %announcer.service_name,
                                "registration announced"
                            );
                            announcer.announce_interval
                        }
                        Err(e) => {
                            warn!(
                                service = %announcer.service_name,
                                error = %e,
                                "registration announce failed, will retry"
                            );
                            announcer.retry_interval
                        }
                    }
                }
            })
            .await;
        }

        // ベストエフォートの登録解除。失敗してもシャットダウンは止めない
        match tokio::time::timeout(self.unregister_timeout, self.unregister()).await {
            Ok(Ok(())) => {
                info!(service = %self.service_name, "service unregistered");
            }
            Ok(Err(e)) => {
                warn!(
                    service = %self.service_name,
                    error = %e,
                    "failed to unregister service during shutdown"
                );
            }
            Err(_) => {
                warn!(
                    service = %self.service_name,
                    "unregister call timed out during shutdown"
                );
            }
        }
    }

    /// 登録（兼ハートビート）を1回送信する
    pub async fn announce_once(&self) -> MeshResult<()> {
        let url = format!(
            "{}/api/registry/register",
            self.registry_url.trim_end_matches('/')
        );
        let response = self
            .client
            .post(&url)
            .query(&[
                ("serviceName", self.service_name.as_str()),
                ("serviceUrl", self.service_url.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MeshError::Http(format!(
                "registry returned {}",
                response.status()
            )));
        }

        Ok(())
    }

    /// 登録解除を1回送信する
    pub async fn unregister(&self) -> MeshResult<()> {
        let url = format!(
            "{}/api/registry/unregister",
            self.registry_url.trim_end_matches('/')
        );
        let response = self
            .client
            .post(&url)
            .query(&[
                ("serviceName", self.service_name.as_str()),
                ("serviceUrl", self.service_url.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MeshError::Http(format!(
                "registry returned {}",
                response.status()
            )));
        }

        Ok(())
    }
}
