//! サービス登録管理
//!
//! サービス名 → 稼働中インスタンス一覧をメモリ内で管理する。
//! 全操作は単一のストアロックで直列化され、ロック保持中にI/Oは行わない。

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use mesh_common::types::ServiceRegistration;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// 登録レコードのデフォルトTTL（秒）
const DEFAULT_TTL_SECS: i64 = 90;

/// サービスレジストリ
///
/// `(service_name, service_url)` の組ごとに最大1レコード。再登録は
/// `last_seen` の更新のみを行う。`discover` はTTL内のレコードだけを
/// 挿入順で返し、物理削除は `unregister` か `cleanup` のみが行う。
#[derive(Clone)]
pub struct ServiceRegistry {
    services: Arc<RwLock<HashMap<String, Vec<ServiceRegistration>>>>,
    ttl: Duration,
}

impl ServiceRegistry {
    /// 新しいレジストリを作成する（TTL 90秒）
    pub fn new() -> Self {
        Self::with_ttl(Duration::seconds(DEFAULT_TTL_SECS))
    }

    /// TTLを指定してレジストリを作成する
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            services: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// サービスインスタンスを登録する
    ///
    /// 既存の同一 `(name, url)` レコードがあれば `last_seen` のみ更新する
    /// （冪等）。失敗しない。
    pub async fn register(&self, service_name: &str, service_url: &str) {
        let mut services = self.services.write().await;
        let records = services.entry(service_name.to_string()).or_default();

        if let Some(existing) = records.iter_mut().find(|r| r.service_url == service_url) {
            existing.last_seen = Utc::now();
            debug!(
                service = service_name,
                url = service_url,
                "registration refreshed"
            );
        } else {
            records.push(ServiceRegistration::new(service_name, service_url));
            info!(
                service = service_name,
                url = service_url,
                "service registered"
            );
        }
    }

    /// サービスインスタンスの登録を解除する
    ///
    /// 該当レコードが無い場合は何もしない（エラーにしない）。
    pub async fn unregister(&self, service_name: &str, service_url: &str) {
        let mut services = self.services.write().await;
        if let Some(records) = services.get_mut(service_name) {
            let before = records.len();
            records.retain(|r| r.service_url != service_url);
            if records.len() < before {
                info!(
                    service = service_name,
                    url = service_url,
                    "service unregistered"
                );
            }
            if records.is_empty() {
                services.remove(service_name);
            }
        }
    }

    /// ハートビートを記録する
    ///
    /// レコードが存在する場合のみ `last_seen` を更新する。未知の組への
    /// ハートビートは自動登録せず、何もしない。
    pub async fn heartbeat(&self, service_name: &str, service_url: &str) {
        let mut services = self.services.write().await;
        if let Some(record) = services
            .get_mut(service_name)
            .and_then(|records| records.iter_mut().find(|r| r.service_url == service_url))
        {
            record.last_seen = Utc::now();
            debug!(
                service = service_name,
                url = service_url,
                "heartbeat recorded"
            );
        }
    }

    /// 稼働中インスタンスのURL一覧を返す
    ///
    /// TTL内のレコードだけを挿入順で返す。未知のサービス名や全件期限切れの
    /// 場合は空のリスト（エラーにしない）。
    pub async fn discover(&self, service_name: &str) -> Vec<String> {
        let now = Utc::now();
        let services = self.services.read().await;
        services
            .get(service_name)
            .map(|records| {
                records
                    .iter()
                    .filter(|r| r.is_live(self.ttl, now))
                    .map(|r| r.service_url.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// 期限切れレコードを全サービスから物理削除する
    ///
    /// 削除した件数を返す。
    pub async fn cleanup(&self) -> usize {
        let now = Utc::now();
        let mut services = self.services.write().await;
        let mut removed = 0;

        services.retain(|name, records| {
            let before = records.len();
            records.retain(|r| r.is_live(self.ttl, now));
            let dropped = before - records.len();
            if dropped > 0 {
                info!(service = %name, count = dropped, "evicted stale registrations");
                removed += dropped;
            }
            !records.is_empty()
        });

        removed
    }

    /// 指定サービスの保存レコード数（生存判定なし）を返す
    pub async fn count(&self, service_name: &str) -> usize {
        let services = self.services.read().await;
        services.get(service_name).map_or(0, Vec::len)
    }
}

impl Default for ServiceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
