//! ディスカバリクライアント
//!
//! レジストリの外部APIを呼び、ルートごとの転送先アドレスを解決する

use std::time::Duration;

use mesh_common::error::{MeshError, MeshResult};
use reqwest::Client;
use tracing::{info, warn};

use crate::routes::ServiceRoute;

/// ディスカバリクライアント
///
/// 呼び出しにはタイムアウトを設定し、レジストリが無応答でも
/// リクエスト処理を停滞させない。
#[derive(Clone)]
pub struct DiscoveryClient {
    client: Client,
    base_url: String,
}

impl DiscoveryClient {
    /// 新しいディスカバリクライアントを作成する
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// 稼働中インスタンスのURL一覧を取得する
    pub async fn discover(&self, service_name: &str) -> MeshResult<Vec<String>> {
        let url = format!(
            "{}/api/registry/discover",
            self.base_url.trim_end_matches('/')
        );
        let response = self
            .client
            .get(&url)
            .query(&[("serviceName", service_name)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MeshError::Http(format!(
                "discovery returned {}",
                response.status()
            )));
        }

        Ok(response.json().await?)
    }

    /// ルートの転送先ベースアドレスを解決する
    ///
    /// ディスカバリ成功かつ非空なら先頭アドレスを選ぶ（意図的に
    /// ロードバランシングはしない）。失敗・タイムアウト・空リストの
    /// 場合は静的フォールバックを返す。この操作自体は失敗しない。
    pub async fn resolve(&self, route: &ServiceRoute) -> String {
        match self.discover(&route.service_name).await {
            Ok(urls) => match urls.into_iter().next() {
                Some(url) => {
                    info!(service = %route.service_name, url = %url, "discovered service");
                    url
                }
                None => {
                    warn!(
                        service = %route.service_name,
                        fallback = %route.fallback_url,
                        "no live instances, using fallback"
                    );
                    route.fallback_url.clone()
                }
            },
            Err(e) => {
                warn!(
                    service = %route.service_name,
                    fallback = %route.fallback_url,
                    error = %e,
                    "service discovery failed, using fallback"
                );
                route.fallback_url.clone()
            }
        }
    }
}
