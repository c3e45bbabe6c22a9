//! 通信プロトコル定義
//!
//! レジストリAPIのクエリパラメータ形式（camelCase）

use serde::{Deserialize, Serialize};

/// 登録・登録解除リクエストのクエリパラメータ
///
/// `POST /api/registry/register?serviceName=..&serviceUrl=..` 形式で送受信する。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationParams {
    /// 論理サービス名
    pub service_name: String,
    /// インスタンスURL
    pub service_url: String,
}

/// ディスカバリリクエストのクエリパラメータ
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DiscoverParams {
    /// 論理サービス名
    pub service_name: String,
}
