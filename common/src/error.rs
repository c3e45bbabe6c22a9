//! エラー型定義
//!
//! ワークスペース共通のエラー分類

use thiserror::Error;

/// Mesh共通エラー
#[derive(Debug, Error)]
pub enum MeshError {
    /// HTTP通信エラー（接続失敗・非成功ステータス）
    #[error("HTTP error: {0}")]
    Http(String),

    /// タイムアウト
    #[error("Timeout: {0}")]
    Timeout(String),

    /// 内部エラー
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Mesh共通Result型
pub type MeshResult<T> = Result<T, MeshError>;

impl From<reqwest::Error> for MeshError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            MeshError::Timeout(err.to_string())
        } else {
            MeshError::Http(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MeshError::Http("connection refused".to_string());
        assert_eq!(err.to_string(), "HTTP error: connection refused");

        let err = MeshError::Timeout("deadline exceeded".to_string());
        assert_eq!(err.to_string(), "Timeout: deadline exceeded");
    }
}
