//! リクエストフォワーダー
//!
//! ルートに一致したリクエストを解決済みバックエンドへ転送し、
//! レスポンス（ステータス・ヘッダー・ボディ）をそのまま中継する

use std::io;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use futures::TryStreamExt;
use mesh_common::error::{MeshError, MeshResult};
use tracing::{error, info};

use crate::routes::{normalize_base_url, ServiceRoute};
use crate::AppState;

/// 転送先到達不能時の固定レスポンスボディ
const UNAVAILABLE_BODY: &str = "Service unavailable";

/// 未分類エラー時の固定レスポンスボディ
const INTERNAL_ERROR_BODY: &str = "Internal server error";

/// フォールバックハンドラー
///
/// ルートに一致しないパスはゲートウェイ自身の404で応答する。
/// 転送の失敗はここで必ず呼び出し元向けのレスポンスに変換し、
/// 未処理のまま伝播させない。
pub async fn forward(State(state): State<AppState>, req: Request) -> Response {
    let path = req.uri().path().to_string();
    let Some(route) = state.routes.match_path(&path).cloned() else {
        return (StatusCode::NOT_FOUND, "Not found").into_response();
    };

    match try_forward(&state, &route, req).await {
        Ok(response) => response,
        Err(e @ (MeshError::Http(_) | MeshError::Timeout(_))) => {
            error!(
                service = %route.service_name,
                error = %e,
                "forwarding error"
            );
            (StatusCode::SERVICE_UNAVAILABLE, UNAVAILABLE_BODY).into_response()
        }
        Err(e) => {
            error!(
                service = %route.service_name,
                error = %e,
                "unhandled routing error"
            );
            (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY).into_response()
        }
    }
}

/// 転送先を解決し、リクエストを再構築して送信する
async fn try_forward(
    state: &AppState,
    route: &ServiceRoute,
    req: Request,
) -> MeshResult<Response> {
    // 解決は失敗しない（失敗時は静的フォールバックに落ちる）
    let base = state.discovery.resolve(route).await;

    let (parts, body) = req.into_parts();
    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/")
        .to_string();
    let target = format!(
        "{}{}",
        normalize_base_url(&base),
        path_and_query.trim_start_matches('/')
    );
    info!(target = %target, "forwarding request");

    // axumとreqwestでhttpクレートのバージョンが異なるため、バイト列経由で変換する
    let method = reqwest::Method::from_bytes(parts.method.as_str().as_bytes())
        .map_err(|e| MeshError::Internal(format!("invalid method: {}", e)))?;

    let mut headers = reqwest::header::HeaderMap::new();
    for (name, value) in parts.headers.iter() {
        // Hostは転送先のものに差し替わる。ホップバイホップヘッダーと
        // Content-Lengthはボディを再フレーミングするため転送しない。
        if name == header::HOST
            || name == header::CONTENT_LENGTH
            || name == header::CONNECTION
            || name == header::TRANSFER_ENCODING
        {
            continue;
        }
        if let (Ok(header_name), Ok(header_value)) = (
            reqwest::header::HeaderName::from_bytes(name.as_str().as_bytes()),
            reqwest::header::HeaderValue::from_bytes(value.as_bytes()),
        ) {
            headers.insert(header_name, header_value);
        }
    }

    // リクエストボディはバッファせずそのままストリーム転送する
    let upstream = state
        .http_client
        .request(method, &target)
        .headers(headers)
        .body(reqwest::Body::wrap_stream(body.into_data_stream()))
        .send()
        .await?;

    Ok(relay_response(upstream))
}

/// バックエンドのレスポンスを無変更で中継する
fn relay_response(response: reqwest::Response) -> Response {
    let status = response.status();
    let headers = response.headers().clone();
    let stream = response.bytes_stream().map_err(io::Error::other);

    let mut relayed = Response::new(Body::from_stream(stream));
    *relayed.status_mut() = StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::OK);
    {
        let relayed_headers = relayed.headers_mut();
        for (name, value) in headers.iter() {
            if let (Ok(header_name), Ok(header_value)) = (
                HeaderName::from_bytes(name.as_str().as_bytes()),
                HeaderValue::from_bytes(value.as_bytes()),
            ) {
                relayed_headers.insert(header_name, header_value);
            }
        }
    }

    relayed
}
