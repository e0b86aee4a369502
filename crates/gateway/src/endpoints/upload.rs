//! # POST /api/upload
//!
//! アップロードされたファイル内容が申告content-typeのマジックバイトと一致するかを検証する。
//! ファイル名・拡張子・サイズの妥当性は上流のスキーマ検証の責務。

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use filesig_core::FileFormat;
use filesig_types::*;

use crate::config::GatewayState;
use crate::error::GatewayError;

/// POST /api/upload: シグネチャ検証。
///
/// 一致した場合は申告content-type（正規形）と `X-Content-Type-Options: nosniff` を付けて200を返す。
/// JPEGフォールバックで受理した場合の `Content-Type` は `application/json`。
/// 不一致・デコード失敗は理由を区別せず `{"data":{"secure":false}}` で400を返す。
pub async fn handle_upload(
    State(state): State<Arc<GatewayState>>,
    body: Result<Json<UploadRequest>, JsonRejection>,
) -> Result<Response, GatewayError> {
    let Json(req) = body.map_err(|e| {
        tracing::debug!(error = %e, "リクエストボディのパースに失敗");
        GatewayError::SchemaValidation
    })?;

    if !state.validator.validate(&req.file, &req.content_type) {
        tracing::info!(
            file_name = ?req.file_name,
            content_type = ?req.content_type,
            "ファイル内容が申告フォーマットと一致しないため拒否"
        );
        return Err(GatewayError::InsecureFile);
    }

    // 固有のシグネチャセットを持つフォーマットのみ申告値を返す。
    // フォールバックで受理した未知のcontent-typeはクライアントに反射しない。
    let content_type = match FileFormat::parse(&req.content_type) {
        Some(format) if format.own_spec().is_some() => {
            HeaderValue::from_static(format.content_type())
        }
        _ => HeaderValue::from_static("application/json"),
    };

    tracing::info!(
        file_name = ?req.file_name,
        content_type = ?req.content_type,
        "シグネチャ検証に成功"
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ),
        ],
        Json(Envelope::new(UploadVerdict { secure: true })),
    )
        .into_response())
}

/// /api/upload へのPOST以外のメソッド。
pub async fn handle_method_not_allowed() -> GatewayError {
    GatewayError::MethodNotAllowed
}
