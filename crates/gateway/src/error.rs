//! # Gateway エラー型
//!
//! クライアントへはどのシグネチャ検査で失敗したかを返さない。

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use filesig_types::*;

/// Gatewayエラー型。
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// リクエストボディがスキーマに合致しない
    #[error("スキーマ検証に失敗しました")]
    SchemaValidation,
    /// ファイル内容が申告フォーマットと一致しない
    #[error("ファイル内容が申告されたフォーマットと一致しません")]
    InsecureFile,
    /// 許可されていないHTTPメソッド
    #[error("許可されていないメソッドです")]
    MethodNotAllowed,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        match self {
            GatewayError::SchemaValidation => (
                StatusCode::BAD_REQUEST,
                Json(Envelope::new(ErrorBody::new(SCHEMA_ERROR_MESSAGE))),
            )
                .into_response(),
            GatewayError::InsecureFile => (
                StatusCode::BAD_REQUEST,
                Json(Envelope::new(UploadVerdict { secure: false })),
            )
                .into_response(),
            GatewayError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                Json(Envelope::new(ErrorBody::new(INVALID_REQUEST_MESSAGE))),
            )
                .into_response(),
        }
    }
}
