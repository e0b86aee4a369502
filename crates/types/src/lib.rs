//! # filesig 共有型定義
//!
//! アップロードAPIのリクエスト・レスポンスをRust構造体として提供する。
//!
//! ## エンコーディング規則
//! - JSONフィールド名: camelCase
//! - ファイル内容: Base64（標準アルファベット）

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// POST /api/upload
// ---------------------------------------------------------------------------

/// /api/upload リクエスト。
///
/// ファイル名・拡張子・サイズの妥当性は上流のスキーマ検証で確認済みの前提。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    /// 元のファイル名
    pub file_name: String,
    /// クライアントが申告するcontent-type
    pub content_type: String,
    /// Base64エンコードされたファイル内容
    pub file: String,
}

/// 全レスポンス共通の外殻 `{"data": ...}`。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// シグネチャ検証の判定結果。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadVerdict {
    /// 内容が申告フォーマットと一致したか
    pub secure: bool,
}

// ---------------------------------------------------------------------------
// GET /api/formats
// ---------------------------------------------------------------------------

/// /api/formats レスポンス。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatsResponse {
    /// 申告可能なフォーマット一覧
    pub formats: Vec<FormatInfo>,
    /// 未知フォーマットを拒否するか（falseならJPEGとして検証）
    pub strict: bool,
}

/// フォーマット1件の情報。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatInfo {
    pub content_type: String,
    /// 固有のシグネチャセットが有効か
    pub active: bool,
}

// ---------------------------------------------------------------------------
// エラー応答
// ---------------------------------------------------------------------------

/// エラー応答のペイロード `{"errors": {"message": ...}}`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub errors: ErrorMessage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            errors: ErrorMessage {
                message: message.into(),
            },
        }
    }
}

/// スキーマ検証失敗時のメッセージ
pub const SCHEMA_ERROR_MESSAGE: &str = "Errors found when validating Schema";

/// 許可されていないメソッドのメッセージ
pub const INVALID_REQUEST_MESSAGE: &str = "Invalid Request";
