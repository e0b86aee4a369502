//! # filesig Core
//!
//! アップロードされたファイルの実際の内容が、申告されたフォーマット（content-type）と
//! 一致するかをマジックバイトで検証する。クライアント申告のメタデータは信用しない。
//!
//! ## 処理フロー
//! 1. Base64ペイロードを生バイト列にデコードする
//! 2. 申告フォーマットのシグネチャセットをレジストリから解決する
//! 3. 必須シグネチャ（AND）と代替シグネチャ（OR）を照合する
//! 4. 真偽値の判定のみを返す（失敗理由は外部に出さない）

pub mod matcher;
pub mod registry;
pub mod signature;

pub use matcher::{decode, match_signatures, Validator};
pub use registry::{
    alternative_signatures, required_signatures, FallbackPolicy, FileFormat, FormatSpec,
};
pub use signature::Signature;

/// シグネチャ検証の失敗理由。
///
/// ログ用の内部表現であり、公開境界では `false` に畳み込まれる。
#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    /// Base64としてデコードできない
    #[error("Base64デコードに失敗しました: {0}")]
    MalformedEncoding(#[from] base64::DecodeError),
    /// レジストリに存在せず、フォールバックも無効
    #[error("未対応のフォーマットです: {0}")]
    UnsupportedFormat(String),
    /// 必須シグネチャのバイトが一致しない
    #[error("シグネチャが一致しません (offset: {offset})")]
    SignatureMismatch { offset: isize },
    /// バッファがシグネチャのウィンドウより短い
    #[error("バッファが短すぎます (offset: {offset}, len: {len}, buffer_len: {buffer_len})")]
    TruncatedBuffer {
        offset: isize,
        len: usize,
        buffer_len: usize,
    },
    /// 代替シグネチャのいずれにも一致しない
    #[error("代替シグネチャ{candidates}件のいずれにも一致しません")]
    NoAlternativeMatched { candidates: usize },
}

/// 既定ポリシー（未知フォーマットはJPEG扱い）で検証する。
pub fn validate(payload: &str, format: &str) -> bool {
    Validator::default().validate(payload, format)
}
