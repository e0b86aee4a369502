//! # シグネチャレジストリ
//!
//! 対応フォーマットごとの必須シグネチャ（AND）と代替シグネチャ（OR）の静的テーブル。
//!
//! | フォーマット | 必須 | 代替 |
//! |------------|------|------|
//! | JPEG / JPG | SOI `FF D8` @0, EOI `FF D9` @-2 | なし |
//! | PDF | `%PDF` @0 | `%%EOF` @-5 / @-6, `\r\n%%EOF\r\n` @-9 |
//! | PNG | 予約（`png` feature で有効化） | なし |

use crate::signature::Signature;
use crate::SignatureError;

// ---------------------------------------------------------------------------
// フォーマット
// ---------------------------------------------------------------------------

/// クライアントが申告するファイルフォーマット。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    /// image/jpeg
    Jpeg,
    /// image/jpg（JPEGと同じシグネチャ）
    Jpg,
    /// image/png（予約）
    Png,
    /// application/pdf
    Pdf,
}

impl FileFormat {
    /// 全フォーマット（申告可能なcontent-typeの一覧）
    pub const ALL: [FileFormat; 4] = [
        FileFormat::Jpeg,
        FileFormat::Jpg,
        FileFormat::Png,
        FileFormat::Pdf,
    ];

    /// 対応するcontent-type文字列。
    pub fn content_type(self) -> &'static str {
        match self {
            FileFormat::Jpeg => "image/jpeg",
            FileFormat::Jpg => "image/jpg",
            FileFormat::Png => "image/png",
            FileFormat::Pdf => "application/pdf",
        }
    }

    /// content-type文字列からフォーマットを解決する（大文字小文字を区別しない）。
    pub fn parse(content_type: &str) -> Option<FileFormat> {
        Self::ALL
            .into_iter()
            .find(|f| f.content_type().eq_ignore_ascii_case(content_type.trim()))
    }

    /// このフォーマット固有のシグネチャセット。
    ///
    /// 有効なシグネチャを持たないフォーマット（PNG）は `None`。
    pub fn own_spec(self) -> Option<&'static FormatSpec> {
        match self {
            FileFormat::Jpeg | FileFormat::Jpg => Some(&JPEG_SPEC),
            FileFormat::Pdf => Some(&PDF_SPEC),
            #[cfg(feature = "png")]
            FileFormat::Png => Some(&PNG_SPEC),
            #[cfg(not(feature = "png"))]
            FileFormat::Png => None,
        }
    }
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.content_type())
    }
}

// ---------------------------------------------------------------------------
// シグネチャテーブル
// ---------------------------------------------------------------------------

/// フォーマットごとのシグネチャセット。
#[derive(Debug, PartialEq, Eq)]
pub struct FormatSpec {
    /// 全て一致しなければならないシグネチャ
    pub required: &'static [Signature],
    /// いずれか1つが一致すればよいシグネチャ。不要なフォーマットでは `None`
    pub alternatives: Option<&'static [Signature]>,
}

const JPEG_REQUIRED: [Signature; 2] = [
    Signature::new(0, &[0xFF, 0xD8]),
    Signature::new(-2, &[0xFF, 0xD9]),
];

const PDF_REQUIRED: [Signature; 1] = [Signature::new(0, &[0x25, 0x50, 0x44, 0x46])];

/// PDF生成系ごとに異なる3種類のEOFマーカー
const PDF_TRAILERS: [Signature; 3] = [
    Signature::new(-5, &[0x25, 0x25, 0x45, 0x4F, 0x46]),
    Signature::new(-6, &[0x25, 0x25, 0x45, 0x4F, 0x46]),
    Signature::new(
        -9,
        &[0x0D, 0x0A, 0x25, 0x25, 0x45, 0x4F, 0x46, 0x0D, 0x0A],
    ),
];

pub static JPEG_SPEC: FormatSpec = FormatSpec {
    required: &JPEG_REQUIRED,
    alternatives: None,
};

pub static PDF_SPEC: FormatSpec = FormatSpec {
    required: &PDF_REQUIRED,
    alternatives: Some(&PDF_TRAILERS),
};

#[cfg(feature = "png")]
const PNG_REQUIRED: [Signature; 2] = [
    Signature::new(0, &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]),
    Signature::new(-8, &[0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82]),
];

#[cfg(feature = "png")]
pub static PNG_SPEC: FormatSpec = FormatSpec {
    required: &PNG_REQUIRED,
    alternatives: None,
};

// ---------------------------------------------------------------------------
// 解決ポリシー
// ---------------------------------------------------------------------------

/// 未対応フォーマットを申告された場合の扱い。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// JPEGのシグネチャセットで検証する
    #[default]
    Jpeg,
    /// `UnsupportedFormat` として拒否する
    Reject,
}

/// 申告content-typeに対するシグネチャセットを解決する。
pub fn resolve(format: &str, policy: FallbackPolicy) -> Result<&'static FormatSpec, SignatureError> {
    match FileFormat::parse(format).and_then(FileFormat::own_spec) {
        Some(spec) => Ok(spec),
        None => match policy {
            FallbackPolicy::Jpeg => Ok(&JPEG_SPEC),
            FallbackPolicy::Reject => Err(SignatureError::UnsupportedFormat(format.to_string())),
        },
    }
}

/// 必須（AND）シグネチャ。未知のフォーマットはJPEGにフォールバックする。
pub fn required_signatures(format: &str) -> &'static [Signature] {
    resolve(format, FallbackPolicy::Jpeg)
        .unwrap_or(&JPEG_SPEC)
        .required
}

/// 代替（OR）シグネチャ。現在はPDFのみ `Some`。
pub fn alternative_signatures(format: &str) -> Option<&'static [Signature]> {
    resolve(format, FallbackPolicy::Jpeg)
        .unwrap_or(&JPEG_SPEC)
        .alternatives
}
