//! # シグネチャ照合
//!
//! Base64ペイロードをデコードし、必須シグネチャ（AND）と代替シグネチャ（OR）を評価する。

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;

use crate::registry::{self, FallbackPolicy};
use crate::signature::Signature;
use crate::SignatureError;

/// 標準アルファベット。末尾のパディング有無は問わない。
const B64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Base64ペイロードを生バイト列にデコードする。
pub fn decode(payload: &str) -> Result<Vec<u8>, SignatureError> {
    Ok(B64.decode(payload)?)
}

/// シグネチャ1件を評価し、失敗理由を返す。
fn check_one(buffer: &[u8], sig: &Signature) -> Result<(), SignatureError> {
    if sig.window(buffer.len()).is_none() {
        return Err(SignatureError::TruncatedBuffer {
            offset: sig.offset,
            len: sig.bytes.len(),
            buffer_len: buffer.len(),
        });
    }
    if !sig.matches(buffer) {
        return Err(SignatureError::SignatureMismatch { offset: sig.offset });
    }
    Ok(())
}

/// 必須・代替の両述語を評価する。
///
/// 必須シグネチャは1件でも不一致なら失敗。代替シグネチャは `None` なら無条件に成立し、
/// そうでなければ少なくとも1件が完全一致する必要がある。
pub fn evaluate(
    buffer: &[u8],
    required: &[Signature],
    alternatives: Option<&[Signature]>,
) -> Result<(), SignatureError> {
    for sig in required {
        check_one(buffer, sig)?;
    }

    if let Some(alts) = alternatives {
        if !alts.iter().any(|sig| sig.matches(buffer)) {
            return Err(SignatureError::NoAlternativeMatched {
                candidates: alts.len(),
            });
        }
    }

    Ok(())
}

/// バッファがシグネチャセットを満たすか。
pub fn match_signatures(
    buffer: &[u8],
    required: &[Signature],
    alternatives: Option<&[Signature]>,
) -> bool {
    evaluate(buffer, required, alternatives).is_ok()
}

/// 申告フォーマットに対するファイル内容の検証器。
///
/// 状態はフォールバックポリシーのみで、複数スレッドから共有できる。
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    policy: FallbackPolicy,
}

impl Validator {
    pub fn new(policy: FallbackPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> FallbackPolicy {
        self.policy
    }

    /// デコード → レジストリ解決 → 照合。失敗理由を含む内部向けの結果を返す。
    pub(crate) fn check(&self, payload: &str, format: &str) -> Result<(), SignatureError> {
        let spec = registry::resolve(format, self.policy)?;
        let buffer = decode(payload)?;
        evaluate(&buffer, spec.required, spec.alternatives)
    }

    /// Base64ペイロードが申告フォーマットのシグネチャを満たすか。
    ///
    /// 不正な入力は全て `false` になり、どの検査で失敗したかは返さない。
    pub fn validate(&self, payload: &str, format: &str) -> bool {
        match self.check(payload, format) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(
                    content_type = %format,
                    payload_len = payload.len(),
                    reason = %e,
                    "シグネチャ検証に失敗"
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{JPEG_SPEC, PDF_SPEC};

    fn b64(bytes: &[u8]) -> String {
        base64::engine::general_purpose::STANDARD.encode(bytes)
    }

    fn jpeg_bytes() -> Vec<u8> {
        let mut v = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
        v.extend_from_slice(b"JFIF\0");
        v.extend_from_slice(&[0xFF, 0xD9]);
        v
    }

    fn pdf_with_trailer(trailer: &[u8]) -> Vec<u8> {
        let mut v = b"%PDF-1.7\n1 0 obj\n<<>>\nendobj\n".to_vec();
        v.extend_from_slice(trailer);
        v
    }

    #[test]
    fn test_decode_standard_and_unpadded() {
        assert_eq!(decode("/9j/2Q==").unwrap(), vec![0xFF, 0xD8, 0xFF, 0xD9]);
        assert_eq!(decode("/9j/2Q").unwrap(), vec![0xFF, 0xD8, 0xFF, 0xD9]);
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_decode_malformed() {
        assert!(matches!(
            decode("not base64!"),
            Err(SignatureError::MalformedEncoding(_))
        ));
        assert!(decode("-_-_").is_err());
    }

    #[test]
    fn test_required_all_must_match() {
        let mut buf = jpeg_bytes();
        assert!(match_signatures(&buf, JPEG_SPEC.required, None));

        // 先頭は一致するが末尾が壊れている
        let last = buf.len() - 1;
        buf[last] = 0x00;
        assert!(matches!(
            evaluate(&buf, JPEG_SPEC.required, None),
            Err(SignatureError::SignatureMismatch { offset: -2 })
        ));
    }

    #[test]
    fn test_required_truncated_window() {
        assert!(matches!(
            evaluate(&[0xFF], JPEG_SPEC.required, None),
            Err(SignatureError::TruncatedBuffer {
                offset: 0,
                len: 2,
                buffer_len: 1
            })
        ));
    }

    #[test]
    fn test_alternatives_any_one_suffices() {
        // -5のみ一致
        let buf = pdf_with_trailer(b"%%EOF");
        assert!(match_signatures(&buf, PDF_SPEC.required, PDF_SPEC.alternatives));

        // -6のみ一致（末尾に改行1つ）
        let buf = pdf_with_trailer(b"%%EOF\n");
        assert!(!Signature::new(-5, b"%%EOF").matches(&buf));
        assert!(match_signatures(&buf, PDF_SPEC.required, PDF_SPEC.alternatives));

        // -9のみ一致（CRLF囲み）
        let buf = pdf_with_trailer(b"\r\n%%EOF\r\n");
        assert!(match_signatures(&buf, PDF_SPEC.required, PDF_SPEC.alternatives));
    }

    #[test]
    fn test_alternatives_none_match() {
        let buf = pdf_with_trailer(b"%%EOX\r\n\r\n");
        assert!(matches!(
            evaluate(&buf, PDF_SPEC.required, PDF_SPEC.alternatives),
            Err(SignatureError::NoAlternativeMatched { candidates: 3 })
        ));
    }

    #[test]
    fn test_alternatives_absent_is_vacuous() {
        assert!(match_signatures(&jpeg_bytes(), JPEG_SPEC.required, None));
        // 空の代替セットは「どれも一致しない」
        assert!(!match_signatures(&jpeg_bytes(), JPEG_SPEC.required, Some(&[][..])));
    }

    #[test]
    fn test_alternatives_short_buffer() {
        // 代替の全ウィンドウがバッファ外
        assert!(!match_signatures(b"%PDF", PDF_SPEC.required, PDF_SPEC.alternatives));
    }

    #[test]
    fn test_validator_jpeg() {
        let v = Validator::default();
        assert!(v.validate(&b64(&jpeg_bytes()), "image/jpeg"));
        assert!(v.validate(&b64(&jpeg_bytes()), "IMAGE/JPG"));
        assert!(!v.validate(&b64(&jpeg_bytes()), "application/pdf"));
    }

    #[test]
    fn test_validator_png_header_claimed_jpeg() {
        let mut buf = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        buf.extend_from_slice(&jpeg_bytes());
        let v = Validator::default();
        assert!(matches!(
            v.check(&b64(&buf), "image/jpeg"),
            Err(SignatureError::SignatureMismatch { offset: 0 })
        ));
        assert!(!v.validate(&b64(&buf), "image/jpeg"));
    }

    #[test]
    fn test_validator_policy() {
        let payload = b64(&jpeg_bytes());
        assert!(Validator::new(FallbackPolicy::Jpeg).validate(&payload, "text/plain"));

        let strict = Validator::new(FallbackPolicy::Reject);
        assert_eq!(strict.policy(), FallbackPolicy::Reject);
        assert!(matches!(
            strict.check(&payload, "text/plain"),
            Err(SignatureError::UnsupportedFormat(_))
        ));
        assert!(!strict.validate(&payload, "text/plain"));
        assert!(strict.validate(&payload, "image/jpeg"));
    }

    #[test]
    fn test_validator_malformed_input() {
        let v = Validator::default();
        assert!(matches!(
            v.check("%%%", "image/jpeg"),
            Err(SignatureError::MalformedEncoding(_))
        ));
        assert!(!v.validate("%%%", "image/jpeg"));
        assert!(!v.validate("", "image/jpeg"));
        assert!(!v.validate("", "application/pdf"));
    }
}
