//! # Gateway設定・共有状態
//!
//! 環境変数からの設定読み込みとGatewayの共有状態の定義。

use filesig_core::{FallbackPolicy, Validator};

/// 既定の待受アドレス
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// 起動時に一度だけ読み込む設定。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// 待受アドレス（`FILESIG_BIND_ADDR`）
    pub bind_addr: String,
    /// 未知フォーマットを拒否するか（`FILESIG_STRICT_FORMATS=true`）
    pub strict_formats: bool,
}

impl GatewayConfig {
    /// 環境変数から構築する。
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意の変数ソースから構築する。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let bind_addr =
            lookup("FILESIG_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let strict_formats = lookup("FILESIG_STRICT_FORMATS")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);
        Self {
            bind_addr,
            strict_formats,
        }
    }

    pub fn fallback_policy(&self) -> FallbackPolicy {
        if self.strict_formats {
            FallbackPolicy::Reject
        } else {
            FallbackPolicy::Jpeg
        }
    }
}

/// Gatewayの共有状態。
pub struct GatewayState {
    /// シグネチャ検証器（読み取り専用、ロック不要）
    pub validator: Validator,
}

impl GatewayState {
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            validator: Validator::new(config.fallback_policy()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert!(!config.strict_formats);
        assert_eq!(config.fallback_policy(), FallbackPolicy::Jpeg);
    }

    #[test]
    fn test_overrides() {
        let config = GatewayConfig::from_lookup(lookup_from(&[
            ("FILESIG_BIND_ADDR", "127.0.0.1:8080"),
            ("FILESIG_STRICT_FORMATS", "TRUE"),
        ]));
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert!(config.strict_formats);
        assert_eq!(config.fallback_policy(), FallbackPolicy::Reject);

        let state = GatewayState::new(&config);
        assert_eq!(state.validator.policy(), FallbackPolicy::Reject);
    }

    #[test]
    fn test_strict_formats_unrecognised_value() {
        let config =
            GatewayConfig::from_lookup(lookup_from(&[("FILESIG_STRICT_FORMATS", "yes please")]));
        assert!(!config.strict_formats);
    }
}
