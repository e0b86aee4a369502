//! # GET /api/formats
//!
//! 対応フォーマット公開エンドポイント。

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use filesig_core::{FallbackPolicy, FileFormat};
use filesig_types::*;

use crate::config::GatewayState;

/// GET /api/formats: 申告可能なcontent-typeと、それぞれ固有のシグネチャを持つかを返す。
pub async fn handle_formats(
    State(state): State<Arc<GatewayState>>,
) -> Json<Envelope<FormatsResponse>> {
    let formats = FileFormat::ALL
        .into_iter()
        .map(|f| FormatInfo {
            content_type: f.content_type().to_string(),
            active: f.own_spec().is_some(),
        })
        .collect();

    Json(Envelope::new(FormatsResponse {
        formats,
        strict: state.validator.policy() == FallbackPolicy::Reject,
    }))
}
