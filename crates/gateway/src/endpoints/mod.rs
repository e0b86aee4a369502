//! # Gatewayエンドポイント
//!
//! - `POST /api/upload`: ファイル内容のシグネチャ検証
//! - `GET /api/formats`: 対応フォーマット一覧

pub mod formats;
pub mod upload;

pub use formats::handle_formats;
pub use upload::{handle_method_not_allowed, handle_upload};

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::config::GatewayState;

/// axumルーターを構築する。
pub fn router(state: Arc<GatewayState>) -> Router {
    Router::new()
        .route(
            "/api/upload",
            post(handle_upload).fallback(handle_method_not_allowed),
        )
        .route("/api/formats", get(handle_formats))
        .with_state(state)
}
