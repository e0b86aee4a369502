//! # filesig Gateway
//!
//! アップロードされたファイルの内容を、申告されたcontent-typeのマジックバイトと照合する
//! HTTPサービス。
//!
//! ## API エンドポイント
//! - `POST /api/upload`: シグネチャ検証（POST以外は405）
//! - `GET /api/formats`: 対応フォーマット一覧
//!
//! ## 環境変数
//! - `FILESIG_BIND_ADDR`: 待受アドレス（既定 `0.0.0.0:3000`）
//! - `FILESIG_STRICT_FORMATS`: `true` で未知フォーマットを拒否

mod config;
mod endpoints;
mod error;

use std::sync::Arc;

use config::{GatewayConfig, GatewayState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = GatewayConfig::from_env();
    if config.strict_formats {
        tracing::info!("未知のフォーマットは拒否します");
    } else {
        tracing::info!("未知のフォーマットはJPEGとして検証します");
    }

    let state = Arc::new(GatewayState::new(&config));
    let app = endpoints::router(state);

    tracing::info!("Gatewayを {} で起動します", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ---------------------------------------------------------------------------
// テスト
// ---------------------------------------------------------------------------
