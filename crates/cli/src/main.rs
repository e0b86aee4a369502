//! # filesig CLI
//!
//! ローカルファイルの内容を申告content-typeのマジックバイトと照合する。
//!
//! ## コマンド
//! - `check <PATH> --content-type <CT>`: 検証し `secure` / `insecure` を出力（不一致は終了コード1）
//! - `formats`: 対応フォーマット一覧

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use base64::Engine;
use clap::{Parser, Subcommand};
use filesig_core::{FallbackPolicy, FileFormat, Validator};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// filesig - マジックバイトによるファイル形式検証
#[derive(Parser)]
#[command(name = "filesig-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Validate that a file's bytes match its claimed content type")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a file against a claimed content type
    Check {
        /// File to check
        path: PathBuf,

        /// Claimed content type (e.g. image/jpeg, application/pdf)
        #[arg(short = 't', long)]
        content_type: String,

        /// Treat the file as base64 text instead of raw bytes
        #[arg(long)]
        base64: bool,

        /// Reject content types without a signature set instead of checking them as JPEG
        #[arg(long)]
        strict: bool,
    },

    /// List supported content types
    Formats,
}

/// CLIのエラー型
#[derive(Debug, thiserror::Error)]
enum CliError {
    /// ファイル読み込みエラー
    #[error("{}: 読み込みに失敗しました: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// --base64 指定時にUTF-8テキストでない
    #[error("{}: Base64テキストではありません", path.display())]
    NotText { path: PathBuf },
}

/// ファイルをBase64ペイロードとして読み込む。
///
/// `already_encoded` の場合は改行を含む空白を全て除去する（76桁折り返しの出力に対応）。
fn load_payload(path: &Path, already_encoded: bool) -> Result<String, CliError> {
    let bytes = std::fs::read(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    if already_encoded {
        let text = String::from_utf8(bytes).map_err(|_| CliError::NotText {
            path: path.to_path_buf(),
        })?;
        Ok(text.split_ascii_whitespace().collect())
    } else {
        Ok(base64::engine::general_purpose::STANDARD.encode(bytes))
    }
}

fn run_check(
    path: &Path,
    content_type: &str,
    already_encoded: bool,
    strict: bool,
) -> Result<bool, CliError> {
    let policy = if strict {
        FallbackPolicy::Reject
    } else {
        FallbackPolicy::Jpeg
    };
    let payload = load_payload(path, already_encoded)?;
    let secure = Validator::new(policy).validate(&payload, content_type);
    tracing::debug!(path = %path.display(), content_type, secure, "検証完了");
    Ok(secure)
}

fn format_lines() -> Vec<String> {
    FileFormat::ALL
        .into_iter()
        .map(|f| {
            let status = if f.own_spec().is_some() {
                "active"
            } else {
                "reserved"
            };
            format!("{f:<16} {status}")
        })
        .collect()
}

/// 標準エラー出力へのログsubscriber。標準出力は判定結果専用。
fn log_subscriber(filter: EnvFilter) -> impl tracing::Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish()
}

fn main() -> anyhow::Result<ExitCode> {
    log_subscriber(EnvFilter::from_default_env()).try_init()?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            path,
            content_type,
            base64,
            strict,
        } => {
            if run_check(&path, &content_type, base64, strict)? {
                println!("secure");
                Ok(ExitCode::SUCCESS)
            } else {
                println!("insecure");
                Ok(ExitCode::FAILURE)
            }
        }
        Commands::Formats => {
            for line in format_lines() {
                println!("{line}");
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
