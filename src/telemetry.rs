//! Telemetry
//!
//! `tracing` subscriber setup for hosts embedding the ledger.

use anyhow::{anyhow, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 기본 로그 필터
pub const DEFAULT_FILTER: &str = "lending_ledger=info";

/// 전역 subscriber 설치
///
/// `RUST_LOG`가 있으면 우선 사용 (예: `RUST_LOG=lending_ledger=debug`).
/// 이미 설치된 subscriber가 있으면 panic 대신 에러 반환
pub fn init_tracing(default_filter: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}
