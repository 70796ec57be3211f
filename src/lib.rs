//! Lending Ledger Library
//!
//! # Overview
//!
//! 대출 요청 원장의 핵심 로직. 누구나 요청을 제출하고,
//! 단 하나의 owner만 요청을 승인하거나 거절함.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                    Host Environment                   │
//! │     (caller 인증, transport, 이벤트 전달 보장)         │
//! └───────────────┬───────────────────────▲──────────────┘
//!                 │ caller: Address       │ LendingEvent
//!                 ▼                       │
//! ┌──────────────────────────────────────────────────────┐
//! │                   LendingService                      │
//! │     amount policy · owner check · transitions         │
//! │  ┌───────────────────────────┐   ┌────────────────┐   │
//! │  │ RwLock<RequestRegistry>   │   │ dyn EventSink  │   │
//! │  └───────────────────────────┘   └────────────────┘   │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `config`: 환경 설정 관리
//! - `error`: 에러 타입 및 입력 검증
//! - `registry`: 요청 저장소와 상태 전이 규칙
//! - `services`: LendingService, 이벤트 sink
//! - `telemetry`: tracing 초기화
//! - `types`: 공통 타입 정의
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use lending_ledger::{Config, EventHub, LendingService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     lending_ledger::telemetry::init_tracing(lending_ledger::telemetry::DEFAULT_FILTER)?;
//!
//!     let config = Config::from_env()?;
//!     let hub = Arc::new(EventHub::new(config.event_channel_capacity));
//!     let service = LendingService::from_config(&config, hub.clone());
//!
//!     let mut events = hub.subscribe();
//!     let id = service.submit_request(&borrower, 100).await?;
//!     service.approve_request(&config.owner, id).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod registry;
pub mod services;
pub mod telemetry;
pub mod types;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use config::Config;
pub use error::{ErrorResponse, LendingError, LendingResult};
pub use registry::{Request, RequestRegistry, RequestStatus};
pub use services::{EventHub, EventSink, LendingEvent, LendingService, RecordingSink};
pub use types::{Address, RequestId};
