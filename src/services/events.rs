//! Lending Events
//!
//! Notifications emitted after each successful mutation, and the sink
//! capability the service calls them out through.

use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::types::{Address, RequestId};

/// 상태 변경 알림
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum LendingEvent {
    /// 새 요청 제출
    RequestSubmitted {
        requester: Address,
        amount: u128,
        id: RequestId,
    },
    /// owner 승인
    RequestApproved { id: RequestId },
    /// owner 거절
    RequestRejected { id: RequestId },
}

impl LendingEvent {
    pub fn request_id(&self) -> RequestId {
        match self {
            LendingEvent::RequestSubmitted { id, .. }
            | LendingEvent::RequestApproved { id }
            | LendingEvent::RequestRejected { id } => *id,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LendingEvent::RequestSubmitted { .. } => "RequestSubmitted",
            LendingEvent::RequestApproved { .. } => "RequestApproved",
            LendingEvent::RequestRejected { .. } => "RequestRejected",
        }
    }
}

/// 알림 수신자
///
/// 서비스는 변경이 적용된 직후 호출함. 레지스트리 잠금은 이미 풀려 있어
/// 조회는 가능하지만, notify 안에서 submit/approve/reject를 호출하면 안 됨.
/// 전달 실패를 서비스에 돌려줄 방법은 없음 (재시도/롤백 없음)
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn notify(&self, event: LendingEvent);
}

/// 받은 이벤트를 순서대로 저장하는 sink (테스트, 감사 로그용)
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<LendingEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 지금까지 받은 이벤트 복사본
    pub fn events(&self) -> Vec<LendingEvent> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<LendingEvent>> {
        // 기록 중 panic이 나도 이미 쌓인 이벤트는 유효
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl EventSink for RecordingSink {
    async fn notify(&self, event: LendingEvent) {
        self.lock().push(event);
    }
}

/// 이벤트를 tracing 로그로만 남기는 sink
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

#[async_trait]
impl EventSink for TracingSink {
    async fn notify(&self, event: LendingEvent) {
        tracing::info!(event = event.name(), id = event.request_id(), "lending event");
    }
}

/// 이벤트 직렬화
pub fn serialize_event(event: &LendingEvent) -> Result<String> {
    serde_json::to_string(event).map_err(Into::into)
}

/// 이벤트 파싱
pub fn parse_event(data: &str) -> Result<LendingEvent> {
    serde_json::from_str(data).map_err(Into::into)
}
