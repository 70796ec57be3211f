//! Event Hub
//!
//! Fan-out notification sink built on `tokio::sync::broadcast`.
//!
//! # Features
//! - Ledger-wide event stream
//! - Per-requester streams (submission, approval and rejection of their requests)

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{broadcast, RwLock};

use super::events::{EventSink, LendingEvent};
use crate::types::{Address, RequestId};

/// 요청자 채널 버퍼 크기
const REQUESTER_CHANNEL_CAPACITY: usize = 100;

/// Event Hub
///
/// ```text
/// ┌──────────────┐     ┌──────────────┐     ┌──────────────────┐
/// │ LendingService│────▶│   EventHub   │────▶│  all events      │
/// └──────────────┘     │   (Router)   │     ├──────────────────┤
///                      │              │────▶│  requester 0x..  │
///                      └──────────────┘     └──────────────────┘
/// ```
///
/// 수신자가 없으면 메시지는 그냥 버려짐
pub struct EventHub {
    /// 전체 이벤트 채널
    all_tx: broadcast::Sender<LendingEvent>,
    /// 요청자별 채널
    requester_channels: RwLock<HashMap<Address, broadcast::Sender<LendingEvent>>>,
    /// approve/reject 이벤트 라우팅용 (id -> requester)
    /// Open 상태인 요청만 보관: 결정 이벤트가 지나가면 제거
    requesters: RwLock<HashMap<RequestId, Address>>,
}

impl EventHub {
    /// 새 EventHub 생성
    pub fn new(capacity: usize) -> Self {
        let (all_tx, _) = broadcast::channel(capacity.max(1));

        Self {
            all_tx,
            requester_channels: RwLock::new(HashMap::new()),
            requesters: RwLock::new(HashMap::new()),
        }
    }

    /// 전체 이벤트 구독
    pub fn subscribe(&self) -> broadcast::Receiver<LendingEvent> {
        self.all_tx.subscribe()
    }

    /// 특정 요청자의 이벤트 구독
    pub async fn subscribe_requester(
        &self,
        requester: &Address,
    ) -> broadcast::Receiver<LendingEvent> {
        let mut channels = self.requester_channels.write().await;

        let tx = channels.entry(requester.clone()).or_insert_with(|| {
            let (tx, _) = broadcast::channel(REQUESTER_CHANNEL_CAPACITY);
            tx
        });

        tx.subscribe()
    }

    /// 전체 채널 구독자 수
    pub fn subscriber_count(&self) -> usize {
        self.all_tx.receiver_count()
    }

    /// 등록된 요청자 채널 수 (publish 시 수신자 없는 채널은 정리됨)
    pub async fn requester_channel_count(&self) -> usize {
        self.requester_channels.read().await.len()
    }

    /// 라우팅을 위해 추적 중인 요청 수
    pub async fn tracked_request_count(&self) -> usize {
        self.requesters.read().await.len()
    }

    /// 이벤트 브로드캐스트
    pub async fn publish(&self, event: LendingEvent) {
        let requester = self.route(&event).await;

        if let Some(requester) = requester {
            let mut channels = self.requester_channels.write().await;
            if let Some(tx) = channels.get(&requester) {
                let delivered = tx.send(event.clone()).unwrap_or(0);
                tracing::debug!(%requester, delivered, "requester event delivered");
            }
            // 모든 Receiver가 drop된 채널 정리
            channels.retain(|_, tx| tx.receiver_count() > 0);
        }

        let delivered = self.all_tx.send(event).unwrap_or(0);
        tracing::debug!(delivered, "ledger event delivered");
    }

    /// 이벤트가 속한 요청자 결정
    async fn route(&self, event: &LendingEvent) -> Option<Address> {
        match event {
            LendingEvent::RequestSubmitted { requester, id, .. } => {
                let mut requesters = self.requesters.write().await;
                requesters.insert(*id, requester.clone());
                Some(requester.clone())
            }
            LendingEvent::RequestApproved { id } | LendingEvent::RequestRejected { id } => {
                // 종료 상태 이후에는 더 이상 이벤트가 없음
                self.requesters.write().await.remove(id)
            }
        }
    }
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new(1000)
    }
}

#[async_trait]
impl EventSink for EventHub {
    async fn notify(&self, event: LendingEvent) {
        self.publish(event).await;
    }
}
