//! Lending Service
//!
//! Public surface of the ledger: authority checks, amount policy and status
//! transitions on top of [`RequestRegistry`].
//!
//! # Flow
//! ```text
//! caller ──▶ validate (amount / owner) ──▶ registry (write lock) ──▶ sink.notify
//! ```
//!
//! Mutations are serialised by a notify-order mutex taken before the registry
//! write lock. The write lock is released before the sink runs, so a sink may
//! read the service; the order mutex is held until `notify` returns, so sink
//! order always equals mutation order.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use super::events::{EventSink, LendingEvent};
use crate::config::Config;
use crate::error::validation::{validate_amount, validate_owner};
use crate::error::{LendingError, LendingResult};
use crate::registry::{Request, RequestRegistry, RequestStatus};
use crate::types::{Address, RequestId};

/// Lending Service
///
/// # Example
/// ```ignore
/// let sink = Arc::new(RecordingSink::new());
/// let service = LendingService::new(owner.clone(), 0, sink.clone());
///
/// let id = service.submit_request(&borrower, 100).await?;
/// service.approve_request(&owner, id).await?;
/// ```
pub struct LendingService {
    owner: Address,
    min_amount: u128,
    registry: RwLock<RequestRegistry>,
    /// 알림 순서 보장용 (항상 registry 잠금보다 먼저 획득)
    notify_order: Mutex<()>,
    sink: Arc<dyn EventSink>,
}

impl LendingService {
    /// 새 LendingService 생성
    ///
    /// owner와 최소 금액은 생성 이후 변경 불가
    pub fn new(owner: Address, min_amount: u128, sink: Arc<dyn EventSink>) -> Self {
        tracing::info!(%owner, min_amount, "lending service initialized");

        Self {
            owner,
            min_amount,
            registry: RwLock::new(RequestRegistry::new()),
            notify_order: Mutex::new(()),
            sink,
        }
    }

    pub fn from_config(config: &Config, sink: Arc<dyn EventSink>) -> Self {
        Self::new(config.owner.clone(), config.min_amount, sink)
    }

    /// 대출 요청 제출
    ///
    /// 권한 확인 없음: 누구나 제출 가능
    pub async fn submit_request(&self, caller: &Address, amount: u128) -> LendingResult<RequestId> {
        validate_amount(amount, self.min_amount).inspect_err(|e| reject_log("submit", e))?;

        let _order = self.notify_order.lock().await;
        let id = self.registry.write().await.insert(caller.clone(), amount);

        tracing::info!(id, requester = %caller, amount, "request submitted");

        self.sink
            .notify(LendingEvent::RequestSubmitted {
                requester: caller.clone(),
                amount,
                id,
            })
            .await;

        Ok(id)
    }

    /// [`submit_request`](Self::submit_request)의 별칭
    pub async fn create_request(&self, caller: &Address, amount: u128) -> LendingResult<RequestId> {
        self.submit_request(caller, amount).await
    }

    /// 요청 승인 (owner 전용)
    pub async fn approve_request(&self, caller: &Address, id: RequestId) -> LendingResult<()> {
        self.decide(caller, id, RequestStatus::Approved).await
    }

    /// 요청 거절 (owner 전용)
    pub async fn reject_request(&self, caller: &Address, id: RequestId) -> LendingResult<()> {
        self.decide(caller, id, RequestStatus::Rejected).await
    }

    /// 요청 조회
    pub async fn get_request(&self, id: RequestId) -> LendingResult<Request> {
        let registry = self.registry.read().await;
        registry.get(id).cloned()
    }

    /// [`get_request`](Self::get_request)의 별칭
    pub async fn find_request_by_id(&self, id: RequestId) -> LendingResult<Request> {
        self.get_request(id).await
    }

    /// 지금까지 생성된 요청 수 (= 가장 큰 id)
    pub async fn request_count(&self) -> u64 {
        self.registry.read().await.len() as u64
    }

    pub fn owner(&self) -> &Address {
        &self.owner
    }

    pub fn minimum_amount(&self) -> u128 {
        self.min_amount
    }

    /// 특정 요청자의 요청 목록 (id 순)
    pub async fn requests_by(&self, requester: &Address) -> Vec<Request> {
        self.registry.read().await.by_requester(requester)
    }

    pub async fn requests_with_status(&self, status: RequestStatus) -> Vec<Request> {
        self.registry.read().await.by_status(status)
    }

    /// 전체 요청 스냅샷 (id 순)
    pub async fn snapshot(&self) -> Vec<Request> {
        self.registry.read().await.iter().cloned().collect()
    }

    /// approve/reject 공통 처리
    ///
    /// 권한 확인이 id 조회보다 먼저: owner가 아니면 요청 존재 여부와 무관하게 `Unauthorized`
    async fn decide(
        &self,
        caller: &Address,
        id: RequestId,
        status: RequestStatus,
    ) -> LendingResult<()> {
        let action = match status {
            RequestStatus::Approved => "approve",
            _ => "reject",
        };

        validate_owner(caller, &self.owner).inspect_err(|e| reject_log(action, e))?;

        let _order = self.notify_order.lock().await;
        self.registry
            .write()
            .await
            .set_status(id, status)
            .map(|_| ())
            .inspect_err(|e| reject_log(action, e))?;

        tracing::info!(id, owner = %caller, %status, "request decided");

        let event = match status {
            RequestStatus::Approved => LendingEvent::RequestApproved { id },
            _ => LendingEvent::RequestRejected { id },
        };
        self.sink.notify(event).await;

        Ok(())
    }
}

fn reject_log(action: &str, err: &LendingError) {
    tracing::warn!(action, code = err.code(), "{}", err);
}
