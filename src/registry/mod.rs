//! Request Registry
//!
//! In-memory, append-only store of lending requests.
//! Owns identifier allocation and the status transition rules; it knows nothing
//! about owners or callers. Synchronisation is the caller's job: the service
//! wraps the registry in a single lock.

mod models;

pub use models::{Request, RequestStatus};

use chrono::Utc;

use crate::error::{LendingError, LendingResult};
use crate::types::{Address, RequestId};

/// 요청 저장소
///
/// id는 1부터 빈틈 없이 할당되므로 `requests[id - 1]`이 해당 요청
#[derive(Debug, Default)]
pub struct RequestRegistry {
    requests: Vec<Request>,
}

impl RequestRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 새 요청 저장 (status = Open)
    ///
    /// 입력 검증은 상위 레이어에서 수행. 여기서는 실패하지 않음
    pub fn insert(&mut self, requester: Address, amount: u128) -> RequestId {
        let id = self.requests.len() as RequestId + 1;
        self.requests.push(Request::open(id, requester, amount));
        id
    }

    pub fn get(&self, id: RequestId) -> LendingResult<&Request> {
        self.index_of(id)
            .and_then(|idx| self.requests.get(idx))
            .ok_or(LendingError::NotFound(id))
    }

    /// 상태 전이
    ///
    /// Open에서 종료 상태로만 이동 가능. 종료 상태에서 나가는 전이와
    /// Open으로의 재진입은 모두 `InvalidTransition`
    pub fn set_status(
        &mut self,
        id: RequestId,
        new_status: RequestStatus,
    ) -> LendingResult<&Request> {
        let request = self
            .index_of(id)
            .and_then(|idx| self.requests.get_mut(idx))
            .ok_or(LendingError::NotFound(id))?;

        if request.status.is_terminal() || !new_status.is_terminal() {
            return Err(LendingError::InvalidTransition {
                id,
                from: request.status,
                to: new_status,
            });
        }

        request.status = new_status;
        request.decided_at = Some(Utc::now());
        Ok(&*request)
    }

    /// 지금까지 생성된 요청 수 (= 가장 큰 id)
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// id 순서대로 순회
    pub fn iter(&self) -> impl Iterator<Item = &Request> {
        self.requests.iter()
    }

    pub fn by_requester(&self, requester: &Address) -> Vec<Request> {
        self.iter()
            .filter(|r| &r.requester == requester)
            .cloned()
            .collect()
    }

    pub fn by_status(&self, status: RequestStatus) -> Vec<Request> {
        self.iter().filter(|r| r.status == status).cloned().collect()
    }

    fn index_of(&self, id: RequestId) -> Option<usize> {
        // id 0은 할당되지 않음
        id.checked_sub(1).and_then(|idx| usize::try_from(idx).ok())
    }
}
