//! Error Handling Module
//!
//! Typed errors for every ledger operation.
//! All variants are caller-correctable: none leave the registry partially mutated.

use serde::Serialize;
use thiserror::Error;

use crate::registry::RequestStatus;
use crate::types::{Address, RequestId};

/// 레저 에러 타입
///
/// 모든 에러는 호출자에게 동기적으로 반환됨
/// - 내부 재시도 없음
/// - 에러 발생 시 상태 변경 없음 (검증이 변경보다 항상 먼저)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LendingError {
    /// 최소 금액 정책 위반
    #[error("Invalid amount: {amount} must be greater than {minimum}")]
    InvalidAmount { amount: u128, minimum: u128 },

    /// owner 전용 작업을 owner가 아닌 호출자가 시도
    #[error("Only the owner can perform this operation (caller: {caller})")]
    Unauthorized { caller: Address },

    #[error("Request not found: {0}")]
    NotFound(RequestId),

    /// 종료 상태(Approved/Rejected)의 요청에 대한 전이 시도
    #[error("Invalid transition for request {id}: {from} -> {to}")]
    InvalidTransition {
        id: RequestId,
        from: RequestStatus,
        to: RequestStatus,
    },
}

impl LendingError {
    /// 호스트용 고정 에러 코드
    pub fn code(&self) -> &'static str {
        match self {
            LendingError::InvalidAmount { .. } => "INVALID_AMOUNT",
            LendingError::Unauthorized { .. } => "UNAUTHORIZED",
            LendingError::NotFound(_) => "NOT_FOUND",
            LendingError::InvalidTransition { .. } => "INVALID_TRANSITION",
        }
    }
}

/// Result type for ledger operations
pub type LendingResult<T> = Result<T, LendingError>;

/// 에러 응답 구조 (호스트가 직렬화해서 전달)
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl From<&LendingError> for ErrorResponse {
    fn from(err: &LendingError) -> Self {
        Self {
            error: err.to_string(),
            code: err.code().to_string(),
        }
    }
}

/// Input validation utilities
pub mod validation {
    use super::*;

    /// 기본 최소 금액 (exclusive): 0만 거부
    pub const DEFAULT_MIN_AMOUNT: u128 = 0;

    /// 금액은 최소값보다 커야 함 (`amount > minimum`)
    pub fn validate_amount(amount: u128, minimum: u128) -> LendingResult<()> {
        if amount <= minimum {
            return Err(LendingError::InvalidAmount { amount, minimum });
        }
        Ok(())
    }

    /// 호출자가 owner인지 확인
    pub fn validate_owner(caller: &Address, owner: &Address) -> LendingResult<()> {
        if caller != owner {
            return Err(LendingError::Unauthorized {
                caller: caller.clone(),
            });
        }
        Ok(())
    }
}
