//! Registry Models
//!
//! Lending request records and their lifecycle status.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Address, RequestId};

/// 요청 상태
///
/// ```text
/// Open ──approve──▶ Approved (terminal)
///   │
///   └───reject───▶ Rejected (terminal)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Open,
    Approved,
    Rejected,
}

impl RequestStatus {
    /// 숫자 코드 (Open = 0, Approved = 1, Rejected = 2)
    pub fn code(self) -> u8 {
        match self {
            RequestStatus::Open => 0,
            RequestStatus::Approved => 1,
            RequestStatus::Rejected => 2,
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, RequestStatus::Open)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestStatus::Open => write!(f, "open"),
            RequestStatus::Approved => write!(f, "approved"),
            RequestStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl TryFrom<u8> for RequestStatus {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(RequestStatus::Open),
            1 => Ok(RequestStatus::Approved),
            2 => Ok(RequestStatus::Rejected),
            other => Err(other),
        }
    }
}

/// 대출 요청
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub id: RequestId,

    /// 요청자 주소 (생성 후 불변)
    pub requester: Address,

    /// 요청 금액 (최소 단위, 예: wei)
    pub amount: u128,

    pub status: RequestStatus,

    pub created_at: DateTime<Utc>,

    /// 승인/거절 시각 (Open이면 None)
    pub decided_at: Option<DateTime<Utc>>,
}

impl Request {
    pub(crate) fn open(id: RequestId, requester: Address, amount: u128) -> Self {
        Self {
            id,
            requester,
            amount,
            status: RequestStatus::Open,
            created_at: Utc::now(),
            decided_at: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == RequestStatus::Open
    }
}
