//! Common Types Module
//!
//! 레저 전반에서 사용되는 공통 타입 정의

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// 요청 식별자 (1부터 시작, 단조 증가)
pub type RequestId = u64;

/// 호출자 / owner 식별자
///
/// 호스트가 이미 인증한 값을 그대로 전달받음.
/// 레저는 인증을 하지 않고 owner와의 동등 비교만 수행.
///
/// 형식: `0x` + 40자리 hex, 항상 lowercase로 정규화
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

/// 주소 파싱 에러
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid address format: {0}")]
pub struct AddressParseError(pub String);

impl Address {
    pub fn new(addr: &str) -> Result<Self, AddressParseError> {
        let addr = addr.trim().to_lowercase();
        let digits = addr
            .strip_prefix("0x")
            .ok_or_else(|| AddressParseError(addr.clone()))?;

        if digits.len() != 40 || hex::decode(digits).is_err() {
            return Err(AddressParseError(addr));
        }

        Ok(Self(addr))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Address {
    type Error = AddressParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Address> for String {
    fn from(addr: Address) -> Self {
        addr.0
    }
}
