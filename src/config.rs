//! Configuration Module
//!
//! Environment-driven settings for the ledger core. The owner identity is
//! fixed here once and never changes for the lifetime of a service.

use std::env;

use anyhow::{bail, Context, Result};

use crate::error::validation::DEFAULT_MIN_AMOUNT;
use crate::types::Address;

/// 이벤트 채널 기본 버퍼 크기
pub const DEFAULT_EVENT_CHANNEL_CAPACITY: usize = 1000;

/// 레저 설정
#[derive(Debug, Clone)]
pub struct Config {
    /// approve/reject 권한을 가진 유일한 주소
    pub owner: Address,

    /// 최소 금액 (exclusive, 최소 단위)
    /// 기본값 0: 0만 거부
    pub min_amount: u128,

    /// EventHub 브로드캐스트 버퍼 크기
    pub event_channel_capacity: usize,

    /// 환경 (development, staging, production)
    pub environment: Environment,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Config {
    /// 코드에서 직접 생성 (owner 외에는 기본값)
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            min_amount: DEFAULT_MIN_AMOUNT,
            event_channel_capacity: DEFAULT_EVENT_CHANNEL_CAPACITY,
            environment: Environment::Development,
        }
    }

    /// 환경변수에서 설정 로드
    ///
    /// # Required Environment Variables
    ///
    /// - `OWNER_ADDRESS`: owner 주소 (0x + 40 hex)
    ///
    /// # Optional Environment Variables
    ///
    /// - `MIN_AMOUNT`: 최소 금액, exclusive (기본값: 0)
    /// - `EVENT_CHANNEL_CAPACITY`: 이벤트 버퍼 크기 (기본값: 1000)
    /// - `ENVIRONMENT`: development | staging | production
    pub fn from_env() -> Result<Self> {
        // .env 파일은 있으면 사용
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// 임의의 lookup 함수로 설정 로드
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("ENVIRONMENT")
            .unwrap_or_else(|| "development".to_string())
            .to_lowercase()
            .as_str()
        {
            "production" => Environment::Production,
            "staging" => Environment::Staging,
            _ => Environment::Development,
        };

        let owner = lookup("OWNER_ADDRESS").context("OWNER_ADDRESS must be set")?;
        let owner = Address::new(&owner).context("OWNER_ADDRESS must be a valid address")?;

        let min_amount = match lookup("MIN_AMOUNT") {
            Some(raw) => raw
                .trim()
                .parse::<u128>()
                .context("MIN_AMOUNT must be a non-negative integer")?,
            None => DEFAULT_MIN_AMOUNT,
        };

        let event_channel_capacity = match lookup("EVENT_CHANNEL_CAPACITY") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .context("EVENT_CHANNEL_CAPACITY must be a valid number")?,
            None => DEFAULT_EVENT_CHANNEL_CAPACITY,
        };
        if event_channel_capacity == 0 {
            bail!("EVENT_CHANNEL_CAPACITY must be greater than zero");
        }

        Ok(Config {
            owner,
            min_amount,
            event_channel_capacity,
            environment,
        })
    }

    /// 프로덕션 환경인지 확인
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}
