//! Services Module
//!
//! 레저의 비즈니스 로직 레이어
//!
//! # Services
//! - `LendingService`: 요청 제출 / 승인 / 거절
//! - `EventSink`: 상태 변경 알림 수신자
//! - `EventHub`: broadcast 기반 알림 fan-out

mod events;
mod hub;
mod lending;

pub use events::{parse_event, serialize_event, EventSink, LendingEvent, RecordingSink, TracingSink};
pub use hub::EventHub;
pub use lending::LendingService;
