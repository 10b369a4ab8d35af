//! # 비즈니스 로직 모듈
//!
//! - `insights`: 명상 기록으로부터 월/연 통계, 연속 일수, 주간 요약 등을 계산

pub mod insights;
