//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! 각 하위 모듈은 특정 도메인의 데이터 타입을 담당합니다:
//! - `insights`: 인사이트 응답과 집계 기간(Period) 타입
//! - `meditation`: 명상 기록과 기록 요청/검증
//! - `user`: 사용자(User) 관련 구조체
//!
//! `pub use X::*;`로 하위 모듈의 항목을 재공개(re-export)하여
//! `crate::models::Meditation`처럼 짧게 접근할 수 있게 합니다.

pub mod insights;
pub mod meditation;
pub mod user;

pub use insights::*;
pub use meditation::*;
pub use user::*;
