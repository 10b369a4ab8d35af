//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 데이터베이스와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 라우트 핸들러(routes/)와 인증 추출기(middleware/)에서 이 모듈의 함수를 호출합니다.
//!
//! 각 하위 모듈:
//! - `meditations`: 명상 기록 저장/조회/소프트 삭제 쿼리
//! - `users`: 사용자 조회 쿼리

pub mod meditations;
pub mod users;

// `crate::db::list_meditations_for_user`처럼 바로 접근할 수 있게 재공개합니다.
pub use meditations::*;
