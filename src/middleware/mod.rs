//! # 미들웨어 모듈
//!
//! - `auth`: Bearer 토큰을 검증하여 요청한 사용자를 알아내는 `AuthUser` 추출기

pub mod auth;
