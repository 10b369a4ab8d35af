//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들과 라우터 구성을 모아둔 모듈입니다.
//! Axum에서 핸들러는 HTTP 요청을 받아 응답을 반환하는 async 함수입니다.
//!
//! 각 하위 모듈:
//! - `health`: 서버 상태 확인 (헬스체크)
//! - `meditations`: 명상 기록 저장, 인사이트 조회, 삭제

pub mod health;
pub mod meditations;

use axum::{
    routing::{delete, get, post},
    Router,
};
use sqlx::SqlitePool;

pub use health::*;
pub use meditations::*;

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// SqlitePool은 내부적으로 Arc를 사용하므로 clone해도 같은 풀을 가리킵니다.
#[derive(Clone)]
pub struct AppState {
    /// SQLite 연결 풀
    pub pool: SqlitePool,
    /// JWT 토큰 검증용 비밀키
    pub jwt_secret: String,
}

/// 모든 API 라우트를 등록한 라우터를 만듭니다.
///
/// main.rs는 여기에 CORS/로깅 미들웨어만 덧붙이고,
/// 테스트는 이 라우터를 서버 없이 `oneshot`으로 직접 호출합니다.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/meditations", post(store_meditation))
        .route("/meditations/insights", get(meditation_insights))
        // axum 0.8부터 경로 파라미터는 `{id}` 문법을 씁니다.
        .route("/meditations/{id}", delete(delete_meditation))
        .route("/health", get(health_check))
        .with_state(state)
}
