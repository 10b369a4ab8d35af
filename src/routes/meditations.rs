//! # 명상 기록 API 라우트 핸들러
//!
//! 명상 기록 저장, 인사이트 조회, 기록 삭제를 위한 HTTP 핸들러 함수들입니다.
//! 모든 엔드포인트는 `AuthUser` 추출기로 요청한 사용자를 알아낸 뒤,
//! 그 사용자 ID를 DB/서비스 함수에 명시적으로 넘깁니다.
//!
//! ## 엔드포인트 목록
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | POST | /meditations | `store_meditation` | 끝난 명상 기록 저장 |
//! | GET | /meditations/insights | `meditation_insights` | 통계(인사이트) 조회 |
//! | DELETE | /meditations/{id} | `delete_meditation` | 기록 소프트 삭제 |
//!
//! ## 사용 흐름
//! ```text
//! 1. 명상 종료 → POST /meditations { started_at, ended_at } → { "data": [] }
//! 2. 통계 화면 → GET /meditations/insights → { "data": { breakdowns, last_week, ... } }
//! ```

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};

use crate::{
    db,
    error::AppError,
    middleware::auth::AuthUser,
    models::CreateMeditationRequest,
    routes::AppState,
    services::insights,
};

/// 끝난 명상 한 번을 저장합니다.
///
/// `POST /meditations` + `{ "started_at": 1700000000, "ended_at": 1700000600 }`
///
/// - 검증 실패 시 422와 필드별 에러 메시지를 반환하고, 아무것도 저장하지 않습니다.
/// - duration은 서버가 `ended_at - started_at`으로 계산합니다.
/// - 같은 요청을 반복하면 기록도 반복해서 생깁니다.
/// - JSON으로 읽을 수 없는 본문(잘림, Content-Type 누락)이나 객체가 아닌 본문은
///   빈 요청으로 취급되어 두 필드 모두 "required" 422가 됩니다.
pub async fn store_meditation(
    State(state): State<AppState>,
    auth_user: AuthUser,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let req = match payload {
        Ok(Json(body)) => CreateMeditationRequest::from_body(body),
        Err(rejection) => {
            tracing::debug!(
                user_id = %auth_user.user_id,
                reason = %rejection.body_text(),
                "Unreadable meditation body"
            );
            CreateMeditationRequest::default()
        }
    };
    let new = req.validate()?;

    let meditation = db::insert_meditation(&state.pool, &auth_user.user_id, &new).await?;
    tracing::info!(
        user_id = %auth_user.user_id,
        meditation_id = %meditation.id,
        duration = meditation.duration,
        "Stored meditation"
    );

    Ok(Json(json!({ "data": [] })))
}

/// 사용자의 명상 인사이트를 계산해서 반환합니다.
///
/// `GET /meditations/insights` → `{ "data": Insights }`
///
/// 매 요청마다 사용자의 전체 기록을 한 번 읽어 새로 계산합니다 (캐시 없음).
/// 기록 조회가 실패하면 부분 결과 없이 요청 전체가 실패합니다.
pub async fn meditation_insights(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Value>, AppError> {
    let sessions = db::list_meditations_for_user(&state.pool, &auth_user.user_id).await?;
    tracing::debug!(
        user_id = %auth_user.user_id,
        sessions = sessions.len(),
        "Computing meditation insights"
    );

    let report = insights::compose(&sessions, Utc::now());
    Ok(Json(json!({ "data": report })))
}

/// 명상 기록을 소프트 삭제합니다.
///
/// `DELETE /meditations/{id}` → 204 No Content
///
/// 다른 사용자의 기록이나 이미 삭제된 기록이면 404를 반환합니다.
pub async fn delete_meditation(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if !db::soft_delete_meditation(&state.pool, &auth_user.user_id, &id).await? {
        return Err(AppError::NotFound);
    }

    tracing::info!(user_id = %auth_user.user_id, meditation_id = %id, "Deleted meditation");
    Ok(StatusCode::NO_CONTENT)
}
