//! # 명상 기록 데이터베이스 쿼리 모듈
//!
//! 명상 기록의 저장, 조회, 소프트 삭제를 담당하는 SQL 쿼리 함수들입니다.
//!
//! ## 기록 라이프사이클
//! ```text
//! [생성] insert_meditation() → 조회/집계 대상 → soft_delete_meditation() → [집계 제외]
//! ```
//!
//! 모든 조회 함수는 `deleted_at IS NULL` 조건으로 소프트 삭제된 기록을 걸러냅니다.
//! 사용자 ID는 항상 인자로 명시적으로 받습니다.

use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::{Meditation, NewMeditation};

/// 새 명상 기록을 저장합니다.
///
/// ID는 UUIDv7으로 생성하고, `created_at`/`updated_at`은 DB의 DEFAULT 값으로 채워집니다.
/// 같은 요청을 두 번 보내면 기록도 두 개 생깁니다 (멱등성 없음).
pub async fn insert_meditation(
    pool: &SqlitePool,
    user_id: &str,
    new: &NewMeditation,
) -> Result<Meditation, AppError> {
    let id = uuid::Uuid::now_v7().to_string();

    sqlx::query(
        r#"
        INSERT INTO meditations (id, user_id, duration, started_at, ended_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(user_id)
    .bind(new.duration)
    .bind(new.started_at)
    .bind(new.ended_at)
    .execute(pool)
    .await?;

    get_meditation(pool, user_id, &id)
        .await?
        .ok_or(AppError::Internal(
            "Failed to retrieve created meditation".to_string(),
        ))
}

/// 사용자의 기록 하나를 조회합니다. 다른 사용자의 기록이거나 삭제된 기록이면 None.
pub async fn get_meditation(
    pool: &SqlitePool,
    user_id: &str,
    id: &str,
) -> Result<Option<Meditation>, AppError> {
    let meditation = sqlx::query_as::<_, Meditation>(
        r#"
        SELECT id, user_id, duration, started_at, ended_at,
               deleted_at, created_at, updated_at
        FROM meditations
        WHERE id = ? AND user_id = ? AND deleted_at IS NULL
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(meditation)
}

/// 사용자의 모든 기록을 시작 시각 오름차순으로 조회합니다.
///
/// 인사이트 계산은 이 결과 전체를 메모리에 올려서 수행합니다.
pub async fn list_meditations_for_user(
    pool: &SqlitePool,
    user_id: &str,
) -> Result<Vec<Meditation>, AppError> {
    let meditations = sqlx::query_as::<_, Meditation>(
        r#"
        SELECT id, user_id, duration, started_at, ended_at,
               deleted_at, created_at, updated_at
        FROM meditations
        WHERE user_id = ? AND deleted_at IS NULL
        ORDER BY started_at ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(meditations)
}

/// 기록을 소프트 삭제합니다.
///
/// ## 반환값
/// - `Ok(true)`: 삭제됨
/// - `Ok(false)`: 해당 사용자의 (아직 삭제되지 않은) 기록이 없음 → 라우트에서 404 처리
pub async fn soft_delete_meditation(
    pool: &SqlitePool,
    user_id: &str,
    id: &str,
) -> Result<bool, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE meditations
        SET deleted_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now'),
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ? AND user_id = ? AND deleted_at IS NULL
        "#,
    )
    .bind(id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;
    use chrono::{TimeZone, Utc};

    fn new_meditation(start: i64, end: i64) -> NewMeditation {
        NewMeditation::new(
            Utc.timestamp_opt(start, 0).unwrap(),
            Utc.timestamp_opt(end, 0).unwrap(),
        )
    }

    #[tokio::test]
    async fn insert_persists_duration_and_timestamps() {
        let pool = test_support::pool().await;
        test_support::create_user(&pool, "alice").await;

        let created = insert_meditation(&pool, "alice", &new_meditation(1_700_000_000, 1_700_000_600))
            .await
            .unwrap();

        assert_eq!(created.user_id, "alice");
        assert_eq!(created.duration, 600);
        assert_eq!(created.started_at.timestamp(), 1_700_000_000);
        assert_eq!(created.ended_at.timestamp(), 1_700_000_600);
        assert!(created.deleted_at.is_none());
    }

    #[tokio::test]
    async fn insert_for_unknown_user_fails() {
        let pool = test_support::pool().await;

        let result = insert_meditation(&pool, "ghost", &new_meditation(0, 10)).await;
        assert!(matches!(result, Err(AppError::Database(_))));
    }

    #[tokio::test]
    async fn listing_is_per_user_and_ordered_by_start() {
        let pool = test_support::pool().await;
        test_support::create_user(&pool, "alice").await;
        test_support::create_user(&pool, "bob").await;

        for (start, end) in [(300, 400), (100, 200), (200, 250)] {
            insert_meditation(&pool, "alice", &new_meditation(start, end))
                .await
                .unwrap();
        }
        insert_meditation(&pool, "bob", &new_meditation(150, 160))
            .await
            .unwrap();

        let alice = list_meditations_for_user(&pool, "alice").await.unwrap();
        let starts: Vec<i64> = alice.iter().map(|m| m.started_at.timestamp()).collect();
        assert_eq!(starts, vec![100, 200, 300]);

        let bob = list_meditations_for_user(&pool, "bob").await.unwrap();
        assert_eq!(bob.len(), 1);
    }

    #[tokio::test]
    async fn soft_deleted_rows_disappear_from_queries() {
        let pool = test_support::pool().await;
        test_support::create_user(&pool, "alice").await;
        test_support::create_user(&pool, "bob").await;

        let kept = insert_meditation(&pool, "alice", &new_meditation(100, 200))
            .await
            .unwrap();
        let removed = insert_meditation(&pool, "alice", &new_meditation(300, 400))
            .await
            .unwrap();

        // 다른 사용자는 삭제할 수 없습니다.
        assert!(!soft_delete_meditation(&pool, "bob", &removed.id).await.unwrap());

        assert!(soft_delete_meditation(&pool, "alice", &removed.id).await.unwrap());
        // 이미 삭제된 기록을 다시 삭제하면 false
        assert!(!soft_delete_meditation(&pool, "alice", &removed.id).await.unwrap());

        let remaining = list_meditations_for_user(&pool, "alice").await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, kept.id);
        assert!(get_meditation(&pool, "alice", &removed.id)
            .await
            .unwrap()
            .is_none());
    }
}
