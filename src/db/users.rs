use crate::error::AppError;
use crate::models::User;
use sqlx::SqlitePool;

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, created_at, updated_at
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    #[tokio::test]
    async fn find_by_id_returns_existing_user_only() {
        let pool = test_support::pool().await;
        test_support::create_user(&pool, "alice").await;

        let user = find_by_id(&pool, "alice").await.unwrap().unwrap();
        assert_eq!(user.name, "alice");
        assert_eq!(user.email.as_deref(), Some("alice@example.com"));

        assert!(find_by_id(&pool, "nobody").await.unwrap().is_none());
    }
}
