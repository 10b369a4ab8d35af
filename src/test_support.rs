//! 테스트 공용 도우미: 인메모리 DB, 사용자 생성, 토큰 발급

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

use crate::middleware::auth::Claims;
use crate::routes::AppState;

pub const JWT_SECRET: &str = "test-secret";

/// 마이그레이션이 적용된 인메모리 SQLite 풀
///
/// 인메모리 DB는 연결마다 따로 생기므로 연결을 하나로 고정하고 끊기지 않게 합니다.
pub async fn pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("connect in-memory sqlite");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("run migrations");

    pool
}

pub async fn create_user(pool: &SqlitePool, id: &str) {
    sqlx::query("INSERT INTO users (id, name, email) VALUES (?, ?, ?)")
        .bind(id)
        .bind(id)
        .bind(format!("{id}@example.com"))
        .execute(pool)
        .await
        .expect("insert user");
}

pub fn state(pool: SqlitePool) -> AppState {
    AppState {
        pool,
        jwt_secret: JWT_SECRET.to_string(),
    }
}

/// 외부 인증 서비스가 발급했을 토큰을 흉내 냅니다.
pub fn token_for(user_id: &str, valid_for: Duration) -> String {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: (now + valid_for).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .expect("encode token")
}
