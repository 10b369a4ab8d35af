//! # 명상 기록 모델 정의
//!
//! 사용자가 끝마친 명상 한 번을 나타내는 데이터 구조체들을 정의합니다.
//!
//! ## 기록 흐름
//! 1. 클라이언트가 `CreateMeditationRequest`(시작/종료 epoch 초)를 보냄
//! 2. `validate()`가 입력을 검사하고 `NewMeditation`으로 변환
//! 3. DB 계층이 `NewMeditation`을 저장하여 `Meditation` 한 행이 생성됨
//!
//! 저장된 기록은 이후 수정되지 않습니다 (소프트 삭제만 가능).

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{AppError, FieldErrors};

/// 명상 기록 엔티티 — DB의 `meditations` 테이블 한 행에 대응합니다.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Meditation {
    /// 기록 고유 식별자 (UUIDv7)
    pub id: String,
    /// 이 기록을 소유한 사용자 ID (외래키)
    pub user_id: String,
    /// 명상 시간(초). 생성 시점의 (ended_at - started_at) 값입니다.
    pub duration: i64,
    /// 명상 시작 시각 (UTC)
    pub started_at: DateTime<Utc>,
    /// 명상 종료 시각 (UTC)
    pub ended_at: DateTime<Utc>,
    /// 소프트 삭제 시각 — Some이면 모든 집계에서 제외됩니다.
    pub deleted_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// 명상 기록 요청 — `POST /meditations`의 요청 본문에 해당합니다.
///
/// 두 필드 모두 `Value`로 받습니다. 숫자가 아닌 값이나 누락된 값을
/// serde 단계에서 거부하지 않고, `validate()`에서 필드별 메시지로 돌려주기 위함입니다.
///
/// `Deserialize`를 derive하지 않습니다. derive된 구현은 `[1, 2]` 같은
/// 위치 기반 배열도 받아들이기 때문에, 항상 JSON 객체에서만 만들어집니다.
#[derive(Debug, Default)]
pub struct CreateMeditationRequest {
    /// 시작 시각 (epoch 초, 소수점 허용)
    pub started_at: Option<Value>,
    /// 종료 시각 (epoch 초, started_at 이상이어야 함)
    pub ended_at: Option<Value>,
}

impl From<Map<String, Value>> for CreateMeditationRequest {
    /// 요청 본문 객체에서 필드를 꺼냅니다. `null`은 누락과 같게 취급합니다.
    fn from(mut body: Map<String, Value>) -> Self {
        let mut take = |field: &str| body.remove(field).filter(|value| !value.is_null());
        Self {
            started_at: take("started_at"),
            ended_at: take("ended_at"),
        }
    }
}

impl CreateMeditationRequest {
    /// 임의의 JSON 본문에서 요청을 만듭니다.
    ///
    /// 객체가 아닌 본문(배열, 숫자 등)은 필드가 하나도 없는 요청이 되어
    /// `validate()`에서 모든 필드가 "required"로 거부됩니다.
    pub fn from_body(body: Value) -> Self {
        match body {
            Value::Object(fields) => fields.into(),
            _ => Self::default(),
        }
    }
}

/// 검증을 통과한 명상 기록 — 저장 직전의 값입니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMeditation {
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    /// 초 단위 길이. 소수점 이하는 버립니다.
    pub duration: i64,
}

impl NewMeditation {
    pub fn new(started_at: DateTime<Utc>, ended_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            ended_at,
            duration: (ended_at - started_at).num_seconds(),
        }
    }
}

impl CreateMeditationRequest {
    /// 요청 본문을 검증하고 `NewMeditation`으로 변환합니다.
    ///
    /// 한 필드에서 문제가 생겨도 나머지 필드까지 모두 검사한 뒤
    /// 발견한 에러를 한꺼번에 `AppError::Validation`으로 반환합니다.
    ///
    /// # 검증 규칙
    /// - `started_at`, `ended_at`: 필수, 숫자(또는 숫자 문자열)
    /// - `ended_at >= started_at`
    pub fn validate(&self) -> Result<NewMeditation, AppError> {
        let mut errors = FieldErrors::new();

        let started_at = read_timestamp("started_at", self.started_at.as_ref(), &mut errors);
        let ended_at = read_timestamp("ended_at", self.ended_at.as_ref(), &mut errors);

        if let (Some(start), Some(end)) = (started_at, ended_at) {
            if end < start {
                errors.entry("ended_at".to_string()).or_default().push(
                    "The ended_at must be greater than or equal to started_at.".to_string(),
                );
            }
        }

        match (started_at, ended_at) {
            (Some(start), Some(end)) if errors.is_empty() => Ok(NewMeditation::new(start, end)),
            _ => Err(AppError::Validation(errors)),
        }
    }
}

/// 필드 하나를 읽어 UTC 시각으로 변환합니다. 실패하면 `errors`에 메시지를 추가하고 None을 반환합니다.
fn read_timestamp(
    field: &str,
    value: Option<&Value>,
    errors: &mut FieldErrors,
) -> Option<DateTime<Utc>> {
    let message = match value.map(as_number) {
        None => format!("The {field} field is required."),
        Some(None) => format!("The {field} must be a number."),
        Some(Some(seconds)) => match from_epoch_seconds(seconds) {
            Some(timestamp) => return Some(timestamp),
            None => format!("The {field} must be a valid timestamp."),
        },
    };

    errors.entry(field.to_string()).or_default().push(message);
    None
}

/// JSON 숫자 또는 숫자 문자열("1700000000")을 f64로 읽습니다.
fn as_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    // "NaN", "inf" 같은 문자열도 f64로 파싱되므로 유한한 값만 통과시킵니다.
    number.filter(|n| n.is_finite())
}

/// epoch 초(소수점 포함)를 UTC 시각으로 변환합니다.
///
/// 연도가 0000..=9999 밖이면 None. 버킷 키(`YYYY-MM`)와 RFC 3339 텍스트 정렬이
/// 네 자리 연도를 전제로 합니다.
fn from_epoch_seconds(seconds: f64) -> Option<DateTime<Utc>> {
    let whole = seconds.floor();
    let mut secs = whole as i64;
    let mut nanos = ((seconds - whole) * 1_000_000_000.0).round() as u32;
    if nanos >= 1_000_000_000 {
        secs = secs.checked_add(1)?;
        nanos = 0;
    }
    DateTime::from_timestamp(secs, nanos)
        .filter(|timestamp| (0..=9999).contains(&timestamp.year()))
}
