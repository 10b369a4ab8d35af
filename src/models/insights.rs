//! # 인사이트(통계) 모델 정의
//!
//! `GET /meditations/insights` 응답을 구성하는 구조체들입니다.
//! 계산 로직은 `services::insights`에 있고, 여기에는 데이터 모양만 둡니다.
//!
//! ## 응답 구조
//! ```text
//! {
//!   "breakdowns": {
//!     "year":  { "2024":    { total_duration, total_sessions, max_streak } },
//!     "month": { "2024-03": { total_duration, total_sessions, max_streak } }
//!   },
//!   "last_week": { "2024-03-18": { total_duration } },
//!   "month_performance": [1, 4, 18]
//! }
//! ```
//!
//! 맵은 모두 BTreeMap이라 키(날짜 문자열)가 오름차순으로 직렬화됩니다.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::error::AppError;

/// 집계 기간 단위
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    Month,
    Year,
}

impl Period {
    /// chrono 포맷 문자열: 월은 `YYYY-MM`, 연은 `YYYY`
    fn format_str(self) -> &'static str {
        match self {
            Period::Month => "%Y-%m",
            Period::Year => "%Y",
        }
    }

    /// UTC 시각이 속한 버킷의 라벨을 만듭니다. (예: 2024-03-05T10:00Z → "2024-03")
    pub fn bucket_key(self, at: DateTime<Utc>) -> String {
        self.date_key(at.date_naive())
    }

    /// 날짜가 속한 버킷의 라벨
    pub fn date_key(self, day: NaiveDate) -> String {
        day.format(self.format_str()).to_string()
    }
}

/// 문자열 → Period 변환
///
/// 집계 기간은 항상 코드 안에서 정해지므로, 알 수 없는 값은
/// 사용자 입력 오류가 아니라 호출 측 버그(`AppError::Logic`)로 취급합니다.
impl FromStr for Period {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            other => Err(AppError::Logic(format!("Unidentified period: {other}"))),
        }
    }
}

/// 버킷 하나의 합계 (Breakdown 집계기의 출력 한 행)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breakdown {
    /// `YYYY-MM` 또는 `YYYY`
    pub bucket_key: String,
    /// 버킷에 속한 기록들의 duration 합계(초)
    pub total_duration: i64,
    /// 버킷에 속한 기록 수
    pub total_sessions: i64,
}

/// 응답의 `breakdowns.year` / `breakdowns.month` 값
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketReport {
    pub total_duration: i64,
    pub total_sessions: i64,
    /// 이 버킷에서 시작한 가장 긴 연속 명상 일수. 없으면 0.
    pub max_streak: u32,
}

/// 하루치 합계 (`last_week` 값)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySummary {
    pub total_duration: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Breakdowns {
    pub year: BTreeMap<String, BucketReport>,
    pub month: BTreeMap<String, BucketReport>,
}

/// 인사이트 API의 전체 응답 본문 (`data` 필드 안에 들어갑니다)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Insights {
    pub breakdowns: Breakdowns,
    /// 최근 7일간 날짜(`YYYY-MM-DD`)별 합계
    pub last_week: BTreeMap<String, DaySummary>,
    /// 이번 달 중 명상한 날(1~31), 오름차순
    pub month_performance: Vec<u32>,
}
