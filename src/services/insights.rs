//! # 명상 인사이트 계산 서비스
//!
//! 사용자의 명상 기록 목록으로부터 통계 보고서를 계산합니다.
//! 모든 함수는 DB에 접근하지 않는 순수 함수이며, "현재 시각"도 `now` 인자로 받습니다.
//! 덕분에 고정된 시각으로 테스트할 수 있습니다.
//!
//! 이 모듈의 함수들:
//! - `breakdown()`: 월/연 버킷별 duration 합계와 기록 수
//! - `max_streaks()`: 버킷별 최장 연속 명상 일수
//! - `last_week()`: 최근 7일간 날짜별 duration 합계
//! - `month_performance()`: 이번 달 중 명상한 날 목록
//! - `compose()`: 위 네 보고서를 하나의 `Insights`로 합침
//!
//! 입력으로 받는 기록은 이미 소프트 삭제가 걸러진 상태여야 합니다.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

use crate::models::{Breakdown, BucketReport, DaySummary, Insights, Meditation, Period};

/// 기록을 시작 시각의 버킷 라벨로 묶어 duration 합계와 개수를 구합니다.
///
/// 기록이 하나도 없는 버킷은 결과에 나타나지 않습니다.
/// 결과는 버킷 라벨 오름차순입니다.
pub fn breakdown(sessions: &[Meditation], period: Period) -> Vec<Breakdown> {
    let mut buckets: BTreeMap<String, (i64, i64)> = BTreeMap::new();

    for session in sessions {
        let entry = buckets
            .entry(period.bucket_key(session.started_at))
            .or_insert((0, 0));
        entry.0 += session.duration;
        entry.1 += 1;
    }

    buckets
        .into_iter()
        .map(|(bucket_key, (total_duration, total_sessions))| Breakdown {
            bucket_key,
            total_duration,
            total_sessions,
        })
        .collect()
}

/// 버킷별 최장 연속 명상 일수를 계산합니다.
///
/// 연속(streak)은 "하루 이상 명상한 날"이 끊기지 않고 이어진 일수입니다.
/// 같은 날 여러 번 명상해도 하루로 셉니다.
/// 각 연속 구간은 **첫날**이 속한 버킷에 귀속되며, 버킷마다 가장 긴 구간 길이만 남깁니다.
///
/// ## 알고리즘
/// 1. 기록의 시작 날짜(UTC)를 BTreeSet에 넣어 중복 제거 + 정렬
/// 2. 날짜를 한 번 훑으면서 (구간 시작 버킷, 구간 길이)를 유지
/// 3. 전날과 이어지면 길이 +1, 아니면 새 구간 시작
/// 4. 매 단계마다 해당 버킷의 최댓값을 갱신
pub fn max_streaks(sessions: &[Meditation], period: Period) -> BTreeMap<String, u32> {
    let days: BTreeSet<NaiveDate> = sessions
        .iter()
        .map(|session| session.started_at.date_naive())
        .collect();

    let mut best: BTreeMap<String, u32> = BTreeMap::new();
    // (직전 날짜, 현재 구간의 버킷, 현재 구간 길이)
    let mut run: Option<(NaiveDate, String, u32)> = None;

    for day in days {
        let (bucket, length) = match run.take() {
            Some((prev, bucket, length)) if prev.succ_opt() == Some(day) => (bucket, length + 1),
            _ => (period.date_key(day), 1),
        };

        let entry = best.entry(bucket.clone()).or_insert(0);
        *entry = (*entry).max(length);

        run = Some((day, bucket, length));
    }

    best
}

/// 최근 7일간(`now - 7일` ~ `now`, 양 끝 포함) 날짜별 duration 합계를 구합니다.
///
/// 기록이 없는 날은 결과에 나타나지 않습니다 (0으로 채우지 않음).
pub fn last_week(sessions: &[Meditation], now: DateTime<Utc>) -> BTreeMap<String, DaySummary> {
    let since = now - Duration::days(7);
    let mut days: BTreeMap<String, DaySummary> = BTreeMap::new();

    for session in sessions
        .iter()
        .filter(|s| s.started_at >= since && s.started_at <= now)
    {
        days.entry(session.started_at.format("%Y-%m-%d").to_string())
            .or_insert(DaySummary { total_duration: 0 })
            .total_duration += session.duration;
    }

    days
}

/// 이번 달(UTC 기준)에 명상한 날짜(1~31)를 중복 없이 오름차순으로 반환합니다.
pub fn month_performance(sessions: &[Meditation], now: DateTime<Utc>) -> Vec<u32> {
    sessions
        .iter()
        .filter(|s| s.started_at.year() == now.year() && s.started_at.month() == now.month())
        .map(|s| s.started_at.day())
        .collect::<BTreeSet<u32>>()
        .into_iter()
        .collect()
}

/// 네 가지 보고서를 하나의 인사이트 응답으로 합칩니다.
///
/// 버킷 목록은 `breakdown()` 결과를 기준으로 하며,
/// 해당 버킷에 연속 기록이 없으면 `max_streak`은 0입니다.
pub fn compose(sessions: &[Meditation], now: DateTime<Utc>) -> Insights {
    let mut insights = Insights::default();
    insights.breakdowns.year = bucket_reports(sessions, Period::Year);
    insights.breakdowns.month = bucket_reports(sessions, Period::Month);
    insights.last_week = last_week(sessions, now);
    insights.month_performance = month_performance(sessions, now);
    insights
}

fn bucket_reports(sessions: &[Meditation], period: Period) -> BTreeMap<String, BucketReport> {
    let streaks = max_streaks(sessions, period);

    breakdown(sessions, period)
        .into_iter()
        .map(|b| {
            let max_streak = streaks.get(&b.bucket_key).copied().unwrap_or(0);
            let report = BucketReport {
                total_duration: b.total_duration,
                total_sessions: b.total_sessions,
                max_streak,
            };
            (b.bucket_key, report)
        })
        .collect()
}
