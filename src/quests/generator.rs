//! Deterministic, time-keyed quest generation.
//!
//! Generation is idempotent within a time bucket: calling it twice on
//! the same local day (or week) with the same counters yields quests
//! with identical ids and freshly evaluated progress. There is no
//! stored "last reset" state to clean up.

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, TimeZone, Utc};

use crate::quests::types::{Quest, QuestDifficulty, QuestType};
use crate::stats::QuestCounters;

/// Scan-count milestone track.
const SCAN_MILESTONES: [u32; 7] = [10, 25, 50, 100, 250, 500, 1000];

/// Weight milestone track, in grams.
const WEIGHT_MILESTONES: [u32; 5] = [500, 1000, 2500, 5000, 10000];

/// Generate the full quest list for the current moment.
///
/// Daily quests key off the local calendar date, weekly quests off a
/// year-month-week bucket, and only the next unmet milestone in each
/// track is surfaced.
pub fn generate_quests(counters: &QuestCounters, now: DateTime<Utc>) -> Vec<Quest> {
    let today = now.with_timezone(&Local).date_naive();

    let mut quests = daily_quests(counters, today);
    quests.extend(weekly_quests(counters, today));
    quests.extend(milestone_quests(counters));
    quests
}

fn daily_quests(counters: &QuestCounters, today: NaiveDate) -> Vec<Quest> {
    let bucket = today.format("%Y-%m-%d");
    let expires = next_local_midnight(today);

    vec![
        Quest::with_progress(
            format!("daily-scanner-{bucket}"),
            QuestType::Daily,
            "Daily Scanner",
            "Scan 3 waste items today",
            3.0,
            counters.scans_today as f64,
            25,
            expires,
        ),
        Quest::with_progress(
            format!("daily-recycling-{bucket}"),
            QuestType::Daily,
            "Recycling Hero",
            "Scan 2 recyclable items today",
            2.0,
            counters.recyclable_today as f64,
            35,
            expires,
        ),
        Quest::with_progress(
            format!("daily-weight-{bucket}"),
            QuestType::Daily,
            "Weight Tracker",
            "Scan 100g of waste today",
            100.0,
            counters.grams_today,
            20,
            expires,
        ),
    ]
}

fn weekly_quests(counters: &QuestCounters, today: NaiveDate) -> Vec<Quest> {
    let bucket = week_bucket(today);
    let expires = next_week_boundary(today);

    vec![
        Quest::with_progress(
            format!("weekly-streak-{bucket}"),
            QuestType::Weekly,
            "Streak Master",
            "Keep a 7-day scanning streak",
            7.0,
            counters.streak_days as f64,
            100,
            expires,
        ),
        Quest::with_progress(
            format!("weekly-variety-{bucket}"),
            QuestType::Weekly,
            "Waste Variety",
            "Scan 5 different waste types this week",
            5.0,
            counters.distinct_types_week as f64,
            75,
            expires,
        ),
        Quest::with_progress(
            format!("weekly-champion-{bucket}"),
            QuestType::Weekly,
            "Environmental Champion",
            "Hold an average environment score of 7 this week",
            7.0,
            counters.avg_environment_score_week,
            120,
            expires,
        ),
    ]
}

/// Surface the next unmet milestone in each track, if any remains.
fn milestone_quests(counters: &QuestCounters) -> Vec<Quest> {
    let mut quests = Vec::with_capacity(2);

    if let Some(milestone) = SCAN_MILESTONES
        .iter()
        .copied()
        .find(|m| counters.lifetime_scans < *m)
    {
        let mut quest = Quest::with_progress(
            format!("milestone-scans-{milestone}"),
            QuestType::Milestone,
            &format!("{milestone} Scans"),
            &format!("Scan {milestone} items in total"),
            milestone as f64,
            counters.lifetime_scans as f64,
            milestone * 2,
            None,
        );
        quest.difficulty = Some(scan_difficulty(milestone));
        quests.push(quest);
    }

    if let Some(milestone) = WEIGHT_MILESTONES
        .iter()
        .copied()
        .find(|m| counters.lifetime_grams < *m as f64)
    {
        let mut quest = Quest::with_progress(
            format!("milestone-weight-{milestone}"),
            QuestType::Milestone,
            &format!("{milestone}g Tracked"),
            &format!("Scan {milestone} grams of waste in total"),
            milestone as f64,
            counters.lifetime_grams,
            milestone / 10,
            None,
        );
        quest.difficulty = Some(weight_difficulty(milestone));
        quests.push(quest);
    }

    quests
}

fn scan_difficulty(milestone: u32) -> QuestDifficulty {
    match milestone {
        0..=50 => QuestDifficulty::Easy,
        51..=250 => QuestDifficulty::Medium,
        _ => QuestDifficulty::Hard,
    }
}

fn weight_difficulty(milestone_grams: u32) -> QuestDifficulty {
    match milestone_grams {
        0..=1000 => QuestDifficulty::Easy,
        1001..=5000 => QuestDifficulty::Medium,
        _ => QuestDifficulty::Hard,
    }
}

/// Bucket label `YYYY-MM-wN` where N is the 1-based week of the month.
fn week_bucket(date: NaiveDate) -> String {
    let week = (date.day0() / 7) + 1;
    format!("{:04}-{:02}-w{}", date.year(), date.month(), week)
}

/// Start of the next local calendar day, as a UTC instant.
fn next_local_midnight(today: NaiveDate) -> Option<DateTime<Utc>> {
    let next_day = today.succ_opt()?;
    local_midnight(next_day)
}

/// Start of the next week bucket: the next day-8/15/22/29 boundary, or
/// the first of the following month when the bucket runs out the month.
fn next_week_boundary(today: NaiveDate) -> Option<DateTime<Utc>> {
    let bucket_start_day = (today.day0() / 7) * 7 + 1;
    let boundary = NaiveDate::from_ymd_opt(today.year(), today.month(), bucket_start_day + 7)
        .unwrap_or_else(|| first_of_next_month(today));
    local_midnight(boundary)
}

fn first_of_next_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    // day 1 always exists
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date)
}

/// Local midnight of a date as a UTC instant; `None` only if the local
/// timezone has no representable midnight (DST gap).
fn local_midnight(date: NaiveDate) -> Option<DateTime<Utc>> {
    let naive = date.and_hms_opt(0, 0, 0)?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}
