//! Rule-based next-sleep prediction used when the language model is unavailable.
//!
//! The table only looks at the wall-clock hour; sleep history is ignored.

use chrono::{DateTime, Duration, TimeZone, Timelike, Utc};
use std::ops::Range;

use super::{PredictionOutcome, PredictionSource};

pub const FALLBACK_CONFIDENCE: f64 = 0.7;

/// Minimum lead time when no rule yields a target in the future
const CLAMP_MINUTES: i64 = 30;

/// What to do when a rule's target time has already passed today
#[derive(Debug, Clone, Copy, PartialEq)]
enum Retarget {
    TimeOfDay { hour: u32, minute: u32 },
    MinutesFromNow(i64),
    Keep,
}

#[derive(Debug, Clone)]
struct FallbackRule {
    hours: Range<u32>,
    hour: u32,
    minute: u32,
    duration_minutes: i64,
    if_passed: Retarget,
}

/// Evaluated in order against the current hour. The ranges cover 0..24.
static FALLBACK_RULES: [FallbackRule; 4] = [
    FallbackRule {
        hours: 0..9,
        hour: 9,
        minute: 30,
        duration_minutes: 90,
        if_passed: Retarget::TimeOfDay { hour: 13, minute: 0 },
    },
    FallbackRule {
        hours: 9..13,
        hour: 13,
        minute: 0,
        duration_minutes: 90,
        if_passed: Retarget::Keep,
    },
    FallbackRule {
        hours: 13..18,
        hour: 16,
        minute: 0,
        duration_minutes: 60,
        if_passed: Retarget::TimeOfDay { hour: 19, minute: 30 },
    },
    FallbackRule {
        hours: 18..24,
        hour: 19,
        minute: 30,
        duration_minutes: 600,
        if_passed: Retarget::MinutesFromNow(CLAMP_MINUTES),
    },
];

/// Predict the next sleep from the time of day alone.
///
/// `now` is interpreted in its own time zone, so "09:30 today" means 09:30
/// on the wall clock the caller passes in.
pub fn fallback_prediction<Tz: TimeZone>(now: &DateTime<Tz>) -> PredictionOutcome {
    let hour = now.hour();
    let rule = FALLBACK_RULES
        .iter()
        .find(|rule| rule.hours.contains(&hour))
        .unwrap_or(&FALLBACK_RULES[FALLBACK_RULES.len() - 1]);

    let mut target = today_at(now, rule.hour, rule.minute);

    if target.as_ref().map_or(true, |t| t <= now) {
        target = match rule.if_passed {
            Retarget::TimeOfDay { hour, minute } => today_at(now, hour, minute),
            Retarget::MinutesFromNow(minutes) => Some(now.clone() + Duration::minutes(minutes)),
            Retarget::Keep => target,
        };
    }

    let next_sleep_time = target
        .filter(|t| t > now)
        .unwrap_or_else(|| now.clone() + Duration::minutes(CLAMP_MINUTES));

    PredictionOutcome {
        next_sleep_time: next_sleep_time.with_timezone(&Utc),
        predicted_duration_minutes: rule.duration_minutes,
        confidence: FALLBACK_CONFIDENCE,
        source: PredictionSource::RuleTable,
    }
}

/// `hour:minute` on the same calendar day as `now`, if that local time exists
fn today_at<Tz: TimeZone>(now: &DateTime<Tz>, hour: u32, minute: u32) -> Option<DateTime<Tz>> {
    let naive = now.date_naive().and_hms_opt(hour, minute, 0)?;
    now.timezone().from_local_datetime(&naive).earliest()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, hour, minute, 0).unwrap()
    }

    #[test]
    fn test_morning_targets_half_past_nine() {
        let outcome = fallback_prediction(&at(7, 15));
        assert_eq!(outcome.next_sleep_time, at(9, 30));
        assert_eq!(outcome.predicted_duration_minutes, 90);
        assert_eq!(outcome.confidence, 0.7);
        assert_eq!(outcome.source, PredictionSource::RuleTable);
    }

    #[test]
    fn test_ten_am_targets_one_pm() {
        let outcome = fallback_prediction(&at(10, 0));
        assert_eq!(outcome.next_sleep_time, at(13, 0));
        assert_eq!(outcome.predicted_duration_minutes, 90);
        assert_eq!(outcome.confidence, 0.7);
    }

    #[test]
    fn test_early_afternoon_targets_four_pm() {
        let outcome = fallback_prediction(&at(14, 0));
        assert_eq!(outcome.next_sleep_time, at(16, 0));
        assert_eq!(outcome.predicted_duration_minutes, 60);
    }

    #[test]
    fn test_late_afternoon_retargets_to_evening() {
        let outcome = fallback_prediction(&at(16, 30));
        assert_eq!(outcome.next_sleep_time, at(19, 30));
        assert_eq!(outcome.predicted_duration_minutes, 60);
    }

    #[test]
    fn test_evening_before_bedtime_targets_half_past_seven() {
        let outcome = fallback_prediction(&at(19, 10));
        assert_eq!(outcome.next_sleep_time, at(19, 30));
        assert_eq!(outcome.predicted_duration_minutes, 600);
        assert_eq!(outcome.confidence, 0.7);
    }

    #[test]
    fn test_eight_pm_is_past_bedtime() {
        let now = at(20, 0);
        let outcome = fallback_prediction(&now);
        assert_eq!(outcome.next_sleep_time, now + Duration::minutes(30));
        assert_eq!(outcome.predicted_duration_minutes, 600);
        assert_eq!(outcome.confidence, 0.7);
    }

    #[test]
    fn test_exactly_at_bedtime_counts_as_past() {
        let now = at(19, 30);
        let outcome = fallback_prediction(&now);
        assert_eq!(outcome.next_sleep_time, now + Duration::minutes(30));
    }

    #[test]
    fn test_late_night_crosses_midnight() {
        let now = at(23, 50);
        let outcome = fallback_prediction(&now);
        assert_eq!(
            outcome.next_sleep_time,
            Utc.with_ymd_and_hms(2024, 3, 2, 0, 20, 0).unwrap()
        );
    }

    #[test]
    fn test_uses_wall_clock_of_given_time_zone() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = offset.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();

        let outcome = fallback_prediction(&now);
        assert_eq!(outcome.next_sleep_time, at(11, 0));
    }

    #[test]
    fn test_every_minute_of_the_day_targets_the_future() {
        for minute_of_day in 0..(24 * 60) {
            let now = at(minute_of_day / 60, minute_of_day % 60);
            let outcome = fallback_prediction(&now);

            assert!(outcome.next_sleep_time > now, "target not in future at {}", now);
            assert!(outcome.next_sleep_time <= now + Duration::hours(10));
            assert_eq!(outcome.confidence, FALLBACK_CONFIDENCE);
        }
    }
}
