//! Staleness evaluation.
//!
//! A record is stale once the time since its last successful fetch exceeds a
//! threshold. A record that was never fetched is always stale. These functions
//! are pure; callers pick the threshold.

use chrono::{DateTime, Duration, Utc};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Convert fractional hours into a chrono duration, saturating on overflow.
#[allow(clippy::cast_possible_truncation)]
pub fn hours(value: f64) -> Duration {
    if value.is_nan() {
        return Duration::zero();
    }
    let millis = (value * MILLIS_PER_HOUR).clamp(i64::MIN as f64, i64::MAX as f64);
    Duration::try_milliseconds(millis as i64).unwrap_or_else(|| {
        if millis.is_sign_negative() {
            Duration::MIN
        } else {
            Duration::MAX
        }
    })
}

/// Staleness against the current wall clock.
pub fn is_stale(last_scraped: Option<DateTime<Utc>>, threshold_hours: f64) -> bool {
    is_stale_at(last_scraped, threshold_hours, Utc::now())
}

/// Staleness as of `now`.
pub fn is_stale_at(last_scraped: Option<DateTime<Utc>>, threshold_hours: f64, now: DateTime<Utc>) -> bool {
    match last_scraped {
        None => true,
        Some(ts) => now.signed_duration_since(ts) > hours(threshold_hours),
    }
}

/// Human-readable age of the last fetch, e.g. "3 hours ago".
pub fn describe_age(last_scraped: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(ts) = last_scraped else {
        return "never".to_string();
    };

    let age = now.signed_duration_since(ts);
    if age < Duration::minutes(1) {
        return "just now".to_string();
    }

    let (count, unit) = if age < Duration::hours(1) {
        (age.num_minutes(), "minute")
    } else if age < Duration::days(1) {
        (age.num_hours(), "hour")
    } else {
        (age.num_days(), "day")
    };

    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}
