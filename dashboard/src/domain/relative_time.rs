//! Human-readable relative timestamps for the activity feed.

use chrono::{DateTime, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

/// Describe how long ago `then` happened relative to `now`.
///
/// Each unit is the floored number of whole units elapsed. Months are 30
/// days and years 365 days. Timestamps in the future read as `Just now`.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, Utc};
/// use dashboard::domain::format_time_ago;
///
/// let now = Utc::now();
/// assert_eq!(format_time_ago(now - Duration::seconds(59), now), "Just now");
/// assert_eq!(format_time_ago(now - Duration::seconds(60), now), "1 minute ago");
/// assert_eq!(format_time_ago(now - Duration::hours(5), now), "5 hours ago");
/// ```
#[must_use]
pub fn format_time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then).num_seconds();
    if elapsed < MINUTE {
        return "Just now".to_owned();
    }

    let days = elapsed.div_euclid(DAY);
    let (count, unit) = if elapsed < HOUR {
        (elapsed.div_euclid(MINUTE), "minute")
    } else if elapsed < DAY {
        (elapsed.div_euclid(HOUR), "hour")
    } else if elapsed < WEEK {
        (days, "day")
    } else if elapsed < 4 * WEEK {
        (elapsed.div_euclid(WEEK), "week")
    } else if elapsed < 12 * MONTH {
        (elapsed.div_euclid(MONTH), "month")
    } else {
        (elapsed.div_euclid(YEAR), "year")
    };

    let suffix = if count == 1 { "" } else { "s" };
    format!("{count} {unit}{suffix} ago")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rstest::rstest;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 15, 12, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[rstest]
    #[case::zero(0, "Just now")]
    #[case::just_under_minute(59, "Just now")]
    #[case::one_minute(60, "1 minute ago")]
    #[case::two_minutes(120, "2 minutes ago")]
    #[case::just_under_hour(3_599, "59 minutes ago")]
    #[case::one_hour(3_600, "1 hour ago")]
    #[case::one_day(86_400, "1 day ago")]
    #[case::six_days(6 * 86_400, "6 days ago")]
    #[case::one_week(7 * 86_400, "1 week ago")]
    #[case::three_weeks(27 * 86_400, "3 weeks ago")]
    #[case::twenty_eight_days(28 * 86_400, "0 months ago")]
    #[case::one_month(30 * 86_400, "1 month ago")]
    #[case::eleven_months(359 * 86_400, "11 months ago")]
    #[case::twelve_months(360 * 86_400, "0 years ago")]
    #[case::one_year(365 * 86_400, "1 year ago")]
    #[case::three_years(3 * 365 * 86_400, "3 years ago")]
    fn formats_elapsed_seconds(#[case] seconds: i64, #[case] expected: &str) {
        let then = now() - Duration::seconds(seconds);
        assert_eq!(format_time_ago(then, now()), expected);
    }

    #[rstest]
    fn future_timestamps_read_as_just_now() {
        let then = now() + Duration::hours(2);
        assert_eq!(format_time_ago(then, now()), "Just now");
    }
}
