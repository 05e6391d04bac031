//! Partition prefix generation for date-based storage layout
//!
//! Generates Hive-style prefixes whose depth follows the DAG cadence:
//! - hourly: `year={year}/month={month}/day={day}`
//! - daily: `year={year}/month={month}`
//! - anything else: `year={year}`
//!
//! Reingestion runs get an extra `/reingestion={date}` component.

use chrono::{DateTime, Datelike, Utc};

use crate::schedule::{Cadence, Schedule};

/// Build the partition prefix for a run
///
/// # Arguments
/// * `schedule` - DAG schedule; `None` and unrecognized text give year-only partitions
/// * `logical_date` - Logical date of the DAG run
/// * `reingestion_date` - Date being reingested, appended verbatim when present
pub fn date_partition_for_prefix(
    schedule: Option<&Schedule>,
    logical_date: DateTime<Utc>,
    reingestion_date: Option<&str>,
) -> String {
    let cadence = schedule.map(Schedule::cadence).unwrap_or(Cadence::Other);

    let mut prefix = match cadence {
        Cadence::Hourly => format!(
            "year={}/month={:02}/day={:02}",
            logical_date.year(),
            logical_date.month(),
            logical_date.day()
        ),
        Cadence::Daily => format!(
            "year={}/month={:02}",
            logical_date.year(),
            logical_date.month()
        ),
        Cadence::Other => format!("year={}", logical_date.year()),
    };

    if let Some(date) = reingestion_date {
        prefix.push_str("/reingestion=");
        prefix.push_str(date);
    }

    tracing::debug!(
        schedule = schedule.map(Schedule::as_str).unwrap_or("none"),
        prefix = %prefix,
        "Computed partition prefix"
    );

    prefix
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn logical_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2022, 2, 3, 0, 0, 0).unwrap()
    }

    const SCHEDULE_CASES: &[(Option<&str>, &str)] = &[
        (Some("@hourly"), "year=2022/month=02/day=03"),
        (Some("0 * * * *"), "year=2022/month=02/day=03"),
        (Some("@daily"), "year=2022/month=02"),
        (Some("0 0 * * *"), "year=2022/month=02"),
        (Some("@weekly"), "year=2022"),
        (Some("@monthly"), "year=2022"),
        (Some("@quarterly"), "year=2022"),
        (Some("@yearly"), "year=2022"),
        (Some("0 */5 * * *"), "year=2022"),
        (Some("🪄"), "year=2022"),
        (None, "year=2022"),
    ];

    const REINGESTION_CASES: &[(Option<&str>, &str)] = &[
        (None, ""),
        (Some("2022-01-01"), "/reingestion=2022-01-01"),
    ];

    #[test]
    fn test_date_partition_for_prefix() {
        for (schedule, expected_schedule_prefix) in SCHEDULE_CASES {
            let schedule = schedule.map(Schedule::parse);
            for (reingestion_date, expected_reingestion_prefix) in REINGESTION_CASES {
                let actual =
                    date_partition_for_prefix(schedule.as_ref(), logical_date(), *reingestion_date);
                assert_eq!(
                    actual,
                    format!("{expected_schedule_prefix}{expected_reingestion_prefix}"),
                    "schedule={schedule:?} reingestion_date={reingestion_date:?}"
                );
            }
        }
    }

    #[test]
    fn test_zero_pads_month_and_day() {
        let date = Utc.with_ymd_and_hms(2021, 11, 7, 13, 45, 0).unwrap();
        let prefix = date_partition_for_prefix(Some(&Schedule::Hourly), date, None);
        assert_eq!(prefix, "year=2021/month=11/day=07");
    }

    #[test]
    fn test_reingestion_date_is_verbatim() {
        let prefix = date_partition_for_prefix(None, logical_date(), Some("not a date"));
        assert_eq!(prefix, "year=2022/reingestion=not a date");
    }
}
