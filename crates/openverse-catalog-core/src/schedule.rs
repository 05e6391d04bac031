//! DAG schedule parsing
//!
//! A schedule is either one of the named cron presets or a raw cron
//! expression. Parsing never fails: anything that is not a preset is kept
//! verbatim and classified when a cadence is needed.

use serde::{Deserialize, Serialize};

/// Schedule interval of a provider DAG
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Schedule {
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
    /// Raw cron expression or unrecognized text
    Cron(String),
}

/// How often a schedule fires, as far as partitioning is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    Hourly,
    Daily,
    Other,
}

impl Schedule {
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "@hourly" => Schedule::Hourly,
            "@daily" => Schedule::Daily,
            "@weekly" => Schedule::Weekly,
            "@monthly" => Schedule::Monthly,
            "@quarterly" => Schedule::Quarterly,
            "@yearly" | "@annually" => Schedule::Yearly,
            other => Schedule::Cron(other.to_string()),
        }
    }

    /// Preset name or the raw expression
    pub fn as_str(&self) -> &str {
        match self {
            Schedule::Hourly => "@hourly",
            Schedule::Daily => "@daily",
            Schedule::Weekly => "@weekly",
            Schedule::Monthly => "@monthly",
            Schedule::Quarterly => "@quarterly",
            Schedule::Yearly => "@yearly",
            Schedule::Cron(expr) => expr,
        }
    }

    pub fn cadence(&self) -> Cadence {
        match self {
            Schedule::Hourly => Cadence::Hourly,
            Schedule::Daily => Cadence::Daily,
            Schedule::Cron(expr) => cron_cadence(expr),
            _ => Cadence::Other,
        }
    }
}

/// Classify a five-field cron expression.
///
/// `M * * * *` fires once an hour and `M H * * *` once a day, for any fixed
/// minute `M` and hour `H`. Everything else, including step or list fields
/// such as `0 */5 * * *`, is `Other`.
fn cron_cadence(expr: &str) -> Cadence {
    let fields: Vec<&str> = expr.split_whitespace().collect();
    let [minute, hour, day_of_month, month, day_of_week] = fields.as_slice() else {
        return Cadence::Other;
    };

    if !is_fixed(minute, 59) || [day_of_month, month, day_of_week].iter().any(|f| **f != "*") {
        return Cadence::Other;
    }

    if *hour == "*" {
        Cadence::Hourly
    } else if is_fixed(hour, 23) {
        Cadence::Daily
    } else {
        Cadence::Other
    }
}

fn is_fixed(field: &str, max: u32) -> bool {
    !field.is_empty()
        && field.bytes().all(|b| b.is_ascii_digit())
        && field.parse::<u32>().map(|v| v <= max).unwrap_or(false)
}

impl From<&str> for Schedule {
    fn from(s: &str) -> Self {
        Schedule::parse(s)
    }
}

impl From<String> for Schedule {
    fn from(s: String) -> Self {
        Schedule::parse(&s)
    }
}

impl From<Schedule> for String {
    fn from(schedule: Schedule) -> Self {
        schedule.as_str().to_string()
    }
}

impl std::fmt::Display for Schedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
