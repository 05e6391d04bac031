use chrono::{DateTime, Utc};
use openverse_catalog_core::{date_partition_for_prefix, Schedule};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The DAG run a task belongs to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DagRun {
    pub dag_id: String,
    pub logical_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Schedule>,
    /// Run configuration handed to the ingester
    #[serde(default)]
    pub conf: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reingestion_date: Option<String>,
}

impl DagRun {
    pub fn new(dag_id: impl Into<String>, logical_date: DateTime<Utc>) -> Self {
        Self {
            dag_id: dag_id.into(),
            logical_date,
            schedule: None,
            conf: Map::new(),
            reingestion_date: None,
        }
    }

    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = Some(schedule);
        self
    }

    pub fn with_conf(mut self, conf: Map<String, Value>) -> Self {
        self.conf = conf;
        self
    }

    pub fn with_reingestion_date(mut self, date: impl Into<String>) -> Self {
        self.reingestion_date = Some(date.into());
        self
    }

    /// Partition prefix for files produced by this run
    pub fn partition_prefix(&self) -> String {
        date_partition_for_prefix(
            self.schedule.as_ref(),
            self.logical_date,
            self.reingestion_date.as_deref(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_partition_prefix_uses_schedule_and_reingestion() {
        let date = Utc.with_ymd_and_hms(2022, 2, 3, 12, 0, 0).unwrap();
        let run = DagRun::new("flickr_workflow", date);
        assert_eq!(run.partition_prefix(), "year=2022");

        let run = run
            .with_schedule(Schedule::Daily)
            .with_reingestion_date("2021-12-31");
        assert_eq!(run.partition_prefix(), "year=2022/month=02/reingestion=2021-12-31");
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let run: DagRun = serde_json::from_str(
            r#"{"dag_id": "jamendo_workflow", "logical_date": "2022-02-03T00:00:00Z", "schedule": "0 * * * *"}"#,
        )
        .unwrap();
        assert_eq!(run.schedule, Some(Schedule::Cron("0 * * * *".to_string())));
        assert!(run.conf.is_empty());
        assert_eq!(run.partition_prefix(), "year=2022/month=02/day=03");
    }
}
