//! Raw build-log record.
//!
//! One record per build or test run, as emitted by the CI build-data
//! export. Only the fields the analysis needs are modeled; everything
//! else in the record is ignored on deserialization.

use serde::{Deserialize, Serialize};

use super::{seconds, JobRequest, Seconds};

/// A completed build/test run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildRecord {
    /// When the job was submitted (s).
    #[serde(rename = "requesttime", deserialize_with = "seconds::deserialize")]
    pub request_time: Seconds,
    /// When a worker started the job (s).
    #[serde(rename = "starttime", deserialize_with = "seconds::deserialize")]
    pub start_time: Seconds,
    /// When the job finished (s).
    #[serde(rename = "endtime", deserialize_with = "seconds::deserialize")]
    pub end_time: Seconds,
    /// Free-form build properties.
    #[serde(default)]
    pub properties: BuildProperties,
}

/// The subset of build properties the analysis reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildProperties {
    /// Name of the worker that ran the job.
    #[serde(rename = "slavename", default, skip_serializing_if = "Option::is_none")]
    pub worker: Option<String>,
}

impl BuildRecord {
    /// Creates a record with no worker attached.
    pub fn new(request_time: Seconds, start_time: Seconds, end_time: Seconds) -> Self {
        Self {
            request_time,
            start_time,
            end_time,
            properties: BuildProperties::default(),
        }
    }

    /// Sets the worker name.
    pub fn with_worker(mut self, worker: impl Into<String>) -> Self {
        self.properties.worker = Some(worker.into());
        self
    }

    /// Worker name, if the record carries one.
    pub fn worker(&self) -> Option<&str> {
        self.properties.worker.as_deref()
    }

    /// Job runtime: `end - start`.
    pub fn duration(&self) -> Seconds {
        self.end_time - self.start_time
    }

    /// Wait the job actually experienced: `start - request`.
    pub fn observed_wait(&self) -> Seconds {
        self.start_time - self.request_time
    }

    /// Reshapes the record into the simulator's input.
    pub fn to_job_request(&self) -> JobRequest {
        JobRequest::new(self.request_time, self.duration())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_derived_times() {
        let r = BuildRecord::new(100, 160, 460);
        assert_eq!(r.duration(), 300);
        assert_eq!(r.observed_wait(), 60);
        assert_eq!(r.to_job_request(), JobRequest::new(100, 300));
    }

    #[test]
    fn test_record_parses_worker_and_ignores_extras() {
        let line = r#"{"requesttime": 1, "starttime": 2, "endtime": 5,
            "buildnumber": 42, "properties": {"slavename": "t-w732-ix-001", "branch": "try"}}"#;
        let r: BuildRecord = serde_json::from_str(line).unwrap();
        assert_eq!(r.worker(), Some("t-w732-ix-001"));
        assert_eq!(r.duration(), 3);
    }

    #[test]
    fn test_record_without_properties() {
        let r: BuildRecord =
            serde_json::from_str(r#"{"requesttime": 1, "starttime": 2, "endtime": 5}"#).unwrap();
        assert_eq!(r.worker(), None);
    }

    #[test]
    fn test_with_worker() {
        let r = BuildRecord::new(0, 0, 1).with_worker("w1");
        assert_eq!(r.worker(), Some("w1"));
    }
}
