//! Job request model.
//!
//! A job request is the only input the simulation engine consumes: when the
//! job asked for a machine and how long it ran once it got one.

use serde::{Deserialize, Serialize};

use super::{seconds, Seconds};

/// An immutable `(request time, duration)` pair.
///
/// Serialized with the field names of the line-delimited trace format
/// (`requesttime`, `duration`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRequest {
    /// When the job was submitted (s).
    #[serde(rename = "requesttime", deserialize_with = "seconds::deserialize")]
    pub request_time: Seconds,
    /// Job runtime once a machine is assigned (s).
    #[serde(deserialize_with = "seconds::deserialize")]
    pub duration: Seconds,
}

impl JobRequest {
    /// Creates a job request.
    pub fn new(request_time: Seconds, duration: Seconds) -> Self {
        Self {
            request_time,
            duration,
        }
    }

    /// Earliest time the job could complete if it never waited.
    pub fn earliest_completion(&self) -> Seconds {
        self.request_time + self.duration
    }
}

impl From<(Seconds, Seconds)> for JobRequest {
    fn from((request_time, duration): (Seconds, Seconds)) -> Self {
        Self::new(request_time, duration)
    }
}
