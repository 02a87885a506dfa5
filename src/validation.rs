//! Input validation for traces and simulation configuration.
//!
//! The simulation engine assumes validated input. This module is the
//! ingestion-side gate that rejects records it cannot model:
//! - Negative request times or durations
//! - Records that end before they start
//! - An empty machine pool or negative overhead
//!
//! All detected problems are collected, not just the first.

use crate::models::{BuildRecord, JobRequest};
use crate::simulation::SimulationConfig;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Position of the offending record, if the error is about one.
    pub index: Option<usize>,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A request time is before the epoch.
    NegativeRequestTime,
    /// A job duration is negative.
    NegativeDuration,
    /// A build record's end time precedes its start time.
    EndBeforeStart,
    /// The pool has no machines.
    EmptyPool,
    /// The build-to-build overhead is negative.
    NegativeOverhead,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, index: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            kind,
            index,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.index {
            Some(index) => write!(f, "record {index}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Validates simulator input.
///
/// Checks:
/// 1. Every request time is non-negative
/// 2. Every duration is non-negative
pub fn validate_jobs(jobs: &[JobRequest]) -> ValidationResult {
    let mut errors = Vec::new();

    for (i, job) in jobs.iter().enumerate() {
        if job.request_time < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeRequestTime,
                Some(i),
                format!("request time {} is negative", job.request_time),
            ));
        }
        if job.duration < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeDuration,
                Some(i),
                format!("duration {} is negative", job.duration),
            ));
        }
    }

    finish(errors)
}

/// Validates raw build records before extraction.
///
/// Checks:
/// 1. Every request time is non-negative
/// 2. No record ends before it starts
pub fn validate_records(records: &[BuildRecord]) -> ValidationResult {
    let mut errors = Vec::new();

    for (i, record) in records.iter().enumerate() {
        if record.request_time < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeRequestTime,
                Some(i),
                format!("request time {} is negative", record.request_time),
            ));
        }
        if record.end_time < record.start_time {
            errors.push(ValidationError::new(
                ValidationErrorKind::EndBeforeStart,
                Some(i),
                format!(
                    "ends at {} before it starts at {}",
                    record.end_time, record.start_time
                ),
            ));
        }
    }

    finish(errors)
}

/// Validates a simulation configuration.
pub fn validate_config(config: &SimulationConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if config.pool_size == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyPool,
            None,
            "pool size must be at least 1",
        ));
    }
    if config.overhead < 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NegativeOverhead,
            None,
            format!("overhead {} is negative", config.overhead),
        ));
    }

    finish(errors)
}

fn finish(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_jobs() {
        let jobs = vec![JobRequest::new(0, 0), JobRequest::new(10, 5)];
        assert!(validate_jobs(&jobs).is_ok());
        assert!(validate_jobs(&[]).is_ok());
    }

    #[test]
    fn test_negative_job_fields() {
        let jobs = vec![JobRequest::new(0, 10), JobRequest::new(-1, -5)];
        let errors = validate_jobs(&jobs).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NegativeRequestTime));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NegativeDuration));
        assert!(errors.iter().all(|e| e.index == Some(1)));
    }

    #[test]
    fn test_end_before_start() {
        let records = vec![BuildRecord::new(0, 100, 50)];
        let errors = validate_records(&records).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::EndBeforeStart);
        assert_eq!(errors[0].to_string(), "record 0: ends at 50 before it starts at 100");
    }

    #[test]
    fn test_valid_records() {
        let records = vec![BuildRecord::new(0, 10, 10), BuildRecord::new(5, 6, 7)];
        assert!(validate_records(&records).is_ok());
    }

    #[test]
    fn test_config_errors_collected() {
        let errors = validate_config(&SimulationConfig::new(0, -3)).unwrap_err();
        let kinds: Vec<_> = errors.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ValidationErrorKind::EmptyPool,
                ValidationErrorKind::NegativeOverhead
            ]
        );
    }

    #[test]
    fn test_valid_config() {
        assert!(validate_config(&SimulationConfig::new(1, 0)).is_ok());
    }
}
