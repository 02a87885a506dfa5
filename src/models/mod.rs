//! Trace domain models.
//!
//! Provides the data types shared by every stage of the analysis: raw
//! build-log records, the `(request time, duration)` pairs extracted from
//! them, and the time unit both are expressed in.
//!
//! # Domain Mappings
//!
//! | u-poolsim | CI | Batch cluster |
//! |-----------|----|---------------|
//! | JobRequest | Build/test request | Submitted job |
//! | BuildRecord | Build log entry | Accounting record |
//! | Machine | Worker/slave | Node |

mod job;
mod record;

pub use job::JobRequest;
pub use record::{BuildProperties, BuildRecord};

/// Time unit for every timestamp and duration: whole seconds.
pub type Seconds = i64;

/// Index of a machine in the simulated pool, in `0..pool_size`.
pub type MachineId = usize;

/// Lenient deserialization of second counts.
///
/// Build-data exports mix integer and fractional timestamps; fractional
/// values are rounded to the nearest second.
pub(crate) mod seconds {
    use serde::de::{self, Deserializer, Visitor};
    use std::fmt;

    use super::Seconds;

    struct SecondsVisitor;

    impl<'de> Visitor<'de> for SecondsVisitor {
        type Value = Seconds;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a number of seconds")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Seconds, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Seconds, E> {
            Seconds::try_from(v).map_err(|_| E::custom(format!("{v} seconds out of range")))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Seconds, E> {
            if !v.is_finite() || v.abs() > Seconds::MAX as f64 {
                return Err(E::custom(format!("{v} seconds out of range")));
            }
            Ok(v.round() as Seconds)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Seconds, D::Error> {
        deserializer.deserialize_any(SecondsVisitor)
    }
}
