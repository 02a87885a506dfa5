//! Simulation configuration.

use serde::{Deserialize, Serialize};

use crate::models::Seconds;

/// Pool size and build-to-build overhead for one simulation run.
///
/// Both values are operator-supplied; there are no defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of interchangeable machines.
    pub pool_size: usize,
    /// Delay after every job before its machine can start another one (s).
    pub overhead: Seconds,
}

impl SimulationConfig {
    /// Creates a configuration.
    pub fn new(pool_size: usize, overhead: Seconds) -> Self {
        Self {
            pool_size,
            overhead,
        }
    }

    /// Returns a copy with a different pool size.
    pub fn with_pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = pool_size;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_pool_size_keeps_overhead() {
        let base = SimulationConfig::new(1, 120);
        let wider = base.with_pool_size(8);
        assert_eq!(wider, SimulationConfig::new(8, 120));
        assert_eq!(base.pool_size, 1);
    }
}
