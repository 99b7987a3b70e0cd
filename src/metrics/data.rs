//! CPU counter data structures.

use crate::error::{HostInfoError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A point-in-time snapshot of the cumulative CPU-time counters.
///
/// Both counters are in jiffies since boot. `idle` covers idle and I/O wait,
/// `total` covers `idle` plus every busy category that is accounted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuSample {
    /// Idle plus iowait time
    pub idle: u64,
    /// Idle plus all non-idle time
    pub total: u64,
}

impl CpuSample {
    /// Create a sample from raw counters.
    pub fn new(idle: u64, total: u64) -> Self {
        Self { idle, total }
    }

    /// Time spent doing anything but idling.
    pub fn busy(&self) -> u64 {
        self.total.saturating_sub(self.idle)
    }
}

/// CPU utilization between two samples, as a whole percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CpuLoad {
    percent: u8,
}

impl CpuLoad {
    /// Compute the load between an earlier and a later sample.
    ///
    /// The percentage is truncated, so 37.9% becomes `37`. Fails when the
    /// total counter did not advance or went backwards.
    pub fn between(first: CpuSample, second: CpuSample) -> Result<Self> {
        let total_diff = second.total.checked_sub(first.total).ok_or_else(|| {
            HostInfoError::no_sample(format!(
                "total counter went backwards ({} -> {})",
                first.total, second.total
            ))
        })?;

        if total_diff == 0 {
            return Err(HostInfoError::no_sample(
                "total CPU time did not advance between samples",
            ));
        }

        let busy_diff = second.busy().saturating_sub(first.busy()).min(total_diff);
        let percent = (u128::from(busy_diff) * 100) / u128::from(total_diff);

        Ok(Self {
            // busy_diff <= total_diff, so this is at most 100
            percent: percent as u8,
        })
    }
}

impl fmt::Display for CpuLoad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent)
    }
}
