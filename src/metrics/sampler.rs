//! Two-sample CPU load measurement.

use crate::error::Result;
use crate::metrics::{data::CpuLoad, HostInfoProvider};
use std::time::Duration;
use tokio::time;
use tracing::debug;

/// Sample the CPU counters, wait `interval`, sample again and compute the load.
///
/// The wait is awaited inline, so a serial caller handles nothing else during
/// the window.
pub async fn measure_load<P>(provider: &P, interval: Duration) -> Result<CpuLoad>
where
    P: HostInfoProvider + ?Sized,
{
    let first = provider.cpu_sample()?;
    time::sleep(interval).await;
    let second = provider.cpu_sample()?;

    let load = CpuLoad::between(first, second)?;
    debug!(?first, ?second, %load, "Measured CPU load");
    Ok(load)
}
