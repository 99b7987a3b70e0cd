//! Host metrics: identity, CPU model and CPU load.
//!
//! The server talks to the operating system only through
//! [`HostInfoProvider`], so any source of the three values can back it.

pub mod data;
pub mod procfs;
pub mod sampler;

// Re-export commonly used items
pub use data::{CpuLoad, CpuSample};
pub use procfs::ProcFs;
pub use sampler::measure_load;

use crate::error::Result;

/// Read-only access to the host information the server reports.
///
/// Implementations must query their source fresh on every call.
pub trait HostInfoProvider {
    /// Configured hostname without its trailing newline.
    fn hostname(&self) -> Result<String>;

    /// Model name of the first CPU.
    fn cpu_name(&self) -> Result<String>;

    /// Current cumulative CPU-time counters.
    fn cpu_sample(&self) -> Result<CpuSample>;
}

impl<P: HostInfoProvider + ?Sized> HostInfoProvider for &P {
    fn hostname(&self) -> Result<String> {
        (**self).hostname()
    }

    fn cpu_name(&self) -> Result<String> {
        (**self).cpu_name()
    }

    fn cpu_sample(&self) -> Result<CpuSample> {
        (**self).cpu_sample()
    }
}
