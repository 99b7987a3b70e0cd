//! Host information read straight from the `/proc` filesystem.

use crate::error::{HostInfoError, Result};
use crate::metrics::{data::CpuSample, HostInfoProvider};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::trace;

const HOSTNAME_PATH: &str = "sys/kernel/hostname";
const CPUINFO_PATH: &str = "cpuinfo";
const STAT_PATH: &str = "stat";

/// Reads hostname, CPU model and CPU counters from a procfs mount.
///
/// Every call reads the underlying file again; nothing is cached.
#[derive(Debug, Clone)]
pub struct ProcFs {
    root: PathBuf,
}

impl ProcFs {
    /// Create a reader rooted at `root`, usually `/proc`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn read(&self, relative: &str) -> Result<String> {
        let path = self.root.join(relative);
        trace!("Reading {}", path.display());
        fs::read_to_string(&path).map_err(|e| HostInfoError::source_error(path, e))
    }
}

impl Default for ProcFs {
    fn default() -> Self {
        Self::new("/proc")
    }
}

impl HostInfoProvider for ProcFs {
    fn hostname(&self) -> Result<String> {
        Ok(parse_hostname(&self.read(HOSTNAME_PATH)?))
    }

    fn cpu_name(&self) -> Result<String> {
        parse_cpu_name(&self.read(CPUINFO_PATH)?)
    }

    fn cpu_sample(&self) -> Result<CpuSample> {
        parse_cpu_sample(&self.read(STAT_PATH)?)
    }
}

/// Strip the single trailing newline the kernel appends to the hostname.
pub fn parse_hostname(raw: &str) -> String {
    raw.strip_suffix('\n').unwrap_or(raw).to_string()
}

/// Extract the first `model name` value from `/proc/cpuinfo` content.
///
/// The value is everything after the first colon, minus exactly one leading
/// space. Lines are split without their newline, so no trailing newline
/// survives.
pub fn parse_cpu_name(cpuinfo: &str) -> Result<String> {
    cpuinfo
        .lines()
        .find_map(|line| {
            let (key, value) = line.split_once(':')?;
            (key.trim() == "model name").then(|| value.strip_prefix(' ').unwrap_or(value))
        })
        .map(str::to_string)
        .ok_or_else(|| HostInfoError::parse_error("no 'model name' field in cpuinfo"))
}

/// Parse the aggregate CPU line (the first line) of `/proc/stat`.
///
/// Format: `cpu user nice system idle iowait irq softirq steal ...`. A field
/// that is missing or not a number counts as zero; a line with no fields at
/// all is an error. Sums saturate at `u64::MAX`.
pub fn parse_cpu_sample(stat: &str) -> Result<CpuSample> {
    let fields: Vec<&str> = stat
        .lines()
        .next()
        .unwrap_or_default()
        .split_whitespace()
        .collect();

    if fields.is_empty() {
        return Err(HostInfoError::no_sample("no fields in the first line of stat"));
    }

    let field = |index: usize| -> u64 {
        fields
            .get(index)
            .and_then(|value| value.parse().ok())
            .unwrap_or(0)
    };

    let sum = |indices: &[usize]| -> u64 {
        indices
            .iter()
            .fold(0u64, |acc, &index| acc.saturating_add(field(index)))
    };

    let idle = sum(&[4, 5]);
    let non_idle = sum(&[1, 2, 3, 6, 7, 8]);

    Ok(CpuSample::new(idle, idle.saturating_add(non_idle)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CPUINFO: &str = "processor\t: 0\n\
vendor_id\t: GenuineIntel\n\
cpu family\t: 6\n\
model\t\t: 142\n\
model name\t: Intel(R) Core(TM) i5-8250U CPU @ 1.60GHz\n\
stepping\t: 10\n\
\n\
processor\t: 1\n\
model name\t: Some Other CPU\n";

    #[test]
    fn test_hostname_strips_one_newline() {
        assert_eq!(parse_hostname("merlin\n"), "merlin");
        assert_eq!(parse_hostname("merlin"), "merlin");
        assert_eq!(parse_hostname("merlin\n\n"), "merlin\n");
    }

    #[test]
    fn test_cpu_name_first_block() {
        assert_eq!(
            parse_cpu_name(CPUINFO).unwrap(),
            "Intel(R) Core(TM) i5-8250U CPU @ 1.60GHz"
        );
    }

    #[test]
    fn test_cpu_name_trims_exactly_one_space() {
        assert_eq!(parse_cpu_name("model name\t:  Padded\n").unwrap(), " Padded");
        assert_eq!(parse_cpu_name("model name:Tight\n").unwrap(), "Tight");
    }

    #[test]
    fn test_cpu_name_keeps_later_colons() {
        // Splitting on every colon would give "A" here
        assert_eq!(parse_cpu_name("model name\t: A: B\n").unwrap(), "A: B");
    }

    #[test]
    fn test_cpu_name_missing() {
        let err = parse_cpu_name("processor\t: 0\nHardware\t: BCM2835\n").unwrap_err();
        assert!(matches!(err, HostInfoError::ParseError(_)));
    }

    #[test]
    fn test_cpu_sample_aggregate_line() {
        let stat = "cpu  10 20 30 400 50 6 7 8 0 0\ncpu0 1 2 3 4 5 6 7 8 0 0\n";
        let sample = parse_cpu_sample(stat).unwrap();
        assert_eq!(sample.idle, 450);
        assert_eq!(sample.total, 450 + 10 + 20 + 30 + 6 + 7 + 8);
    }

    #[test]
    fn test_cpu_sample_missing_fields_default_to_zero() {
        let sample = parse_cpu_sample("cpu 1 2 3 4\n").unwrap();
        assert_eq!(sample, CpuSample::new(4, 10));

        let sample = parse_cpu_sample("cpu 1 x 3 4 5\n").unwrap();
        assert_eq!(sample, CpuSample::new(9, 13));
    }

    #[test]
    fn test_cpu_sample_huge_counters_saturate() {
        let sample = parse_cpu_sample("cpu 1 2 3 18446744073709551615 5 6 7 8\n").unwrap();
        assert_eq!(sample, CpuSample::new(u64::MAX, u64::MAX));

        let sample = parse_cpu_sample("cpu 18446744073709551615 2 3 4 5 6 7 8\n").unwrap();
        assert_eq!(sample, CpuSample::new(9, u64::MAX));
    }

    #[test]
    fn test_cpu_sample_empty_is_error() {
        assert!(matches!(
            parse_cpu_sample("").unwrap_err(),
            HostInfoError::NoSample(_)
        ));
        assert!(matches!(
            parse_cpu_sample("   \ncpu 1 2 3\n").unwrap_err(),
            HostInfoError::NoSample(_)
        ));
    }

    #[test]
    fn test_procfs_reads_tree() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("sys/kernel")).unwrap();
        fs::write(dir.path().join(HOSTNAME_PATH), "testbox\n").unwrap();
        fs::write(dir.path().join(CPUINFO_PATH), CPUINFO).unwrap();
        fs::write(dir.path().join(STAT_PATH), "cpu 1 1 1 5 5 1 1 1\n").unwrap();

        let procfs = ProcFs::new(dir.path());
        assert_eq!(procfs.hostname().unwrap(), "testbox");
        assert!(procfs.cpu_name().unwrap().starts_with("Intel(R)"));
        assert_eq!(procfs.cpu_sample().unwrap(), CpuSample::new(10, 16));
    }

    #[test]
    fn test_procfs_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let err = ProcFs::new(dir.path()).hostname().unwrap_err();
        assert!(matches!(err, HostInfoError::Source { .. }));
        assert!(err.to_string().contains("hostname"));
    }
}
