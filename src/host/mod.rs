//! # Host statistics
//!
//! The host collector only talks to [`HostStatsProvider`]. [`SysinfoProvider`]
//! is the implementation used at runtime; tests substitute their own.

pub mod procfs;
mod sysinfo_provider;

use eyre::Result;
pub use sysinfo_provider::SysinfoProvider;

/// Aggregate CPU time buckets in seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CpuTimes {
    pub user: f64,
    pub system: f64,
    pub idle: f64,
    pub iowait: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VirtualMemory {
    pub total: u64,
    pub free: u64,
    pub cached: u64,
    pub buffers: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiskUsage {
    pub path: String,
    pub total: u64,
    pub free: u64,
    pub used_percent: f64,
}

impl DiskUsage {
    pub fn new(path: impl Into<String>, total: u64, free: u64) -> Self {
        let used = total.saturating_sub(free);
        let used_percent = if total > 0 {
            (used as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        Self {
            path: path.into(),
            total,
            free,
            used_percent,
        }
    }
}

/// Cumulative block device counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiskIoCounters {
    pub name: String,
    pub read_count: u64,
    pub write_count: u64,
    /// Time spent doing I/O in milliseconds.
    pub io_time: u64,
}

/// Cumulative network interface counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetIoCounters {
    pub name: String,
    pub bytes_recv: u64,
    pub bytes_sent: u64,
}

/// Operating system statistics needed for a system record.
///
/// Calls are blocking and may fail independently; the host collector turns any
/// failure into a failed record.
pub trait HostStatsProvider: Send + Sync {
    /// Number of logical (`true`) or physical (`false`) CPUs.
    fn cpu_counts(&self, logical: bool) -> Result<usize>;

    /// CPU times; one aggregate entry on most platforms.
    fn cpu_times(&self) -> Result<Vec<CpuTimes>>;

    fn virtual_memory(&self) -> Result<VirtualMemory>;

    fn disk_usage(&self, mountpoint: &str) -> Result<DiskUsage>;

    /// Mountpoints of all mounted partitions.
    fn partitions(&self) -> Result<Vec<String>>;

    fn disk_io_counters(&self) -> Result<Vec<DiskIoCounters>>;

    /// Network counters; the first entry is the one reported.
    fn net_io_counters(&self) -> Result<Vec<NetIoCounters>>;

    /// Boot time as unix timestamp in seconds.
    fn boot_time(&self) -> Result<u64>;

    fn os_name(&self) -> String {
        std::env::consts::OS.to_string()
    }
}
