//! Parsers for the `/proc` files not covered by `sysinfo`.
//!
//! The parsers are pure functions over file contents so they can be tested
//! with string inputs.

use super::{
    CpuTimes,
    DiskIoCounters,
};
use eyre::{
    eyre,
    Context as _,
    Result,
};
use std::{
    fs,
    path::Path,
};

/// Clock ticks per second used by the kernel for `/proc/stat` (USER_HZ).
const USER_HZ: f64 = 100.0;

/// Memory figures from `/proc/meminfo`, in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemInfo {
    pub total: u64,
    pub free: u64,
    pub cached: u64,
    pub buffers: u64,
}

/// Parses the aggregate `cpu` line of `/proc/stat`.
pub fn parse_cpu_times(content: &str) -> Result<CpuTimes> {
    let line = content
        .lines()
        .find(|line| line.split_whitespace().next() == Some("cpu"))
        .ok_or_else(|| eyre!("no aggregate cpu line in /proc/stat"))?;

    let parts: Vec<&str> = line.split_whitespace().collect();
    let get = |idx: usize, name: &str| -> Result<f64> {
        let ticks: u64 = parts
            .get(idx)
            .ok_or_else(|| eyre!("missing {name} field in /proc/stat"))?
            .parse()
            .wrap_err_with(|| format!("invalid {name} field in /proc/stat"))?;
        Ok(ticks as f64 / USER_HZ)
    };

    Ok(CpuTimes {
        user: get(1, "user")?,
        system: get(3, "system")?,
        idle: get(4, "idle")?,
        iowait: get(5, "iowait")?,
    })
}

/// Parses `/proc/meminfo`. Values are reported in kB.
pub fn parse_meminfo(content: &str) -> MemInfo {
    let mut info = MemInfo::default();

    let parse_kb = |line: &str| -> u64 {
        line.split_whitespace()
            .nth(1)
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(0)
            * 1024
    };

    for line in content.lines() {
        if line.starts_with("MemTotal:") {
            info.total = parse_kb(line);
        } else if line.starts_with("MemFree:") {
            info.free = parse_kb(line);
        } else if line.starts_with("Buffers:") {
            info.buffers = parse_kb(line);
        } else if line.starts_with("Cached:") {
            info.cached = parse_kb(line);
        }
    }

    info
}

/// Parses `/proc/diskstats`.
///
/// Format: major minor name reads r_merged r_sectors r_time writes w_merged
/// w_sectors w_time io_pending io_time w_io_time [discards ...]
pub fn parse_diskstats(content: &str) -> Vec<DiskIoCounters> {
    content
        .lines()
        .filter_map(|line| {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() < 14 {
                return None;
            }
            let get_val = |idx: usize| -> u64 { parts.get(idx).and_then(|s| s.parse().ok()).unwrap_or(0) };
            Some(DiskIoCounters {
                name: parts[2].to_string(),
                read_count: get_val(3),
                write_count: get_val(7),
                io_time: get_val(12),
            })
        })
        .collect()
}

fn read(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).wrap_err_with(|| format!("Failed to read {}", path.display()))
}

pub fn read_cpu_times() -> Result<CpuTimes> {
    parse_cpu_times(&read("/proc/stat")?)
}

pub fn read_meminfo() -> Result<MemInfo> {
    Ok(parse_meminfo(&read("/proc/meminfo")?))
}

pub fn read_diskstats() -> Result<Vec<DiskIoCounters>> {
    Ok(parse_diskstats(&read("/proc/diskstats")?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_cpu_times() {
        let content = "\
cpu  10132153 290696 3084719 46828483 16683 0 25195 0 0 0
cpu0 1393280 32966 572056 13343292 6130 0 17875 0 0 0
intr 1462898 0 0
btime 1700000000
";
        let times = parse_cpu_times(content).unwrap();
        assert_eq!(times.user, 101321.53);
        assert_eq!(times.system, 30847.19);
        assert_eq!(times.idle, 468284.83);
        assert_eq!(times.iowait, 166.83);
    }

    #[test]
    fn test_parse_cpu_times_without_aggregate_line() {
        assert!(parse_cpu_times("cpu0 1 2 3 4 5\n").is_err());
        assert!(parse_cpu_times("cpu 1 2\n").is_err());
    }

    #[test]
    fn test_parse_meminfo() {
        let content = "\
MemTotal:       16384000 kB
MemFree:         8192000 kB
MemAvailable:   12000000 kB
Buffers:          512000 kB
Cached:          2048000 kB
SwapCached:        10000 kB
";
        let info = parse_meminfo(content);
        assert_eq!(
            info,
            MemInfo {
                total: 16_384_000 * 1024,
                free: 8_192_000 * 1024,
                cached: 2_048_000 * 1024,
                buffers: 512_000 * 1024,
            }
        );
    }

    #[test]
    fn test_parse_diskstats() {
        let content = "\
   8       0 sda 12345 100 500000 3000 6789 200 400000 4000 0 5000 7000
   8       1 sda1 1000 10 50000 300 600 20 40000 400 0 500 700 0 0 0 0
 short line
";
        let disks = parse_diskstats(content);
        assert_eq!(disks.len(), 2);
        assert_eq!(disks[0].name, "sda");
        assert_eq!(disks[0].read_count, 12345);
        assert_eq!(disks[0].write_count, 6789);
        assert_eq!(disks[0].io_time, 5000);
        assert_eq!(disks[1].name, "sda1");
    }
}
