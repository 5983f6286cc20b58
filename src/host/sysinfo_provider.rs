use super::{
    procfs,
    CpuTimes,
    DiskIoCounters,
    DiskUsage,
    HostStatsProvider,
    NetIoCounters,
    VirtualMemory,
};
use eyre::{
    eyre,
    Result,
};
use sysinfo::{
    Disks,
    Networks,
    System,
};

/// Reads host statistics through `sysinfo`, completed by `/proc` for the
/// figures `sysinfo` does not expose (CPU time buckets, page cache, disk I/O).
#[derive(Debug, Default, Clone, Copy)]
pub struct SysinfoProvider;

impl SysinfoProvider {
    pub fn new() -> Self {
        Self
    }
}

impl HostStatsProvider for SysinfoProvider {
    fn cpu_counts(&self, logical: bool) -> Result<usize> {
        let mut sys = System::new();
        if logical {
            sys.refresh_cpu();
            match sys.cpus().len() {
                0 => Err(eyre!("no logical cpus reported")),
                n => Ok(n),
            }
        } else {
            sys.physical_core_count()
                .ok_or_else(|| eyre!("physical core count unavailable"))
        }
    }

    fn cpu_times(&self) -> Result<Vec<CpuTimes>> {
        Ok(vec![procfs::read_cpu_times()?])
    }

    fn virtual_memory(&self) -> Result<VirtualMemory> {
        let mut sys = System::new();
        sys.refresh_memory();
        let meminfo = procfs::read_meminfo()?;
        Ok(VirtualMemory {
            total: sys.total_memory(),
            free: sys.free_memory(),
            cached: meminfo.cached,
            buffers: meminfo.buffers,
        })
    }

    fn disk_usage(&self, mountpoint: &str) -> Result<DiskUsage> {
        let disks = Disks::new_with_refreshed_list();
        disks
            .list()
            .iter()
            .find(|disk| disk.mount_point().to_string_lossy() == mountpoint)
            .map(|disk| DiskUsage::new(mountpoint, disk.total_space(), disk.available_space()))
            .ok_or_else(|| eyre!("no mounted partition at {mountpoint}"))
    }

    fn partitions(&self) -> Result<Vec<String>> {
        let disks = Disks::new_with_refreshed_list();
        Ok(disks
            .list()
            .iter()
            .map(|disk| disk.mount_point().to_string_lossy().to_string())
            .collect())
    }

    fn disk_io_counters(&self) -> Result<Vec<DiskIoCounters>> {
        procfs::read_diskstats()
    }

    fn net_io_counters(&self) -> Result<Vec<NetIoCounters>> {
        let networks = Networks::new_with_refreshed_list();
        let networks = networks.list();
        if networks.is_empty() {
            return Ok(Vec::new());
        }
        // all interfaces summed into one entry
        let (bytes_recv, bytes_sent) = networks.iter().fold((0u64, 0u64), |(recv, sent), (_, data)| {
            (
                recv.saturating_add(data.total_received()),
                sent.saturating_add(data.total_transmitted()),
            )
        });
        Ok(vec![NetIoCounters {
            name: "all".to_string(),
            bytes_recv,
            bytes_sent,
        }])
    }

    fn boot_time(&self) -> Result<u64> {
        match System::boot_time() {
            0 => Err(eyre!("boot time unavailable")),
            ts => Ok(ts),
        }
    }
}
