use crate::{
    collectors::{
        CollectError,
        CollectFuture,
        SourceCollector,
    },
    host::{
        DiskUsage,
        HostStatsProvider,
    },
    metrics::{
        os_tag,
        ProcessKind,
        RoundStamp,
        SystemData,
    },
};
use eyre::{
    eyre,
    Context as _,
    Result,
};
use std::sync::Arc;

/// Collects the system record from the local host.
pub struct HostCollector {
    provider: Arc<dyn HostStatsProvider>,
    partition: Option<String>,
}

impl HostCollector {
    /// `partition` is the mountpoint to report; `None` reports the most used one.
    pub fn new(provider: Arc<dyn HostStatsProvider>, partition: Option<String>) -> Self {
        Self { provider, partition }
    }
}

impl SourceCollector for HostCollector {
    fn collect(&self, stamp: RoundStamp) -> CollectFuture<'_> {
        let provider = Arc::clone(&self.provider);
        let partition = self.partition.clone();
        Box::pin(async move {
            let data = tokio::task::spawn_blocking(move || {
                collect_system_data(provider.as_ref(), partition.as_deref(), &stamp)
            })
            .await
            .map_err(|e| CollectError::Host(eyre!("host stats task failed: {e}")))?
            .map_err(CollectError::Host)?;
            Ok(data.into())
        })
    }

    fn name(&self) -> &'static str {
        "system"
    }
}

/// Builds the system record. Any failing OS query fails the whole record.
pub fn collect_system_data(
    provider: &dyn HostStatsProvider,
    partition: Option<&str>,
    stamp: &RoundStamp,
) -> Result<SystemData> {
    let mut data = SystemData::new(stamp.envelope(ProcessKind::System));

    data.cpu_threads = provider.cpu_counts(true).wrap_err("failed getting cpu_threads")? as i64;
    data.cpu_cores = provider.cpu_counts(false).wrap_err("failed getting cpu_cores")? as i64;

    for times in provider.cpu_times().wrap_err("failed getting cpu times")? {
        data.cpu_node_idle_seconds_total += times.idle as u64;
        data.cpu_node_user_seconds_total += times.user as u64;
        data.cpu_node_iowait_seconds_total += times.iowait as u64;
        // the server expects everything in the system bucket
        data.cpu_node_system_seconds_total +=
            times.system as u64 + times.iowait as u64 + times.user as u64 + times.idle as u64;
    }

    let memory = provider.virtual_memory().wrap_err("failed getting memory stats")?;
    data.memory_node_bytes_total = memory.total;
    data.memory_node_bytes_free = memory.free;
    data.memory_node_bytes_cached = memory.cached;
    data.memory_node_bytes_buffers = memory.buffers;

    match partition {
        Some(mountpoint) => {
            let usage = provider
                .disk_usage(mountpoint)
                .wrap_err_with(|| format!("failed getting disk partition stats for mountpoint: {mountpoint}"))?;
            data.disk_node_bytes_total += usage.total;
            data.disk_node_bytes_free += usage.free;
        }
        None => {
            let most_used = accumulate_most_used(provider, &mut data)?;
            info!(
                path = %most_used.path,
                used_percent = most_used.used_percent,
                total_bytes = most_used.total,
                free_bytes = most_used.free,
                "highest disk usage: {:.0}%",
                most_used.used_percent
            );
        }
    }

    let io_counters = provider.disk_io_counters().wrap_err("failed getting disk io counters")?;
    if let Some(counters) = io_counters.last() {
        data.disk_node_io_seconds = counters.io_time;
        data.disk_node_reads_total = counters.read_count;
        data.disk_node_writes_total = counters.write_count;
    }

    let net_counters = provider.net_io_counters().wrap_err("failed getting net io counters")?;
    let primary = net_counters.first().ok_or_else(|| eyre!("no network io counters"))?;
    data.network_node_bytes_total_receive = primary.bytes_recv;
    data.network_node_bytes_total_transmit = primary.bytes_sent;

    data.misc_node_boot_ts_seconds = provider.boot_time().wrap_err("failed getting boot time")?;
    data.misc_os = os_tag(&provider.os_name());

    Ok(data)
}

/// Walks all partitions and adds a partition's totals whenever it beats the
/// highest usage seen so far. Partitions whose usage cannot be read are skipped.
fn accumulate_most_used(provider: &dyn HostStatsProvider, data: &mut SystemData) -> Result<DiskUsage> {
    let mut most_used: Option<DiskUsage> = None;

    for mountpoint in provider.partitions().wrap_err("failed getting disk partitions")? {
        let usage = match provider.disk_usage(&mountpoint) {
            Ok(usage) => usage,
            Err(e) => {
                error!(error = %e, mountpoint = %mountpoint, "failed getting disk partition stats");
                continue;
            }
        };
        if most_used
            .as_ref()
            .map_or(true, |current| usage.used_percent > current.used_percent)
        {
            data.disk_node_bytes_total += usage.total;
            data.disk_node_bytes_free += usage.free;
            most_used = Some(usage);
        }
    }

    most_used.ok_or_else(|| eyre!("no readable disk partition"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{
        CpuTimes,
        DiskIoCounters,
        NetIoCounters,
        VirtualMemory,
    };
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    const GB: u64 = 1_000_000_000;

    #[derive(Default)]
    struct FakeHost {
        partitions: Vec<DiskUsage>,
        net: Vec<NetIoCounters>,
        fail_boot_time: bool,
    }

    impl FakeHost {
        fn with_partitions(partitions: Vec<DiskUsage>) -> Self {
            Self {
                partitions,
                net: vec![
                    NetIoCounters {
                        name: "all".to_string(),
                        bytes_recv: 1000,
                        bytes_sent: 2000,
                    },
                    NetIoCounters {
                        name: "eth1".to_string(),
                        bytes_recv: 1,
                        bytes_sent: 1,
                    },
                ],
                ..Self::default()
            }
        }

        fn usage_by_path(&self) -> HashMap<&str, &DiskUsage> {
            self.partitions.iter().map(|p| (p.path.as_str(), p)).collect()
        }
    }

    impl HostStatsProvider for FakeHost {
        fn cpu_counts(&self, logical: bool) -> Result<usize> {
            Ok(if logical { 16 } else { 8 })
        }

        fn cpu_times(&self) -> Result<Vec<CpuTimes>> {
            Ok(vec![CpuTimes {
                user: 100.9,
                system: 50.2,
                idle: 1000.5,
                iowait: 10.7,
            }])
        }

        fn virtual_memory(&self) -> Result<VirtualMemory> {
            Ok(VirtualMemory {
                total: 32 * GB,
                free: 8 * GB,
                cached: 4 * GB,
                buffers: GB,
            })
        }

        fn disk_usage(&self, mountpoint: &str) -> Result<DiskUsage> {
            self.usage_by_path()
                .get(mountpoint)
                .map(|u| (*u).clone())
                .ok_or_else(|| eyre!("permission denied"))
        }

        fn partitions(&self) -> Result<Vec<String>> {
            let mut paths: Vec<String> = self.partitions.iter().map(|p| p.path.clone()).collect();
            paths.push("/unreadable".to_string());
            Ok(paths)
        }

        fn disk_io_counters(&self) -> Result<Vec<DiskIoCounters>> {
            Ok(vec![
                DiskIoCounters {
                    name: "sda".to_string(),
                    read_count: 1,
                    write_count: 2,
                    io_time: 3,
                },
                DiskIoCounters {
                    name: "nvme0n1".to_string(),
                    read_count: 10,
                    write_count: 20,
                    io_time: 30,
                },
            ])
        }

        fn net_io_counters(&self) -> Result<Vec<NetIoCounters>> {
            Ok(self.net.clone())
        }

        fn boot_time(&self) -> Result<u64> {
            if self.fail_boot_time {
                Err(eyre!("boot time unavailable"))
            } else {
                Ok(1_690_000_000)
            }
        }

        fn os_name(&self) -> String {
            "linux".to_string()
        }
    }

    fn partition(path: &str, used_percent: f64, total: u64, free: u64) -> DiskUsage {
        DiskUsage {
            path: path.to_string(),
            total,
            free,
            used_percent,
        }
    }

    fn stamp() -> RoundStamp {
        RoundStamp::new(42, Arc::from("beaconcha.in@test"))
    }

    #[test]
    fn auto_select_reports_most_used_partition() {
        let host = FakeHost::with_partitions(vec![
            partition("/a", 70.0, 100 * GB, 30 * GB),
            partition("/b", 40.0, 200 * GB, 120 * GB),
        ]);
        let data = collect_system_data(&host, None, &stamp()).unwrap();
        assert_eq!(data.disk_node_bytes_total, 100 * GB);
        assert_eq!(data.disk_node_bytes_free, 30 * GB);
    }

    #[test]
    fn auto_select_adds_every_new_maximum() {
        let host = FakeHost::with_partitions(vec![
            partition("/b", 40.0, 200 * GB, 120 * GB),
            partition("/a", 70.0, 100 * GB, 30 * GB),
        ]);
        let data = collect_system_data(&host, None, &stamp()).unwrap();
        assert_eq!(data.disk_node_bytes_total, 300 * GB);
        assert_eq!(data.disk_node_bytes_free, 150 * GB);
    }

    #[test]
    fn configured_partition_is_reported_alone() {
        let host = FakeHost::with_partitions(vec![
            partition("/", 10.0, 50 * GB, 45 * GB),
            partition("/data", 90.0, 1000 * GB, 100 * GB),
        ]);
        let data = collect_system_data(&host, Some("/"), &stamp()).unwrap();
        assert_eq!(data.disk_node_bytes_total, 50 * GB);
        assert_eq!(data.disk_node_bytes_free, 45 * GB);

        assert!(collect_system_data(&host, Some("/missing"), &stamp()).is_err());
    }

    #[test]
    fn fills_system_record() {
        let host = FakeHost::with_partitions(vec![partition("/", 10.0, 50 * GB, 45 * GB)]);
        let data = collect_system_data(&host, Some("/"), &stamp()).unwrap();

        assert_eq!(data.common, stamp().envelope(ProcessKind::System));
        assert_eq!(data.cpu_threads, 16);
        assert_eq!(data.cpu_cores, 8);
        assert_eq!(data.cpu_node_user_seconds_total, 100);
        assert_eq!(data.cpu_node_idle_seconds_total, 1000);
        assert_eq!(data.cpu_node_iowait_seconds_total, 10);
        assert_eq!(data.cpu_node_system_seconds_total, 50 + 10 + 100 + 1000);
        assert_eq!(data.memory_node_bytes_cached, 4 * GB);
        assert_eq!(data.disk_node_reads_total, 10);
        assert_eq!(data.disk_node_writes_total, 20);
        assert_eq!(data.disk_node_io_seconds, 30);
        assert_eq!(data.network_node_bytes_total_receive, 1000);
        assert_eq!(data.network_node_bytes_total_transmit, 2000);
        assert_eq!(data.misc_node_boot_ts_seconds, 1_690_000_000);
        assert_eq!(data.misc_os, "lin");
    }

    #[test]
    fn missing_network_interfaces_fail_the_record() {
        let mut host = FakeHost::with_partitions(vec![partition("/", 10.0, 50 * GB, 45 * GB)]);
        host.net.clear();
        assert!(collect_system_data(&host, Some("/"), &stamp()).is_err());
    }

    #[test]
    fn single_query_failure_fails_the_record() {
        let mut host = FakeHost::with_partitions(vec![partition("/", 10.0, 50 * GB, 45 * GB)]);
        host.fail_boot_time = true;
        let err = collect_system_data(&host, Some("/"), &stamp()).unwrap_err();
        assert!(format!("{err:#}").contains("boot time"));
    }

    #[tokio::test]
    async fn collector_wraps_failures_as_host_errors() {
        let host = FakeHost::with_partitions(Vec::new());
        let collector = HostCollector::new(Arc::new(host), None);
        let err = collector.collect(stamp()).await.unwrap_err();
        assert!(matches!(err, CollectError::Host(_)));
        assert_eq!(err.source_name(), "system");
    }
}
