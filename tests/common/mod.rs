#![allow(dead_code)]

use client_metrics_exporter::{
    host::{
        CpuTimes,
        DiskIoCounters,
        DiskUsage,
        HostStatsProvider,
        NetIoCounters,
        VirtualMemory,
    },
    metrics::RoundStamp,
};
use eyre::{
    eyre,
    Result,
};
use std::sync::Arc;

pub const PRYSM_BEACONNODE_METRICS: &str = r#"# HELP process_cpu_seconds_total Total user and system CPU time spent in seconds.
# TYPE process_cpu_seconds_total counter
process_cpu_seconds_total 5321.07
# HELP process_resident_memory_bytes Resident memory size in bytes.
# TYPE process_resident_memory_bytes gauge
process_resident_memory_bytes 2.147483648e+09
# HELP prysm_version Prysm version
# TYPE prysm_version gauge
prysm_version{buildDate="1690000000",commit="0a1b2c",version="v4.0.8"} 1
# TYPE bcnode_disk_beaconchain_bytes_total gauge
bcnode_disk_beaconchain_bytes_total 8.5e+10
# TYPE p2p_peer_count gauge
p2p_peer_count{State="Connected"} 60
p2p_peer_count{State="Connecting"} 4
# TYPE beacon_head_slot gauge
beacon_head_slot 7654321
"#;

pub const PRYSM_VALIDATOR_METRICS: &str = r#"# TYPE process_cpu_seconds_total counter
process_cpu_seconds_total 77
# TYPE prysm_version gauge
prysm_version{version="v4.0.8"} 1
# TYPE validator_statuses gauge
validator_statuses{pubkey="0xa1"} 3
validator_statuses{pubkey="0xa2"} 1
"#;

pub fn stamp(timestamp: u64) -> RoundStamp {
    RoundStamp::new(timestamp, Arc::from("beaconcha.in@test"))
}

/// A host whose every query succeeds with fixed values.
pub struct StaticHost;

impl HostStatsProvider for StaticHost {
    fn cpu_counts(&self, logical: bool) -> Result<usize> {
        Ok(if logical { 4 } else { 2 })
    }

    fn cpu_times(&self) -> Result<Vec<CpuTimes>> {
        Ok(vec![CpuTimes {
            user: 10.0,
            system: 5.0,
            idle: 100.0,
            iowait: 1.0,
        }])
    }

    fn virtual_memory(&self) -> Result<VirtualMemory> {
        Ok(VirtualMemory {
            total: 8 << 30,
            free: 2 << 30,
            cached: 1 << 30,
            buffers: 1 << 20,
        })
    }

    fn disk_usage(&self, mountpoint: &str) -> Result<DiskUsage> {
        Ok(DiskUsage::new(mountpoint, 100 << 30, 40 << 30))
    }

    fn partitions(&self) -> Result<Vec<String>> {
        Ok(vec!["/".to_string()])
    }

    fn disk_io_counters(&self) -> Result<Vec<DiskIoCounters>> {
        Ok(vec![DiskIoCounters {
            name: "sda".to_string(),
            read_count: 11,
            write_count: 22,
            io_time: 33,
        }])
    }

    fn net_io_counters(&self) -> Result<Vec<NetIoCounters>> {
        Ok(vec![NetIoCounters {
            name: "all".to_string(),
            bytes_recv: 123,
            bytes_sent: 456,
        }])
    }

    fn boot_time(&self) -> Result<u64> {
        Ok(1_700_000_000)
    }

    fn os_name(&self) -> String {
        "linux".to_string()
    }
}

/// A host where no statistic can be read.
pub struct BrokenHost;

impl HostStatsProvider for BrokenHost {
    fn cpu_counts(&self, _logical: bool) -> Result<usize> {
        Err(eyre!("cpu counts unavailable"))
    }

    fn cpu_times(&self) -> Result<Vec<CpuTimes>> {
        Err(eyre!("cpu times unavailable"))
    }

    fn virtual_memory(&self) -> Result<VirtualMemory> {
        Err(eyre!("memory unavailable"))
    }

    fn disk_usage(&self, _mountpoint: &str) -> Result<DiskUsage> {
        Err(eyre!("disk usage unavailable"))
    }

    fn partitions(&self) -> Result<Vec<String>> {
        Err(eyre!("partitions unavailable"))
    }

    fn disk_io_counters(&self) -> Result<Vec<DiskIoCounters>> {
        Err(eyre!("disk io unavailable"))
    }

    fn net_io_counters(&self) -> Result<Vec<NetIoCounters>> {
        Err(eyre!("net io unavailable"))
    }

    fn boot_time(&self) -> Result<u64> {
        Err(eyre!("boot time unavailable"))
    }
}
