use super::common::CommonData;
use serde::{
    Deserialize,
    Serialize,
};

/// Host-level data (CPU, memory, disk, network).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SystemData {
    #[serde(flatten)]
    pub common: CommonData,

    pub cpu_cores: i64,
    pub cpu_threads: i64,
    /// Sum of system, iowait, user and idle seconds. The collection server
    /// expects the total here, not only the system bucket.
    pub cpu_node_system_seconds_total: u64,
    pub cpu_node_user_seconds_total: u64,
    pub cpu_node_iowait_seconds_total: u64,
    pub cpu_node_idle_seconds_total: u64,

    pub memory_node_bytes_total: u64,
    pub memory_node_bytes_free: u64,
    pub memory_node_bytes_cached: u64,
    pub memory_node_bytes_buffers: u64,

    pub disk_node_bytes_total: u64,
    pub disk_node_bytes_free: u64,
    pub disk_node_io_seconds: u64,
    pub disk_node_reads_total: u64,
    pub disk_node_writes_total: u64,

    pub network_node_bytes_total_receive: u64,
    pub network_node_bytes_total_transmit: u64,

    pub misc_node_boot_ts_seconds: u64,
    /// First three characters of the OS name, e.g. "lin".
    pub misc_os: String,
}

impl SystemData {
    pub fn new(common: CommonData) -> Self {
        Self {
            common,
            cpu_cores: 0,
            cpu_threads: 0,
            cpu_node_system_seconds_total: 0,
            cpu_node_user_seconds_total: 0,
            cpu_node_iowait_seconds_total: 0,
            cpu_node_idle_seconds_total: 0,
            memory_node_bytes_total: 0,
            memory_node_bytes_free: 0,
            memory_node_bytes_cached: 0,
            memory_node_bytes_buffers: 0,
            disk_node_bytes_total: 0,
            disk_node_bytes_free: 0,
            disk_node_io_seconds: 0,
            disk_node_reads_total: 0,
            disk_node_writes_total: 0,
            network_node_bytes_total_receive: 0,
            network_node_bytes_total_transmit: 0,
            misc_node_boot_ts_seconds: 0,
            misc_os: String::new(),
        }
    }
}

/// Truncates an OS name to the three character tag the server expects.
pub fn os_tag(os: &str) -> String {
    os.chars().take(3).collect()
}
