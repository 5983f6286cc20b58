use super::common::CommonData;
use serde::{
    Deserialize,
    Serialize,
};

/// Fields common to every scraped client process.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProcessData {
    #[serde(flatten)]
    pub common: CommonData,
    pub cpu_process_seconds_total: u64,
    pub memory_process_bytes: u64,
    /// One of: prysm, lighthouse, nimbus, teku.
    pub client_name: String,
    pub client_version: String,
    pub client_build: i64,
    pub sync_eth2_fallback_configured: bool,
    pub sync_eth2_fallback_connected: bool,
}

impl ProcessData {
    pub fn new(common: CommonData, client_name: impl Into<String>) -> Self {
        Self {
            common,
            cpu_process_seconds_total: 0,
            memory_process_bytes: 0,
            client_name: client_name.into(),
            client_version: String::new(),
            client_build: 0,
            sync_eth2_fallback_configured: false,
            sync_eth2_fallback_connected: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BeaconnodeData {
    #[serde(flatten)]
    pub process: ProcessData,
    pub disk_beaconchain_bytes_total: u64,
    pub network_libp2p_bytes_total_receive: u64,
    pub network_libp2p_bytes_total_transmit: u64,
    pub network_peers_connected: u64,
    pub sync_eth1_connected: bool,
    pub sync_eth2_synced: bool,
    pub sync_beacon_head_slot: u64,
    pub sync_eth1_fallback_configured: bool,
    pub sync_eth1_fallback_connected: bool,
    pub slasher_active: bool,
}

impl BeaconnodeData {
    pub fn new(process: ProcessData) -> Self {
        Self {
            process,
            disk_beaconchain_bytes_total: 0,
            network_libp2p_bytes_total_receive: 0,
            network_libp2p_bytes_total_transmit: 0,
            network_peers_connected: 0,
            sync_eth1_connected: false,
            sync_eth2_synced: false,
            sync_beacon_head_slot: 0,
            sync_eth1_fallback_configured: false,
            sync_eth1_fallback_connected: false,
            slasher_active: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidatorData {
    #[serde(flatten)]
    pub process: ProcessData,
    pub validator_total: u64,
    pub validator_active: u64,
}
