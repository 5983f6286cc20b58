use super::MetricFamilies;

/// How a single output field is read from the scraped metric families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Value of the first sample of the family.
    Scalar(&'static str),
    /// Sum over every sample of the family.
    Sum(&'static str),
    /// Value of the first sample carrying `label=value`.
    WhereLabel {
        family: &'static str,
        label: &'static str,
        value: &'static str,
    },
}

impl Rule {
    pub fn apply(&self, families: &MetricFamilies) -> f64 {
        match *self {
            Rule::Scalar(family) => families.scalar_of(family),
            Rule::Sum(family) => families.sum_across_samples(family),
            Rule::WhereLabel { family, label, value } => families.value_where_label(family, label, value),
        }
    }
}

/// Numeric fields of a beacon node record that an extraction profile may fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeaconnodeField {
    DiskBeaconchainBytesTotal,
    NetworkLibp2pBytesTotalReceive,
    NetworkLibp2pBytesTotalTransmit,
    NetworkPeersConnected,
    SyncBeaconHeadSlot,
}

/// Fixed extraction table for one client implementation.
#[derive(Debug)]
pub struct ExtractionProfile {
    pub client_name: &'static str,
    /// Family carrying the client version in its `version` label.
    pub version_family: &'static str,
    pub cpu_seconds: Rule,
    pub resident_memory: Rule,
    pub beaconnode_fields: &'static [(BeaconnodeField, Rule)],
}

pub const VERSION_LABEL: &str = "version";

const PROCESS_CPU_SECONDS: Rule = Rule::Scalar("process_cpu_seconds_total");
const PROCESS_RESIDENT_MEMORY: Rule = Rule::Scalar("process_resident_memory_bytes");

pub static PRYSM_BEACONNODE: ExtractionProfile = ExtractionProfile {
    client_name: "prysm",
    version_family: "prysm_version",
    cpu_seconds: PROCESS_CPU_SECONDS,
    resident_memory: PROCESS_RESIDENT_MEMORY,
    beaconnode_fields: &[
        (
            BeaconnodeField::DiskBeaconchainBytesTotal,
            Rule::Scalar("bcnode_disk_beaconchain_bytes_total"),
        ),
        (
            BeaconnodeField::NetworkLibp2pBytesTotalReceive,
            Rule::Sum("p2p_message_received_total"),
        ),
        (
            BeaconnodeField::NetworkPeersConnected,
            Rule::WhereLabel {
                family: "p2p_peer_count",
                label: "State",
                value: "Connected",
            },
        ),
        (BeaconnodeField::SyncBeaconHeadSlot, Rule::Scalar("beacon_head_slot")),
    ],
};

pub static NIMBUS_BEACONNODE: ExtractionProfile = ExtractionProfile {
    client_name: "nimbus",
    version_family: "version",
    cpu_seconds: PROCESS_CPU_SECONDS,
    resident_memory: PROCESS_RESIDENT_MEMORY,
    beaconnode_fields: &[(BeaconnodeField::SyncBeaconHeadSlot, Rule::Scalar("beacon_head_slot"))],
};

pub static PRYSM_VALIDATOR: ExtractionProfile = ExtractionProfile {
    client_name: "prysm",
    version_family: "prysm_version",
    cpu_seconds: PROCESS_CPU_SECONDS,
    resident_memory: PROCESS_RESIDENT_MEMORY,
    beaconnode_fields: &[],
};

/// Family with one sample per validator key; the sample value is the status code.
pub const VALIDATOR_STATUS_FAMILY: &str = "validator_statuses";
/// Status code of an active validator.
pub const VALIDATOR_ACTIVE_STATUS: f64 = 3.0;
