use crate::{
    collectors::{
        CollectError,
        CollectFuture,
        SourceCollector,
    },
    extract::{
        as_u64,
        BeaconnodeField,
        ExtractionProfile,
        MetricFamilies,
        NIMBUS_BEACONNODE,
        PRYSM_BEACONNODE,
        VERSION_LABEL,
    },
    metrics::{
        BeaconnodeData,
        CommonData,
        ProcessData,
        ProcessKind,
        RoundStamp,
    },
    scrape::fetch_metric_families,
};
use client_metrics_exporter_config::SourceKind;
use reqwest::Client as HttpClient;
use url::Url;

/// Scrapes a beacon node metrics endpoint and maps it through a client
/// specific extraction profile.
pub struct ProcessCollector {
    http_client: HttpClient,
    address: Url,
    kind: SourceKind,
    profile: &'static ExtractionProfile,
}

impl ProcessCollector {
    pub fn prysm(http_client: HttpClient, address: Url) -> Self {
        Self {
            http_client,
            address,
            kind: SourceKind::PrysmBeaconnode,
            profile: &PRYSM_BEACONNODE,
        }
    }

    pub fn nimbus(http_client: HttpClient, address: Url) -> Self {
        Self {
            http_client,
            address,
            kind: SourceKind::NimbusBeaconnode,
            profile: &NIMBUS_BEACONNODE,
        }
    }
}

impl SourceCollector for ProcessCollector {
    fn collect(&self, stamp: RoundStamp) -> CollectFuture<'_> {
        Box::pin(async move {
            let families = fetch_metric_families(&self.http_client, &self.address)
                .await
                .map_err(|report| CollectError::Process {
                    kind: self.kind,
                    address: self.address.clone(),
                    report,
                })?;
            let common = stamp.envelope(ProcessKind::Beaconnode);
            Ok(beaconnode_data(&families, self.profile, common).into())
        })
    }

    fn name(&self) -> &'static str {
        self.kind.into()
    }
}

/// Fields shared by all client processes.
pub fn process_data(families: &MetricFamilies, profile: &ExtractionProfile, common: CommonData) -> ProcessData {
    let mut data = ProcessData::new(common, profile.client_name);
    data.cpu_process_seconds_total = as_u64(profile.cpu_seconds.apply(families));
    data.memory_process_bytes = as_u64(profile.resident_memory.apply(families));
    data.client_version = families.first_label_value(profile.version_family, VERSION_LABEL);
    data
}

pub fn beaconnode_data(families: &MetricFamilies, profile: &ExtractionProfile, common: CommonData) -> BeaconnodeData {
    let mut data = BeaconnodeData::new(process_data(families, profile, common));
    for (field, rule) in profile.beaconnode_fields {
        let value = as_u64(rule.apply(families));
        match field {
            BeaconnodeField::DiskBeaconchainBytesTotal => data.disk_beaconchain_bytes_total = value,
            BeaconnodeField::NetworkLibp2pBytesTotalReceive => data.network_libp2p_bytes_total_receive = value,
            BeaconnodeField::NetworkLibp2pBytesTotalTransmit => data.network_libp2p_bytes_total_transmit = value,
            BeaconnodeField::NetworkPeersConnected => data.network_peers_connected = value,
            BeaconnodeField::SyncBeaconHeadSlot => data.sync_beacon_head_slot = value,
        }
    }
    data
}
