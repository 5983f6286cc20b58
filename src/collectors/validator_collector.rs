use crate::{
    collectors::{
        process_collector::process_data,
        CollectError,
        CollectFuture,
        SourceCollector,
    },
    extract::{
        MetricFamilies,
        PRYSM_VALIDATOR,
        VALIDATOR_ACTIVE_STATUS,
        VALIDATOR_STATUS_FAMILY,
    },
    metrics::{
        CommonData,
        ProcessKind,
        RoundStamp,
        ValidatorData,
    },
    scrape::fetch_metric_families,
};
use client_metrics_exporter_config::SourceKind;
use reqwest::Client as HttpClient;
use url::Url;

/// Scrapes a validator client and counts its validators by status.
pub struct ValidatorCollector {
    http_client: HttpClient,
    address: Url,
}

impl ValidatorCollector {
    pub fn new(http_client: HttpClient, address: Url) -> Self {
        Self { http_client, address }
    }
}

impl SourceCollector for ValidatorCollector {
    fn collect(&self, stamp: RoundStamp) -> CollectFuture<'_> {
        Box::pin(async move {
            let families = fetch_metric_families(&self.http_client, &self.address)
                .await
                .map_err(|report| CollectError::Process {
                    kind: SourceKind::PrysmValidator,
                    address: self.address.clone(),
                    report,
                })?;
            Ok(validator_data(&families, stamp.envelope(ProcessKind::Validator)).into())
        })
    }

    fn name(&self) -> &'static str {
        SourceKind::PrysmValidator.into()
    }
}

pub fn validator_data(families: &MetricFamilies, common: CommonData) -> ValidatorData {
    ValidatorData {
        process: process_data(families, &PRYSM_VALIDATOR, common),
        validator_total: families.count_all(VALIDATOR_STATUS_FAMILY),
        validator_active: families.count_matching_value(VALIDATOR_STATUS_FAMILY, VALIDATOR_ACTIVE_STATUS),
    }
}
