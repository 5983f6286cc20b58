use crate::{
    collectors::{
        HostCollector,
        ProcessCollector,
        SourceCollector,
        ValidatorCollector,
    },
    host::SysinfoProvider,
    sender::Sender,
};
use client_metrics_exporter_config::{
    Config,
    SourceKind,
};
use eyre::{
    Context as _,
    Result,
};
use reqwest::Client as HttpClient;
use std::{
    sync::Arc,
    time::Duration,
};

/// Exporter version reported in every record envelope.
pub const EXPORTER_VERSION: &str = concat!("beaconcha.in@", env!("CARGO_PKG_VERSION"));

/// Delay after a failed round or delivery before the interval is re-armed.
pub const DEFAULT_BACKOFF: Duration = Duration::from_secs(10);

/// Everything the exporter loop needs, resolved once at startup.
#[derive(Clone)]
pub struct Context {
    pub exporter_version: Arc<str>,
    pub interval: Duration,
    pub backoff: Duration,
    pub collectors: Vec<Arc<dyn SourceCollector>>,
    pub sender: Sender,
}

impl Context {
    /// Builds the shared http client and one collector per configured source,
    /// plus the host collector.
    pub fn from_config(config: &Config) -> Result<Self> {
        let http_client = HttpClient::builder()
            .timeout(config.server_timeout)
            .build()
            .wrap_err("Failed to build http client")?;

        let host = HostCollector::new(Arc::new(SysinfoProvider::new()), config.partition().map(str::to_owned));
        let mut collectors: Vec<Arc<dyn SourceCollector>> = vec![Arc::new(host)];
        for endpoint in config.endpoints()? {
            let http_client = http_client.clone();
            let collector: Arc<dyn SourceCollector> = match endpoint.kind {
                SourceKind::PrysmBeaconnode => Arc::new(ProcessCollector::prysm(http_client, endpoint.address)),
                SourceKind::NimbusBeaconnode => Arc::new(ProcessCollector::nimbus(http_client, endpoint.address)),
                SourceKind::PrysmValidator => Arc::new(ValidatorCollector::new(http_client, endpoint.address)),
            };
            collectors.push(collector);
        }

        let sender = Sender::new(http_client, config.server_url()?, config.server_timeout);

        Ok(Self {
            exporter_version: Arc::from(EXPORTER_VERSION),
            interval: config.interval,
            backoff: DEFAULT_BACKOFF,
            collectors,
            sender,
        })
    }

    pub fn collector_names(&self) -> Vec<&'static str> {
        self.collectors.iter().map(|c| c.name()).collect()
    }
}
