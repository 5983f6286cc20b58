#[macro_use]
extern crate tracing;

mod app_config;
mod args;
mod source;

pub use app_config::get_config_dir;
pub use args::Args;
use eyre::{
    bail,
    eyre,
    Context as _,
    Result,
};
use serde::{
    Deserialize,
    Serialize,
};
pub use source::{
    BeaconnodeType,
    SourceEndpoint,
    SourceKind,
    ValidatorType,
};
use std::time::Duration;
use url::Url;

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(62);
pub const DEFAULT_SERVER_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_PARTITION: &str = "/";

/// Settings read once at startup. Immutable afterwards.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing)]
    pub server_address: Option<String>,
    #[serde(with = "humantime_str")]
    pub server_timeout: Duration,
    #[serde(with = "humantime_str")]
    pub interval: Duration,
    #[serde(default)]
    pub partition: String,
    #[serde(default)]
    pub beaconnode_type: BeaconnodeType,
    #[serde(default)]
    pub beaconnode_address: Option<String>,
    #[serde(default)]
    pub validator_type: ValidatorType,
    #[serde(default)]
    pub validator_address: Option<String>,
    #[serde(default)]
    pub debug: bool,
}

impl Config {
    /// Layers defaults, the yaml config file and the command line arguments.
    ///
    /// An explicitly passed `--config` file must exist; the default one is optional.
    pub fn new(args: Args) -> Result<Self> {
        let (config_file, required) = match &args.config {
            Some(path) => (path.clone(), true),
            None => (get_config_dir().join("config.yaml"), false),
        };

        let cfg: Self = config::Config::builder()
            .set_default("server_timeout", humantime::format_duration(DEFAULT_SERVER_TIMEOUT).to_string())?
            .set_default("interval", humantime::format_duration(DEFAULT_INTERVAL).to_string())?
            .set_default("partition", DEFAULT_PARTITION)?
            .set_default("beaconnode_type", BeaconnodeType::default().to_string())?
            .set_default("validator_type", ValidatorType::default().to_string())?
            .set_default("debug", false)?
            .add_source(
                config::File::from(config_file.clone())
                    .format(config::FileFormat::Yaml)
                    .required(required),
            )
            .add_source(args)
            .build()
            .wrap_err_with(|| format!("Failed to load configuration (config file {config_file:?})"))?
            .try_deserialize()
            .wrap_err("Invalid configuration")?;

        Ok(cfg)
    }

    /// Checks everything that cannot be fixed by retrying later.
    pub fn validate(&self) -> Result<()> {
        self.server_url()?;
        if self.interval.is_zero() {
            bail!("interval must be greater than zero");
        }
        if self.endpoints()?.is_empty() {
            bail!("Neither beacon node nor validator address provided.");
        }
        Ok(())
    }

    pub fn server_url(&self) -> Result<Url> {
        match non_empty(&self.server_address) {
            Some(address) => Url::parse(address).wrap_err_with(|| format!("Invalid server address '{address}'")),
            None => Err(eyre!("Server address not provided.")),
        }
    }

    /// The mountpoint to report, or `None` to pick the most used partition.
    pub fn partition(&self) -> Option<&str> {
        Some(self.partition.as_str()).filter(|p| !p.is_empty())
    }

    /// Resolves the configured client types and addresses into scrape targets.
    /// Unset or empty addresses disable the corresponding source.
    pub fn endpoints(&self) -> Result<Vec<SourceEndpoint>> {
        let mut endpoints = Vec::new();
        if let Some(address) = non_empty(&self.beaconnode_address) {
            endpoints.push(SourceEndpoint {
                kind: self.beaconnode_type.into(),
                address: Url::parse(address).wrap_err_with(|| format!("Invalid beaconnode.address '{address}'"))?,
            });
        }
        if let Some(address) = non_empty(&self.validator_address) {
            endpoints.push(SourceEndpoint {
                kind: self.validator_type.into(),
                address: Url::parse(address).wrap_err_with(|| format!("Invalid validator.address '{address}'"))?,
            });
        }
        Ok(endpoints)
    }

    /// Logs the effective settings. The server address is left out since it may
    /// carry an api key.
    pub fn log_startup(&self, exporter_version: &str) {
        info!(
            server_timeout = %humantime::format_duration(self.server_timeout),
            beaconnode_type = %self.beaconnode_type,
            beaconnode_address = self.beaconnode_address.as_deref().unwrap_or_default(),
            validator_type = %self.validator_type,
            validator_address = self.validator_address.as_deref().unwrap_or_default(),
            interval = %humantime::format_duration(self.interval),
            partition = %self.partition,
            debug = self.debug,
            version = exporter_version,
            "starting exporter"
        );
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

mod humantime_str {
    use serde::{
        de::Error as _,
        Deserialize,
        Deserializer,
        Serializer,
    };
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&humantime::format_duration(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let raw = String::deserialize(deserializer)?;
        humantime::parse_duration(&raw).map_err(|e| D::Error::custom(format!("invalid duration '{raw}': {e}")))
    }
}
