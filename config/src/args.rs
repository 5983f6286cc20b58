use clap::Parser;
use std::path::PathBuf;

/// Pushes host, beacon node and validator metrics to a collection server.
///
/// Every flag is optional on the command line; values not given here fall back
/// to the config file and then to the built-in defaults.
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to a yaml config file. Defaults to `config.yaml` in the config directory.
    #[arg(long, value_name = "FILE", env = "EXPORTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address of the server to push metrics to.
    #[arg(long = "server.address", value_name = "URL", env = "EXPORTER_SERVER_ADDRESS")]
    pub server_address: Option<String>,

    /// Timeout for requests to the server and to the scraped metrics endpoints (e.g. "10s").
    #[arg(long = "server.timeout", value_name = "DURATION", env = "EXPORTER_SERVER_TIMEOUT")]
    pub server_timeout: Option<String>,

    /// Interval of sending metrics to the server (e.g. "62s").
    #[arg(long, value_name = "DURATION", env = "EXPORTER_INTERVAL")]
    pub interval: Option<String>,

    /// Mountpoint of the partition tracked for usage. If empty, the partition
    /// with the highest usage is recorded.
    #[arg(long = "system.partition", value_name = "PATH", env = "EXPORTER_SYSTEM_PARTITION")]
    pub partition: Option<String>,

    /// Beacon node client type ("prysm" or "nimbus").
    #[arg(long = "beaconnode.type", value_name = "TYPE", env = "EXPORTER_BEACONNODE_TYPE")]
    pub beaconnode_type: Option<String>,

    /// Beacon node metrics endpoint (e.g. http://localhost:8080/metrics), disabled if unset.
    #[arg(long = "beaconnode.address", value_name = "URL", env = "EXPORTER_BEACONNODE_ADDRESS")]
    pub beaconnode_address: Option<String>,

    /// Validator client type ("prysm").
    #[arg(long = "validator.type", value_name = "TYPE", env = "EXPORTER_VALIDATOR_TYPE")]
    pub validator_type: Option<String>,

    /// Validator metrics endpoint (e.g. http://localhost:8081/metrics), disabled if unset.
    #[arg(long = "validator.address", value_name = "URL", env = "EXPORTER_VALIDATOR_ADDRESS")]
    pub validator_address: Option<String>,

    /// Enables debug logging.
    #[arg(long, action)]
    pub debug: bool,
}

mod config_ext {
    use super::*;
    use config::{
        Map,
        Source,
        Value,
    };
    use std::collections::HashMap;

    impl Source for Args {
        fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
            Box::new((*self).clone())
        }

        fn collect(&self) -> Result<Map<String, Value>, config::ConfigError> {
            let mut cache = HashMap::<String, Value>::new();
            let entries = [
                ("server_address", &self.server_address),
                ("server_timeout", &self.server_timeout),
                ("interval", &self.interval),
                ("partition", &self.partition),
                ("beaconnode_type", &self.beaconnode_type),
                ("beaconnode_address", &self.beaconnode_address),
                ("validator_type", &self.validator_type),
                ("validator_address", &self.validator_address),
            ];
            for (key, value) in entries {
                if let Some(value) = value {
                    cache.insert(key.to_string(), value.clone().into());
                }
            }
            if self.debug {
                cache.insert("debug".to_string(), true.into());
            }
            Ok(cache)
        }
    }
}
