use serde::{
    Deserialize,
    Serialize,
};
use strum::{
    Display,
    EnumString,
    IntoStaticStr,
};
use url::Url;

/// Beacon node client whose metrics endpoint is scraped.
#[derive(Debug, Default, Clone, Copy, Display, EnumString, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BeaconnodeType {
    #[default]
    Prysm,
    Nimbus,
}

/// Validator client whose metrics endpoint is scraped.
#[derive(Debug, Default, Clone, Copy, Display, EnumString, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ValidatorType {
    #[default]
    Prysm,
}

/// A fully resolved metrics source: which extraction profile to run against
/// which endpoint.
#[derive(Debug, Clone, Copy, Display, IntoStaticStr, PartialEq, Eq)]
pub enum SourceKind {
    #[strum(to_string = "prysm-beaconnode-metrics")]
    PrysmBeaconnode,
    #[strum(to_string = "nimbus-beaconnode-metrics")]
    NimbusBeaconnode,
    #[strum(to_string = "prysm-validator-metrics")]
    PrysmValidator,
}

impl From<BeaconnodeType> for SourceKind {
    fn from(value: BeaconnodeType) -> Self {
        match value {
            BeaconnodeType::Prysm => SourceKind::PrysmBeaconnode,
            BeaconnodeType::Nimbus => SourceKind::NimbusBeaconnode,
        }
    }
}

impl From<ValidatorType> for SourceKind {
    fn from(value: ValidatorType) -> Self {
        match value {
            ValidatorType::Prysm => SourceKind::PrysmValidator,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEndpoint {
    pub kind: SourceKind,
    pub address: Url,
}
