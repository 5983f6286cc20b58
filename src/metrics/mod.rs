pub mod common;
pub mod process;
pub mod system;

pub use common::*;
pub use process::*;
use serde::{
    de::Error as _,
    Deserialize,
    Deserializer,
    Serialize,
};
pub use system::*;

/// One record of a batch. Serializes as the bare record object; the `process`
/// field of its envelope tells the variants apart.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Record {
    System(SystemData),
    Beaconnode(BeaconnodeData),
    Validator(ValidatorData),
}

/// Records of one collection round, in no particular order.
pub type Batch = Vec<Record>;

impl Record {
    pub fn common(&self) -> &CommonData {
        match self {
            Record::System(data) => &data.common,
            Record::Beaconnode(data) => &data.process.common,
            Record::Validator(data) => &data.process.common,
        }
    }

    pub fn kind(&self) -> ProcessKind {
        self.common().process
    }
}

impl From<SystemData> for Record {
    fn from(value: SystemData) -> Self {
        Record::System(value)
    }
}

impl From<BeaconnodeData> for Record {
    fn from(value: BeaconnodeData) -> Self {
        Record::Beaconnode(value)
    }
}

impl From<ValidatorData> for Record {
    fn from(value: ValidatorData) -> Self {
        Record::Validator(value)
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        let process = value
            .get("process")
            .cloned()
            .ok_or_else(|| D::Error::missing_field("process"))?;
        let record = match ProcessKind::deserialize(process).map_err(D::Error::custom)? {
            ProcessKind::System => serde_json::from_value(value).map(Record::System),
            ProcessKind::Beaconnode => serde_json::from_value(value).map(Record::Beaconnode),
            ProcessKind::Validator => serde_json::from_value(value).map(Record::Validator),
        };
        record.map_err(D::Error::custom)
    }
}
