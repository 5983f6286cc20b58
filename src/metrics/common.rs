use chrono::Utc;
use serde::{
    Deserialize,
    Serialize,
};
use std::sync::Arc;
use strum::Display;

/// Schema version of the records understood by the collection server.
pub const SCHEMA_VERSION: i64 = 2;

/// Which kind of process a record describes.
#[derive(Debug, Clone, Copy, Display, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ProcessKind {
    System,
    Beaconnode,
    Validator,
}

/// Envelope shared by every record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommonData {
    pub version: i64,
    /// Unix timestamp in milliseconds.
    pub timestamp: u64,
    pub process: ProcessKind,
    pub exporter_version: String,
}

/// Envelope values fixed once per collection round so that all records of a
/// batch are time-correlated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundStamp {
    pub version: i64,
    pub timestamp: u64,
    pub exporter_version: Arc<str>,
}

impl RoundStamp {
    pub fn new(timestamp: u64, exporter_version: Arc<str>) -> Self {
        Self {
            version: SCHEMA_VERSION,
            timestamp,
            exporter_version,
        }
    }

    pub fn now(exporter_version: Arc<str>) -> Self {
        let timestamp = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
        Self::new(timestamp, exporter_version)
    }

    pub fn envelope(&self, process: ProcessKind) -> CommonData {
        CommonData {
            version: self.version,
            timestamp: self.timestamp,
            process,
            exporter_version: self.exporter_version.to_string(),
        }
    }
}
