use crate::metrics::{
    Record,
    RoundStamp,
};
use client_metrics_exporter_config::SourceKind;
use std::{
    future::Future,
    pin::Pin,
};
use url::Url;

pub type CollectFuture<'a> = Pin<Box<dyn Future<Output = Result<Record, CollectError>> + Send + 'a>>;

/// Produces one record per collection round for a single source.
pub trait SourceCollector: Send + Sync {
    /// Collect the record for this round, stamped with the round's envelope.
    fn collect(&self, stamp: RoundStamp) -> CollectFuture<'_>;

    /// Get the name of this collector
    fn name(&self) -> &'static str;
}

/// A source whose record could not be produced this round.
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    #[error("failed getting system data: {0:#}")]
    Host(eyre::Report),
    #[error("failed getting {kind} data from {address}: {report:#}")]
    Process {
        kind: SourceKind,
        address: Url,
        report: eyre::Report,
    },
}

impl CollectError {
    pub fn source_name(&self) -> String {
        match self {
            CollectError::Host(_) => "system".to_string(),
            CollectError::Process { kind, .. } => kind.to_string(),
        }
    }

    pub fn address(&self) -> Option<&Url> {
        match self {
            CollectError::Host(_) => None,
            CollectError::Process { address, .. } => Some(address),
        }
    }
}
