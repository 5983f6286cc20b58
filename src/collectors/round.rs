use crate::{
    collectors::SourceCollector,
    metrics::{
        Batch,
        RoundStamp,
    },
};
use eyre::{
    Context as _,
    Result,
};
use futures::future::join_all;
use std::sync::Arc;

/// Runs every collector concurrently and gathers the records that succeeded.
///
/// All records share `stamp`. A failing source is logged and left out of the
/// batch; it never fails the round. The only round level error is a collector
/// task that panicked.
pub async fn collect_round(collectors: &[Arc<dyn SourceCollector>], stamp: RoundStamp) -> Result<Batch> {
    let handles = collectors.iter().map(|collector| {
        let collector = Arc::clone(collector);
        let stamp = stamp.clone();
        tokio::spawn(async move { collector.collect(stamp).await })
    });

    let mut batch = Batch::with_capacity(collectors.len());
    for joined in join_all(handles).await {
        match joined.wrap_err("collector task failed")? {
            Ok(record) => batch.push(record),
            Err(e) => {
                let address = e.address().map(|a| a.to_string()).unwrap_or_default();
                error!(source = %e.source_name(), %address, "{e}");
            }
        }
    }

    Ok(batch)
}
