use clap::Parser;
use client_metrics_exporter::{
    init_errors,
    init_logging,
    Context,
    Scheduler,
};
use client_metrics_exporter_config::{
    Args,
    Config,
};
use color_eyre::Result;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    init_errors()?;
    let config = Config::new(Args::parse())?;
    init_logging(config.debug)?;

    config.validate()?;
    let context = Context::from_config(&config)?;
    config.log_startup(&context.exporter_version);
    info!(collectors = ?context.collector_names(), "configured collectors");

    tokio::select! {
        _ = Scheduler::new(context).run() => {}
        signal = tokio::signal::ctrl_c() => {
            signal?;
            info!("shutting down");
        }
    }
    Ok(())
}
