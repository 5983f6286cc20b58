use crate::{
    collectors::collect_round,
    context::Context,
    metrics::{
        Batch,
        RoundStamp,
    },
};
use std::fmt;
use tokio::time::{
    interval,
    sleep,
    Instant,
    Interval,
    MissedTickBehavior,
};

/// Where the exporter loop currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the next interval tick.
    Idle,
    Collecting,
    /// Holding the batch of the round that just finished.
    Sending(Batch),
    /// A round or a delivery failed; wait, then re-arm the interval.
    Backoff,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Idle => write!(f, "idle"),
            Phase::Collecting => write!(f, "collecting"),
            Phase::Sending(batch) => write!(f, "sending {} records", batch.len()),
            Phase::Backoff => write!(f, "backoff"),
        }
    }
}

/// Fixed interval collect and deliver loop.
///
/// The first tick fires immediately. After a backoff the interval is re-aligned
/// to the moment the backoff ended, so the next round starts right away.
pub struct Scheduler {
    context: Context,
    ticker: Interval,
}

impl Scheduler {
    pub fn new(context: Context) -> Self {
        let mut ticker = interval(context.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { context, ticker }
    }

    /// Runs until the process is terminated.
    pub async fn run(mut self) {
        let mut phase = Phase::Idle;
        loop {
            debug!(%phase, "scheduler phase");
            phase = self.advance(phase).await;
        }
    }

    /// Performs the work of `phase` and returns the phase that follows it.
    pub async fn advance(&mut self, phase: Phase) -> Phase {
        match phase {
            Phase::Idle => {
                self.ticker.tick().await;
                Phase::Collecting
            }
            Phase::Collecting => {
                let started = Instant::now();
                let stamp = RoundStamp::now(self.context.exporter_version.clone());
                match collect_round(&self.context.collectors, stamp).await {
                    Ok(batch) => {
                        info!(duration = ?started.elapsed(), records = batch.len(), "collected data");
                        Phase::Sending(batch)
                    }
                    Err(e) => {
                        error!(error = ?e, "failed collecting data");
                        Phase::Backoff
                    }
                }
            }
            Phase::Sending(batch) => {
                let started = Instant::now();
                match self.context.sender.send(&batch).await {
                    Ok(()) => {
                        info!(duration = ?started.elapsed(), "sent data");
                        Phase::Idle
                    }
                    Err(e) => {
                        error!(error = %e, "failed sending data");
                        Phase::Backoff
                    }
                }
            }
            Phase::Backoff => {
                debug!(backoff = ?self.context.backoff, "backing off");
                sleep(self.context.backoff).await;
                self.ticker.reset_immediately();
                Phase::Idle
            }
        }
    }
}
