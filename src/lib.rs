#[macro_use]
extern crate tracing;

pub mod collectors;
pub mod context;
pub mod extract;
pub mod host;
mod logging;
pub mod metrics;
pub mod scheduler;
pub mod scrape;
pub mod sender;

pub use context::Context;
pub use logging::{
    init_errors,
    init_logging,
};
pub use scheduler::{
    Phase,
    Scheduler,
};
