//! # Collectors Module
//!
//! One collector per metrics source, all behind the [`SourceCollector`] trait.
//!
//! - **`HostCollector`**: the `system` record, read from the local host
//! - **`ProcessCollector`**: the `beaconnode` record, scraped from a beacon node
//!   and mapped through a client specific extraction profile
//! - **`ValidatorCollector`**: the `validator` record, scraped from a validator client
//!
//! [`collect_round`] fans out to all of them once per tick and gathers the
//! records that succeeded.

pub mod collector;
pub mod host_collector;
pub mod process_collector;
pub mod round;
pub mod validator_collector;

pub use collector::{
    CollectError,
    CollectFuture,
    SourceCollector,
};
pub use host_collector::HostCollector;
pub use process_collector::ProcessCollector;
pub use round::collect_round;
pub use validator_collector::ValidatorCollector;
