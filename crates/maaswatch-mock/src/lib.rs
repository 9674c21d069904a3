//! Mock MAAS backend for local testing of the watcher.
//!
//! Serves the machines endpoint with a fixed 14-machine inventory and runs a
//! background mutator that flips a few machines to random statuses every
//! tick, so a watcher pointed at it sees realistic status churn without a
//! real MAAS deployment. The mock accepts any credentials or none.

pub mod mutator;
pub mod server;
pub mod state;

pub use mutator::{mutate_once, run_mutator};
pub use server::{build_router, serve, MACHINES_PATH};
pub use state::{MockState, STATUS_VOCABULARY};
