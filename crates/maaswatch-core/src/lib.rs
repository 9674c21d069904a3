//! Core machinery for the MAAS machine status watcher.
//!
//! The watcher keeps a [`MachineRegistry`] of every machine it has ever seen
//! and, on each poll, fetches the full machine listing from a MAAS region
//! controller, streaming the JSON array through [`snapshot`] and reconciling
//! each record via [`MachineRegistry::upsert`]. Machines whose status is new
//! or changed come back from [`Poller::poll_once`] in decode order.
//!
//! The poller is deliberately synchronous: one outstanding fetch at a time,
//! one tick per interval, errors logged and retried on the next tick.

pub mod auth;
pub mod error;
pub mod machine;
pub mod poller;
pub mod registry;
pub mod snapshot;

pub use auth::Credentials;
pub use error::{DecodeStage, Result, WatchError};
pub use machine::Machine;
pub use poller::Poller;
pub use registry::MachineRegistry;
