//! One-way tracker → local-folder synchronization.
//!
//! - **Engine**: fetch epics and tasks, reconcile against local folder
//!   and project state, accumulate a [`SyncReport`](crate::model::SyncReport)
//! - **Lock**: a per-folder lock file enforcing at most one run at a time
//!
//! # Architecture
//!
//! The engine is a single logical unit of work: all tracker requests
//! and all local mutations are issued and awaited strictly sequentially.
//! Idempotence is derived entirely from inspecting existing local state;
//! no checkpoint survives between runs.
//!
//! # Example
//!
//! ```ignore
//! use jm::sync::{RunLock, SyncEngine};
//!
//! let _lock = RunLock::acquire(local_folder)?;
//! let engine = SyncEngine::new(&client, &workspace, "ACME", local_folder);
//! let report = engine.run().await?;
//! ```

mod engine;
mod lock;

pub use engine::{SyncEngine, STATUS_ATTRIBUTE};
pub use lock::RunLock;
