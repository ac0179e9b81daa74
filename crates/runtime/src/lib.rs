//! Runtime orchestration for the realm simulation.
//!
//! This crate wires a `realm-core` [`realm_core::Realm`] to the pieces that
//! live outside the deterministic core: NPC controllers, player intent
//! providers and snapshot recording. Consumers embed [`Runtime`] to drive
//! ticks; the `realm-sim` binary is a thin CLI over it.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the driver and builder
//! - [`brain`] provides NPC controllers
//! - [`provider`] provides player intent sources
//! - [`recorder`] writes observer packets as JSON Lines
pub mod brain;
pub mod error;
pub mod provider;
pub mod recorder;
pub mod runtime;

pub use brain::{IdleBrain, MeanderBrain};
pub use error::{Result, RuntimeError};
pub use provider::{IdleProvider, IntentProvider};
pub use recorder::SnapshotRecorder;
pub use runtime::{RunSummary, Runtime, RuntimeBuilder};
