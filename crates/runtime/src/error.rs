//! Unified error type surfaced by the runtime API.
//!
//! Wraps failures from the realm, the snapshot recorder and configuration so
//! drivers can bubble them up with consistent context.
use thiserror::Error;

use realm_core::{ConfigError, StepError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("invalid realm configuration")]
    Config(#[from] ConfigError),

    #[error("tick {tick} aborted")]
    Step {
        tick: u64,
        #[source]
        source: StepError,
    },

    #[error("failed to write snapshot")]
    Io(#[from] std::io::Error),

    #[error("failed to encode snapshot")]
    Encode(#[from] serde_json::Error),
}
