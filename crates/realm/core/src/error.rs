//! Common error infrastructure for realm-core.
//!
//! Domain-specific errors (`ActionError`, `ExchangeError`, `StepError`) live
//! next to the code that produces them. This module provides the shared
//! classification used by the runtime to decide how loudly to fail.
//!
//! # Taxonomy
//!
//! - **Contract violations** (malformed action arguments, selling an item the
//!   seller does not own) abort the current tick and surface as errors.
//! - **Expected runtime conditions** (expired listing, insufficient gold, no
//!   inventory space) are never errors; they come back as enumerated outcomes.
//! - **Lifecycle races** (actor died earlier in the tick, stale expiry entry)
//!   are resolved inline by the scheduler and the exchange.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - the caller may retry with a different action.
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: selling an item not owned, zero listing price
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: listing references a missing seller
    Internal,

    /// Fatal error - world state corrupted, cannot continue.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all realm-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for metrics and for asserting on error kinds in tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
