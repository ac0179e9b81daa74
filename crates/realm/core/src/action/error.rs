//! Action execution errors.
//!
//! Only contract violations are errors. Anything an agent could reasonably
//! run into during play (target out of reach, tile occupied, listing gone)
//! is an [`super::ActionOutcome::Skipped`] instead.

use crate::error::{ErrorSeverity, GameError};
use crate::exchange::ExchangeError;
use crate::state::{EntityId, ItemId};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// The actor submitted an action naming an item it does not hold.
    #[error("{actor} does not own {item}")]
    ItemNotOwned { actor: EntityId, item: ItemId },

    /// Actor vanished between the scheduler's liveness check and execution.
    #[error("actor {0} not found")]
    ActorNotFound(EntityId),

    /// An item left one inventory and could not be put anywhere.
    #[error("{item} held by {actor} was lost in transit")]
    ItemLost { actor: EntityId, item: ItemId },

    #[error(transparent)]
    Exchange(#[from] ExchangeError),
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ActionError::ItemNotOwned { .. } => ErrorSeverity::Validation,
            ActionError::ActorNotFound(_) | ActionError::ItemLost { .. } => ErrorSeverity::Internal,
            ActionError::Exchange(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ActionError::ItemNotOwned { .. } => "ACTION_ITEM_NOT_OWNED",
            ActionError::ActorNotFound(_) => "ACTION_ACTOR_NOT_FOUND",
            ActionError::ItemLost { .. } => "ACTION_ITEM_LOST",
            ActionError::Exchange(error) => error.error_code(),
        }
    }
}
