use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, ItemId, Tick};

/// Contract violations raised by the exchange.
///
/// Expected market conditions (expired listing, insufficient gold, full
/// inventory) are not errors; see [`super::BuyOutcome`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExchangeError {
    #[error("seller {0} does not exist")]
    SellerNotFound(EntityId),

    #[error("buyer {0} does not exist")]
    BuyerNotFound(EntityId),

    #[error("{item} is not in {seller}'s inventory")]
    NotOwned { seller: EntityId, item: ItemId },

    #[error("{0} has no quantity left to sell")]
    EmptyStack(ItemId),

    #[error("{0} cannot be listed for zero gold")]
    ZeroPrice(ItemId),

    #[error("listing at tick {tick} precedes the newest queued tick {newest}")]
    NonMonotonicTick { tick: Tick, newest: Tick },

    #[error("listing for {item} is inconsistent: {reason}")]
    Inconsistent { item: ItemId, reason: &'static str },
}

impl GameError for ExchangeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ExchangeError::SellerNotFound(_)
            | ExchangeError::BuyerNotFound(_)
            | ExchangeError::NotOwned { .. }
            | ExchangeError::EmptyStack(_)
            | ExchangeError::ZeroPrice(_) => ErrorSeverity::Validation,
            ExchangeError::NonMonotonicTick { .. } | ExchangeError::Inconsistent { .. } => {
                ErrorSeverity::Internal
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ExchangeError::SellerNotFound(_) => "EXCHANGE_SELLER_NOT_FOUND",
            ExchangeError::BuyerNotFound(_) => "EXCHANGE_BUYER_NOT_FOUND",
            ExchangeError::NotOwned { .. } => "EXCHANGE_NOT_OWNED",
            ExchangeError::EmptyStack(_) => "EXCHANGE_EMPTY_STACK",
            ExchangeError::ZeroPrice(_) => "EXCHANGE_ZERO_PRICE",
            ExchangeError::NonMonotonicTick { .. } => "EXCHANGE_NON_MONOTONIC_TICK",
            ExchangeError::Inconsistent { .. } => "EXCHANGE_INCONSISTENT",
        }
    }
}
