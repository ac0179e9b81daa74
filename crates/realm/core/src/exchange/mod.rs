//! Exchange (order book).
//!
//! Items move through `Unlisted -> Listed -> (Sold | Expired | Unlisted)`.
//! The book only references items by id; the owning inventory remains the
//! authority on whether an item exists.
mod book;
mod error;
mod market;

pub use book::{BuyOutcome, Exchange, Listing};
pub use error::ExchangeError;
pub use market::{MarketEntry, MarketSummary};
