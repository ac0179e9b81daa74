//! Data-driven realm content and loaders.
//!
//! This crate turns TOML data files into the inputs `realm-core` consumes:
//! - Realm configuration (`RealmConfig`, validated on load)
//! - Map layouts (blocked tiles for an `OpenMap`)
//!
//! Content is consumed when a realm is built and never appears in realm state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, MapLoader};
