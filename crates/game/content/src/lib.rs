//! Data-driven content for the tactics engine.
//!
//! [`Catalog`] is an in-memory store implementing every content oracle the
//! engine consults. With the `loaders` feature the catalog can be built from
//! RON/TOML files:
//! - Cards and abilities (RON)
//! - Enemy and character templates (RON)
//! - Floor layouts and rosters (RON)
//! - Battle configuration (TOML)
//!
//! Content is looked up by the engine and never owned by battle state.

mod catalog;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::Catalog;

#[cfg(feature = "loaders")]
pub use loaders::{
    AbilityLoader, CardLoader, CharacterLoader, ConfigLoader, ContentFactory, EnemyLoader,
    FloorLoader, FloorRon,
};
