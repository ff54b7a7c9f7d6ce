//! Grid model: coordinates, terrain, occupancy and reachability.
//!
//! The [`Battlefield`] is created per floor and discarded on floor transition.
//! Tiles only reference their occupant by [`EntityId`](crate::state::EntityId);
//! entity data itself lives in [`BattleState`](crate::state::BattleState).
mod battlefield;
mod position;
mod search;

pub use battlefield::{Battlefield, GridDimensions, PlacementError, TerrainKind, Tile};
pub use position::{Position, distance};
pub use search::{neighbors, occupied, reachable};
