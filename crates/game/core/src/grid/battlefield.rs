use std::collections::BTreeSet;

use super::Position;
use crate::state::EntityId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridDimensions {
    pub width: u32,
    pub height: u32,
}

impl GridDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as i64) < self.width as i64
            && (position.y as i64) < self.height as i64
    }

    fn index_of(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.y as usize * self.width as usize + position.x as usize)
    }
}

/// Canonical terrain classes for battlefield tiles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TerrainKind {
    #[default]
    Floor,
    Wall,
    Pit,
}

impl TerrainKind {
    pub fn is_passable(self) -> bool {
        matches!(self, TerrainKind::Floor)
    }
}

/// A single grid cell. The occupant is a non-owning reference by id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub position: Position,
    pub terrain: TerrainKind,
    pub occupant: Option<EntityId>,
}

impl Tile {
    pub fn is_passable(&self) -> bool {
        self.terrain.is_passable()
    }

    pub fn is_free(&self) -> bool {
        self.is_passable() && self.occupant.is_none()
    }
}

/// Errors raised when placing or moving occupants.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    #[error("position {0} is out of bounds")]
    OutOfBounds(Position),

    #[error("position {0} is not passable")]
    Impassable(Position),

    #[error("position {position} is occupied by {occupant}")]
    Occupied {
        position: Position,
        occupant: EntityId,
    },
}

/// Fixed-size, row-major grid of tiles for one floor.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Battlefield {
    dimensions: GridDimensions,
    tiles: Vec<Tile>,
}

impl Battlefield {
    /// Creates an open battlefield with every tile set to [`TerrainKind::Floor`].
    pub fn new(dimensions: GridDimensions) -> Self {
        let mut tiles = Vec::with_capacity(dimensions.width as usize * dimensions.height as usize);
        for y in 0..dimensions.height as i32 {
            for x in 0..dimensions.width as i32 {
                tiles.push(Tile {
                    position: Position::new(x, y),
                    terrain: TerrainKind::Floor,
                    occupant: None,
                });
            }
        }
        Self { dimensions, tiles }
    }

    /// Builder: sets terrain for each listed position, ignoring out-of-bounds entries.
    #[must_use]
    pub fn with_terrain(
        mut self,
        terrain: TerrainKind,
        positions: impl IntoIterator<Item = Position>,
    ) -> Self {
        for position in positions {
            if let Some(tile) = self.tile_mut(position) {
                tile.terrain = terrain;
            }
        }
        self
    }

    pub fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    pub fn contains(&self, position: Position) -> bool {
        self.dimensions.contains(position)
    }

    pub fn tile(&self, position: Position) -> Option<&Tile> {
        self.dimensions
            .index_of(position)
            .and_then(|idx| self.tiles.get(idx))
    }

    fn tile_mut(&mut self, position: Position) -> Option<&mut Tile> {
        self.dimensions
            .index_of(position)
            .and_then(|idx| self.tiles.get_mut(idx))
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn occupant(&self, position: Position) -> Option<EntityId> {
        self.tile(position).and_then(|tile| tile.occupant)
    }

    pub fn is_free(&self, position: Position) -> bool {
        self.tile(position).is_some_and(Tile::is_free)
    }

    /// Places an entity on a free, passable tile.
    pub fn place(&mut self, entity: EntityId, position: Position) -> Result<(), PlacementError> {
        let tile = self
            .tile_mut(position)
            .ok_or(PlacementError::OutOfBounds(position))?;
        if !tile.is_passable() {
            return Err(PlacementError::Impassable(position));
        }
        if let Some(occupant) = tile.occupant {
            return Err(PlacementError::Occupied { position, occupant });
        }
        tile.occupant = Some(entity);
        Ok(())
    }

    /// Moves an entity between tiles. The source must hold the entity.
    pub fn relocate(
        &mut self,
        entity: EntityId,
        from: Position,
        to: Position,
    ) -> Result<(), PlacementError> {
        self.place(entity, to)?;
        if let Some(tile) = self.tile_mut(from) {
            debug_assert_eq!(tile.occupant, Some(entity), "relocate source mismatch");
            tile.occupant = None;
        }
        Ok(())
    }

    /// Clears every tile occupied by `entity`. Returns true if anything was cleared.
    pub fn remove(&mut self, entity: EntityId) -> bool {
        let mut removed = false;
        for tile in self.tiles.iter_mut().filter(|t| t.occupant == Some(entity)) {
            tile.occupant = None;
            removed = true;
        }
        removed
    }

    /// Positions currently holding an occupant, with the occupant id.
    pub fn occupants(&self) -> impl Iterator<Item = (Position, EntityId)> + '_ {
        self.tiles
            .iter()
            .filter_map(|tile| tile.occupant.map(|id| (tile.position, id)))
    }

    /// Every tile an entity may not step on: impassable terrain plus every
    /// occupied tile except those held by `except`.
    pub fn blocked_except(&self, except: EntityId) -> BTreeSet<Position> {
        self.tiles
            .iter()
            .filter(|tile| {
                !tile.is_passable() || tile.occupant.is_some_and(|occupant| occupant != except)
            })
            .map(|tile| tile.position)
            .collect()
    }
}
