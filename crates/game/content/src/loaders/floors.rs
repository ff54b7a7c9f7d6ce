//! Floor layout loader.
//!
//! Floors are listed in play order; the first entry is floor 1. Only
//! impassable terrain needs to be listed, every other tile is open floor.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tactics_core::{EnemySpawn, FloorSpec, GridDimensions, Position, TerrainKind};

use crate::loaders::{LoadResult, read_file};

/// One floor as written in RON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloorRon {
    pub dimensions: (u32, u32),
    #[serde(default)]
    pub tiles: Vec<(i32, i32, TerrainKind)>, // (x, y, terrain)
    pub player_start: (i32, i32),
    pub spawns: Vec<(String, i32, i32)>, // (enemy kind, x, y)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FloorCatalog {
    floors: Vec<FloorRon>,
}

/// Loader for floor layouts from RON files.
pub struct FloorLoader;

impl FloorLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<FloorSpec>> {
        let content = read_file(path)?;
        let catalog: FloorCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse floor RON: {}", e))?;

        catalog
            .floors
            .into_iter()
            .enumerate()
            .map(|(index, floor)| {
                Self::convert(floor).map_err(|e| {
                    anyhow::anyhow!("Floor {} in {}: {}", index + 1, path.display(), e)
                })
            })
            .collect()
    }

    /// Builds a floor spec, rejecting placements on blocked or shared tiles.
    pub fn convert(floor: FloorRon) -> LoadResult<FloorSpec> {
        let dimensions = GridDimensions::new(floor.dimensions.0, floor.dimensions.1);

        let mut walls = Vec::new();
        let mut pits = Vec::new();
        for (x, y, terrain) in floor.tiles {
            let position = Position::new(x, y);
            if !dimensions.contains(position) {
                anyhow::bail!("tile {position} is outside the grid");
            }
            match terrain {
                TerrainKind::Wall => walls.push(position),
                TerrainKind::Pit => pits.push(position),
                TerrainKind::Floor => {}
            }
        }

        let blocked: BTreeSet<Position> = walls.iter().chain(&pits).copied().collect();
        let mut taken = BTreeSet::new();
        let mut claim = |position: Position, who: &str| -> LoadResult<()> {
            if !dimensions.contains(position) || blocked.contains(&position) {
                anyhow::bail!("{who} starts on unusable tile {position}");
            }
            if !taken.insert(position) {
                anyhow::bail!("{who} starts on occupied tile {position}");
            }
            Ok(())
        };

        let player_start = Position::new(floor.player_start.0, floor.player_start.1);
        claim(player_start, "player")?;

        let mut spawns = Vec::with_capacity(floor.spawns.len());
        for (kind, x, y) in floor.spawns {
            let position = Position::new(x, y);
            claim(position, &kind)?;
            spawns.push(EnemySpawn {
                kind: kind.as_str().into(),
                position,
            });
        }

        Ok(FloorSpec {
            dimensions,
            walls,
            pits,
            player_start,
            spawns,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn floor(tiles: Vec<(i32, i32, TerrainKind)>, spawns: Vec<(&str, i32, i32)>) -> FloorRon {
        FloorRon {
            dimensions: (5, 5),
            tiles,
            player_start: (0, 0),
            spawns: spawns
                .into_iter()
                .map(|(kind, x, y)| (kind.to_owned(), x, y))
                .collect(),
        }
    }

    #[test]
    fn terrain_is_split_into_walls_and_pits() {
        let spec = FloorLoader::convert(floor(
            vec![
                (2, 2, TerrainKind::Wall),
                (3, 1, TerrainKind::Pit),
                (1, 1, TerrainKind::Floor),
            ],
            vec![("rat", 4, 4)],
        ))
        .expect("valid floor");

        assert_eq!(spec.walls, vec![Position::new(2, 2)]);
        assert_eq!(spec.pits, vec![Position::new(3, 1)]);
        assert_eq!(spec.spawns[0].kind.as_str(), "rat");
    }

    #[test]
    fn spawn_on_wall_or_shared_tile_is_rejected() {
        let on_wall = floor(vec![(2, 2, TerrainKind::Wall)], vec![("rat", 2, 2)]);
        assert!(FloorLoader::convert(on_wall).is_err());

        let stacked = floor(Vec::new(), vec![("rat", 0, 0)]);
        let error = FloorLoader::convert(stacked).expect_err("shares the player tile");
        assert!(error.to_string().contains("occupied"));

        let outside = floor(Vec::new(), vec![("rat", 5, 0)]);
        assert!(FloorLoader::convert(outside).is_err());
    }

    #[test]
    fn floors_load_in_order() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"(floors: [
    (dimensions: (4, 4), player_start: (0, 0), spawns: [("rat", 3, 3)]),
    (dimensions: (6, 3), tiles: [(2, 1, Wall)], player_start: (0, 1), spawns: [("brute", 5, 1)]),
])"#
        )
        .expect("write");

        let floors = FloorLoader::load(file.path()).expect("load");
        assert_eq!(floors.len(), 2);
        assert_eq!(floors[1].dimensions, GridDimensions::new(6, 3));
        assert_eq!(floors[1].walls, vec![Position::new(2, 1)]);
    }
}
