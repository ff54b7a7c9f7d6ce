//! Content factory for building a catalog from data files.

use std::path::{Path, PathBuf};

use tactics_core::{
    AbilityTemplate, BattleConfig, CardTemplate, CharacterTemplate, EnemyTemplate, FloorSpec,
};
use tracing::debug;

use crate::Catalog;
use crate::loaders::{
    AbilityLoader, CardLoader, CharacterLoader, ConfigLoader, EnemyLoader, FloorLoader, LoadResult,
};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── cards.ron
/// ├── abilities.ron
/// ├── enemies.ron
/// ├── characters.ron
/// └── floors.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load battle tuning from `config.toml`.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    pub fn load_cards(&self) -> LoadResult<Vec<CardTemplate>> {
        CardLoader::load(&self.data_dir.join("cards.ron"))
    }

    pub fn load_abilities(&self) -> LoadResult<Vec<AbilityTemplate>> {
        AbilityLoader::load(&self.data_dir.join("abilities.ron"))
    }

    pub fn load_enemies(&self) -> LoadResult<Vec<EnemyTemplate>> {
        EnemyLoader::load(&self.data_dir.join("enemies.ron"))
    }

    pub fn load_characters(&self) -> LoadResult<Vec<CharacterTemplate>> {
        CharacterLoader::load(&self.data_dir.join("characters.ron"))
    }

    /// Load the floor list from `floors.ron`, floor 1 first.
    pub fn load_floors(&self) -> LoadResult<Vec<FloorSpec>> {
        FloorLoader::load(&self.data_dir.join("floors.ron"))
    }

    /// Load every catalog and cross-check references between them.
    pub fn load_catalog(&self) -> LoadResult<Catalog> {
        let mut catalog = Catalog::new();
        for card in self.load_cards()? {
            catalog.insert_card(card);
        }
        for ability in self.load_abilities()? {
            catalog.insert_ability(ability);
        }
        for enemy in self.load_enemies()? {
            catalog.insert_enemy(enemy);
        }
        for character in self.load_characters()? {
            catalog.insert_character(character);
        }
        for floor in self.load_floors()? {
            catalog.push_floor(floor);
        }

        let missing = catalog.dangling_references();
        if !missing.is_empty() {
            anyhow::bail!(
                "Content in {} references missing templates: {}",
                self.data_dir.display(),
                missing.join(", ")
            );
        }

        debug!(
            data_dir = %self.data_dir.display(),
            floors = catalog.floor_count(),
            "content catalog loaded"
        );
        Ok(catalog)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use tactics_core::{CardOracle, CharacterOracle, EncounterOracle};

    use super::*;

    fn shipped() -> ContentFactory {
        ContentFactory::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    #[test]
    fn factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn shipped_content_is_complete() {
        let factory = shipped();
        let catalog = factory.load_catalog().expect("shipped catalog");

        assert!(catalog.floor_count() >= 3);
        assert!(catalog.floor(1).is_some());
        let warden = catalog.character(&"warden".into()).expect("warden");
        assert!(warden.deck.iter().all(|card| catalog.card(card).is_some()));

        let config = factory.load_config().expect("shipped config");
        assert!(config.hand_limit() <= BattleConfig::MAX_HAND_SIZE);
    }

    #[test]
    fn dangling_reference_fails_the_catalog() {
        let dir = tempfile::tempdir().expect("temp dir");
        let write = |name: &str, body: &str| {
            std::fs::write(dir.path().join(name), body).expect("write");
        };
        write(
            "cards.ron",
            r#"(cards: [(id: "strike", name: "Strike", cost: 1, card_type: Attack)])"#,
        );
        write("abilities.ron", "(abilities: [])");
        write("enemies.ron", "(enemies: [])");
        write(
            "characters.ron",
            r#"(characters: [(id: "hero", name: "Hero", max_health: 10, max_energy: 3,
                move_range: 1, attack_range: 1, deck: ["strike"])])"#,
        );
        write(
            "floors.ron",
            r#"(floors: [(dimensions: (3, 3), player_start: (0, 0), spawns: [("ghost", 2, 2)])])"#,
        );

        let error = ContentFactory::new(dir.path())
            .load_catalog()
            .expect_err("ghost is not an enemy");
        assert!(error.to_string().contains("enemy 'ghost'"));
    }
}
