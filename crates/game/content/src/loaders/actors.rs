//! Character and enemy catalog loaders.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tactics_core::{CharacterTemplate, EnemyTemplate};

use crate::loaders::{LoadResult, ensure_unique, read_file};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterCatalog {
    pub characters: Vec<CharacterTemplate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyCatalog {
    pub enemies: Vec<EnemyTemplate>,
}

/// Loader for playable characters from RON files.
pub struct CharacterLoader;

impl CharacterLoader {
    /// Load the character catalog from a RON file.
    ///
    /// Every character needs positive health and a non-empty deck.
    pub fn load(path: &Path) -> LoadResult<Vec<CharacterTemplate>> {
        let content = read_file(path)?;
        let catalog: CharacterCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse character catalog RON: {}", e))?;

        ensure_unique("character", path, catalog.characters.iter().map(|c| &c.id))?;
        for character in &catalog.characters {
            if character.max_health == 0 {
                anyhow::bail!("Character '{}' has no health", character.id);
            }
            if character.deck.is_empty() {
                anyhow::bail!("Character '{}' has an empty deck", character.id);
            }
        }
        Ok(catalog.characters)
    }
}

/// Loader for enemy templates from RON files.
pub struct EnemyLoader;

impl EnemyLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<EnemyTemplate>> {
        let content = read_file(path)?;
        let catalog: EnemyCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse enemy catalog RON: {}", e))?;

        ensure_unique("enemy", path, catalog.enemies.iter().map(|e| &e.id))?;
        if let Some(enemy) = catalog.enemies.iter().find(|e| e.max_health == 0) {
            anyhow::bail!("Enemy '{}' has no health", enemy.id);
        }
        Ok(catalog.enemies)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tactics_core::Element;

    use super::*;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(content.as_bytes()).expect("write");
        file
    }

    #[test]
    fn loads_characters_with_defaults() {
        let file = write_temp(
            r#"(characters: [
    (
        id: "warden",
        name: "Warden",
        max_health: 80,
        max_energy: 3,
        move_range: 2,
        attack_range: 1,
        deck: ["strike", "strike", "guard"],
    ),
])"#,
        );
        let characters = CharacterLoader::load(file.path()).expect("load");
        assert_eq!(characters[0].deck.len(), 3);
        assert_eq!(characters[0].element, Element::Neutral);
        assert!(characters[0].abilities.is_empty());
    }

    #[test]
    fn empty_deck_is_rejected() {
        let file = write_temp(
            r#"(characters: [(id: "x", name: "X", max_health: 1, max_energy: 1,
                move_range: 1, attack_range: 1, deck: [])])"#,
        );
        let error = CharacterLoader::load(file.path()).expect_err("empty deck");
        assert!(error.to_string().contains("empty deck"));
    }

    #[test]
    fn loads_enemies() {
        let file = write_temp(
            r#"(enemies: [
    (id: "slime", name: "Slime", max_health: 12, attack_damage: 4,
     move_range: 1, attack_range: 1, element: Water, abilities: ["ooze"]),
])"#,
        );
        let enemies = EnemyLoader::load(file.path()).expect("load");
        assert_eq!(enemies[0].element, Element::Water);
        assert_eq!(enemies[0].abilities[0].as_str(), "ooze");
    }
}
