//! In-memory content store implementing every core content oracle.

use std::collections::BTreeMap;

use tactics_core::{
    AbilityId, AbilityOracle, AbilityTemplate, CardId, CardOracle, CardTemplate, CharacterId,
    CharacterOracle, CharacterTemplate, EncounterOracle, EnemyKindId, EnemyOracle, EnemyTemplate,
    FloorSpec,
};

/// Card, ability, enemy and character templates keyed by id, plus the
/// ordered floor list (floor 1 first).
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    cards: BTreeMap<CardId, CardTemplate>,
    abilities: BTreeMap<AbilityId, AbilityTemplate>,
    enemies: BTreeMap<EnemyKindId, EnemyTemplate>,
    characters: BTreeMap<CharacterId, CharacterTemplate>,
    floors: Vec<FloorSpec>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a card, returning the template it replaced.
    pub fn insert_card(&mut self, card: CardTemplate) -> Option<CardTemplate> {
        self.cards.insert(card.id.clone(), card)
    }

    pub fn insert_ability(&mut self, ability: AbilityTemplate) -> Option<AbilityTemplate> {
        self.abilities.insert(ability.id.clone(), ability)
    }

    pub fn insert_enemy(&mut self, enemy: EnemyTemplate) -> Option<EnemyTemplate> {
        self.enemies.insert(enemy.id.clone(), enemy)
    }

    pub fn insert_character(&mut self, character: CharacterTemplate) -> Option<CharacterTemplate> {
        self.characters.insert(character.id.clone(), character)
    }

    /// Appends a floor and returns its number.
    pub fn push_floor(&mut self, floor: FloorSpec) -> u32 {
        self.floors.push(floor);
        self.floors.len() as u32
    }

    pub fn floor_count(&self) -> u32 {
        self.floors.len() as u32
    }

    pub fn card_ids(&self) -> impl Iterator<Item = &CardId> {
        self.cards.keys()
    }

    pub fn character_ids(&self) -> impl Iterator<Item = &CharacterId> {
        self.characters.keys()
    }

    /// Every cross-reference that points at a missing template.
    ///
    /// The engine reports these lazily as content errors; checking them up
    /// front lets a loader refuse a broken data set.
    pub fn dangling_references(&self) -> Vec<String> {
        let mut missing = Vec::new();

        for character in self.characters.values() {
            for card in &character.deck {
                if !self.cards.contains_key(card) {
                    missing.push(format!("character '{}' deck: card '{card}'", character.id));
                }
            }
            for ability in &character.abilities {
                if !self.abilities.contains_key(ability) {
                    missing.push(format!("character '{}': ability '{ability}'", character.id));
                }
            }
        }

        for enemy in self.enemies.values() {
            for ability in &enemy.abilities {
                if !self.abilities.contains_key(ability) {
                    missing.push(format!("enemy '{}': ability '{ability}'", enemy.id));
                }
            }
        }

        for (index, floor) in self.floors.iter().enumerate() {
            for spawn in &floor.spawns {
                if !self.enemies.contains_key(&spawn.kind) {
                    missing.push(format!("floor {}: enemy '{}'", index + 1, spawn.kind));
                }
            }
        }

        missing
    }
}

impl CardOracle for Catalog {
    fn card(&self, id: &CardId) -> Option<&CardTemplate> {
        self.cards.get(id)
    }
}

impl AbilityOracle for Catalog {
    fn ability(&self, id: &AbilityId) -> Option<&AbilityTemplate> {
        self.abilities.get(id)
    }
}

impl EnemyOracle for Catalog {
    fn enemy(&self, id: &EnemyKindId) -> Option<&EnemyTemplate> {
        self.enemies.get(id)
    }
}

impl CharacterOracle for Catalog {
    fn character(&self, id: &CharacterId) -> Option<&CharacterTemplate> {
        self.characters.get(id)
    }
}

impl EncounterOracle for Catalog {
    fn floor(&self, number: u32) -> Option<&FloorSpec> {
        let index = number.checked_sub(1)? as usize;
        self.floors.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactics_core::{
        CardType, EffectTemplate, Element, EnemySpawn, GridDimensions, Position,
    };

    fn hero(deck: &[&str]) -> CharacterTemplate {
        CharacterTemplate {
            id: "hero".into(),
            name: "Hero".into(),
            max_health: 80,
            max_energy: 3,
            move_range: 2,
            attack_range: 1,
            element: Element::Neutral,
            deck: deck.iter().map(|id| CardId::from(*id)).collect(),
            abilities: vec!["second_wind".into()],
        }
    }

    fn floor(kind: &str) -> FloorSpec {
        FloorSpec {
            dimensions: GridDimensions::new(4, 4),
            walls: Vec::new(),
            pits: Vec::new(),
            player_start: Position::ORIGIN,
            spawns: vec![EnemySpawn {
                kind: kind.into(),
                position: Position::new(3, 3),
            }],
        }
    }

    #[test]
    fn floors_are_numbered_from_one() {
        let mut catalog = Catalog::new();
        assert_eq!(catalog.push_floor(floor("rat")), 1);
        assert_eq!(catalog.push_floor(floor("bat")), 2);

        assert!(catalog.floor(0).is_none());
        assert_eq!(catalog.floor(2).map(|f| f.spawns[0].kind.as_str()), Some("bat"));
        assert!(catalog.floor(3).is_none());
        assert_eq!(catalog.enemies_for_floor(1).len(), 1);
        assert!(catalog.enemies_for_floor(9).is_empty());
    }

    #[test]
    fn insert_replaces_and_returns_previous() {
        let mut catalog = Catalog::new();
        let first = CardTemplate::new("strike", "Strike", 1, CardType::Attack);
        assert!(catalog.insert_card(first.clone()).is_none());

        let second = CardTemplate::new("strike", "Strike+", 1, CardType::Attack)
            .with_upright([EffectTemplate::damage(9)]);
        assert_eq!(catalog.insert_card(second), Some(first));
        assert_eq!(
            catalog.card(&"strike".into()).map(|c| c.name.as_str()),
            Some("Strike+")
        );
    }

    #[test]
    fn dangling_references_are_listed() {
        let mut catalog = Catalog::new();
        catalog.insert_card(CardTemplate::new("strike", "Strike", 1, CardType::Attack));
        catalog.insert_character(hero(&["strike", "fireball"]));
        catalog.push_floor(floor("ghost"));

        let missing = catalog.dangling_references();
        assert_eq!(missing.len(), 3);
        assert!(missing.iter().any(|m| m.contains("card 'fireball'")));
        assert!(missing.iter().any(|m| m.contains("ability 'second_wind'")));
        assert!(missing.iter().any(|m| m.contains("enemy 'ghost'")));
    }
}
