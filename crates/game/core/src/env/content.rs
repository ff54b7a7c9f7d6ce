//! Content oracles: read-only catalogs keyed by id.
//!
//! The engine never owns content. Templates are looked up through these
//! traits and copied into battle state where a snapshot is needed.

use crate::ability::AbilityTemplate;
use crate::card::CardTemplate;
use crate::env::Element;
use crate::grid::{GridDimensions, Position};
use crate::state::{AbilityId, CardId, CharacterId, EnemyKindId};

pub trait CardOracle: Send + Sync {
    fn card(&self, id: &CardId) -> Option<&CardTemplate>;
}

pub trait AbilityOracle: Send + Sync {
    fn ability(&self, id: &AbilityId) -> Option<&AbilityTemplate>;
}

pub trait EnemyOracle: Send + Sync {
    fn enemy(&self, id: &EnemyKindId) -> Option<&EnemyTemplate>;
}

pub trait CharacterOracle: Send + Sync {
    fn character(&self, id: &CharacterId) -> Option<&CharacterTemplate>;
}

/// Floor / encounter provider. Floors are numbered from 1.
pub trait EncounterOracle: Send + Sync {
    fn floor(&self, number: u32) -> Option<&FloorSpec>;

    /// Enemy roster of a floor; empty if the floor does not exist.
    fn enemies_for_floor(&self, number: u32) -> Vec<EnemySpawn> {
        self.floor(number)
            .map(|floor| floor.spawns.clone())
            .unwrap_or_default()
    }
}

/// Persistent attributes of a playable character.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterTemplate {
    pub id: CharacterId,
    pub name: String,
    pub max_health: u32,
    pub max_energy: u32,
    pub move_range: u32,
    pub attack_range: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub element: Element,
    /// Starting deck; one card instance per entry.
    pub deck: Vec<CardId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub abilities: Vec<AbilityId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyTemplate {
    pub id: EnemyKindId,
    pub name: String,
    pub max_health: u32,
    pub attack_damage: u32,
    pub move_range: u32,
    pub attack_range: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub element: Element,
    #[cfg_attr(feature = "serde", serde(default))]
    pub abilities: Vec<AbilityId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemySpawn {
    pub kind: EnemyKindId,
    pub position: Position,
}

/// Layout and roster of one floor.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FloorSpec {
    pub dimensions: GridDimensions,
    #[cfg_attr(feature = "serde", serde(default))]
    pub walls: Vec<Position>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub pits: Vec<Position>,
    pub player_start: Position,
    pub spawns: Vec<EnemySpawn>,
}
