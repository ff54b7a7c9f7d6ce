//! Read-only projection of [`BattleState`] for presentation.

use crate::card::CardInstance;
use crate::effect::EffectKind;
use crate::grid::Position;

use super::{
    AbilityId, BattleState, Character, CardInstanceId, Combatant, Enemy, EnemyKindId, EntityId,
    Intent, Phase,
};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectSnapshot {
    pub kind: EffectKind,
    pub magnitude: u32,
    pub duration: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilitySnapshot {
    pub id: AbilityId,
    pub passive: bool,
    pub cooldown_remaining: u32,
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantSnapshot {
    pub id: EntityId,
    pub name: String,
    pub health: u32,
    pub max_health: u32,
    pub position: Position,
    pub effects: Vec<EffectSnapshot>,
    pub abilities: Vec<AbilitySnapshot>,
}

impl From<&Combatant> for CombatantSnapshot {
    fn from(unit: &Combatant) -> Self {
        Self {
            id: unit.id,
            name: unit.name.clone(),
            health: unit.health.current,
            max_health: unit.health.maximum,
            position: unit.position,
            effects: unit
                .effects
                .iter()
                .map(|effect| EffectSnapshot {
                    kind: effect.kind(),
                    magnitude: effect.magnitude(),
                    duration: effect.duration(),
                })
                .collect(),
            abilities: unit
                .abilities
                .iter()
                .map(|ability| AbilitySnapshot {
                    id: ability.id().clone(),
                    passive: ability.is_passive(),
                    cooldown_remaining: ability.cooldown_remaining,
                    active: ability.active,
                })
                .collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterSnapshot {
    pub unit: CombatantSnapshot,
    pub energy: u32,
    pub max_energy: u32,
    pub hand: Vec<CardInstance>,
    pub draw_pile: usize,
    pub discard_pile: usize,
}

impl From<&Character> for CharacterSnapshot {
    fn from(character: &Character) -> Self {
        Self {
            unit: CombatantSnapshot::from(&character.unit),
            energy: character.energy.current,
            max_energy: character.energy.maximum,
            hand: character.piles.hand().to_vec(),
            draw_pile: character.piles.draw_pile().len(),
            discard_pile: character.piles.discard_pile().len(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemySnapshot {
    pub unit: CombatantSnapshot,
    pub kind: EnemyKindId,
    pub intent: Intent,
}

impl From<&Enemy> for EnemySnapshot {
    fn from(enemy: &Enemy) -> Self {
        Self {
            unit: CombatantSnapshot::from(&enemy.unit),
            kind: enemy.kind.clone(),
            intent: enemy.intent,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSnapshot {
    pub floor: u32,
    pub round: u32,
    pub phase: Phase,
    pub player: CharacterSnapshot,
    pub enemies: Vec<EnemySnapshot>,
    pub selection: Option<CardInstanceId>,
}

impl BattleState {
    pub fn snapshot(&self) -> BattleSnapshot {
        BattleSnapshot {
            floor: self.floor,
            round: self.turn.round,
            phase: self.turn.phase,
            player: CharacterSnapshot::from(&self.player),
            enemies: self.enemies.iter().map(EnemySnapshot::from).collect(),
            selection: self.selection,
        }
    }
}
