use crate::ability::AbilityState;
use crate::card::Piles;
use crate::effect::EffectLedger;
use crate::env::Element;
use crate::grid::Position;

use super::{AbilityId, CharacterId, EnemyKindId, EntityId, ResourceMeter};

/// State shared by the player character and enemies.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub id: EntityId,
    pub name: String,
    pub element: Element,
    pub health: ResourceMeter,
    pub position: Position,
    pub move_range: u32,
    pub attack_range: u32,
    pub effects: EffectLedger,
    pub abilities: Vec<AbilityState>,
}

impl Combatant {
    pub fn is_alive(&self) -> bool {
        !self.health.is_empty()
    }

    pub fn ability(&self, id: &AbilityId) -> Option<&AbilityState> {
        self.abilities.iter().find(|a| a.id() == id)
    }

    pub fn ability_mut(&mut self, id: &AbilityId) -> Option<&mut AbilityState> {
        self.abilities.iter_mut().find(|a| a.id() == id)
    }

    pub fn tick_cooldowns(&mut self) {
        for ability in &mut self.abilities {
            ability.tick_cooldown();
        }
    }

    /// Clears battle-local state: effects, cooldowns and passive flags.
    pub fn reset_for_battle(&mut self) {
        self.effects.clear();
        for ability in &mut self.abilities {
            ability.reset();
        }
    }
}

/// The controllable character.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    pub unit: Combatant,
    pub energy: ResourceMeter,
    pub piles: Piles,
    pub template: CharacterId,
}

impl Character {
    /// Pays `cost` energy. Fails without change if there is not enough.
    pub fn spend_energy(&mut self, cost: u32) -> Result<(), u32> {
        if self.energy.current < cost {
            return Err(self.energy.current);
        }
        self.energy.drain(cost);
        Ok(())
    }
}

/// What an enemy will do on its next action.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Intent {
    Attack {
        target: EntityId,
        amount: u32,
    },
    Move {
        to: Position,
    },
    Stunned,
    #[default]
    Idle,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Enemy {
    pub unit: Combatant,
    pub kind: EnemyKindId,
    pub attack_damage: u32,
    pub intent: Intent,
}
