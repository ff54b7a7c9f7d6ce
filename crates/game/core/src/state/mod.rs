//! Battle state: the single aggregate every command mutates.
//!
//! [`BattleState`] owns the battlefield, the player and the enemy roster.
//! Only the engine mutates it; presentation reads a [`BattleSnapshot`].
mod common;
mod entity;
mod snapshot;
mod turn;

pub use common::{
    AbilityId, CardId, CardInstanceId, CharacterId, EnemyKindId, EntityId, ResourceMeter,
};
pub use entity::{Character, Combatant, Enemy, Intent};
pub use snapshot::{
    AbilitySnapshot, BattleSnapshot, CharacterSnapshot, CombatantSnapshot, EffectSnapshot,
    EnemySnapshot,
};
pub use turn::{Phase, TurnState};

use tracing::warn;

use crate::config::BattleConfig;
use crate::env::{SHUFFLE_CONTEXT, compute_seed};
use crate::grid::{Battlefield, Position};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleState {
    pub config: BattleConfig,
    pub turn: TurnState,
    /// Current floor, starting at 1.
    pub floor: u32,
    pub floors_cleared: u32,
    pub battlefield: Battlefield,
    pub player: Character,
    /// Living enemies in action order.
    pub enemies: Vec<Enemy>,
    /// Card chosen with `SelectCard`, cleared when played or at end of turn.
    pub selection: Option<CardInstanceId>,
    next_enemy_id: u32,
    shuffle_nonce: u64,
}

impl BattleState {
    pub fn new(config: BattleConfig, player: Character, battlefield: Battlefield) -> Self {
        Self {
            config,
            turn: TurnState::new(),
            floor: 1,
            floors_cleared: 0,
            battlefield,
            player,
            enemies: Vec::new(),
            selection: None,
            next_enemy_id: EntityId::PLAYER.0 + 1,
            shuffle_nonce: 0,
        }
    }

    /// Hands out a fresh enemy id. Ids are never reused within a run.
    pub fn allocate_enemy_id(&mut self) -> EntityId {
        let id = EntityId(self.next_enemy_id);
        self.next_enemy_id += 1;
        id
    }

    /// Seed for the next deck shuffle.
    pub fn next_shuffle_seed(&mut self) -> u64 {
        let seed = compute_seed(
            self.config.seed,
            self.shuffle_nonce,
            EntityId::PLAYER.0,
            SHUFFLE_CONTEXT,
        );
        self.shuffle_nonce += 1;
        seed
    }

    pub fn phase(&self) -> Phase {
        self.turn.phase
    }

    pub fn combatant(&self, id: EntityId) -> Option<&Combatant> {
        if id.is_player() {
            return Some(&self.player.unit);
        }
        self.enemy(id).map(|enemy| &enemy.unit)
    }

    pub fn combatant_mut(&mut self, id: EntityId) -> Option<&mut Combatant> {
        if id.is_player() {
            return Some(&mut self.player.unit);
        }
        self.enemy_mut(id).map(|enemy| &mut enemy.unit)
    }

    pub fn enemy(&self, id: EntityId) -> Option<&Enemy> {
        self.enemies.iter().find(|enemy| enemy.unit.id == id)
    }

    pub fn enemy_mut(&mut self, id: EntityId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|enemy| enemy.unit.id == id)
    }

    pub fn enemy_ids(&self) -> Vec<EntityId> {
        self.enemies.iter().map(|enemy| enemy.unit.id).collect()
    }

    /// Living combatants: the player first, then enemies in action order.
    pub fn living_ids(&self) -> Vec<EntityId> {
        std::iter::once(&self.player.unit)
            .chain(self.enemies.iter().map(|enemy| &enemy.unit))
            .filter(|unit| unit.is_alive())
            .map(|unit| unit.id)
            .collect()
    }

    /// Living opponents of `id`.
    pub fn opponents_of(&self, id: EntityId) -> Vec<EntityId> {
        if id.is_player() {
            return self
                .enemies
                .iter()
                .filter(|enemy| enemy.unit.is_alive())
                .map(|enemy| enemy.unit.id)
                .collect();
        }
        if self.player.unit.is_alive() {
            vec![EntityId::PLAYER]
        } else {
            Vec::new()
        }
    }

    pub fn entity_at(&self, position: Position) -> Option<EntityId> {
        self.battlefield.occupant(position)
    }

    /// Checks state invariants. Debug builds assert; release builds clamp
    /// where possible and log. Returns the number of repairs made.
    pub fn enforce_invariants(&mut self) -> usize {
        let mut repairs = 0;

        let player = &mut self.player;
        for (what, meter) in [
            ("health", &mut player.unit.health),
            ("energy", &mut player.energy),
        ] {
            debug_assert!(meter.current <= meter.maximum, "player {what} above maximum");
            if meter.clamp() {
                warn!(target: "tactics::invariant", what, "clamped player meter");
                repairs += 1;
            }
        }

        debug_assert!(
            player.piles.is_conserved(),
            "pile conservation broken: {} cards tracked for deck of {}",
            player.piles.hand().len()
                + player.piles.draw_pile().len()
                + player.piles.discard_pile().len(),
            player.piles.deck_size()
        );
        if !player.piles.is_conserved() {
            warn!(target: "tactics::invariant", "pile conservation broken");
        }

        for enemy in &mut self.enemies {
            debug_assert!(
                enemy.unit.health.current <= enemy.unit.health.maximum,
                "enemy {} health above maximum",
                enemy.unit.id
            );
            if enemy.unit.health.clamp() {
                warn!(target: "tactics::invariant", enemy = %enemy.unit.id, "clamped enemy health");
                repairs += 1;
            }
        }

        let before = self.enemies.len();
        let battlefield = &mut self.battlefield;
        self.enemies.retain(|enemy| {
            let alive = enemy.unit.is_alive();
            if !alive {
                battlefield.remove(enemy.unit.id);
            }
            alive
        });
        let removed = before - self.enemies.len();
        debug_assert_eq!(removed, 0, "dead enemies left in roster");
        if removed > 0 {
            warn!(target: "tactics::invariant", removed, "removed dead enemies");
            repairs += removed;
        }

        repairs
    }
}
