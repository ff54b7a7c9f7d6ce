//! Greedy enemy policy.
//!
//! Attack when the player is within attack range, otherwise step to the
//! reachable tile closest to the player. Ties go to the first candidate in
//! coordinate order, which keeps decisions deterministic.

use crate::combat::{DamageSource, preview_damage};
use crate::effect::EffectKind;
use crate::env::ElementChart;
use crate::grid::{Position, distance, reachable};
use crate::state::{BattleState, EntityId, Intent};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Attack { target: EntityId },
    Move { to: Position },
    Idle,
}

/// Picks the next action for `enemy`. Dead or missing enemies idle.
pub fn decide(state: &BattleState, enemy: EntityId) -> Decision {
    let Some(actor) = state.enemy(enemy).map(|e| &e.unit) else {
        return Decision::Idle;
    };
    let player = &state.player.unit;
    if !actor.is_alive() || !player.is_alive() {
        return Decision::Idle;
    }

    if distance(actor.position, player.position) <= actor.attack_range {
        return Decision::Attack {
            target: EntityId::PLAYER,
        };
    }

    let blocked = state.battlefield.blocked_except(enemy);
    let candidates = reachable(
        state.battlefield.dimensions(),
        actor.position,
        actor.move_range,
        &blocked,
    );
    candidates
        .into_iter()
        .min_by_key(|tile| distance(*tile, player.position))
        .map_or(Decision::Idle, |to| Decision::Move { to })
}

/// Intent shown for `enemy`, including the damage it would deal right now.
pub fn declare_intent(state: &BattleState, enemy: EntityId, chart: &dyn ElementChart) -> Intent {
    let Some(actor) = state.enemy(enemy) else {
        return Intent::Idle;
    };
    if actor.unit.effects.has(EffectKind::Stun) {
        return Intent::Stunned;
    }
    match decide(state, enemy) {
        Decision::Attack { target } => {
            let amount = state.combatant(target).map_or(0, |victim| {
                preview_damage(
                    victim,
                    actor.attack_damage,
                    DamageSource::from_attacker(&actor.unit),
                    chart,
                )
            });
            Intent::Attack { target, amount }
        }
        Decision::Move { to } => Intent::Move { to },
        Decision::Idle => Intent::Idle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Piles;
    use crate::config::BattleConfig;
    use crate::effect::EffectLedger;
    use crate::env::StandardElementChart;
    use crate::grid::{Battlefield, GridDimensions};
    use crate::state::{Character, CharacterId, Combatant, Enemy, EnemyKindId, ResourceMeter};

    fn unit(id: EntityId, position: Position, move_range: u32) -> Combatant {
        Combatant {
            id,
            name: format!("unit {id}"),
            element: Default::default(),
            health: ResourceMeter::full(20),
            position,
            move_range,
            attack_range: 1,
            effects: EffectLedger::new(),
            abilities: Vec::new(),
        }
    }

    fn battle(enemies: &[(Position, u32)]) -> BattleState {
        let player = Character {
            unit: unit(EntityId::PLAYER, Position::ORIGIN, 2),
            energy: ResourceMeter::full(3),
            piles: Piles::new(Vec::new()),
            template: CharacterId::from("hero"),
        };
        let mut state = BattleState::new(
            BattleConfig::default(),
            player,
            Battlefield::new(GridDimensions::new(6, 6)),
        );
        state
            .battlefield
            .place(EntityId::PLAYER, Position::ORIGIN)
            .expect("player tile");
        for &(position, move_range) in enemies {
            let id = state.allocate_enemy_id();
            state.battlefield.place(id, position).expect("enemy tile");
            state.enemies.push(Enemy {
                unit: unit(id, position, move_range),
                kind: EnemyKindId::from("rat"),
                attack_damage: 6,
                intent: Intent::Idle,
            });
        }
        state
    }

    #[test]
    fn adjacent_enemy_attacks() {
        let state = battle(&[(Position::new(1, 0), 1)]);
        let enemy = state.enemies[0].unit.id;
        assert_eq!(
            decide(&state, enemy),
            Decision::Attack {
                target: EntityId::PLAYER
            }
        );
        assert_eq!(
            declare_intent(&state, enemy, &StandardElementChart),
            Intent::Attack {
                target: EntityId::PLAYER,
                amount: 6
            }
        );
    }

    #[test]
    fn distant_enemy_steps_toward_player() {
        let state = battle(&[(Position::new(4, 0), 2)]);
        let enemy = state.enemies[0].unit.id;
        assert_eq!(
            decide(&state, enemy),
            Decision::Move {
                to: Position::new(2, 0)
            }
        );
    }

    #[test]
    fn occupied_tiles_are_not_candidates() {
        // (1, 0) is taken, so the closest free tile is around the corner
        let state = battle(&[(Position::new(1, 0), 1), (Position::new(2, 0), 2)]);
        let second = state.enemies[1].unit.id;
        assert_eq!(
            decide(&state, second),
            Decision::Move {
                to: Position::new(1, 1)
            }
        );
    }

    #[test]
    fn enemy_without_moves_idles() {
        let state = battle(&[(Position::new(5, 5), 0)]);
        let enemy = state.enemies[0].unit.id;
        assert_eq!(decide(&state, enemy), Decision::Idle);
        assert_eq!(decide(&state, EntityId(99)), Decision::Idle);
    }

    #[test]
    fn stunned_enemy_declares_stun() {
        let mut state = battle(&[(Position::new(1, 0), 1)]);
        state.enemies[0]
            .unit
            .effects
            .apply(EffectKind::Stun, 1, Some(1));
        let enemy = state.enemies[0].unit.id;
        assert_eq!(
            declare_intent(&state, enemy, &StandardElementChart),
            Intent::Stunned
        );
    }
}
