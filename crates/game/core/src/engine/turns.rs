//! Turn cycle: player turn start, the enemy phase and round advancement.

use tracing::{debug, info, warn};

use crate::ai::{self, Decision};
use crate::effect::EffectKind;
use crate::env::GameEnv;
use crate::event::Event;
use crate::state::{BattleState, EntityId, Phase};

use super::resolve::{
    declare_intents, draw_cards, move_entity, push_energy, refresh_passives, strike, tick_unit,
};

/// Starts a player turn: refill energy, tick effects and cooldowns, draw.
///
/// The first player turn of a battle draws nothing; the starting hand
/// covers it.
pub(crate) fn start_player_turn(state: &mut BattleState, env: &GameEnv<'_>, events: &mut Vec<Event>) {
    state.turn.phase = Phase::PlayerTurn;
    state.turn.player_turns += 1;
    events.push(Event::TurnChanged {
        phase: Phase::PlayerTurn,
        round: state.turn.round,
    });

    state.player.energy.refill();
    push_energy(state, events);

    tick_unit(state, EntityId::PLAYER, events);
    if state.turn.phase.is_battle_over() {
        return;
    }

    if !state.turn.is_first_player_turn() {
        let count = state.config.cards_per_turn;
        draw_cards(state, env, count, events);
    }

    refresh_passives(state, events);
    declare_intents(state, env, events);
    debug!(round = state.turn.round, "player turn started");
}

/// Ends the player turn, runs every enemy, then starts the next player turn.
pub(crate) fn end_player_turn(state: &mut BattleState, env: &GameEnv<'_>, events: &mut Vec<Event>) {
    state.selection = None;
    state.turn.phase = Phase::EnemyTurn;
    events.push(Event::TurnChanged {
        phase: Phase::EnemyTurn,
        round: state.turn.round,
    });

    run_enemy_phase(state, env, events);
    if state.turn.phase.is_battle_over() {
        return;
    }

    state.turn.round += 1;
    start_player_turn(state, env, events);
}

/// Every living enemy acts once, in roster order.
///
/// A stunned enemy still ticks (which may clear the stun) but skips its action.
fn run_enemy_phase(state: &mut BattleState, env: &GameEnv<'_>, events: &mut Vec<Event>) {
    for enemy in state.enemy_ids() {
        if state.turn.phase.is_battle_over() {
            break;
        }
        let Some(actor) = state.enemy(enemy) else {
            continue;
        };
        let stunned = actor.unit.effects.has(EffectKind::Stun);

        tick_unit(state, enemy, events);
        if state.turn.phase.is_battle_over() {
            break;
        }
        let Some(actor) = state.enemy(enemy) else {
            continue;
        };
        if stunned {
            debug!(%enemy, "stunned, skipping action");
            continue;
        }
        let attack_damage = actor.attack_damage;

        let decision = ai::decide(state, enemy);
        debug!(%enemy, ?decision, "enemy decision");
        match decision {
            Decision::Attack { target } => {
                strike(state, env, Some(enemy), target, attack_damage, events);
                if !state.turn.phase.is_battle_over() {
                    refresh_passives(state, events);
                }
            }
            Decision::Move { to } => {
                if let Err(error) = move_entity(state, enemy, to, events) {
                    warn!(%enemy, %to, %error, "enemy move rejected by battlefield");
                }
            }
            Decision::Idle => {}
        }
    }

    if !state.turn.phase.is_battle_over() {
        info!(round = state.turn.round, "enemy phase finished");
    }
}
