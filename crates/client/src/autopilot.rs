//! Scripted player used by headless runs.
//!
//! The autopilot only issues commands the engine would accept: it checks
//! cost and asks the engine for legal targets before each play.

use tactics_content::Catalog;
use tactics_core::{
    AbilityId, BattleEngine, BattleOutcome, BattleState, CardOracle, CommandOutcome, EffectKind,
    EffectTemplate, EntityId, Event, GameEnv, Phase, Position, TargetRef, TargetSelector,
};
use tracing::debug;

/// Upper bound on commands in one player turn. Draw effects can refill the
/// hand, so a turn is not otherwise guaranteed to run out of plays.
const MAX_ACTIONS_PER_TURN: usize = 32;

/// Command and event counters for a run.
#[derive(Debug, Default)]
pub struct Tally {
    pub commands: u32,
    pub rejected: u32,
    pub events: usize,
    pub last_outcome: Option<BattleOutcome>,
}

impl Tally {
    /// Logs the outcome's events and returns whether it was accepted.
    pub fn record(&mut self, outcome: &CommandOutcome) -> bool {
        self.commands += 1;
        if !outcome.accepted {
            self.rejected += 1;
        }
        self.observe(&outcome.events);
        outcome.accepted
    }

    pub fn observe(&mut self, events: &[Event]) {
        for event in events {
            debug!(?event, "event");
            if let Event::BattleEnded { outcome } = event {
                self.last_outcome = Some(*outcome);
            }
        }
        self.events += events.len();
    }
}

pub struct Autopilot<'c> {
    catalog: &'c Catalog,
}

impl<'c> Autopilot<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self { catalog }
    }

    /// Spends the turn on ready abilities, then affordable cards, then ends it.
    pub fn take_turn(&self, engine: &mut BattleEngine<'_>, env: GameEnv<'_>, tally: &mut Tally) {
        for _ in 0..MAX_ACTIONS_PER_TURN {
            if engine.state().phase() != Phase::PlayerTurn {
                return;
            }
            if engine.state().player.unit.effects.has(EffectKind::Stun) {
                debug!("stunned, ending turn");
                break;
            }
            if !self.use_ability(engine, env, tally) && !self.play_card(engine, env, tally) {
                break;
            }
        }
        if engine.state().phase() == Phase::PlayerTurn {
            tally.record(&engine.end_turn(env));
        }
    }

    fn use_ability(&self, engine: &mut BattleEngine<'_>, env: GameEnv<'_>, tally: &mut Tally) -> bool {
        let state = engine.state();
        let energy = state.player.energy.current;
        let ready: Vec<AbilityId> = state
            .player
            .unit
            .abilities
            .iter()
            .filter(|ability| {
                !ability.is_passive() && ability.is_ready() && ability.template.cost <= energy
            })
            .map(|ability| ability.id().clone())
            .collect();

        for ability in ready {
            let Some(effects) = engine
                .state()
                .player
                .unit
                .ability(&ability)
                .map(|owned| owned.template.effects.clone())
            else {
                continue;
            };
            let target = if wants_tile(&effects) {
                let Ok(tiles) = engine.ability_tiles(env, &ability) else {
                    continue;
                };
                match approach(engine.state(), tiles) {
                    Some(tile) => Some(TargetRef::Tile(tile)),
                    None => continue,
                }
            } else if wants_entity(&effects) {
                let Ok(targets) = engine.ability_targets(env, &ability) else {
                    continue;
                };
                match weakest(engine.state(), &targets) {
                    Some(id) => Some(TargetRef::Entity(id)),
                    None => continue,
                }
            } else {
                None
            };

            debug!(%ability, ?target, "autopilot uses ability");
            if tally.record(&engine.use_ability(env, ability, target)) {
                return true;
            }
        }
        false
    }

    fn play_card(&self, engine: &mut BattleEngine<'_>, env: GameEnv<'_>, tally: &mut Tally) -> bool {
        let energy = engine.state().player.energy.current;
        let hand: Vec<_> = engine
            .state()
            .player
            .piles
            .hand()
            .iter()
            .map(|card| (card.id, card.card.clone(), card.orientation))
            .collect();

        for (instance, card, orientation) in hand {
            let Some(template) = self.catalog.card(&card) else {
                continue;
            };
            if template.cost > energy {
                continue;
            }
            let effects = template.effects_for(orientation);

            let target = if wants_tile(effects) {
                let Ok(tiles) = engine.reachable_tiles(env, Some(instance)) else {
                    continue;
                };
                match approach(engine.state(), tiles) {
                    Some(tile) => Some(TargetRef::Tile(tile)),
                    None => continue,
                }
            } else if wants_entity(effects) {
                let Ok(targets) = engine.valid_targets(env, Some(instance)) else {
                    continue;
                };
                match weakest(engine.state(), &targets) {
                    Some(id) => Some(TargetRef::Entity(id)),
                    None => continue,
                }
            } else {
                None
            };

            debug!(%card, ?target, "autopilot plays card");
            if tally.record(&engine.play_card(env, instance, target)) {
                return true;
            }
        }
        false
    }
}

fn wants_tile(effects: &[EffectTemplate]) -> bool {
    effects.iter().any(|e| e.target == TargetSelector::Tile)
}

fn wants_entity(effects: &[EffectTemplate]) -> bool {
    effects.iter().any(|e| e.target == TargetSelector::Target)
}

/// Lowest-health candidate, roster order on ties.
fn weakest(state: &BattleState, candidates: &[EntityId]) -> Option<EntityId> {
    candidates
        .iter()
        .filter_map(|&id| state.combatant(id).map(|unit| (unit.health.current, id)))
        .min_by_key(|&(health, _)| health)
        .map(|(_, id)| id)
}

/// Tile closest to any enemy, only if it is closer than where the player
/// already stands.
fn approach(state: &BattleState, tiles: impl IntoIterator<Item = Position>) -> Option<Position> {
    let gap = |from: Position| {
        state
            .enemies
            .iter()
            .map(|enemy| enemy.unit.position.distance_to(from))
            .min()
            .unwrap_or(0)
    };
    let current = gap(state.player.unit.position);
    tiles
        .into_iter()
        .map(|tile| (gap(tile), tile))
        .filter(|&(distance, _)| distance >= 1 && distance < current)
        .min()
        .map(|(_, tile)| tile)
}
