//! Effect resolution against battle state.
//!
//! Everything here runs inside a command's `apply` phase and appends to the
//! command's event list. Deaths are handled as soon as they happen: the dead
//! entity leaves the battlefield and the roster before the next effect
//! resolves, and the victory/defeat check runs right after.

use tracing::{debug, info};

use crate::ability::PassiveShift;
use crate::ai;
use crate::combat::{self, AppliedEffect, DamageSource};
use crate::effect::{EffectKind, EffectTemplate, TargetSelector};
use crate::env::GameEnv;
use crate::event::{BattleOutcome, Event};
use crate::grid::{PlacementError, Position};
use crate::state::{BattleState, Combatant, EntityId, Phase};

use super::errors::{CommandError, ValidationError};
use super::targeting::Resolved;

/// Resolves an effect list cast by `caster`, in order.
///
/// Stops early once the battle is decided or the caster is dead.
pub(crate) fn resolve_effects(
    state: &mut BattleState,
    env: &GameEnv<'_>,
    caster: EntityId,
    effects: &[EffectTemplate],
    target: Resolved,
    events: &mut Vec<Event>,
) -> Result<(), CommandError> {
    for effect in effects {
        if state.turn.phase.is_battle_over() {
            break;
        }
        if !state.combatant(caster).is_some_and(Combatant::is_alive) {
            break;
        }

        let recipients = match effect.target {
            TargetSelector::Caster => vec![caster],
            TargetSelector::Target => match target {
                Resolved::Entity(id) => vec![id],
                _ => Vec::new(),
            },
            TargetSelector::AllEnemies => state.opponents_of(caster),
            TargetSelector::Tile => Vec::new(),
        };

        match effect.kind {
            EffectKind::Damage => {
                for id in recipients {
                    strike(state, env, Some(caster), id, effect.magnitude, events);
                }
            }
            EffectKind::Heal => {
                for id in recipients {
                    heal(state, id, effect.magnitude, events);
                }
            }
            EffectKind::GainEnergy => {
                if recipients.contains(&EntityId::PLAYER) {
                    state.player.energy.restore(effect.magnitude);
                    push_energy(state, events);
                }
            }
            EffectKind::Draw => {
                if caster.is_player() {
                    draw_cards(state, env, effect.magnitude as usize, events);
                }
            }
            EffectKind::Move => {
                if let Resolved::Tile(to) = target {
                    move_entity(state, caster, to, events)
                        .map_err(|_| ValidationError::TileUnreachable(to))?;
                }
            }
            EffectKind::DiscardHand => {
                if caster.is_player() {
                    let count = state.player.piles.discard_hand();
                    events.push(Event::HandDiscarded { count });
                }
            }
            EffectKind::ReverseHand => {
                if caster.is_player() {
                    for (card, orientation) in state.player.piles.reverse_hand() {
                        events.push(Event::CardReversed { card, orientation });
                    }
                }
            }
            EffectKind::Shield
            | EffectKind::DamageOverTime
            | EffectKind::DamageBoost
            | EffectKind::Vulnerable
            | EffectKind::Stun => {
                for id in recipients {
                    apply_status(state, id, effect, events);
                }
            }
        }

        if effect.kind.touches_resources() {
            refresh_passives(state, events);
        }
    }

    Ok(())
}

/// Deals scaled, shield-absorbed damage and handles a resulting death.
pub(crate) fn strike(
    state: &mut BattleState,
    env: &GameEnv<'_>,
    source: Option<EntityId>,
    target: EntityId,
    raw: u32,
    events: &mut Vec<Event>,
) {
    let damage_source = source
        .and_then(|id| state.combatant(id))
        .map(DamageSource::from_attacker)
        .unwrap_or_default();
    let Some(victim) = state.combatant_mut(target).filter(|unit| unit.is_alive()) else {
        return;
    };

    let report = combat::damage(victim, raw, damage_source, env);
    events.push(Event::Damaged {
        target,
        source,
        amount: report.dealt,
        absorbed: report.absorbed,
        remaining: victim.health.current,
    });
    if report.shield_broken {
        events.push(Event::EffectExpired {
            target,
            kind: EffectKind::Shield,
        });
    }
    if report.died {
        on_death(state, target, events);
    }
}

fn heal(state: &mut BattleState, target: EntityId, amount: u32, events: &mut Vec<Event>) {
    let Some(unit) = state.combatant_mut(target) else {
        return;
    };
    let applied = combat::heal(unit, amount);
    events.push(Event::Healed {
        target,
        amount: applied,
        remaining: unit.health.current,
    });
}

fn apply_status(
    state: &mut BattleState,
    target: EntityId,
    template: &EffectTemplate,
    events: &mut Vec<Event>,
) {
    let Some(unit) = state.combatant_mut(target).filter(|unit| unit.is_alive()) else {
        return;
    };
    if let AppliedEffect::Stored {
        kind,
        magnitude,
        duration,
    } = combat::apply_effect(unit, template, None)
    {
        events.push(Event::EffectApplied {
            target,
            kind,
            magnitude,
            duration,
        });
    }
}

pub(crate) fn push_energy(state: &BattleState, events: &mut Vec<Event>) {
    events.push(Event::EnergyChanged {
        current: state.player.energy.current,
        maximum: state.player.energy.maximum,
    });
}

/// Draws for the player, reshuffling the discard pile if needed.
pub(crate) fn draw_cards(
    state: &mut BattleState,
    env: &GameEnv<'_>,
    count: usize,
    events: &mut Vec<Event>,
) {
    if count == 0 {
        return;
    }
    let seed = state.next_shuffle_seed();
    let limit = state.config.hand_limit();
    let report = state.player.piles.draw(count, limit, env.rng(), seed);

    if let Some(cards) = report.reshuffled {
        events.push(Event::DeckReshuffled { cards });
    }
    for card in report.drawn {
        events.push(Event::CardDrawn { card });
    }
    if report.dropped > 0 {
        debug!(dropped = report.dropped, "hand full, draws skipped");
    }
}

/// Moves an entity on the battlefield and updates its position.
pub(crate) fn move_entity(
    state: &mut BattleState,
    entity: EntityId,
    to: Position,
    events: &mut Vec<Event>,
) -> Result<(), PlacementError> {
    let Some(from) = state.combatant(entity).map(|unit| unit.position) else {
        return Ok(());
    };
    if from == to {
        return Ok(());
    }
    state.battlefield.relocate(entity, from, to)?;
    if let Some(unit) = state.combatant_mut(entity) {
        unit.position = to;
    }
    events.push(Event::Moved { entity, from, to });
    Ok(())
}

/// Removes a dead entity and decides the battle if that was the last enemy
/// or the player.
pub(crate) fn on_death(state: &mut BattleState, entity: EntityId, events: &mut Vec<Event>) {
    events.push(Event::EntityDied { entity });
    state.battlefield.remove(entity);

    if entity.is_player() {
        if !state.turn.phase.is_battle_over() {
            state.turn.phase = Phase::Defeat;
            info!(floor = state.floor, "player defeated");
            events.push(Event::BattleEnded {
                outcome: BattleOutcome::Defeat { floor: state.floor },
            });
        }
        return;
    }

    state.enemies.retain(|enemy| enemy.unit.id != entity);
    debug!(%entity, left = state.enemies.len(), "enemy removed");

    if state.enemies.is_empty() && !state.turn.phase.is_battle_over() {
        state.turn.phase = Phase::Victory;
        state.floors_cleared += 1;
        info!(floor = state.floor, "floor cleared");
        events.push(Event::BattleEnded {
            outcome: BattleOutcome::Victory { floor: state.floor },
        });
    }
}

/// Ticks one combatant's effects and cooldowns at the start of its turn.
///
/// Damage over time lands before expired buckets are reported.
pub(crate) fn tick_unit(state: &mut BattleState, entity: EntityId, events: &mut Vec<Event>) {
    let Some(unit) = state.combatant_mut(entity).filter(|unit| unit.is_alive()) else {
        return;
    };
    let report = unit.effects.tick();
    unit.tick_cooldowns();

    let mut died = false;
    if report.dot_damage > 0 {
        let damage = combat::direct_damage(unit, report.dot_damage);
        died = damage.died;
        events.push(Event::Damaged {
            target: entity,
            source: None,
            amount: damage.dealt,
            absorbed: 0,
            remaining: unit.health.current,
        });
    }
    for kind in report.expired {
        events.push(Event::EffectExpired {
            target: entity,
            kind,
        });
    }
    for (kind, magnitude) in report.reduced {
        events.push(Event::EffectApplied {
            target: entity,
            kind,
            magnitude,
            duration: None,
        });
    }

    if died {
        on_death(state, entity, events);
    } else {
        refresh_passives(state, events);
    }
}

/// Re-evaluates every passive of every living combatant.
///
/// Activation grants the ability's ledger effects to its owner, attributed to
/// the ability. Retraction removes exactly those contributions. Passives are
/// checked at setup to only carry self-targeted ledger effects.
pub(crate) fn refresh_passives(state: &mut BattleState, events: &mut Vec<Event>) {
    for entity in state.living_ids() {
        let energy = entity.is_player().then_some(state.player.energy);
        let Some(unit) = state.combatant_mut(entity) else {
            continue;
        };
        let Combatant {
            abilities,
            effects,
            health,
            ..
        } = unit;

        for ability in abilities.iter_mut() {
            let Some(shift) = ability.passive_shift(health, energy.as_ref()) else {
                continue;
            };
            let id = ability.template.id.clone();
            let active = shift == PassiveShift::Activate;
            ability.active = active;
            events.push(Event::PassiveToggled {
                entity,
                ability: id.clone(),
                active,
            });

            let persistent = ability
                .template
                .effects
                .iter()
                .filter(|effect| effect.is_self_grant());
            for effect in persistent {
                if active {
                    let bucket = effects.grant(effect.kind, effect.magnitude, &id);
                    events.push(Event::EffectApplied {
                        target: entity,
                        kind: effect.kind,
                        magnitude: bucket.magnitude(),
                        duration: bucket.duration(),
                    });
                    continue;
                }
                let (amount, _) = effects.retract(effect.kind, &id);
                if amount > 0 {
                    events.push(Event::EffectRetracted {
                        target: entity,
                        kind: effect.kind,
                        ability: id.clone(),
                        amount,
                    });
                }
            }
            debug!(%entity, ability = %id, ?shift, "passive toggled");
        }
    }
}

/// Re-declares every enemy intent, emitting an event for each change.
pub(crate) fn declare_intents(state: &mut BattleState, env: &GameEnv<'_>, events: &mut Vec<Event>) {
    for enemy in state.enemy_ids() {
        let intent = ai::declare_intent(state, enemy, env);
        let Some(actor) = state.enemy_mut(enemy) else {
            continue;
        };
        if actor.intent != intent {
            actor.intent = intent;
            events.push(Event::IntentDeclared { enemy, intent });
        }
    }
}
