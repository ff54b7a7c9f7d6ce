//! Run and floor setup.
//!
//! A run starts on floor 1 with a character built from its template. Every
//! floor gets a fresh battlefield and roster. Health carries over between
//! floors; effects, cooldowns and passive state do not, and the whole deck is
//! reshuffled before the starting hand is drawn.

use tracing::info;

use crate::ability::AbilityState;
use crate::card::Piles;
use crate::config::BattleConfig;
use crate::effect::EffectLedger;
use crate::env::{FloorSpec, GameEnv};
use crate::event::{BattleOutcome, Event};
use crate::grid::{Battlefield, PlacementError, TerrainKind};
use crate::state::{
    AbilityId, BattleState, Character, CharacterId, Combatant, Enemy, EntityId, Intent, Phase,
    ResourceMeter, TurnState,
};

use super::errors::ContentError;
use super::resolve::draw_cards;
use super::turns::start_player_turn;

/// A freshly started run and the events of its opening.
#[derive(Clone, Debug)]
pub struct RunStart {
    pub state: BattleState,
    pub events: Vec<Event>,
}

/// Builds the character, enters floor 1 and starts the first player turn.
///
/// # Errors
///
/// Returns a [`ContentError`] if the character, any deck card, any ability,
/// floor 1 or any enemy it spawns is missing from the catalogs.
pub fn begin_run(
    env: &GameEnv<'_>,
    config: BattleConfig,
    character: &CharacterId,
) -> Result<RunStart, ContentError> {
    let template = env
        .characters()?
        .character(character)
        .ok_or_else(|| ContentError::UnknownCharacter(character.clone()))?;

    let cards = env.cards()?;
    if let Some(missing) = template.deck.iter().find(|id| cards.card(id).is_none()) {
        return Err(ContentError::UnknownCard(missing.clone()));
    }
    let floor = env
        .encounters()?
        .floor(1)
        .ok_or(ContentError::MissingFloor(1))?;

    let player = Character {
        unit: Combatant {
            id: EntityId::PLAYER,
            name: template.name.clone(),
            element: template.element,
            health: ResourceMeter::full(template.max_health),
            position: floor.player_start,
            move_range: template.move_range,
            attack_range: template.attack_range,
            effects: EffectLedger::new(),
            abilities: resolve_abilities(env, &template.abilities)?,
        },
        energy: ResourceMeter::full(template.max_energy),
        piles: Piles::from_card_ids(&template.deck),
        template: template.id.clone(),
    };

    let mut state = BattleState::new(config, player, Battlefield::new(floor.dimensions));
    let mut events = Vec::new();
    populate_floor(&mut state, env, 1, floor)?;
    start_battle(&mut state, env, &mut events);

    info!(
        character = %template.id,
        deck = template.deck.len(),
        enemies = state.enemies.len(),
        "run started"
    );
    Ok(RunStart { state, events })
}

/// Moves a cleared run to its next floor, or completes it.
pub(crate) fn advance_floor(
    state: &mut BattleState,
    env: &GameEnv<'_>,
    events: &mut Vec<Event>,
) -> Result<(), ContentError> {
    let next = state.floor + 1;
    let Some(floor) = env.encounters()?.floor(next) else {
        state.turn.phase = Phase::Cleared;
        info!(floors_cleared = state.floors_cleared, "run complete");
        events.push(Event::BattleEnded {
            outcome: BattleOutcome::RunComplete {
                floors_cleared: state.floors_cleared,
            },
        });
        return Ok(());
    };

    state.floor = next;
    state.player.unit.reset_for_battle();
    populate_floor(state, env, next, floor)?;
    start_battle(state, env, events);
    info!(floor = next, enemies = state.enemies.len(), "floor entered");
    Ok(())
}

fn resolve_abilities(
    env: &GameEnv<'_>,
    ids: &[AbilityId],
) -> Result<Vec<AbilityState>, ContentError> {
    let catalog = env.abilities()?;
    ids.iter()
        .map(|id| {
            let template = catalog
                .ability(id)
                .ok_or_else(|| ContentError::UnknownAbility(id.clone()))?;
            if let Some(effect) = template.ungrantable_effect() {
                return Err(ContentError::InvalidPassive {
                    ability: id.clone(),
                    kind: effect.kind,
                    target: effect.target,
                });
            }
            Ok(AbilityState::new(template.clone()))
        })
        .collect()
}

/// Replaces the battlefield and roster with those of `spec`.
fn populate_floor(
    state: &mut BattleState,
    env: &GameEnv<'_>,
    number: u32,
    spec: &FloorSpec,
) -> Result<(), ContentError> {
    state.battlefield = Battlefield::new(spec.dimensions)
        .with_terrain(TerrainKind::Wall, spec.walls.iter().copied())
        .with_terrain(TerrainKind::Pit, spec.pits.iter().copied());
    state.enemies.clear();
    state.selection = None;

    let placement = |entity: EntityId| {
        move |source: PlacementError| ContentError::InvalidPlacement {
            floor: number,
            entity,
            source,
        }
    };

    state
        .battlefield
        .place(EntityId::PLAYER, spec.player_start)
        .map_err(placement(EntityId::PLAYER))?;
    state.player.unit.position = spec.player_start;

    let catalog = env.enemies()?;
    for spawn in &spec.spawns {
        let template = catalog
            .enemy(&spawn.kind)
            .ok_or_else(|| ContentError::UnknownEnemy(spawn.kind.clone()))?;
        let id = state.allocate_enemy_id();
        state
            .battlefield
            .place(id, spawn.position)
            .map_err(placement(id))?;

        state.enemies.push(Enemy {
            unit: Combatant {
                id,
                name: template.name.clone(),
                element: template.element,
                health: ResourceMeter::full(template.max_health),
                position: spawn.position,
                move_range: template.move_range,
                attack_range: template.attack_range,
                effects: EffectLedger::new(),
                abilities: resolve_abilities(env, &template.abilities)?,
            },
            kind: template.id.clone(),
            attack_damage: template.attack_damage,
            intent: Intent::Idle,
        });
    }
    Ok(())
}

/// Deals the opening hand and starts the first player turn of a battle.
fn start_battle(state: &mut BattleState, env: &GameEnv<'_>, events: &mut Vec<Event>) {
    state.turn = TurnState::new();
    events.push(Event::FloorEntered { floor: state.floor });

    let seed = state.next_shuffle_seed();
    state.player.piles.reset_for_battle(env.rng(), seed);
    let count = state.config.starting_hand_size;
    draw_cards(state, env, count, events);

    if state.enemies.is_empty() {
        state.turn.phase = Phase::Victory;
        state.floors_cleared += 1;
        events.push(Event::BattleEnded {
            outcome: BattleOutcome::Victory { floor: state.floor },
        });
        return;
    }
    start_player_turn(state, env, events);
}
