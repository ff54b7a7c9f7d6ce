//! Read-only targeting queries for the presentation layer.
//!
//! Card queries fall back to the current selection when no card is given.

use std::collections::BTreeSet;

use crate::env::GameEnv;
use crate::grid::Position;
use crate::state::{AbilityId, BattleState, CardInstanceId, EntityId};

use super::command::card_in_hand;
use super::errors::{CommandError, ContentError, ValidationError};
use super::targeting::{Reach, movement_tiles, targets_in_range};

fn chosen_card(
    state: &BattleState,
    card: Option<CardInstanceId>,
) -> Result<CardInstanceId, ValidationError> {
    card.or(state.selection).ok_or(ValidationError::NoSelection)
}

fn card_reach(
    state: &BattleState,
    env: &GameEnv<'_>,
    card: Option<CardInstanceId>,
) -> Result<Reach, CommandError> {
    let id = chosen_card(state, card)?;
    let (instance, template) = card_in_hand(state, env, id)?;
    Ok(Reach::of(
        state,
        EntityId::PLAYER,
        template.effects_for(instance.orientation),
        template.range,
    ))
}

fn ability_reach(
    state: &BattleState,
    env: &GameEnv<'_>,
    ability: &AbilityId,
) -> Result<Reach, CommandError> {
    let Some(owned) = state.player.unit.ability(ability) else {
        return Err(match env.abilities()?.ability(ability) {
            Some(_) => ValidationError::AbilityNotOwned(ability.clone()).into(),
            None => ContentError::UnknownAbility(ability.clone()).into(),
        });
    };
    Ok(Reach::of(
        state,
        EntityId::PLAYER,
        &owned.template.effects,
        owned.template.range,
    ))
}

/// Entities the card could legally target. Empty if it takes no entity target.
pub fn valid_targets(
    state: &BattleState,
    env: &GameEnv<'_>,
    card: Option<CardInstanceId>,
) -> Result<Vec<EntityId>, CommandError> {
    let reach = card_reach(state, env, card)?;
    Ok(entity_targets(state, reach))
}

/// Tiles the card could move the player to. Empty if it takes no tile target.
pub fn reachable_tiles(
    state: &BattleState,
    env: &GameEnv<'_>,
    card: Option<CardInstanceId>,
) -> Result<BTreeSet<Position>, CommandError> {
    let reach = card_reach(state, env, card)?;
    Ok(tile_targets(state, reach))
}

pub fn ability_targets(
    state: &BattleState,
    env: &GameEnv<'_>,
    ability: &AbilityId,
) -> Result<Vec<EntityId>, CommandError> {
    let reach = ability_reach(state, env, ability)?;
    Ok(entity_targets(state, reach))
}

pub fn ability_tiles(
    state: &BattleState,
    env: &GameEnv<'_>,
    ability: &AbilityId,
) -> Result<BTreeSet<Position>, CommandError> {
    let reach = ability_reach(state, env, ability)?;
    Ok(tile_targets(state, reach))
}

fn entity_targets(state: &BattleState, reach: Reach) -> Vec<EntityId> {
    if reach.wants_tile || !reach.wants_entity {
        return Vec::new();
    }
    targets_in_range(state, EntityId::PLAYER, reach.range)
}

fn tile_targets(state: &BattleState, reach: Reach) -> BTreeSet<Position> {
    if !reach.wants_tile {
        return BTreeSet::new();
    }
    movement_tiles(state, EntityId::PLAYER, reach.steps)
}
