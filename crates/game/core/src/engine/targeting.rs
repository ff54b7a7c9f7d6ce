//! Target validation shared by cards, abilities and the query surface.

use std::collections::BTreeSet;

use crate::effect::{EffectKind, EffectTemplate, TargetSelector};
use crate::grid::{Position, distance, reachable};
use crate::state::{BattleState, EntityId};

use super::errors::ValidationError;

/// What a command points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetRef {
    Entity(EntityId),
    Tile(Position),
}

impl From<EntityId> for TargetRef {
    fn from(id: EntityId) -> Self {
        Self::Entity(id)
    }
}

impl From<Position> for TargetRef {
    fn from(position: Position) -> Self {
        Self::Tile(position)
    }
}

/// A validated target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Resolved {
    Nothing,
    Entity(EntityId),
    Tile(Position),
}

/// Targeting requirements of an effect list.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Reach {
    pub wants_entity: bool,
    pub wants_tile: bool,
    /// Attack range for entity targets.
    pub range: u32,
    /// Movement budget for tile targets.
    pub steps: u32,
}

impl Reach {
    /// A `Move` magnitude of zero uses the caster's movement range. Tile
    /// targeting takes precedence when a list wants both.
    pub fn of(
        state: &BattleState,
        caster: EntityId,
        effects: &[EffectTemplate],
        range_override: Option<u32>,
    ) -> Self {
        let (attack_range, move_range) = state
            .combatant(caster)
            .map_or((0, 0), |unit| (unit.attack_range, unit.move_range));
        let steps = effects
            .iter()
            .filter(|e| e.kind == EffectKind::Move)
            .map(|e| if e.magnitude == 0 { move_range } else { e.magnitude })
            .max()
            .unwrap_or(move_range);

        Self {
            wants_entity: effects.iter().any(|e| e.target == TargetSelector::Target),
            wants_tile: effects.iter().any(|e| e.target == TargetSelector::Tile),
            range: range_override.unwrap_or(attack_range),
            steps,
        }
    }
}

/// Tiles `caster` may move to with `steps`.
pub(crate) fn movement_tiles(state: &BattleState, caster: EntityId, steps: u32) -> BTreeSet<Position> {
    let Some(unit) = state.combatant(caster) else {
        return BTreeSet::new();
    };
    reachable(
        state.battlefield.dimensions(),
        unit.position,
        steps,
        &state.battlefield.blocked_except(caster),
    )
}

/// Living opponents of `caster` within `range`.
pub(crate) fn targets_in_range(state: &BattleState, caster: EntityId, range: u32) -> Vec<EntityId> {
    let Some(origin) = state.combatant(caster).map(|unit| unit.position) else {
        return Vec::new();
    };
    state
        .opponents_of(caster)
        .into_iter()
        .filter(|id| {
            state
                .combatant(*id)
                .is_some_and(|unit| distance(origin, unit.position) <= range)
        })
        .collect()
}

pub(crate) fn resolve(
    state: &BattleState,
    caster: EntityId,
    reach: Reach,
    target: Option<TargetRef>,
) -> Result<Resolved, ValidationError> {
    if reach.wants_tile {
        let position = match target {
            Some(TargetRef::Tile(position)) => position,
            Some(TargetRef::Entity(id)) => return Err(ValidationError::InvalidTarget(id)),
            None => return Err(ValidationError::MissingTarget),
        };
        if !movement_tiles(state, caster, reach.steps).contains(&position) {
            return Err(ValidationError::TileUnreachable(position));
        }
        return Ok(Resolved::Tile(position));
    }

    if reach.wants_entity {
        let id = match target {
            Some(TargetRef::Entity(id)) => id,
            Some(TargetRef::Tile(position)) => state
                .entity_at(position)
                .ok_or(ValidationError::EmptyTile(position))?,
            None => return Err(ValidationError::MissingTarget),
        };
        if !state.opponents_of(caster).contains(&id) {
            return Err(ValidationError::InvalidTarget(id));
        }
        let (Some(from), Some(to)) = (state.combatant(caster), state.combatant(id)) else {
            return Err(ValidationError::InvalidTarget(id));
        };
        let gap = distance(from.position, to.position);
        if gap > reach.range {
            return Err(ValidationError::TargetOutOfRange {
                target: id,
                distance: gap,
                range: reach.range,
            });
        }
        return Ok(Resolved::Entity(id));
    }

    Ok(Resolved::Nothing)
}
