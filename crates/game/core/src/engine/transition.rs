//! Command transition pipeline.

use crate::env::GameEnv;
use crate::event::Event;
use crate::state::BattleState;

use super::command::Command;
use super::errors::{CommandError, TransitionPhase, TransitionPhaseError};

/// Defines how a command mutates battle state.
///
/// `pre_validate` must reject every illegal command without touching state.
/// `apply` assumes `pre_validate` passed; it may still fail on content errors
/// discovered mid-way, in which case the engine restores the state it
/// snapshotted before the command. `post_validate` checks invariants.
pub trait CommandTransition {
    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &BattleState, _env: &GameEnv<'_>) -> Result<(), CommandError> {
        Ok(())
    }

    /// Applies the command, appending every event it causes.
    fn apply(
        &self,
        state: &mut BattleState,
        env: &GameEnv<'_>,
        events: &mut Vec<Event>,
    ) -> Result<(), CommandError>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, state: &BattleState, _env: &GameEnv<'_>) -> Result<(), CommandError> {
        debug_assert!(
            state.player.piles.is_conserved(),
            "pile conservation broken"
        );
        debug_assert!(
            state.player.energy.current <= state.player.energy.maximum,
            "energy above maximum"
        );
        debug_assert!(
            state.enemies.iter().all(|enemy| enemy.unit.is_alive()),
            "dead enemy left in roster"
        );
        Ok(())
    }
}

/// Runs a transition through pre_validate → apply → post_validate.
#[inline]
fn drive_transition<T>(
    transition: &T,
    state: &mut BattleState,
    env: &GameEnv<'_>,
    events: &mut Vec<Event>,
) -> Result<(), TransitionPhaseError<CommandError>>
where
    T: CommandTransition,
{
    transition
        .pre_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    transition
        .apply(state, env, events)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))
}

/// Routes a command to its transition.
pub(super) fn execute_command(
    command: &Command,
    state: &mut BattleState,
    env: &GameEnv<'_>,
    events: &mut Vec<Event>,
) -> Result<(), TransitionPhaseError<CommandError>> {
    match command {
        Command::SelectCard(transition) => drive_transition(transition, state, env, events),
        Command::PlayCard(transition) => drive_transition(transition, state, env, events),
        Command::UseAbility(transition) => drive_transition(transition, state, env, events),
        Command::ReverseCard(transition) => drive_transition(transition, state, env, events),
        Command::EndTurn(transition) => drive_transition(transition, state, env, events),
        Command::AdvanceFloor(transition) => drive_transition(transition, state, env, events),
    }
}
