//! Command execution pipeline and turn cycle.
//!
//! The [`BattleEngine`] is the only way battle state changes once a run has
//! begun. Every command flows through pre_validate → apply → post_validate;
//! a rejected command leaves the state exactly as it was and reports why.

mod command;
mod errors;
mod query;
mod resolve;
mod setup;
mod targeting;
mod transition;
mod turns;

pub use command::{AdvanceFloor, Command, EndTurn, PlayCard, ReverseCard, SelectCard, UseAbility};
pub use errors::{
    CommandError, ContentError, TransitionPhase, TransitionPhaseError, ValidationError,
};
pub use query::{ability_targets, ability_tiles, reachable_tiles, valid_targets};
pub use setup::{RunStart, begin_run};
pub use targeting::TargetRef;
pub use transition::CommandTransition;

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::config::BattleConfig;
use crate::env::GameEnv;
use crate::error::{ErrorSeverity, GameError};
use crate::event::Event;
use crate::grid::Position;
use crate::state::{
    AbilityId, BattleSnapshot, BattleState, CardInstanceId, CharacterId, EntityId,
};

/// Why a command was rejected, in a form the presentation layer can branch on.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Rejection {
    pub code: &'static str,
    pub severity: ErrorSeverity,
    pub phase: TransitionPhase,
}

/// Result of a single command.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CommandOutcome {
    pub accepted: bool,
    /// Human-readable rejection reason.
    pub reason: Option<String>,
    pub rejection: Option<Rejection>,
    /// Everything that happened, in order. Empty when rejected.
    pub events: Vec<Event>,
}

impl CommandOutcome {
    fn accepted(events: Vec<Event>) -> Self {
        Self {
            accepted: true,
            reason: None,
            rejection: None,
            events,
        }
    }

    fn rejected(failure: &TransitionPhaseError<CommandError>) -> Self {
        Self {
            accepted: false,
            reason: Some(failure.error.to_string()),
            rejection: Some(Rejection {
                code: failure.error.error_code(),
                severity: failure.error.severity(),
                phase: failure.phase,
            }),
            events: Vec::new(),
        }
    }

    /// Whether the rejection points at missing content rather than a
    /// player mistake.
    pub fn is_integrity_failure(&self) -> bool {
        self.rejection
            .as_ref()
            .is_some_and(|rejection| rejection.severity.is_integrity())
    }
}

/// Battle engine that validates and applies player commands.
pub struct BattleEngine<'a> {
    state: &'a mut BattleState,
}

impl<'a> BattleEngine<'a> {
    pub fn new(state: &'a mut BattleState) -> Self {
        Self { state }
    }

    /// Starts a new run. See [`begin_run`].
    pub fn begin_run(
        env: GameEnv<'_>,
        config: BattleConfig,
        character: &CharacterId,
    ) -> Result<RunStart, ContentError> {
        begin_run(&env, config, character)
    }

    /// Executes one command.
    ///
    /// On rejection the state is restored to what it was before the command
    /// and the outcome carries no events.
    pub fn execute(&mut self, env: GameEnv<'_>, command: &Command) -> CommandOutcome {
        let before = self.state.clone();
        let mut events = Vec::new();

        match transition::execute_command(command, self.state, &env, &mut events) {
            Ok(()) => {
                let repaired = self.state.enforce_invariants();
                debug!(
                    command = command.name(),
                    events = events.len(),
                    repaired,
                    phase = %self.state.turn.phase,
                    "command accepted"
                );
                CommandOutcome::accepted(events)
            }
            Err(failure) => {
                *self.state = before;
                warn!(
                    command = command.name(),
                    code = failure.error.error_code(),
                    phase = failure.phase.as_str(),
                    error = %failure.error,
                    "command rejected"
                );
                CommandOutcome::rejected(&failure)
            }
        }
    }

    pub fn select_card(&mut self, env: GameEnv<'_>, card: CardInstanceId) -> CommandOutcome {
        self.execute(env, &Command::SelectCard(SelectCard { card }))
    }

    pub fn play_card(
        &mut self,
        env: GameEnv<'_>,
        card: CardInstanceId,
        target: Option<TargetRef>,
    ) -> CommandOutcome {
        self.execute(env, &Command::PlayCard(PlayCard { card, target }))
    }

    /// Plays the current selection.
    pub fn play_selected(&mut self, env: GameEnv<'_>, target: Option<TargetRef>) -> CommandOutcome {
        match self.state.selection {
            Some(card) => self.play_card(env, card, target),
            None => {
                let failure = TransitionPhaseError::new(
                    TransitionPhase::PreValidate,
                    CommandError::from(ValidationError::NoSelection),
                );
                CommandOutcome::rejected(&failure)
            }
        }
    }

    pub fn use_ability(
        &mut self,
        env: GameEnv<'_>,
        ability: AbilityId,
        target: Option<TargetRef>,
    ) -> CommandOutcome {
        self.execute(env, &Command::UseAbility(UseAbility { ability, target }))
    }

    pub fn reverse_card(&mut self, env: GameEnv<'_>, card: CardInstanceId) -> CommandOutcome {
        self.execute(env, &Command::ReverseCard(ReverseCard { card }))
    }

    pub fn end_turn(&mut self, env: GameEnv<'_>) -> CommandOutcome {
        self.execute(env, &Command::EndTurn(EndTurn))
    }

    pub fn advance_floor(&mut self, env: GameEnv<'_>) -> CommandOutcome {
        self.execute(env, &Command::AdvanceFloor(AdvanceFloor))
    }

    pub fn state(&self) -> &BattleState {
        self.state
    }

    pub fn snapshot(&self) -> BattleSnapshot {
        self.state.snapshot()
    }

    pub fn valid_targets(
        &self,
        env: GameEnv<'_>,
        card: Option<CardInstanceId>,
    ) -> Result<Vec<EntityId>, CommandError> {
        valid_targets(self.state, &env, card)
    }

    pub fn reachable_tiles(
        &self,
        env: GameEnv<'_>,
        card: Option<CardInstanceId>,
    ) -> Result<BTreeSet<Position>, CommandError> {
        reachable_tiles(self.state, &env, card)
    }

    pub fn ability_targets(
        &self,
        env: GameEnv<'_>,
        ability: &AbilityId,
    ) -> Result<Vec<EntityId>, CommandError> {
        ability_targets(self.state, &env, ability)
    }

    pub fn ability_tiles(
        &self,
        env: GameEnv<'_>,
        ability: &AbilityId,
    ) -> Result<BTreeSet<Position>, CommandError> {
        ability_tiles(self.state, &env, ability)
    }
}
