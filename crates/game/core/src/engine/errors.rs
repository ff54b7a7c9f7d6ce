//! Error types for the command pipeline.

use crate::effect::{EffectKind, TargetSelector};
use crate::error::{ErrorSeverity, GameError};
use crate::env::OracleError;
use crate::grid::{PlacementError, Position};
use crate::state::{
    AbilityId, CardId, CardInstanceId, CharacterId, EnemyKindId, EntityId, Phase,
};

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// A command that is illegal in the current state. Nothing was mutated.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("battle is over ({phase})")]
    BattleOver { phase: Phase },

    #[error("not the player's turn ({phase})")]
    NotPlayerTurn { phase: Phase },

    #[error("{0} is not in hand")]
    CardNotInHand(CardInstanceId),

    #[error("not enough energy: need {required}, have {available}")]
    InsufficientEnergy { required: u32, available: u32 },

    #[error("ability '{ability}' is on cooldown for {remaining} more turn(s)")]
    OnCooldown { ability: AbilityId, remaining: u32 },

    #[error("ability '{0}' is not owned by the player")]
    AbilityNotOwned(AbilityId),

    #[error("ability '{0}' is passive and cannot be used")]
    PassiveNotInvokable(AbilityId),

    #[error("a target is required")]
    MissingTarget,

    #[error("no card is selected")]
    NoSelection,

    #[error("{0} is not a valid target")]
    InvalidTarget(EntityId),

    #[error("nothing to target at {0}")]
    EmptyTile(Position),

    #[error("{target} is out of range ({distance} > {range})")]
    TargetOutOfRange {
        target: EntityId,
        distance: u32,
        range: u32,
    },

    #[error("tile {0} is not reachable")]
    TileUnreachable(Position),

    #[error("floor is not cleared ({phase})")]
    NotCleared { phase: Phase },

    #[error("the player is stunned")]
    Stunned,
}

impl GameError for ValidationError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            // the same command can succeed later this turn
            Self::InsufficientEnergy { .. } | Self::OnCooldown { .. } => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use ValidationError::*;
        match self {
            BattleOver { .. } => "BATTLE_OVER",
            NotPlayerTurn { .. } => "NOT_PLAYER_TURN",
            CardNotInHand(_) => "CARD_NOT_IN_HAND",
            InsufficientEnergy { .. } => "INSUFFICIENT_ENERGY",
            OnCooldown { .. } => "ON_COOLDOWN",
            AbilityNotOwned(_) => "ABILITY_NOT_OWNED",
            PassiveNotInvokable(_) => "PASSIVE_NOT_INVOKABLE",
            MissingTarget => "MISSING_TARGET",
            NoSelection => "NO_SELECTION",
            InvalidTarget(_) => "INVALID_TARGET",
            EmptyTile(_) => "EMPTY_TILE",
            TargetOutOfRange { .. } => "TARGET_OUT_OF_RANGE",
            TileUnreachable(_) => "TILE_UNREACHABLE",
            NotCleared { .. } => "NOT_CLEARED",
            Stunned => "STUNNED",
        }
    }
}

/// Referenced content is missing or malformed. A data bug, not a player mistake.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ContentError {
    #[error("unknown card '{0}'")]
    UnknownCard(CardId),

    #[error("unknown ability '{0}'")]
    UnknownAbility(AbilityId),

    #[error("unknown enemy '{0}'")]
    UnknownEnemy(EnemyKindId),

    #[error("unknown character '{0}'")]
    UnknownCharacter(CharacterId),

    #[error("passive '{ability}' cannot grant {kind} to {target}")]
    InvalidPassive {
        ability: AbilityId,
        kind: EffectKind,
        target: TargetSelector,
    },

    #[error("floor {0} does not exist")]
    MissingFloor(u32),

    #[error("floor {floor}: cannot place {entity}: {source}")]
    InvalidPlacement {
        floor: u32,
        entity: EntityId,
        source: PlacementError,
    },

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for ContentError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Oracle(error) => error.severity(),
            _ => ErrorSeverity::Content,
        }
    }

    fn error_code(&self) -> &'static str {
        use ContentError::*;
        match self {
            UnknownCard(_) => "UNKNOWN_CARD",
            UnknownAbility(_) => "UNKNOWN_ABILITY",
            UnknownEnemy(_) => "UNKNOWN_ENEMY",
            UnknownCharacter(_) => "UNKNOWN_CHARACTER",
            InvalidPassive { .. } => "INVALID_PASSIVE",
            MissingFloor(_) => "MISSING_FLOOR",
            InvalidPlacement { .. } => "INVALID_PLACEMENT",
            Oracle(error) => error.error_code(),
        }
    }
}

/// Any reason a command can fail.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Content(#[from] ContentError),
}

impl From<OracleError> for CommandError {
    fn from(error: OracleError) -> Self {
        Self::Content(ContentError::Oracle(error))
    }
}

impl GameError for CommandError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Validation(error) => error.severity(),
            Self::Content(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(error) => error.error_code(),
            Self::Content(error) => error.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_and_content_are_classified_apart() {
        let validation = CommandError::from(ValidationError::CardNotInHand(CardInstanceId(3)));
        let content = CommandError::from(ContentError::UnknownCard(CardId::from("ghost")));
        assert_eq!(validation.severity(), ErrorSeverity::Validation);
        assert_eq!(content.severity(), ErrorSeverity::Content);
        assert_eq!(content.error_code(), "UNKNOWN_CARD");
    }

    #[test]
    fn missing_oracle_is_internal() {
        let error = CommandError::from(OracleError::CardsNotAvailable);
        assert_eq!(error.severity(), ErrorSeverity::Internal);
        assert_eq!(error.error_code(), "ORACLE_CARDS_NOT_AVAILABLE");
    }

    #[test]
    fn phase_error_names_the_stage() {
        let error = TransitionPhaseError::new(
            TransitionPhase::PreValidate,
            ValidationError::MissingTarget,
        );
        assert_eq!(error.to_string(), "pre_validate failed: a target is required");
    }
}
