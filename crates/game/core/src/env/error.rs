//! Oracle access errors.

use crate::error::{ErrorSeverity, GameError};

/// Raised when the environment lacks an oracle an operation depends on.
///
/// A missing oracle is a wiring bug in the composition root, never a player
/// mistake.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("CardOracle not available")]
    CardsNotAvailable,

    #[error("EnemyOracle not available")]
    EnemiesNotAvailable,

    #[error("AbilityOracle not available")]
    AbilitiesNotAvailable,

    #[error("CharacterOracle not available")]
    CharactersNotAvailable,

    #[error("EncounterOracle not available")]
    EncountersNotAvailable,
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            CardsNotAvailable => "ORACLE_CARDS_NOT_AVAILABLE",
            EnemiesNotAvailable => "ORACLE_ENEMIES_NOT_AVAILABLE",
            AbilitiesNotAvailable => "ORACLE_ABILITIES_NOT_AVAILABLE",
            CharactersNotAvailable => "ORACLE_CHARACTERS_NOT_AVAILABLE",
            EncountersNotAvailable => "ORACLE_ENCOUNTERS_NOT_AVAILABLE",
        }
    }
}
