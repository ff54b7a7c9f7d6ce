//! Deterministic rules engine for turn-based tactical card battles.
//!
//! `tactics-core` defines the canonical rules (grid, effects, deck economy,
//! combat, abilities, turn cycle, enemy AI) and exposes pure APIs that any
//! presentation layer can drive. All state mutation after a run begins flows
//! through [`engine::BattleEngine`]; content reaches the engine only through
//! the oracle traits bundled in [`env::GameEnv`].
pub mod ability;
pub mod ai;
pub mod card;
pub mod combat;
pub mod config;
pub mod effect;
pub mod engine;
pub mod env;
pub mod error;
pub mod event;
pub mod grid;
pub mod state;

pub use ability::{AbilityState, AbilityTemplate, ActivationCondition};
pub use card::{CardInstance, CardTemplate, CardType, Orientation, Piles, Rarity};
pub use config::BattleConfig;
pub use effect::{EffectKind, EffectLedger, EffectTemplate, TargetSelector};
pub use engine::{
    AdvanceFloor, BattleEngine, Command, CommandError, CommandOutcome, ContentError, EndTurn,
    PlayCard, Rejection, ReverseCard, RunStart, SelectCard, TargetRef, TransitionPhase,
    TransitionPhaseError, UseAbility, ValidationError, begin_run,
};
pub use env::{
    AbilityOracle, CardOracle, CharacterOracle, CharacterTemplate, ContentOracle, Element,
    ElementChart, EncounterOracle, EnemyOracle, EnemySpawn, EnemyTemplate, FloorSpec, GameEnv,
    OracleError, PcgRng, RngOracle, StandardElementChart,
};
pub use error::{ErrorSeverity, GameError};
pub use event::{BattleOutcome, Event};
pub use grid::{Battlefield, GridDimensions, Position, TerrainKind};
pub use state::{
    AbilityId, BattleSnapshot, BattleState, CardId, CardInstanceId, Character, CharacterId,
    Combatant, Enemy, EnemyKindId, EntityId, Intent, Phase, ResourceMeter, TurnState,
};
