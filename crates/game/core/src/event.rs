//! Events emitted by the engine, in resolution order.
//!
//! A command returns every event it caused as one ordered list. Presentation
//! and persistence subscribe to this stream; neither is called by the engine.

use crate::card::Orientation;
use crate::effect::EffectKind;
use crate::grid::Position;
use crate::state::{AbilityId, CardId, CardInstanceId, EntityId, Intent, Phase};

/// How a battle (or the run) ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleOutcome {
    Victory { floor: u32 },
    Defeat { floor: u32 },
    RunComplete { floors_cleared: u32 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    TurnChanged {
        phase: Phase,
        round: u32,
    },
    FloorEntered {
        floor: u32,
    },

    // cards
    CardDrawn {
        card: CardInstanceId,
    },
    DeckReshuffled {
        cards: usize,
    },
    CardPlayed {
        card: CardInstanceId,
        template: CardId,
        orientation: Orientation,
    },
    CardReversed {
        card: CardInstanceId,
        orientation: Orientation,
    },
    HandDiscarded {
        count: usize,
    },
    EnergyChanged {
        current: u32,
        maximum: u32,
    },

    // abilities
    AbilityUsed {
        entity: EntityId,
        ability: AbilityId,
    },
    PassiveToggled {
        entity: EntityId,
        ability: AbilityId,
        active: bool,
    },

    // combat
    Damaged {
        target: EntityId,
        /// `None` for damage over time.
        source: Option<EntityId>,
        amount: u32,
        absorbed: u32,
        remaining: u32,
    },
    Healed {
        target: EntityId,
        amount: u32,
        remaining: u32,
    },
    EffectApplied {
        target: EntityId,
        kind: EffectKind,
        magnitude: u32,
        duration: Option<u32>,
    },
    EffectExpired {
        target: EntityId,
        kind: EffectKind,
    },
    EffectRetracted {
        target: EntityId,
        kind: EffectKind,
        ability: AbilityId,
        amount: u32,
    },
    Moved {
        entity: EntityId,
        from: Position,
        to: Position,
    },
    IntentDeclared {
        enemy: EntityId,
        intent: Intent,
    },
    EntityDied {
        entity: EntityId,
    },
    BattleEnded {
        outcome: BattleOutcome,
    },
}

impl Event {
    /// Stable snake_case name, for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::TurnChanged { .. } => "turn_changed",
            Self::FloorEntered { .. } => "floor_entered",
            Self::CardDrawn { .. } => "card_drawn",
            Self::DeckReshuffled { .. } => "deck_reshuffled",
            Self::CardPlayed { .. } => "card_played",
            Self::CardReversed { .. } => "card_reversed",
            Self::HandDiscarded { .. } => "hand_discarded",
            Self::EnergyChanged { .. } => "energy_changed",
            Self::AbilityUsed { .. } => "ability_used",
            Self::PassiveToggled { .. } => "passive_toggled",
            Self::Damaged { .. } => "damaged",
            Self::Healed { .. } => "healed",
            Self::EffectApplied { .. } => "effect_applied",
            Self::EffectExpired { .. } => "effect_expired",
            Self::EffectRetracted { .. } => "effect_retracted",
            Self::Moved { .. } => "moved",
            Self::IntentDeclared { .. } => "intent_declared",
            Self::EntityDied { .. } => "entity_died",
            Self::BattleEnded { .. } => "battle_ended",
        }
    }
}
