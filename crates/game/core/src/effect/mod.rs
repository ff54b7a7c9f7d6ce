//! Effect templates and the per-entity effect ledger.
//!
//! Cards and abilities carry [`EffectTemplate`]s. When resolved, instant kinds
//! (damage, heal, draw, ...) take effect immediately, while persistent kinds
//! (shield, damage-over-time, ...) become live entries in an [`EffectLedger`].
mod ledger;

pub use ledger::{EffectLedger, LiveEffect, ShieldReport, TickReport};

/// Closed set of effect kinds.
///
/// Resolvers match on the tag; there is no string dispatch.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EffectKind {
    // ========================================================================
    // Instant (resolved immediately, never stored)
    // ========================================================================
    /// Deal `magnitude` damage through the combat resolver.
    Damage,

    /// Restore `magnitude` health, capped at maximum.
    Heal,

    /// Gain `magnitude` energy, capped at maximum.
    GainEnergy,

    /// Draw `magnitude` cards.
    Draw,

    /// Move the caster to the chosen tile; `magnitude` is the step budget
    /// (0 uses the caster's movement range).
    Move,

    /// Move the whole hand to the discard pile.
    DiscardHand,

    /// Flip the orientation of every card in hand.
    ReverseHand,

    // ========================================================================
    // Persistent (stored in the ledger)
    // ========================================================================
    /// Absorbs incoming damage 1:1.
    Shield,

    /// Deals `magnitude` direct damage to its owner every tick.
    DamageOverTime,

    /// Outgoing damage multiplied by `(100 + magnitude)%`.
    DamageBoost,

    /// Incoming damage multiplied by `(100 + magnitude)%`.
    Vulnerable,

    /// Owner skips its next action.
    Stun,
}

impl EffectKind {
    /// Returns true if this kind lives in the ledger rather than resolving instantly.
    pub const fn is_persistent(self) -> bool {
        matches!(
            self,
            Self::Shield | Self::DamageOverTime | Self::DamageBoost | Self::Vulnerable | Self::Stun
        )
    }

    /// Returns true if this kind changes health or energy when resolved.
    pub const fn touches_resources(self) -> bool {
        matches!(self, Self::Damage | Self::Heal | Self::GainEnergy)
    }
}

/// Who an effect template lands on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TargetSelector {
    /// The entity that played the card or used the ability.
    #[default]
    Caster,

    /// The single entity chosen by the command.
    Target,

    /// Every living opponent of the caster.
    AllEnemies,

    /// The tile chosen by the command (movement).
    Tile,
}

/// Immutable description of an effect carried by cards and abilities.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectTemplate {
    pub kind: EffectKind,
    pub magnitude: u32,
    /// Remaining duration in owner turns. `None` means until removed.
    #[cfg_attr(feature = "serde", serde(default))]
    pub duration: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub target: TargetSelector,
}

impl EffectTemplate {
    pub fn new(kind: EffectKind, magnitude: u32, target: TargetSelector) -> Self {
        Self {
            kind,
            magnitude,
            duration: None,
            target,
        }
    }

    #[must_use]
    pub fn with_duration(mut self, turns: u32) -> Self {
        self.duration = Some(turns);
        self
    }

    /// Returns true if a passive can grant this effect: a ledger kind aimed
    /// at the owner.
    pub fn is_self_grant(&self) -> bool {
        self.kind.is_persistent() && self.target == TargetSelector::Caster
    }

    pub fn damage(amount: u32) -> Self {
        Self::new(EffectKind::Damage, amount, TargetSelector::Target)
    }

    pub fn heal_self(amount: u32) -> Self {
        Self::new(EffectKind::Heal, amount, TargetSelector::Caster)
    }

    pub fn shield_self(amount: u32) -> Self {
        Self::new(EffectKind::Shield, amount, TargetSelector::Caster)
    }

    pub fn move_to_tile(steps: u32) -> Self {
        Self::new(EffectKind::Move, steps, TargetSelector::Tile)
    }
}
