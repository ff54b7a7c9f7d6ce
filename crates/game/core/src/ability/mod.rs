//! Active and passive abilities.
//!
//! Templates come from the ability catalog and are copied into an
//! [`AbilityState`] when a battle starts, so a battle never reads the catalog
//! again for an ability it already owns.

use crate::effect::EffectTemplate;
use crate::state::{AbilityId, ResourceMeter};

/// Condition under which a passive ability is live.
///
/// Percent comparisons are exact: `current * 100` against `percent * maximum`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActivationCondition {
    /// Health at or below `p` percent of maximum.
    HealthAtMostPercent(u32),
    /// Health strictly above `p` percent of maximum.
    HealthAbovePercent(u32),
    /// Energy at least `n`. Never true for units without energy.
    EnergyAtLeast(u32),
    Always,
}

impl ActivationCondition {
    pub fn holds(&self, health: &ResourceMeter, energy: Option<&ResourceMeter>) -> bool {
        let scaled = |meter: &ResourceMeter, percent: u32| {
            (
                meter.current as u64 * 100,
                percent as u64 * meter.maximum as u64,
            )
        };
        match *self {
            Self::HealthAtMostPercent(p) => {
                let (current, bound) = scaled(health, p);
                current <= bound
            }
            Self::HealthAbovePercent(p) => {
                let (current, bound) = scaled(health, p);
                current > bound
            }
            Self::EnergyAtLeast(n) => energy.is_some_and(|e| e.current >= n),
            Self::Always => true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityTemplate {
    pub id: AbilityId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cost: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cooldown: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub passive: bool,
    pub effects: Vec<EffectTemplate>,
    /// Passive trigger. A passive without one behaves as `Always`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub condition: Option<ActivationCondition>,
    /// Targeting range override for active abilities.
    #[cfg_attr(feature = "serde", serde(default))]
    pub range: Option<u32>,
}

impl AbilityTemplate {
    pub fn active(id: impl Into<AbilityId>, cost: u32, cooldown: u32) -> Self {
        let id = id.into();
        Self {
            name: id.to_string(),
            id,
            cost,
            cooldown,
            passive: false,
            effects: Vec::new(),
            condition: None,
            range: None,
        }
    }

    pub fn passive(id: impl Into<AbilityId>, condition: ActivationCondition) -> Self {
        let id = id.into();
        Self {
            name: id.to_string(),
            id,
            cost: 0,
            cooldown: 0,
            passive: true,
            effects: Vec::new(),
            condition: Some(condition),
            range: None,
        }
    }

    /// First effect of a passive that cannot be granted to its owner.
    ///
    /// Always `None` for actives.
    pub fn ungrantable_effect(&self) -> Option<&EffectTemplate> {
        if !self.passive {
            return None;
        }
        self.effects.iter().find(|effect| !effect.is_self_grant())
    }

    #[must_use]
    pub fn with_effects(mut self, effects: impl IntoIterator<Item = EffectTemplate>) -> Self {
        self.effects = effects.into_iter().collect();
        self
    }
}

/// Whether a passive must be switched on or off.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PassiveShift {
    Activate,
    Retract,
}

/// Battle-time state of an owned ability.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityState {
    pub template: AbilityTemplate,
    pub cooldown_remaining: u32,
    /// Passive only: its effects are currently granted.
    pub active: bool,
}

impl AbilityState {
    pub fn new(template: AbilityTemplate) -> Self {
        Self {
            template,
            cooldown_remaining: 0,
            active: false,
        }
    }

    pub fn id(&self) -> &AbilityId {
        &self.template.id
    }

    pub fn is_passive(&self) -> bool {
        self.template.passive
    }

    pub fn is_ready(&self) -> bool {
        self.cooldown_remaining == 0
    }

    pub fn start_cooldown(&mut self) {
        self.cooldown_remaining = self.template.cooldown;
    }

    /// Decrements the cooldown, flooring at zero.
    pub fn tick_cooldown(&mut self) {
        self.cooldown_remaining = self.cooldown_remaining.saturating_sub(1);
    }

    /// Compares the passive's condition with its current state.
    ///
    /// Returns `None` for actives and for passives already in the right state.
    pub fn passive_shift(
        &self,
        health: &ResourceMeter,
        energy: Option<&ResourceMeter>,
    ) -> Option<PassiveShift> {
        if !self.is_passive() {
            return None;
        }
        let wanted = self
            .template
            .condition
            .unwrap_or(ActivationCondition::Always)
            .holds(health, energy);
        match (wanted, self.active) {
            (true, false) => Some(PassiveShift::Activate),
            (false, true) => Some(PassiveShift::Retract),
            _ => None,
        }
    }

    pub fn reset(&mut self) {
        self.cooldown_remaining = 0;
        self.active = false;
    }
}
