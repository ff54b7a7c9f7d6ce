//! Damage scaling and application.

use crate::effect::EffectKind;
use crate::env::{Element, ElementChart};
use crate::state::Combatant;

/// Attacker-side inputs to damage scaling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DamageSource {
    /// Summed `DamageBoost` magnitude, in percent.
    pub boost_percent: u32,
    pub element: Element,
}

impl DamageSource {
    pub fn from_attacker(attacker: &Combatant) -> Self {
        Self {
            boost_percent: attacker.effects.magnitude(EffectKind::DamageBoost),
            element: attacker.element,
        }
    }
}

/// What happened when damage landed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageReport {
    pub raw: u32,
    /// After boost, element and vulnerability.
    pub scaled: u32,
    pub absorbed: u32,
    /// Health actually removed.
    pub dealt: u32,
    /// The shield bucket was emptied.
    pub shield_broken: bool,
    /// The target reached zero health with this hit.
    pub died: bool,
}

/// Scales raw damage.
///
/// # Formula
///
/// ```text
/// scaled = raw × (100 + boost)% × element% × (100 + vulnerable)%
/// ```
///
/// All factors are integer percents; the result is floored once at the end.
pub fn scale_damage(raw: u32, boost_percent: u32, element_percent: u32, vulnerable_percent: u32) -> u32 {
    let numerator = raw as u128
        * (100 + boost_percent as u128)
        * element_percent as u128
        * (100 + vulnerable_percent as u128);
    (numerator / 1_000_000).min(u32::MAX as u128) as u32
}

/// Damage `target` would take before shields.
pub fn preview_damage(
    target: &Combatant,
    raw: u32,
    source: DamageSource,
    chart: &(impl ElementChart + ?Sized),
) -> u32 {
    scale_damage(
        raw,
        source.boost_percent,
        chart.multiplier(source.element, target.element),
        target.effects.magnitude(EffectKind::Vulnerable),
    )
}

/// Scales `raw`, lets the shield absorb what it can and removes the rest from
/// health, flooring at zero.
pub fn damage(
    target: &mut Combatant,
    raw: u32,
    source: DamageSource,
    chart: &(impl ElementChart + ?Sized),
) -> DamageReport {
    let was_alive = target.is_alive();
    let scaled = preview_damage(target, raw, source, chart);
    let shield = target.effects.consume_shield(scaled);
    let dealt = target.health.drain(shield.remaining);

    DamageReport {
        raw,
        scaled,
        absorbed: shield.absorbed,
        dealt,
        shield_broken: shield.depleted,
        died: was_alive && !target.is_alive(),
    }
}

/// Unscaled damage that bypasses shields.
pub fn direct_damage(target: &mut Combatant, amount: u32) -> DamageReport {
    let was_alive = target.is_alive();
    let dealt = target.health.drain(amount);
    DamageReport {
        raw: amount,
        scaled: amount,
        absorbed: 0,
        dealt,
        shield_broken: false,
        died: was_alive && !target.is_alive(),
    }
}
