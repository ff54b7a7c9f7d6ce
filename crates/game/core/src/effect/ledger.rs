//! Live status effects attached to a single combatant.
//!
//! # Buckets
//!
//! The ledger holds at most one [`LiveEffect`] per [`EffectKind`], enforced by
//! storing them in a map keyed by kind. A second application of the same kind
//! merges into the existing bucket: magnitudes add up and the duration becomes
//! the longer of the two (`None` counts as unbounded).
//!
//! # Provenance
//!
//! Each bucket keeps the unattributed magnitude (cards, enemy attacks) apart
//! from the contributions granted by passive abilities. The reported magnitude
//! is always the sum. Retracting a passive removes exactly what that ability
//! granted; when a timed bucket expires only the unattributed part is dropped.

use std::collections::BTreeMap;

use super::EffectKind;
use crate::state::AbilityId;

/// Unattributed magnitude with its remaining duration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct Portion {
    magnitude: u32,
    remaining: Option<u32>,
}

/// A live effect bucket.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LiveEffect {
    kind: EffectKind,
    unattributed: Option<Portion>,
    grants: BTreeMap<AbilityId, u32>,
}

impl LiveEffect {
    fn new(kind: EffectKind) -> Self {
        Self {
            kind,
            unattributed: None,
            grants: BTreeMap::new(),
        }
    }

    pub fn kind(&self) -> EffectKind {
        self.kind
    }

    /// Total magnitude across every source.
    pub fn magnitude(&self) -> u32 {
        self.unattributed.as_ref().map_or(0, |p| p.magnitude)
            + self.grants.values().copied().sum::<u32>()
    }

    /// Remaining duration of the timed part; `None` when nothing in the bucket expires.
    pub fn duration(&self) -> Option<u32> {
        self.unattributed.as_ref().and_then(|p| p.remaining)
    }

    /// Magnitude contributed by a specific ability.
    pub fn granted_by(&self, ability: &AbilityId) -> u32 {
        self.grants.get(ability).copied().unwrap_or(0)
    }

    /// Abilities that currently contribute to this bucket.
    pub fn grantors(&self) -> impl Iterator<Item = &AbilityId> {
        self.grants.keys()
    }

    fn is_spent(&self) -> bool {
        self.unattributed.is_none() && self.grants.is_empty()
    }

    /// Drains up to `amount`, unattributed first, then grants in ability order.
    fn drain(&mut self, mut amount: u32) -> u32 {
        let mut drained = 0;
        if let Some(portion) = self.unattributed.as_mut() {
            let take = amount.min(portion.magnitude);
            portion.magnitude -= take;
            amount -= take;
            drained += take;
            if portion.magnitude == 0 {
                self.unattributed = None;
            }
        }
        for value in self.grants.values_mut() {
            if amount == 0 {
                break;
            }
            let take = amount.min(*value);
            *value -= take;
            amount -= take;
            drained += take;
        }
        drained
    }
}

/// Longer of two durations, where `None` is unbounded.
fn merge_duration(existing: Option<u32>, incoming: Option<u32>) -> Option<u32> {
    match (existing, incoming) {
        (Some(a), Some(b)) => Some(a.max(b)),
        _ => None,
    }
}

/// Result of [`EffectLedger::tick`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Direct damage the owner must take from damage-over-time buckets.
    pub dot_damage: u32,
    /// Buckets removed because their duration ran out.
    pub expired: Vec<EffectKind>,
    /// Buckets whose timed part ran out while grants keep them alive, with
    /// the magnitude left afterwards.
    pub reduced: Vec<(EffectKind, u32)>,
}

/// Result of [`EffectLedger::consume_shield`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShieldReport {
    pub absorbed: u32,
    pub remaining: u32,
    /// True if the shield bucket was emptied and removed.
    pub depleted: bool,
}

/// Per-combatant effect collection. At most one bucket per kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectLedger {
    effects: BTreeMap<EffectKind, LiveEffect>,
}

impl EffectLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges an unattributed application (cards, attacks) into the ledger.
    ///
    /// Returns the bucket after the merge.
    pub fn apply(&mut self, kind: EffectKind, magnitude: u32, duration: Option<u32>) -> &LiveEffect {
        debug_assert!(kind.is_persistent(), "{kind} is not a ledger effect");
        let entry = self
            .effects
            .entry(kind)
            .or_insert_with(|| LiveEffect::new(kind));
        match entry.unattributed.as_mut() {
            Some(portion) => {
                portion.magnitude = portion.magnitude.saturating_add(magnitude);
                portion.remaining = merge_duration(portion.remaining, duration);
            }
            None => {
                entry.unattributed = Some(Portion {
                    magnitude,
                    remaining: duration,
                });
            }
        }
        entry
    }

    /// Adds a contribution granted by a passive ability. Grants never expire on
    /// their own; they stay until [`retract`](Self::retract) is called.
    pub fn grant(&mut self, kind: EffectKind, magnitude: u32, ability: &AbilityId) -> &LiveEffect {
        debug_assert!(kind.is_persistent(), "{kind} is not a ledger effect");
        let entry = self
            .effects
            .entry(kind)
            .or_insert_with(|| LiveEffect::new(kind));
        let value = entry.grants.entry(ability.clone()).or_insert(0);
        *value = value.saturating_add(magnitude);
        entry
    }

    /// Removes exactly the contribution `ability` made to `kind`.
    ///
    /// Returns the magnitude removed and whether the bucket disappeared.
    pub fn retract(&mut self, kind: EffectKind, ability: &AbilityId) -> (u32, bool) {
        let Some(entry) = self.effects.get_mut(&kind) else {
            return (0, false);
        };
        let removed = entry.grants.remove(ability).unwrap_or(0);
        if entry.is_spent() {
            self.effects.remove(&kind);
            return (removed, true);
        }
        (removed, false)
    }

    /// Advances every timed bucket by one owner turn.
    ///
    /// Damage-over-time fires before the expiry check, so a bucket on its last
    /// turn still deals damage.
    pub fn tick(&mut self) -> TickReport {
        let mut report = TickReport::default();

        for (kind, effect) in self.effects.iter_mut() {
            if *kind == EffectKind::DamageOverTime {
                report.dot_damage = report.dot_damage.saturating_add(effect.magnitude());
            }

            let expired = match effect.unattributed.as_mut() {
                Some(Portion {
                    remaining: Some(turns),
                    ..
                }) => {
                    *turns = turns.saturating_sub(1);
                    *turns == 0
                }
                _ => false,
            };
            if expired {
                effect.unattributed = None;
                if effect.grants.is_empty() {
                    report.expired.push(*kind);
                } else {
                    report.reduced.push((*kind, effect.magnitude()));
                }
            }
        }

        for kind in &report.expired {
            self.effects.remove(kind);
        }
        report
    }

    /// Absorbs incoming damage with the shield bucket, if any.
    pub fn consume_shield(&mut self, incoming: u32) -> ShieldReport {
        let Some(shield) = self.effects.get_mut(&EffectKind::Shield) else {
            return ShieldReport {
                absorbed: 0,
                remaining: incoming,
                depleted: false,
            };
        };

        let absorbed = shield.drain(incoming);
        let depleted = shield.magnitude() == 0;
        if depleted {
            self.effects.remove(&EffectKind::Shield);
        }

        ShieldReport {
            absorbed,
            remaining: incoming - absorbed,
            depleted,
        }
    }

    pub fn get(&self, kind: EffectKind) -> Option<&LiveEffect> {
        self.effects.get(&kind)
    }

    pub fn has(&self, kind: EffectKind) -> bool {
        self.effects.contains_key(&kind)
    }

    /// Total magnitude of `kind`, zero if absent.
    pub fn magnitude(&self, kind: EffectKind) -> u32 {
        self.effects.get(&kind).map_or(0, LiveEffect::magnitude)
    }

    pub fn remove(&mut self, kind: EffectKind) -> Option<LiveEffect> {
        self.effects.remove(&kind)
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &LiveEffect> {
        self.effects.values()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
