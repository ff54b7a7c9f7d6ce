//! Healing and effect application.

use crate::effect::{EffectKind, EffectTemplate};
use crate::state::{AbilityId, Combatant};

/// Restores up to `amount` health, capped at maximum. Returns the applied delta.
///
/// Dead combatants are not revived.
pub fn heal(target: &mut Combatant, amount: u32) -> u32 {
    if !target.is_alive() {
        return 0;
    }
    target.health.restore(amount)
}

/// Result of [`apply_effect`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppliedEffect {
    /// A heal template resolved instantly.
    Healed(u32),
    /// A ledger bucket was created or merged.
    Stored {
        kind: EffectKind,
        /// Bucket magnitude after the merge.
        magnitude: u32,
        duration: Option<u32>,
    },
    /// The template is not something the resolver handles on its own.
    Skipped,
}

/// Applies a template to `target`.
///
/// Heals resolve immediately and never enter the ledger. Persistent kinds are
/// merged into the ledger, attributed to `granted_by` when a passive ability
/// is the source. Other instant kinds are left to the caller.
pub fn apply_effect(
    target: &mut Combatant,
    template: &EffectTemplate,
    granted_by: Option<&AbilityId>,
) -> AppliedEffect {
    if template.kind == EffectKind::Heal {
        return AppliedEffect::Healed(heal(target, template.magnitude));
    }
    if !template.kind.is_persistent() {
        return AppliedEffect::Skipped;
    }

    let bucket = match granted_by {
        Some(ability) => target.effects.grant(template.kind, template.magnitude, ability),
        None => target
            .effects
            .apply(template.kind, template.magnitude, template.duration),
    };
    AppliedEffect::Stored {
        kind: template.kind,
        magnitude: bucket.magnitude(),
        duration: bucket.duration(),
    }
}
