//! Combat resolution.
//!
//! Pure functions over a single [`Combatant`](crate::state::Combatant): damage
//! scaling, shield absorption, healing and effect application. The resolver
//! reports deaths but never touches the battlefield or the enemy roster;
//! removing the dead is the engine's job.
//!
//! # Core Functions
//!
//! - `damage`: scale, absorb, reduce health, report death
//! - `direct_damage`: unscaled damage that ignores shields (damage over time)
//! - `heal`: restore health, report the applied delta
//! - `apply_effect`: route an effect template to a heal or the ledger

mod apply;
mod damage;

pub use apply::{AppliedEffect, apply_effect, heal};
pub use damage::{DamageReport, DamageSource, damage, direct_damage, preview_damage, scale_damage};
