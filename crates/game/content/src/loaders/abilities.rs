//! Ability catalog loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tactics_core::AbilityTemplate;

use crate::loaders::{LoadResult, ensure_unique, read_file};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityCatalog {
    pub abilities: Vec<AbilityTemplate>,
}

/// Loader for active and passive abilities from RON files.
pub struct AbilityLoader;

impl AbilityLoader {
    /// Load the ability catalog from a RON file.
    ///
    /// Passives must not carry a cost or cooldown; they are never invoked.
    /// Their effects must be ledger kinds aimed at the owner.
    pub fn load(path: &Path) -> LoadResult<Vec<AbilityTemplate>> {
        let content = read_file(path)?;
        let catalog: AbilityCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse ability catalog RON: {}", e))?;

        ensure_unique("ability", path, catalog.abilities.iter().map(|a| &a.id))?;
        if let Some(ability) = catalog
            .abilities
            .iter()
            .find(|a| a.passive && (a.cost > 0 || a.cooldown > 0))
        {
            anyhow::bail!(
                "Passive ability '{}' declares a cost or cooldown in {}",
                ability.id,
                path.display()
            );
        }
        for ability in &catalog.abilities {
            if let Some(effect) = ability.ungrantable_effect() {
                anyhow::bail!(
                    "Passive ability '{}' cannot grant {} to {} in {}",
                    ability.id,
                    effect.kind,
                    effect.target,
                    path.display()
                );
            }
        }
        Ok(catalog.abilities)
    }
}
