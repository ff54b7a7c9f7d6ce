//! Content loaders for reading game data from files.
//!
//! Catalogs are RON, battle tuning is TOML. Every loader returns core types
//! directly; [`ContentFactory`] assembles them into a [`crate::Catalog`].

pub mod abilities;
pub mod actors;
pub mod cards;
pub mod config;
pub mod factory;
pub mod floors;

pub use abilities::AbilityLoader;
pub use actors::{CharacterLoader, EnemyLoader};
pub use cards::CardLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use floors::{FloorLoader, FloorRon};

use std::collections::BTreeSet;
use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Fails on the first id that appears twice.
pub(crate) fn ensure_unique<'a, T>(
    what: &str,
    path: &Path,
    ids: impl IntoIterator<Item = &'a T>,
) -> LoadResult<()>
where
    T: Ord + std::fmt::Display + 'a,
{
    let mut seen = BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            anyhow::bail!("Duplicate {what} id '{id}' in {}", path.display());
        }
    }
    Ok(())
}
