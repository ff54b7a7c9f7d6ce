//! Battle configuration loader.

use std::path::Path;

use tactics_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for battle configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys keep their defaults. A hand size above the compile-time
    /// capacity is rejected rather than silently clamped.
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<BattleConfig> {
        let config: BattleConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.max_hand_size > BattleConfig::MAX_HAND_SIZE {
            anyhow::bail!(
                "max_hand_size {} exceeds the supported maximum of {}",
                config.max_hand_size,
                BattleConfig::MAX_HAND_SIZE
            );
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse("seed = 99\ncards_per_turn = 2\n").expect("parse");
        assert_eq!(config.seed, 99);
        assert_eq!(config.cards_per_turn, 2);
        assert_eq!(config.starting_hand_size, BattleConfig::DEFAULT_STARTING_HAND);
        assert_eq!(config.max_hand_size, BattleConfig::MAX_HAND_SIZE);
    }

    #[test]
    fn oversized_hand_is_rejected() {
        let error = ConfigLoader::parse("max_hand_size = 11").expect_err("too large");
        assert!(error.to_string().contains("max_hand_size"));
    }
}
