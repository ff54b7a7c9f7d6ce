//! Client configuration read from the environment.

use std::env;
use std::path::PathBuf;

use tactics_core::CharacterId;

const DEFAULT_CHARACTER: &str = "warden";
const DEFAULT_MAX_TURNS: u32 = 200;

/// Settings for a headless run.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Directory holding `config.toml` and the RON catalogs.
    pub data_dir: PathBuf,
    pub character: CharacterId,
    /// Overrides the seed from `config.toml` when set.
    pub seed: Option<u64>,
    /// Player turns after which the run is abandoned.
    pub max_turns: u32,
    /// Also write logs to `tactics.log` here.
    pub log_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            character: CharacterId::from(DEFAULT_CHARACTER),
            seed: None,
            max_turns: DEFAULT_MAX_TURNS,
            log_dir: None,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = read_env::<PathBuf>("TACTICS_DATA_DIR") {
            config.data_dir = dir;
        }
        if let Some(character) = read_env::<String>("TACTICS_CHARACTER") {
            config.character = CharacterId::from(character.as_str());
        }
        config.seed = read_env::<u64>("TACTICS_SEED");
        if let Some(turns) = read_env::<u32>("TACTICS_MAX_TURNS") {
            config.max_turns = turns.max(1);
        }
        config.log_dir = read_env::<PathBuf>("TACTICS_LOG_DIR");

        config
    }
}

/// Shipped content next to the content crate.
fn default_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../game/content/data")
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
