//! Drives a whole run floor by floor.

use anyhow::{Context, Result};
use serde::Serialize;
use tactics_content::Catalog;
use tactics_core::{
    BattleConfig, BattleEngine, BattleOutcome, BattleSnapshot, GameEnv, Phase, RunStart,
    StandardElementChart,
};
use tracing::{info, warn};

use crate::autopilot::{Autopilot, Tally};
use crate::config::ClientConfig;

/// Printed as JSON when the run stops.
#[derive(Debug, PartialEq, Serialize)]
pub struct RunSummary {
    pub character: String,
    pub seed: u64,
    pub outcome: Option<BattleOutcome>,
    pub floors_cleared: u32,
    pub player_turns: u32,
    pub commands: u32,
    pub rejected: u32,
    pub events: usize,
    pub snapshot: BattleSnapshot,
}

pub fn play_run(config: &ClientConfig, catalog: &Catalog, battle: BattleConfig) -> Result<RunSummary> {
    let env = GameEnv::from_content(catalog).with_element_chart(&StandardElementChart);
    let seed = battle.seed;

    let RunStart { mut state, events } = BattleEngine::begin_run(env, battle, &config.character)
        .with_context(|| format!("Failed to start a run as '{}'", config.character))?;

    let mut tally = Tally::default();
    tally.observe(&events);
    let autopilot = Autopilot::new(catalog);
    let mut engine = BattleEngine::new(&mut state);
    let mut player_turns = 0;

    loop {
        match engine.state().phase() {
            Phase::PlayerTurn => {
                if player_turns >= config.max_turns {
                    warn!(player_turns, "turn limit reached, abandoning run");
                    break;
                }
                player_turns += 1;
                autopilot.take_turn(&mut engine, env, &mut tally);
            }
            Phase::Victory => {
                let floor = engine.state().floor;
                info!(floor, "floor cleared");
                let outcome = engine.advance_floor(env);
                if !tally.record(&outcome) {
                    anyhow::bail!(
                        "Advancing past floor {floor} was rejected: {}",
                        outcome.reason.unwrap_or_default()
                    );
                }
            }
            Phase::Defeat | Phase::Cleared => break,
            Phase::EnemyTurn => {
                anyhow::bail!("Engine handed control back during the enemy turn")
            }
        }
    }

    let state = engine.state();
    info!(
        phase = ?state.phase(),
        floors_cleared = state.floors_cleared,
        player_turns,
        "run finished"
    );

    Ok(RunSummary {
        character: config.character.to_string(),
        seed,
        outcome: tally.last_outcome,
        floors_cleared: state.floors_cleared,
        player_turns,
        commands: tally.commands,
        rejected: tally.rejected,
        events: tally.events,
        snapshot: engine.snapshot(),
    })
}

#[cfg(test)]
mod tests {
    use tactics_content::ContentFactory;

    use super::*;

    fn shipped() -> (ClientConfig, Catalog, BattleConfig) {
        let config = ClientConfig {
            max_turns: 60,
            ..ClientConfig::default()
        };
        let factory = ContentFactory::new(&config.data_dir);
        let catalog = factory.load_catalog().expect("shipped catalog");
        let battle = factory.load_config().expect("shipped config");
        (config, catalog, battle)
    }

    #[test]
    fn run_stops_at_an_end_state_or_turn_limit() {
        let (config, catalog, battle) = shipped();
        let summary = play_run(&config, &catalog, battle).expect("run");

        assert!(summary.player_turns <= config.max_turns);
        assert!(summary.commands > 0);
        assert_eq!(summary.rejected, 0);
        match summary.outcome {
            Some(BattleOutcome::RunComplete { floors_cleared }) => {
                assert_eq!(floors_cleared, catalog.floor_count());
                assert_eq!(summary.snapshot.phase, Phase::Cleared);
            }
            Some(BattleOutcome::Defeat { .. }) => assert_eq!(summary.snapshot.phase, Phase::Defeat),
            _ => assert_eq!(summary.player_turns, config.max_turns),
        }
    }

    #[test]
    fn same_seed_replays_identically() {
        let (config, catalog, battle) = shipped();
        let first = play_run(&config, &catalog, battle.clone()).expect("first run");
        let second = play_run(&config, &catalog, battle).expect("second run");
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_character_is_reported() {
        let (mut config, catalog, battle) = shipped();
        config.character = "nobody".into();
        let error = play_run(&config, &catalog, battle).expect_err("no such character");
        assert!(error.to_string().contains("nobody"));
    }
}
