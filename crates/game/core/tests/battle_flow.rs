//! Card play, targeting and rejection through the battle engine.

mod common;

use common::{Catalog, card_count, enemy, hand_card, has_event};
use tactics_core::{
    BattleConfig, BattleEngine, BattleOutcome, EffectKind, EntityId, ErrorSeverity, Event,
    Orientation, Phase, Position, TargetRef, TransitionPhase,
};

fn full_hand() -> BattleConfig {
    BattleConfig {
        starting_hand_size: 10,
        ..BattleConfig::with_seed(11)
    }
}

fn mixed_catalog(spawns: &[(&str, Position)]) -> Catalog {
    let mut catalog = Catalog::standard();
    catalog.set_deck(&[
        "strike",
        "strike",
        "heavy",
        "jolt",
        "venom",
        "step",
        "mend",
        "nick",
        "blood_pact",
        "strike",
    ]);
    catalog.add_floor(1, spawns);
    catalog
}

#[test]
fn strike_breaks_shield_and_kills_last_enemy() {
    let mut catalog = Catalog::standard();
    catalog.add_floor(1, &[("slime", Position::new(1, 0))]);
    let env = catalog.env();
    let mut run = catalog.start();

    let slime = run.state.enemies[0].unit.id;
    assert_eq!(run.state.player.piles.hand().len(), 5);
    assert_eq!(run.state.enemies[0].unit.effects.magnitude(EffectKind::Shield), 5);

    let card = run.state.player.piles.hand()[0].id;
    let mut engine = BattleEngine::new(&mut run.state);
    let outcome = engine.play_card(env, card, Some(TargetRef::Entity(slime)));

    assert!(outcome.accepted, "{:?}", outcome.reason);
    assert!(has_event(&outcome.events, |event| matches!(
        event,
        Event::Damaged { target, amount: 5, absorbed: 5, remaining: 0, .. } if *target == slime
    )));
    assert!(has_event(&outcome.events, |event| matches!(
        event,
        Event::EntityDied { entity } if *entity == slime
    )));
    assert!(has_event(&outcome.events, |event| matches!(
        event,
        Event::BattleEnded {
            outcome: BattleOutcome::Victory { floor: 1 }
        }
    )));

    let state = engine.state();
    assert_eq!(state.turn.phase, Phase::Victory);
    assert!(state.enemies.is_empty());
    assert_eq!(state.battlefield.occupant(Position::new(1, 0)), None);
    assert_eq!(state.player.energy.current, 2);
    assert_eq!(state.floors_cleared, 1);
    assert_eq!(state.player.piles.discard_pile().len(), 1);
}

#[test]
fn commands_after_victory_are_rejected() {
    let mut catalog = Catalog::standard();
    catalog.add_floor(1, &[("rat", Position::new(1, 0))]);
    let env = catalog.env();
    let mut run = catalog.start();
    let rat = run.state.enemies[0].unit.id;

    let card = run.state.player.piles.hand()[0].id;
    let mut engine = BattleEngine::new(&mut run.state);
    assert!(engine.play_card(env, card, Some(rat.into())).accepted);

    let outcome = engine.end_turn(env);
    assert!(!outcome.accepted);
    let rejection = outcome.rejection.expect("rejection details");
    assert_eq!(rejection.code, "BATTLE_OVER");
    assert_eq!(rejection.severity, ErrorSeverity::Validation);
}

#[test]
fn rejected_commands_leave_state_untouched() {
    let catalog = mixed_catalog(&[("brute", Position::new(4, 4))]);
    let env = catalog.env();
    let mut run = catalog.start_with(full_hand());
    let brute = run.state.enemies[0].unit.id;
    let before = run.state.clone();

    let heavy = hand_card(&run.state, "heavy");
    let strike = hand_card(&run.state, "strike");
    let mut engine = BattleEngine::new(&mut run.state);

    let outcome = engine.play_card(env, heavy, Some(brute.into()));
    assert!(!outcome.accepted);
    assert!(outcome.events.is_empty());
    let rejection = outcome.rejection.expect("rejection details");
    assert_eq!(rejection.code, "INSUFFICIENT_ENERGY");
    assert_eq!(rejection.severity, ErrorSeverity::Recoverable);
    assert_eq!(rejection.phase, TransitionPhase::PreValidate);

    let outcome = engine.play_card(env, strike, Some(brute.into()));
    assert_eq!(outcome.rejection.map(|r| r.code), Some("TARGET_OUT_OF_RANGE"));

    let outcome = engine.play_card(env, strike, None);
    assert_eq!(outcome.rejection.map(|r| r.code), Some("MISSING_TARGET"));

    let outcome = engine.play_card(env, strike, Some(EntityId::PLAYER.into()));
    assert_eq!(outcome.rejection.map(|r| r.code), Some("INVALID_TARGET"));

    let outcome = engine.play_card(env, tactics_core::CardInstanceId(99), None);
    assert_eq!(outcome.rejection.map(|r| r.code), Some("CARD_NOT_IN_HAND"));

    assert_eq!(engine.state(), &before);
}

#[test]
fn tile_target_resolves_to_its_occupant() {
    let catalog = mixed_catalog(&[("brute", Position::new(0, 1))]);
    let env = catalog.env();
    let mut run = catalog.start_with(full_hand());
    let brute = run.state.enemies[0].unit.id;

    let strike = hand_card(&run.state, "strike");
    let mut engine = BattleEngine::new(&mut run.state);

    let outcome = engine.play_card(env, strike, Some(TargetRef::Tile(Position::new(1, 1))));
    assert_eq!(outcome.rejection.map(|r| r.code), Some("EMPTY_TILE"));

    let outcome = engine.play_card(env, strike, Some(TargetRef::Tile(Position::new(0, 1))));
    assert!(outcome.accepted);
    assert_eq!(engine.state().enemy(brute).map(|e| e.unit.health.current), Some(30));
}

#[test]
fn movement_card_relocates_player_within_range() {
    let catalog = mixed_catalog(&[("brute", Position::new(5, 5))]);
    let env = catalog.env();
    let mut run = catalog.start_with(full_hand());
    let step = hand_card(&run.state, "step");
    let mut engine = BattleEngine::new(&mut run.state);

    let tiles = engine.reachable_tiles(env, Some(step)).expect("tiles");
    assert!(tiles.contains(&Position::new(1, 1)));
    assert!(!tiles.contains(&Position::new(3, 0)));

    let outcome = engine.play_card(env, step, Some(TargetRef::Tile(Position::new(3, 0))));
    assert_eq!(outcome.rejection.map(|r| r.code), Some("TILE_UNREACHABLE"));

    let outcome = engine.play_card(env, step, Some(TargetRef::Tile(Position::new(1, 1))));
    assert!(outcome.accepted);
    assert!(has_event(&outcome.events, |event| matches!(
        event,
        Event::Moved { entity: EntityId::PLAYER, to, .. } if *to == Position::new(1, 1)
    )));
    let state = engine.state();
    assert_eq!(state.player.unit.position, Position::new(1, 1));
    assert_eq!(state.battlefield.occupant(Position::new(1, 1)), Some(EntityId::PLAYER));
    assert_eq!(state.battlefield.occupant(Position::ORIGIN), None);
}

#[test]
fn reversed_card_resolves_its_reversed_effects() {
    let catalog = mixed_catalog(&[("brute", Position::new(1, 0))]);
    let env = catalog.env();
    let mut run = catalog.start_with(full_hand());
    let strike = hand_card(&run.state, "strike");
    let mut engine = BattleEngine::new(&mut run.state);

    let outcome = engine.reverse_card(env, strike);
    assert!(outcome.accepted);
    assert!(has_event(&outcome.events, |event| matches!(
        event,
        Event::CardReversed { orientation: Orientation::Reversed, .. }
    )));

    // reversed strike shields the caster and needs no target
    let outcome = engine.play_card(env, strike, None);
    assert!(outcome.accepted, "{:?}", outcome.reason);
    let state = engine.state();
    assert_eq!(state.player.unit.effects.magnitude(EffectKind::Shield), 6);
    assert_eq!(state.enemies[0].unit.health.current, 40);
}

#[test]
fn selection_drives_target_queries() {
    let catalog = mixed_catalog(&[("brute", Position::new(1, 0)), ("rat", Position::new(5, 5))]);
    let env = catalog.env();
    let mut run = catalog.start_with(full_hand());
    let brute = run.state.enemies[0].unit.id;
    let strike = hand_card(&run.state, "strike");
    let mut engine = BattleEngine::new(&mut run.state);

    let outcome = engine.play_selected(env, Some(brute.into()));
    assert_eq!(outcome.rejection.map(|r| r.code), Some("NO_SELECTION"));

    assert!(engine.select_card(env, strike).accepted);
    assert_eq!(engine.state().selection, Some(strike));
    assert_eq!(engine.valid_targets(env, None).expect("targets"), vec![brute]);
    assert!(engine.reachable_tiles(env, None).expect("tiles").is_empty());

    assert!(engine.play_selected(env, Some(brute.into())).accepted);
    assert_eq!(engine.state().selection, None);
}

#[test]
fn deck_is_conserved_and_energy_only_refills_at_turn_start() {
    let mut catalog = mixed_catalog(&[("golem", Position::new(1, 0))]);
    catalog.add_enemy(enemy("golem", 500, 1, 1, 1));
    let env = catalog.env();
    let mut run = catalog.start_with(full_hand());
    let golem = run.state.enemies[0].unit.id;
    let mut engine = BattleEngine::new(&mut run.state);

    for _ in 0..3 {
        let mut last = engine.state().player.energy.current;
        while let Some(card) = engine
            .state()
            .player
            .piles
            .hand()
            .iter()
            .find(|card| card.card.as_str() == "strike")
            .map(|card| card.id)
        {
            let outcome = engine.play_card(env, card, Some(golem.into()));
            if !outcome.accepted {
                break;
            }
            let energy = engine.state().player.energy.current;
            assert!(energy < last);
            last = energy;
            assert_eq!(card_count(engine.state()), 10);
            assert!(engine.state().player.piles.is_conserved());
        }

        let outcome = engine.end_turn(env);
        assert!(outcome.accepted);
        assert_eq!(card_count(engine.state()), 10);
        let state = engine.state();
        assert_eq!(state.player.energy.current, state.player.energy.maximum);
    }
}

#[test]
fn reshuffle_reports_the_recycled_discard_pile() {
    let mut catalog = Catalog::standard();
    catalog.set_deck(&["mend"; 6]);
    catalog.add_floor(1, &[("brute", Position::new(5, 5))]);
    let env = catalog.env();
    let mut run = catalog.start_with(BattleConfig {
        cards_per_turn: 2,
        ..BattleConfig::with_seed(5)
    });
    assert_eq!(run.state.player.piles.draw_pile().len(), 1);
    let mut engine = BattleEngine::new(&mut run.state);

    for _ in 0..2 {
        let mend = hand_card(engine.state(), "mend");
        assert!(engine.play_card(env, mend, None).accepted);
    }
    let outcome = engine.end_turn(env);
    assert!(outcome.accepted);

    // one card came off the old draw pile, then the two discards were recycled
    let reshuffles: Vec<usize> = outcome
        .events
        .iter()
        .filter_map(|event| match event {
            Event::DeckReshuffled { cards } => Some(*cards),
            _ => None,
        })
        .collect();
    assert_eq!(reshuffles, vec![2]);
    assert_eq!(engine.state().player.piles.draw_pile().len(), 1);
    assert_eq!(card_count(engine.state()), 6);
}
