//! In-memory catalog shared by the integration tests.
#![allow(dead_code)]

use std::collections::BTreeMap;

use tactics_core::{
    AbilityId, AbilityOracle, AbilityTemplate, ActivationCondition, BattleConfig, BattleState,
    CardId, CardInstanceId, CardOracle, CardTemplate, CardType, CharacterId, CharacterOracle,
    CharacterTemplate, EffectKind, EffectTemplate, Element, EncounterOracle, EnemyKindId,
    EnemyOracle, EnemySpawn, EnemyTemplate, Event, FloorSpec, GameEnv, GridDimensions, Position,
    RunStart, TargetSelector, begin_run,
};

pub const HERO: &str = "hero";

#[derive(Default)]
pub struct Catalog {
    pub cards: BTreeMap<CardId, CardTemplate>,
    pub abilities: BTreeMap<AbilityId, AbilityTemplate>,
    pub enemies: BTreeMap<EnemyKindId, EnemyTemplate>,
    pub characters: BTreeMap<CharacterId, CharacterTemplate>,
    pub floors: BTreeMap<u32, FloorSpec>,
}

impl CardOracle for Catalog {
    fn card(&self, id: &CardId) -> Option<&CardTemplate> {
        self.cards.get(id)
    }
}

impl AbilityOracle for Catalog {
    fn ability(&self, id: &AbilityId) -> Option<&AbilityTemplate> {
        self.abilities.get(id)
    }
}

impl EnemyOracle for Catalog {
    fn enemy(&self, id: &EnemyKindId) -> Option<&EnemyTemplate> {
        self.enemies.get(id)
    }
}

impl CharacterOracle for Catalog {
    fn character(&self, id: &CharacterId) -> Option<&CharacterTemplate> {
        self.characters.get(id)
    }
}

impl EncounterOracle for Catalog {
    fn floor(&self, number: u32) -> Option<&FloorSpec> {
        self.floors.get(&number)
    }
}

impl Catalog {
    /// Standard cards, one passive and one active ability, an 80/80 hero
    /// with 3 energy and a deck of ten strikes. No floors.
    pub fn standard() -> Self {
        let mut catalog = Self::default();

        catalog.add_card(
            CardTemplate::new("strike", "Strike", 1, CardType::Attack)
                .with_upright([EffectTemplate::damage(10)])
                .with_reversed([EffectTemplate::shield_self(6)]),
        );
        catalog.add_card(
            CardTemplate::new("heavy", "Heavy Blow", 4, CardType::Attack)
                .with_upright([EffectTemplate::damage(30)]),
        );
        catalog.add_card(
            CardTemplate::new("blood_pact", "Blood Pact", 0, CardType::Skill).with_upright([
                EffectTemplate::new(EffectKind::Damage, 56, TargetSelector::Caster),
            ]),
        );
        catalog.add_card(
            CardTemplate::new("nick", "Nick", 0, CardType::Skill).with_upright([
                EffectTemplate::new(EffectKind::Damage, 10, TargetSelector::Caster),
            ]),
        );
        catalog.add_card(
            CardTemplate::new("mend", "Mend", 0, CardType::Skill)
                .with_upright([EffectTemplate::heal_self(10)]),
        );
        catalog.add_card(
            CardTemplate::new("jolt", "Jolt", 1, CardType::Skill).with_upright([
                EffectTemplate::new(EffectKind::Stun, 1, TargetSelector::Target).with_duration(1),
            ]),
        );
        catalog.add_card(
            CardTemplate::new("venom", "Venom", 1, CardType::Skill).with_upright([
                EffectTemplate::new(EffectKind::DamageOverTime, 3, TargetSelector::Target)
                    .with_duration(2),
            ]),
        );
        catalog.add_card(
            CardTemplate::new("daze", "Daze", 0, CardType::Skill).with_upright([
                EffectTemplate::new(EffectKind::Stun, 1, TargetSelector::Caster).with_duration(1),
            ]),
        );
        catalog.add_card(
            CardTemplate::new("rally", "Rally", 0, CardType::Skill).with_upright([
                EffectTemplate::new(EffectKind::DamageBoost, 10, TargetSelector::Caster)
                    .with_duration(1),
            ]),
        );
        catalog.add_card(
            CardTemplate::new("step", "Step", 1, CardType::Movement)
                .with_upright([EffectTemplate::move_to_tile(0)]),
        );

        catalog.add_ability(
            AbilityTemplate::passive("last_stand", ActivationCondition::HealthAtMostPercent(30))
                .with_effects([EffectTemplate::new(
                    EffectKind::DamageBoost,
                    25,
                    TargetSelector::Caster,
                )]),
        );
        catalog.add_ability(
            AbilityTemplate::active("fireball", 2, 2).with_effects([EffectTemplate::damage(12)]),
        );
        catalog.add_ability(
            AbilityTemplate::active("unlearned", 0, 0)
                .with_effects([EffectTemplate::heal_self(1)]),
        );
        catalog.add_ability(
            AbilityTemplate::passive("bulwark", ActivationCondition::Always)
                .with_effects([EffectTemplate::shield_self(5)]),
        );

        catalog.add_enemy(enemy("slime", 5, 4, 1, 1).with_abilities(["bulwark"]));
        catalog.add_enemy(enemy("rat", 5, 3, 2, 1));
        catalog.add_enemy(enemy("brute", 40, 7, 2, 1));

        catalog.add_character(CharacterTemplate {
            id: HERO.into(),
            name: "Hero".into(),
            max_health: 80,
            max_energy: 3,
            move_range: 2,
            attack_range: 1,
            element: Element::Neutral,
            deck: vec!["strike".into(); 10],
            abilities: vec!["last_stand".into(), "fireball".into()],
        });
        catalog
    }

    pub fn add_card(&mut self, card: CardTemplate) {
        self.cards.insert(card.id.clone(), card);
    }

    pub fn add_ability(&mut self, ability: AbilityTemplate) {
        self.abilities.insert(ability.id.clone(), ability);
    }

    pub fn add_enemy(&mut self, enemy: EnemyTemplate) {
        self.enemies.insert(enemy.id.clone(), enemy);
    }

    pub fn add_character(&mut self, character: CharacterTemplate) {
        self.characters.insert(character.id.clone(), character);
    }

    /// An open 6x6 floor with the hero at the origin.
    pub fn add_floor(&mut self, number: u32, spawns: &[(&str, Position)]) {
        self.floors.insert(
            number,
            FloorSpec {
                dimensions: GridDimensions::new(6, 6),
                walls: Vec::new(),
                pits: Vec::new(),
                player_start: Position::ORIGIN,
                spawns: spawns
                    .iter()
                    .map(|(kind, position)| EnemySpawn {
                        kind: (*kind).into(),
                        position: *position,
                    })
                    .collect(),
            },
        );
    }

    /// Replaces the hero's deck.
    pub fn set_deck(&mut self, cards: &[&str]) {
        if let Some(hero) = self.characters.get_mut(&CharacterId::from(HERO)) {
            hero.deck = cards.iter().map(|card| CardId::from(*card)).collect();
        }
    }

    pub fn env(&self) -> GameEnv<'_> {
        GameEnv::from_content(self)
    }

    pub fn start(&self) -> RunStart {
        self.start_with(BattleConfig::with_seed(7))
    }

    pub fn start_with(&self, config: BattleConfig) -> RunStart {
        begin_run(&self.env(), config, &CharacterId::from(HERO)).expect("run should start")
    }
}

pub trait WithAbilities {
    fn with_abilities<const N: usize>(self, ids: [&str; N]) -> Self;
}

impl WithAbilities for EnemyTemplate {
    fn with_abilities<const N: usize>(mut self, ids: [&str; N]) -> Self {
        self.abilities = ids.iter().map(|id| AbilityId::from(*id)).collect();
        self
    }
}

pub fn enemy(
    id: &str,
    max_health: u32,
    attack_damage: u32,
    move_range: u32,
    attack_range: u32,
) -> EnemyTemplate {
    EnemyTemplate {
        id: id.into(),
        name: id.to_uppercase(),
        max_health,
        attack_damage,
        move_range,
        attack_range,
        element: Element::Neutral,
        abilities: Vec::new(),
    }
}

/// First hand card built from `card`.
pub fn hand_card(state: &BattleState, card: &str) -> CardInstanceId {
    state
        .player
        .piles
        .hand()
        .iter()
        .find(|instance| instance.card.as_str() == card)
        .map(|instance| instance.id)
        .expect("card should be in hand")
}

pub fn card_count(state: &BattleState) -> usize {
    let piles = &state.player.piles;
    piles.hand().len() + piles.draw_pile().len() + piles.discard_pile().len()
}

pub fn has_event(events: &[Event], predicate: impl Fn(&Event) -> bool) -> bool {
    events.iter().any(predicate)
}
