//! Traits describing read-only game content.
//!
//! Oracles expose card, ability, enemy and character catalogs, the floor
//! roster, the element chart and the shuffle RNG. [`GameEnv`] bundles them so
//! the engine can reach everything it needs without coupling to a concrete
//! content store.
mod content;
mod element;
mod error;
mod rng;

pub use content::{
    AbilityOracle, CardOracle, CharacterOracle, CharacterTemplate, EncounterOracle, EnemyOracle,
    EnemySpawn, EnemyTemplate, FloorSpec,
};
pub use element::{Element, ElementChart, StandardElementChart};
pub use error::OracleError;
pub use rng::{PcgRng, RngOracle, SHUFFLE_CONTEXT, compute_seed};

static DEFAULT_RNG: PcgRng = PcgRng;

/// A single store that can serve every content oracle at once.
pub trait ContentOracle:
    CardOracle + AbilityOracle + EnemyOracle + CharacterOracle + EncounterOracle
{
}

impl<T> ContentOracle for T where
    T: CardOracle + AbilityOracle + EnemyOracle + CharacterOracle + EncounterOracle
{
}

/// Aggregates read-only oracles required by the command pipeline.
///
/// Every slot is optional so tests can wire only what they touch. Missing
/// content oracles surface as [`OracleError`]; a missing element chart means
/// every hit is elementally even, and a missing RNG falls back to [`PcgRng`].
#[derive(Clone, Copy, Default)]
pub struct GameEnv<'a> {
    cards: Option<&'a dyn CardOracle>,
    abilities: Option<&'a dyn AbilityOracle>,
    enemies: Option<&'a dyn EnemyOracle>,
    characters: Option<&'a dyn CharacterOracle>,
    encounters: Option<&'a dyn EncounterOracle>,
    elements: Option<&'a dyn ElementChart>,
    rng: Option<&'a dyn RngOracle>,
}

impl<'a> GameEnv<'a> {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wires every content oracle to the same store.
    pub fn from_content<C: ContentOracle + 'a>(content: &'a C) -> Self {
        Self {
            cards: Some(content),
            abilities: Some(content),
            enemies: Some(content),
            characters: Some(content),
            encounters: Some(content),
            elements: None,
            rng: None,
        }
    }

    #[must_use]
    pub fn with_cards(mut self, cards: &'a dyn CardOracle) -> Self {
        self.cards = Some(cards);
        self
    }

    #[must_use]
    pub fn with_abilities(mut self, abilities: &'a dyn AbilityOracle) -> Self {
        self.abilities = Some(abilities);
        self
    }

    #[must_use]
    pub fn with_enemies(mut self, enemies: &'a dyn EnemyOracle) -> Self {
        self.enemies = Some(enemies);
        self
    }

    #[must_use]
    pub fn with_characters(mut self, characters: &'a dyn CharacterOracle) -> Self {
        self.characters = Some(characters);
        self
    }

    #[must_use]
    pub fn with_encounters(mut self, encounters: &'a dyn EncounterOracle) -> Self {
        self.encounters = Some(encounters);
        self
    }

    #[must_use]
    pub fn with_element_chart(mut self, chart: &'a dyn ElementChart) -> Self {
        self.elements = Some(chart);
        self
    }

    #[must_use]
    pub fn with_rng(mut self, rng: &'a dyn RngOracle) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Returns the CardOracle, or an error if not available.
    pub fn cards(&self) -> Result<&'a dyn CardOracle, OracleError> {
        self.cards.ok_or(OracleError::CardsNotAvailable)
    }

    /// Returns the AbilityOracle, or an error if not available.
    pub fn abilities(&self) -> Result<&'a dyn AbilityOracle, OracleError> {
        self.abilities.ok_or(OracleError::AbilitiesNotAvailable)
    }

    /// Returns the EnemyOracle, or an error if not available.
    pub fn enemies(&self) -> Result<&'a dyn EnemyOracle, OracleError> {
        self.enemies.ok_or(OracleError::EnemiesNotAvailable)
    }

    /// Returns the CharacterOracle, or an error if not available.
    pub fn characters(&self) -> Result<&'a dyn CharacterOracle, OracleError> {
        self.characters.ok_or(OracleError::CharactersNotAvailable)
    }

    /// Returns the EncounterOracle, or an error if not available.
    pub fn encounters(&self) -> Result<&'a dyn EncounterOracle, OracleError> {
        self.encounters.ok_or(OracleError::EncountersNotAvailable)
    }

    /// Element multiplier in percent; even (100) without a chart.
    pub fn element_multiplier(&self, attacker: Element, defender: Element) -> u32 {
        self.elements
            .map_or(StandardElementChart::EVEN, |chart| {
                chart.multiplier(attacker, defender)
            })
    }

    pub fn rng(&self) -> &'a dyn RngOracle {
        self.rng.unwrap_or(&DEFAULT_RNG)
    }
}

impl ElementChart for GameEnv<'_> {
    fn multiplier(&self, attacker: Element, defender: Element) -> u32 {
        self.element_multiplier(attacker, defender)
    }
}

impl std::fmt::Debug for GameEnv<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEnv")
            .field("cards", &self.cards.is_some())
            .field("abilities", &self.abilities.is_some())
            .field("enemies", &self.enemies.is_some())
            .field("characters", &self.characters.is_some())
            .field("encounters", &self.encounters.is_some())
            .field("elements", &self.elements.is_some())
            .field("rng", &self.rng.is_some())
            .finish()
    }
}
