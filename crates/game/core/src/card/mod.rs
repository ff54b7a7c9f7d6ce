//! Card templates, card instances and the per-character pile economy.
mod piles;

pub use piles::{DrawReport, PileError, Piles};

use crate::effect::{EffectKind, EffectTemplate, TargetSelector};
use crate::env::Element;
use crate::state::{CardId, CardInstanceId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CardType {
    Attack,
    Defense,
    Skill,
    Movement,
    Special,
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Legendary,
}

/// Which of a card's two effect lists is live.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Orientation {
    #[default]
    Upright,
    Reversed,
}

impl Orientation {
    pub const fn flipped(self) -> Self {
        match self {
            Self::Upright => Self::Reversed,
            Self::Reversed => Self::Upright,
        }
    }
}

/// Immutable card definition served by the card catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardTemplate {
    pub id: CardId,
    pub name: String,
    pub cost: u32,
    pub card_type: CardType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub element: Element,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rarity: Rarity,
    /// Targeting range override. Falls back to the caster's attack range.
    #[cfg_attr(feature = "serde", serde(default))]
    pub range: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub upright: Vec<EffectTemplate>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub reversed: Vec<EffectTemplate>,
    /// Single-list form used by older card data. Only consulted when the
    /// orientation's own list is empty.
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<EffectTemplate>,
}

impl CardTemplate {
    pub fn new(id: impl Into<CardId>, name: impl Into<String>, cost: u32, card_type: CardType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cost,
            card_type,
            element: Element::Neutral,
            rarity: Rarity::Common,
            range: None,
            upright: Vec::new(),
            reversed: Vec::new(),
            effects: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_upright(mut self, effects: impl IntoIterator<Item = EffectTemplate>) -> Self {
        self.upright = effects.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_reversed(mut self, effects: impl IntoIterator<Item = EffectTemplate>) -> Self {
        self.reversed = effects.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_element(mut self, element: Element) -> Self {
        self.element = element;
        self
    }

    #[must_use]
    pub fn with_range(mut self, range: u32) -> Self {
        self.range = Some(range);
        self
    }

    /// Effect list selected by `orientation`.
    pub fn effects_for(&self, orientation: Orientation) -> &[EffectTemplate] {
        let list = match orientation {
            Orientation::Upright => &self.upright,
            Orientation::Reversed => &self.reversed,
        };
        if list.is_empty() { &self.effects } else { list }
    }

    /// Sum of `Damage` magnitudes in the given orientation.
    pub fn damage_for(&self, orientation: Orientation) -> u32 {
        self.effects_for(orientation)
            .iter()
            .filter(|e| e.kind == EffectKind::Damage)
            .map(|e| e.magnitude)
            .sum()
    }

    pub fn wants_target(&self, orientation: Orientation) -> bool {
        self.effects_for(orientation)
            .iter()
            .any(|e| e.target == TargetSelector::Target)
    }
}

/// One physical card in a deck.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardInstance {
    pub id: CardInstanceId,
    pub card: CardId,
    pub orientation: Orientation,
}

impl CardInstance {
    pub fn new(id: CardInstanceId, card: CardId) -> Self {
        Self {
            id,
            card,
            orientation: Orientation::Upright,
        }
    }

    /// Flips orientation and returns the new one.
    pub fn reverse(&mut self) -> Orientation {
        self.orientation = self.orientation.flipped();
        self.orientation
    }
}
