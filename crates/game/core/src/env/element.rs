//! Elemental affinities and the multiplier table.

/// Elemental affinity of cards and combatants.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Element {
    #[default]
    Neutral,
    Fire,
    Water,
    Earth,
    Air,
    Light,
    Shadow,
}

/// Attacker × defender multiplier table, in percent.
///
/// Swappable data: the resolver only ever asks for a number.
pub trait ElementChart: Send + Sync {
    fn multiplier(&self, attacker: Element, defender: Element) -> u32;
}

/// Default chart.
///
/// Fire > Air > Earth > Water > Fire, Light and Shadow are strong against
/// each other, same element is slightly resisted and Neutral is always even.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardElementChart;

impl StandardElementChart {
    pub const STRONG: u32 = 150;
    pub const WEAK: u32 = 75;
    pub const SAME: u32 = 90;
    pub const EVEN: u32 = 100;

    fn beats(attacker: Element, defender: Element) -> bool {
        use Element::*;
        matches!(
            (attacker, defender),
            (Fire, Air)
                | (Air, Earth)
                | (Earth, Water)
                | (Water, Fire)
                | (Light, Shadow)
                | (Shadow, Light)
        )
    }
}

impl ElementChart for StandardElementChart {
    fn multiplier(&self, attacker: Element, defender: Element) -> u32 {
        if attacker == Element::Neutral || defender == Element::Neutral {
            return Self::EVEN;
        }
        if Self::beats(attacker, defender) {
            return Self::STRONG;
        }
        if Self::beats(defender, attacker) {
            return Self::WEAK;
        }
        if attacker == defender {
            return Self::SAME;
        }
        Self::EVEN
    }
}
