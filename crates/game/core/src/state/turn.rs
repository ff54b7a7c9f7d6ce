/// Battle phase. `Victory`, `Defeat` and `Cleared` end the battle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    #[default]
    PlayerTurn,
    EnemyTurn,
    /// Every enemy on the floor is dead. Waiting for the next floor.
    Victory,
    /// The player died. Terminal.
    Defeat,
    /// No floors left. Terminal.
    Cleared,
}

impl Phase {
    pub const fn is_battle_over(self) -> bool {
        matches!(self, Self::Victory | Self::Defeat | Self::Cleared)
    }
}

/// Turn bookkeeping for the current battle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    pub phase: Phase,

    /// Round counter, starting at 1. Incremented after the enemy phase.
    pub round: u32,

    /// Player turns started in this battle. The first one draws no card.
    pub player_turns: u32,
}

impl TurnState {
    pub fn new() -> Self {
        Self {
            phase: Phase::PlayerTurn,
            round: 1,
            player_turns: 0,
        }
    }

    pub fn is_first_player_turn(&self) -> bool {
        self.player_turns <= 1
    }
}
