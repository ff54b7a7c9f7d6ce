/// Battle configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Maximum number of cards a hand may hold. Clamped to [`Self::MAX_HAND_SIZE`].
    pub max_hand_size: usize,

    /// Cards drawn when a battle (floor) begins.
    pub starting_hand_size: usize,

    /// Cards drawn at the start of every player turn after the first.
    pub cards_per_turn: usize,

    /// Base seed for deck shuffles. Combined with a per-battle nonce.
    pub seed: u64,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    /// Hard capacity of a hand.
    pub const MAX_HAND_SIZE: usize = 10;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_STARTING_HAND: usize = 5;
    pub const DEFAULT_CARDS_PER_TURN: usize = 1;

    pub fn new() -> Self {
        Self {
            max_hand_size: Self::MAX_HAND_SIZE,
            starting_hand_size: Self::DEFAULT_STARTING_HAND,
            cards_per_turn: Self::DEFAULT_CARDS_PER_TURN,
            seed: 0,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::new()
        }
    }

    /// Effective hand limit, never above the compile-time capacity.
    pub fn hand_limit(&self) -> usize {
        self.max_hand_size.min(Self::MAX_HAND_SIZE)
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
