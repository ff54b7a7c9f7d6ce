//! Draw pile, hand and discard pile of one character.
//!
//! Every card of the deck is in exactly one of the three piles at all times.
//! The draw pile is popped from the back (its top); the discard pile keeps
//! play order.

use arrayvec::ArrayVec;

use super::{CardInstance, Orientation};
use crate::config::BattleConfig;
use crate::env::{RngOracle, compute_seed};
use crate::state::{CardId, CardInstanceId};

pub type Hand = ArrayVec<CardInstance, { BattleConfig::MAX_HAND_SIZE }>;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PileError {
    #[error("{0} is not in hand")]
    NotInHand(CardInstanceId),
}

/// Outcome of a draw request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DrawReport {
    pub drawn: Vec<CardInstanceId>,
    /// Size of the draw pile right after the discard pile was shuffled into
    /// it. `None` if no reshuffle happened.
    pub reshuffled: Option<usize>,
    /// Draws skipped because the hand was full.
    pub dropped: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Piles {
    draw: Vec<CardInstance>,
    hand: Hand,
    discard: Vec<CardInstance>,
    deck_size: usize,
}

impl Piles {
    /// Puts the whole deck in the draw pile, in the given order.
    pub fn new(deck: Vec<CardInstance>) -> Self {
        let deck_size = deck.len();
        Self {
            draw: deck,
            hand: Hand::new(),
            discard: Vec::new(),
            deck_size,
        }
    }

    /// Builds upright instances numbered from zero.
    pub fn from_card_ids<'a>(cards: impl IntoIterator<Item = &'a CardId>) -> Self {
        let deck = cards
            .into_iter()
            .enumerate()
            .map(|(index, card)| CardInstance::new(CardInstanceId(index as u32), card.clone()))
            .collect();
        Self::new(deck)
    }

    /// Uniform Fisher–Yates shuffle of the draw pile.
    pub fn shuffle_draw(&mut self, rng: &dyn RngOracle, seed: u64) {
        shuffle(&mut self.draw, rng, seed);
    }

    /// Draws up to `count` cards into a hand capped at `limit`.
    ///
    /// An empty draw pile is refilled from the discard pile (shuffled with
    /// `seed`). Drawing stops quietly when both are empty. A draw into a full
    /// hand leaves the card on top of the draw pile.
    pub fn draw(
        &mut self,
        count: usize,
        limit: usize,
        rng: &dyn RngOracle,
        seed: u64,
    ) -> DrawReport {
        let limit = limit.min(BattleConfig::MAX_HAND_SIZE);
        let mut report = DrawReport::default();

        for remaining in (1..=count).rev() {
            if self.hand.len() >= limit {
                report.dropped = remaining;
                break;
            }
            if self.draw.is_empty() {
                if self.discard.is_empty() {
                    break;
                }
                self.draw.append(&mut self.discard);
                shuffle(&mut self.draw, rng, seed);
                report.reshuffled = Some(self.draw.len());
            }
            let Some(card) = self.draw.pop() else {
                break;
            };
            report.drawn.push(card.id);
            self.hand.push(card);
        }

        report
    }

    /// Moves a hand card to the discard pile and returns it.
    pub fn play(&mut self, id: CardInstanceId) -> Result<CardInstance, PileError> {
        let index = self.hand_index(id).ok_or(PileError::NotInHand(id))?;
        let card = self.hand.remove(index);
        self.discard.push(card.clone());
        Ok(card)
    }

    /// Moves the whole hand to the discard pile. Returns the number moved.
    pub fn discard_hand(&mut self) -> usize {
        let count = self.hand.len();
        self.discard.extend(self.hand.drain(..));
        count
    }

    /// Flips a hand card and returns its new orientation.
    pub fn reverse(&mut self, id: CardInstanceId) -> Result<Orientation, PileError> {
        let index = self.hand_index(id).ok_or(PileError::NotInHand(id))?;
        Ok(self.hand[index].reverse())
    }

    /// Flips every card in hand.
    pub fn reverse_hand(&mut self) -> Vec<(CardInstanceId, Orientation)> {
        self.hand
            .iter_mut()
            .map(|card| (card.id, card.reverse()))
            .collect()
    }

    /// Gathers every card into the draw pile, upright, and shuffles it.
    pub fn reset_for_battle(&mut self, rng: &dyn RngOracle, seed: u64) {
        self.draw.extend(self.hand.drain(..));
        self.draw.append(&mut self.discard);
        for card in &mut self.draw {
            card.orientation = Orientation::Upright;
        }
        self.draw.sort_by_key(|card| card.id);
        shuffle(&mut self.draw, rng, seed);
    }

    pub fn hand(&self) -> &[CardInstance] {
        &self.hand
    }

    pub fn in_hand(&self, id: CardInstanceId) -> Option<&CardInstance> {
        self.hand.iter().find(|card| card.id == id)
    }

    fn hand_index(&self, id: CardInstanceId) -> Option<usize> {
        self.hand.iter().position(|card| card.id == id)
    }

    /// Draw pile, top card last.
    pub fn draw_pile(&self) -> &[CardInstance] {
        &self.draw
    }

    pub fn discard_pile(&self) -> &[CardInstance] {
        &self.discard
    }

    pub fn deck_size(&self) -> usize {
        self.deck_size
    }

    /// True if no card has been lost or duplicated.
    pub fn is_conserved(&self) -> bool {
        self.draw.len() + self.hand.len() + self.discard.len() == self.deck_size
    }
}

fn shuffle(cards: &mut [CardInstance], rng: &dyn RngOracle, seed: u64) {
    for i in (1..cards.len()).rev() {
        let roll_seed = compute_seed(seed, i as u64, 0, 0);
        let j = rng.range(roll_seed, 0, i as u32) as usize;
        cards.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;

    fn deck(size: usize) -> Piles {
        let ids: Vec<CardId> = (0..size).map(|i| CardId::new(format!("c{i}"))).collect();
        Piles::from_card_ids(&ids)
    }

    #[test]
    fn draw_moves_from_top() {
        let mut piles = deck(4);
        let report = piles.draw(2, 10, &PcgRng, 1);
        assert_eq!(report.drawn, vec![CardInstanceId(3), CardInstanceId(2)]);
        assert_eq!(piles.hand().len(), 2);
        assert_eq!(piles.draw_pile().len(), 2);
        assert!(piles.is_conserved());
    }

    #[test]
    fn empty_draw_pile_reshuffles_discard() {
        let mut piles = deck(3);
        piles.draw(3, 10, &PcgRng, 1);
        piles.discard_hand();
        assert!(piles.draw_pile().is_empty());

        let report = piles.draw(2, 10, &PcgRng, 5);
        assert_eq!(report.reshuffled, Some(3));
        assert_eq!(report.drawn.len(), 2);
        assert_eq!(piles.discard_pile().len(), 0);
        assert_eq!(piles.draw_pile().len(), 1);
        assert!(piles.is_conserved());
    }

    #[test]
    fn reshuffle_counts_only_the_recycled_pile() {
        let mut piles = deck(4);
        piles.draw(3, 10, &PcgRng, 1);
        piles.discard_hand();
        assert_eq!(piles.draw_pile().len(), 1);

        // one card left on top, then the three discards come back
        let report = piles.draw(3, 10, &PcgRng, 2);
        assert_eq!(report.reshuffled, Some(3));
        assert_eq!(report.drawn.len(), 3);
        assert_eq!(piles.draw_pile().len(), 1);
        assert!(piles.is_conserved());
    }

    #[test]
    fn drawing_from_nothing_stops_short() {
        let mut piles = deck(2);
        let report = piles.draw(5, 10, &PcgRng, 1);
        assert_eq!(report.drawn.len(), 2);
        assert_eq!(report.dropped, 0);
        assert!(piles.is_conserved());
    }

    #[test]
    fn full_hand_leaves_cards_on_draw_pile() {
        let mut piles = deck(14);
        piles.draw(10, 10, &PcgRng, 1);
        let report = piles.draw(3, 10, &PcgRng, 1);
        assert!(report.drawn.is_empty());
        assert_eq!(report.dropped, 3);
        assert_eq!(piles.hand().len(), 10);
        assert_eq!(piles.draw_pile().len(), 4);
        assert!(piles.is_conserved());
    }

    #[test]
    fn play_moves_hand_to_discard() {
        let mut piles = deck(3);
        piles.draw(1, 10, &PcgRng, 1);
        let played = piles.play(CardInstanceId(2)).unwrap();
        assert_eq!(played.id, CardInstanceId(2));
        assert_eq!(piles.discard_pile().len(), 1);
        assert!(piles.hand().is_empty());

        assert_eq!(
            piles.play(CardInstanceId(2)),
            Err(PileError::NotInHand(CardInstanceId(2)))
        );
        assert!(piles.is_conserved());
    }

    #[test]
    fn shuffle_is_a_permutation_and_deterministic() {
        let mut a = deck(20);
        let mut b = deck(20);
        a.shuffle_draw(&PcgRng, 99);
        b.shuffle_draw(&PcgRng, 99);
        assert_eq!(a, b);

        let mut ids: Vec<u32> = a.draw_pile().iter().map(|c| c.id.0).collect();
        ids.sort_unstable();
        assert_eq!(ids, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn reset_gathers_everything() {
        let mut piles = deck(6);
        piles.draw(4, 10, &PcgRng, 1);
        piles.play(CardInstanceId(5)).unwrap();
        piles.reset_for_battle(&PcgRng, 3);
        assert_eq!(piles.draw_pile().len(), 6);
        assert!(piles.hand().is_empty());
        assert!(piles.discard_pile().is_empty());
    }

    #[test]
    fn reverse_hand_flips_each_card() {
        let mut piles = deck(2);
        piles.draw(2, 10, &PcgRng, 1);
        let flipped = piles.reverse_hand();
        assert_eq!(flipped.len(), 2);
        assert!(piles.hand().iter().all(|c| c.orientation == Orientation::Reversed));
    }
}
