use super::card::Card;
use super::cards::Cards;
use rand::Rng;

/// The cards not yet seen from some perspective. Unlike the rest of the
/// cards module this one is consumed by drawing, always through a
/// caller-supplied rng so simulations stay reproducible under a fixed seed.
#[derive(Debug, Clone, Copy)]
pub struct Deck(Cards);

impl Deck {
    pub fn new() -> Self {
        Self(Cards::ALL)
    }
    pub fn size(&self) -> usize {
        self.0.size()
    }

    /// remove and return a uniformly random card
    pub fn draw(&mut self, rng: &mut impl Rng) -> Card {
        assert!(self.size() > 0);
        let i = rng.random_range(0..self.size());
        let mut bits = u64::from(self.0);
        for _ in 0..i {
            bits &= bits - 1;
        }
        let card = Card::from(bits.trailing_zeros() as u8);
        self.0.remove(card);
        card
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Cards> for Deck {
    fn from(cards: Cards) -> Self {
        Self(cards)
    }
}
impl From<Deck> for Cards {
    fn from(deck: Deck) -> Self {
        deck.0
    }
}
