use super::card::Card;
use super::cards::Cards;
use super::street::Street;
use crate::error::EngineError;
use serde::Serialize;

/// The community cards in the order they were revealed. Length only grows
/// over the lifetime of a hand; `reveal` appends and never rewrites.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cards: Vec::with_capacity(5),
        }
    }
    pub fn size(&self) -> usize {
        self.cards.len()
    }
    pub fn seen(&self) -> &[Card] {
        &self.cards
    }
    pub fn cards(&self) -> Cards {
        self.cards.iter().copied().collect()
    }
    pub fn street(&self) -> Result<Street, EngineError> {
        Street::try_from(self.size())
    }
    /// the highest rank showing, if any
    pub fn top_rank(&self) -> Option<super::rank::Rank> {
        self.cards.iter().map(|c| c.rank()).max()
    }

    /// append newly dealt cards; the result must land on a real street
    pub fn reveal(&mut self, reveal: &[Card]) -> Result<(), EngineError> {
        let cards = self.cards();
        for card in reveal {
            if cards.contains(*card) {
                return Err(EngineError::InvalidGameState(format!(
                    "{} already on board",
                    card
                )));
            }
        }
        let mut grown = self.cards.clone();
        grown.extend_from_slice(reveal);
        Street::try_from(grown.len())?;
        self.cards = grown;
        Ok(())
    }
}

impl TryFrom<Vec<Card>> for Board {
    type Error = EngineError;
    fn try_from(cards: Vec<Card>) -> Result<Self, Self::Error> {
        let distinct = cards.iter().copied().collect::<Cards>();
        if distinct.size() != cards.len() {
            return Err(EngineError::InvalidGameState(
                "duplicate community cards".into(),
            ));
        }
        Street::try_from(cards.len())?;
        Ok(Self { cards })
    }
}

impl TryFrom<&str> for Board {
    type Error = Box<dyn std::error::Error>;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let cards = s
            .split_whitespace()
            .map(Card::try_from)
            .collect::<Result<Vec<Card>, _>>()?;
        Ok(Self::try_from(cards)?)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for card in self.cards.iter() {
            write!(f, "{} ", card)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monotone_growth() {
        let mut board = Board::empty();
        assert_eq!(board.street().unwrap(), Street::Preflop);
        let flop = Cards::try_from("Jc Ts 2c").unwrap().collect::<Vec<Card>>();
        board.reveal(&flop).unwrap();
        assert_eq!(board.street().unwrap(), Street::Flop);
        let turn = [Card::try_from("7d").unwrap()];
        board.reveal(&turn).unwrap();
        assert_eq!(board.street().unwrap(), Street::Turn);
    }

    #[test]
    fn rejects_partial_streets() {
        let mut board = Board::empty();
        let deal = [Card::try_from("Jc").unwrap()];
        assert!(board.reveal(&deal).is_err());
        assert_eq!(board.size(), 0);
    }

    #[test]
    fn rejects_duplicates() {
        let mut board = Board::try_from("Jc Ts 2c").unwrap();
        let dupe = [Card::try_from("Jc").unwrap()];
        assert!(board.reveal(&dupe).is_err());
    }
}
