use super::card::Card;
use super::cards::Cards;
use serde::Serialize;

/// The hero's hole cards. Upstream detection may leave 0, 1, or 2 cards
/// known while a hand is being entered; the decision engine refuses to act
/// until both are known.
#[derive(Debug, Default, Clone, Copy, Hash, Eq, PartialEq, Serialize)]
pub struct Hole(Cards);

impl Hole {
    pub fn empty() -> Self {
        Self(Cards::EMPTY)
    }
    pub fn known(&self) -> usize {
        self.0.size()
    }
    pub fn cards(&self) -> Cards {
        self.0
    }
    pub fn reveal(&mut self, card: Card) {
        assert!(self.known() < 2);
        assert!(!self.0.contains(card));
        self.0.insert(card);
    }
}

impl From<(Card, Card)> for Hole {
    fn from((a, b): (Card, Card)) -> Self {
        assert!(a != b);
        Self(Cards::from(a).merge(Cards::from(b)))
    }
}
impl From<Hole> for Cards {
    fn from(hole: Hole) -> Self {
        hole.0
    }
}

impl TryFrom<&str> for Hole {
    type Error = Box<dyn std::error::Error>;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let cards = Cards::try_from(s)?;
        match cards.size() {
            0..=2 => Ok(Self(cards)),
            n => Err(format!("{} cards is too many for a hole", n).into()),
        }
    }
}

impl std::fmt::Display for Hole {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_knowledge() {
        let mut hole = Hole::empty();
        assert_eq!(hole.known(), 0);
        hole.reveal(Card::try_from("As").unwrap());
        assert_eq!(hole.known(), 1);
        hole.reveal(Card::try_from("Ah").unwrap());
        assert_eq!(hole.known(), 2);
    }

    #[test]
    fn from_pair() {
        let hole = Hole::try_from("As Ah").unwrap();
        assert_eq!(hole.known(), 2);
        assert_eq!(hole.cards().size(), 2);
    }
}
