use crate::cards::card::Card;
use crate::cards::cards::Cards;
use serde::Serialize;

/// One specific two-card opponent holding. Unordered: the bitset
/// representation makes "AsKh" and "KhAs" the same value, which is what
/// keys a Range.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Combo(Cards);

impl Combo {
    pub fn cards(&self) -> Cards {
        self.0
    }
    pub fn overlaps(&self, dead: Cards) -> bool {
        self.0.intersects(dead)
    }
    pub fn hi(&self) -> Card {
        Card::from(63 - u64::from(self.0).leading_zeros() as u8)
    }
    pub fn lo(&self) -> Card {
        Card::from(u64::from(self.0).trailing_zeros() as u8)
    }
    pub fn suited(&self) -> bool {
        self.hi().suit() == self.lo().suit()
    }
    pub fn paired(&self) -> bool {
        self.hi().rank() == self.lo().rank()
    }

    /// every two-card holding that avoids the dead cards; 1326 preflop
    pub fn enumerate(dead: Cards) -> Vec<Combo> {
        let live = Cards::ALL.without(dead).collect::<Vec<Card>>();
        let mut combos = Vec::with_capacity(live.len() * (live.len() - 1) / 2);
        for (i, a) in live.iter().enumerate() {
            for b in live.iter().skip(i + 1) {
                combos.push(Combo::from((*a, *b)));
            }
        }
        combos
    }
}

impl From<(Card, Card)> for Combo {
    fn from((a, b): (Card, Card)) -> Self {
        assert!(a != b);
        Self(Cards::from(a).merge(Cards::from(b)))
    }
}
impl From<Combo> for Cards {
    fn from(combo: Combo) -> Self {
        combo.0
    }
}

impl TryFrom<Cards> for Combo {
    type Error = Box<dyn std::error::Error>;
    fn try_from(cards: Cards) -> Result<Self, Self::Error> {
        match cards.size() {
            2 => Ok(Self(cards)),
            n => Err(format!("{} cards is not a combo", n).into()),
        }
    }
}

impl TryFrom<&str> for Combo {
    type Error = Box<dyn std::error::Error>;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::try_from(Cards::try_from(s)?)
    }
}

impl std::fmt::Display for Combo {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}", self.hi(), self.lo())
    }
}
