use super::cards::Cards;
use super::kicks::Kickers;
use super::rank::Rank;
use super::ranking::Ranking;
use super::suit::Suit;

/// A-2-3-4-5, the only straight whose high bit is not its high end
const WHEEL: u16 = 0b1000000001111;

/// Finds the best five-card hand inside a set of five to seven cards.
///
/// The set is split into four per-suit rank lanes; combining the lanes
/// bitwise yields rank-multiplicity masks (present at least once, paired,
/// tripled, quadded) from which every category falls out without sorting
/// or enumeration of five-card subsets.
pub struct Evaluator {
    lanes: [u16; 4],
}

impl From<Cards> for Evaluator {
    fn from(cards: Cards) -> Self {
        Self {
            lanes: Suit::all().map(|s| cards.of(s)),
        }
    }
}

impl Evaluator {
    pub fn ranking(&self) -> Ranking {
        None.or_else(|| self.straight_flush())
            .or_else(|| self.quads())
            .or_else(|| self.full_house())
            .or_else(|| self.flush())
            .or_else(|| self.straight())
            .or_else(|| self.trips())
            .or_else(|| self.two_pair())
            .or_else(|| self.one_pair())
            .or_else(|| self.high_card())
            .expect("at least one card in the set")
    }

    pub fn kickers(&self, ranking: Ranking) -> Kickers {
        match ranking.n_kickers() {
            0 => Kickers::default(),
            n => match ranking {
                // flushes break ties inside their own suit
                Ranking::Flush(_) => {
                    let lane = self.flush_lane().expect("flush implies a long lane");
                    Kickers::top(lane & !ranking.spent(), n)
                }
                _ => Kickers::top(self.present() & !ranking.spent(), n),
            },
        }
    }

    /// ranks held in any suit
    fn present(&self) -> u16 {
        let [a, b, c, d] = self.lanes;
        a | b | c | d
    }
    /// ranks held at least twice
    fn paired(&self) -> u16 {
        let [a, b, c, d] = self.lanes;
        (a & b) | (a & c) | (a & d) | (b & c) | (b & d) | (c & d)
    }
    /// ranks held at least three times
    fn tripped(&self) -> u16 {
        let [a, b, c, d] = self.lanes;
        (a & b & c) | (a & b & d) | (a & c & d) | (b & c & d)
    }
    /// ranks held in all four suits
    fn quaded(&self) -> u16 {
        let [a, b, c, d] = self.lanes;
        a & b & c & d
    }

    fn high_card(&self) -> Option<Ranking> {
        match self.present() {
            0 => None,
            ranks => Some(Ranking::HighCard(Rank::from(ranks))),
        }
    }
    fn one_pair(&self) -> Option<Ranking> {
        match self.paired() {
            0 => None,
            pairs => Some(Ranking::OnePair(Rank::from(pairs))),
        }
    }
    fn two_pair(&self) -> Option<Ranking> {
        let pairs = self.paired();
        match pairs.count_ones() {
            0 | 1 => None,
            _ => {
                let hi = Rank::from(pairs);
                let lo = Rank::from(pairs & !u16::from(hi));
                Some(Ranking::TwoPair(hi, lo))
            }
        }
    }
    fn trips(&self) -> Option<Ranking> {
        match self.tripped() {
            0 => None,
            trips => Some(Ranking::Trips(Rank::from(trips))),
        }
    }
    fn straight(&self) -> Option<Ranking> {
        Self::run(self.present()).map(Ranking::Straight)
    }
    fn flush(&self) -> Option<Ranking> {
        self.flush_lane()
            .map(|lane| Ranking::Flush(Rank::from(lane)))
    }
    fn full_house(&self) -> Option<Ranking> {
        let trips = self.tripped();
        match trips {
            0 => None,
            _ => {
                let over = Rank::from(trips);
                match self.paired() & !u16::from(over) {
                    0 => None,
                    under => Some(Ranking::FullHouse(over, Rank::from(under))),
                }
            }
        }
    }
    fn quads(&self) -> Option<Ranking> {
        match self.quaded() {
            0 => None,
            quads => Some(Ranking::Quads(Rank::from(quads))),
        }
    }
    fn straight_flush(&self) -> Option<Ranking> {
        self.lanes
            .iter()
            .filter_map(|lane| Self::run(*lane))
            .max()
            .map(Ranking::StraightFlush)
    }

    fn flush_lane(&self) -> Option<u16> {
        self.lanes
            .iter()
            .copied()
            .find(|lane| lane.count_ones() >= 5)
    }

    /// high end of a five-long run in a rank mask, wheel included
    fn run(ranks: u16) -> Option<Rank> {
        let mut bits = ranks;
        bits &= bits << 1;
        bits &= bits << 1;
        bits &= bits << 1;
        bits &= bits << 1;
        if bits != 0 {
            Some(Rank::from(bits))
        } else if WHEEL & ranks == WHEEL {
            Some(Rank::Five)
        } else {
            None
        }
    }
}
