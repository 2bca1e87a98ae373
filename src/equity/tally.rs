use super::estimate::EquityEstimate;
use crate::Probability;
use crate::cards::street::Street;
use std::cmp::Ordering;

/// Win/tie/lose counts for one worker's share of the sampling budget.
/// Absorbing two tallies is associative and commutative, so partial results
/// combine correctly in whatever order workers finish.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    wins: u64,
    ties: u64,
    losses: u64,
}

impl Tally {
    pub fn record(&mut self, showdown: Ordering) {
        match showdown {
            Ordering::Greater => self.wins += 1,
            Ordering::Equal => self.ties += 1,
            Ordering::Less => self.losses += 1,
        }
    }

    pub fn absorb(self, other: Self) -> Self {
        Self {
            wins: self.wins + other.wins,
            ties: self.ties + other.ties,
            losses: self.losses + other.losses,
        }
    }

    pub fn samples(&self) -> usize {
        (self.wins + self.ties + self.losses) as usize
    }

    /// binomial standard error of the observed win rate
    pub fn standard_error(&self) -> Probability {
        let n = self.samples();
        if n == 0 {
            return Probability::INFINITY;
        }
        let p = self.wins as Probability / n as Probability;
        (p * (1.0 - p) / n as Probability).sqrt()
    }

    /// normalize counts into probabilities; caller guarantees samples > 0
    pub fn estimate(&self, street: Street) -> EquityEstimate {
        let n = self.samples() as Probability;
        EquityEstimate {
            win: self.wins as Probability / n,
            tie: self.ties as Probability / n,
            lose: self.losses as Probability / n,
            samples: self.samples(),
            street,
        }
    }
}
