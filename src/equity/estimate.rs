use crate::Probability;
use crate::cards::street::Street;
use serde::Serialize;

/// The simulator's verdict: showdown probabilities, how many samples they
/// rest on, and the street they were computed for. Callers judge precision
/// from the sample count; stderr of the win rate is sqrt(p(1-p)/n).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EquityEstimate {
    pub win: Probability,
    pub tie: Probability,
    pub lose: Probability,
    pub samples: usize,
    pub street: Street,
}

impl EquityEstimate {
    /// showdown value: wins plus half of ties
    pub fn strength(&self) -> Probability {
        self.win + self.tie / 2.0
    }

    pub fn standard_error(&self) -> Probability {
        if self.samples == 0 {
            return Probability::INFINITY;
        }
        (self.win * (1.0 - self.win) / self.samples as Probability).sqrt()
    }

    /// heuristic stand-in when sampling could not run at all; a point
    /// estimate with zero samples so downstream confidence reads as weak
    pub fn presumed(strength: Probability, street: Street) -> Self {
        Self {
            win: strength,
            tie: 0.0,
            lose: 1.0 - strength,
            samples: 0,
            street,
        }
    }
}

impl std::fmt::Display for EquityEstimate {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "win {:.3} tie {:.3} lose {:.3} (n = {})",
            self.win, self.tie, self.lose, self.samples
        )
    }
}
