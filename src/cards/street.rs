use crate::error::EngineError;
use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Street {
    Preflop = 0,
    Flop = 1,
    Turn = 2,
    River = 3,
}

impl Street {
    pub const fn all() -> &'static [Self] {
        &[Self::Preflop, Self::Flop, Self::Turn, Self::River]
    }
    /// community cards visible on this street
    pub const fn n_observed(&self) -> usize {
        match self {
            Self::Preflop => 0,
            Self::Flop => 3,
            Self::Turn => 4,
            Self::River => 5,
        }
    }
    /// community cards still to be dealt
    pub const fn n_to_come(&self) -> usize {
        5 - self.n_observed()
    }
    /// per-street Monte Carlo sample budget; variance matters most when the
    /// board is mostly unknown
    pub const fn samples(&self) -> usize {
        match self {
            Self::Preflop => crate::EQUITY_SAMPLES_PREFLOP,
            Self::Flop => crate::EQUITY_SAMPLES_FLOP,
            Self::Turn => crate::EQUITY_SAMPLES_TURN,
            Self::River => crate::EQUITY_SAMPLES_RIVER,
        }
    }
}

/// board sizes other than 0/3/4/5 are not a street
impl TryFrom<usize> for Street {
    type Error = EngineError;
    fn try_from(n: usize) -> Result<Self, Self::Error> {
        match n {
            0 => Ok(Self::Preflop),
            3 => Ok(Self::Flop),
            4 => Ok(Self::Turn),
            5 => Ok(Self::River),
            _ => Err(EngineError::InvalidGameState(format!(
                "{} community cards is not a street",
                n
            ))),
        }
    }
}

impl std::fmt::Display for Street {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Preflop => write!(f, "preflop"),
            Self::Flop => write!(f, "flop"),
            Self::Turn => write!(f, "turn"),
            Self::River => write!(f, "river"),
        }
    }
}

impl crate::Arbitrary for Street {
    fn random() -> Self {
        use rand::Rng;
        match rand::rng().random_range(0..4) {
            0 => Self::Preflop,
            1 => Self::Flop,
            2 => Self::Turn,
            _ => Self::River,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_board_sizes() {
        assert_eq!(Street::try_from(0).unwrap(), Street::Preflop);
        assert_eq!(Street::try_from(5).unwrap(), Street::River);
        assert!(Street::try_from(2).is_err());
        assert!(Street::try_from(6).is_err());
    }

    #[test]
    fn observed_plus_to_come_is_five() {
        for street in Street::all() {
            assert_eq!(street.n_observed() + street.n_to_come(), 5);
        }
    }
}
