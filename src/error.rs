/// Everything that can go wrong inside a decision request.
///
/// Only `InvalidGameState` is fatal to a request; the other conditions are
/// expected during live play and the aggregator degrades around them so that
/// a recommendation is always produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// no viable opponent combos survive; fall back to a wider prior
    RangeExhausted,
    /// the learned policy model is missing or returned malformed output
    PolicyUnavailable(String),
    /// the sampling deadline expired before any sample completed
    SimulationTimeout,
    /// structurally inconsistent input; the caller must correct and resubmit
    InvalidGameState(String),
}

impl EngineError {
    /// fatal errors abort the request; the rest degrade gracefully
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InvalidGameState(_))
    }
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::RangeExhausted => write!(f, "no opponent combos survive dead-card removal"),
            Self::PolicyUnavailable(why) => write!(f, "policy model unavailable: {}", why),
            Self::SimulationTimeout => write!(f, "deadline expired before any equity sample"),
            Self::InvalidGameState(why) => write!(f, "invalid game state: {}", why),
        }
    }
}

impl std::error::Error for EngineError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_invalid_state_is_fatal() {
        assert!(EngineError::InvalidGameState("pot".into()).is_fatal());
        assert!(!EngineError::RangeExhausted.is_fatal());
        assert!(!EngineError::PolicyUnavailable("offline".into()).is_fatal());
        assert!(!EngineError::SimulationTimeout.is_fatal());
    }
}
