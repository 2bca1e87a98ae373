use crate::Chips;
use crate::Probability;
use crate::Utility;
use crate::gameplay::action::ActionKind;
use crate::gameplay::state::GameState;
use crate::policy::profile::Profile;
use serde::Serialize;

/// A signal that contributed to a recommendation. The first four appear on
/// every decision, in merge order; the rest annotate degradations and
/// context so the caller can render an honest explanation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Signal {
    /// Monte Carlo showdown strength
    Equity,
    /// how far opponent ranges have collapsed from uniform
    Narrowness,
    /// expected value of the chosen action, big blinds
    PolicyValue,
    /// total logit mass the profile transform moved
    ProfileShift,
    /// break-even equity of the price being offered
    PotOdds,
    /// hero's made-hand category against the board
    MadeHand,
    /// learned model unavailable, pot-odds fallback used
    Degraded,
    /// the sampling deadline cut the equity estimate short
    ReducedSamples,
    /// an opponent range died and was re-seeded from uniform
    RangeReset,
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Equity => write!(f, "equity"),
            Self::Narrowness => write!(f, "range narrowness"),
            Self::PolicyValue => write!(f, "policy value"),
            Self::ProfileShift => write!(f, "profile shift"),
            Self::PotOdds => write!(f, "pot odds"),
            Self::MadeHand => write!(f, "made hand"),
            Self::Degraded => write!(f, "degraded"),
            Self::ReducedSamples => write!(f, "reduced samples"),
            Self::RangeReset => write!(f, "range reset"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Factor {
    pub signal: Signal,
    pub value: Utility,
}

/// What the engine hands back: the action to take, how sure it is, how much
/// better it rates than the next-best line, and the receipts.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub action: ActionKind,
    pub size: Option<Chips>,
    pub confidence: Probability,
    pub ev_delta: Utility,
    pub rationale: Vec<Factor>,
    pub profile: Profile,
}

impl Recommendation {
    pub fn degraded(&self) -> bool {
        self.rationale
            .iter()
            .any(|f| f.signal == Signal::Degraded)
    }

    pub fn factor(&self, signal: Signal) -> Option<Utility> {
        self.rationale
            .iter()
            .find(|f| f.signal == signal)
            .map(|f| f.value)
    }

    /// the (recommendation, game state) pair as JSON, for display and for
    /// anonymized logging hooks; the engine emits, callers persist
    pub fn transcript(&self, state: &GameState) -> String {
        serde_json::json!({
            "recommendation": self,
            "state": state,
        })
        .to_string()
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use colored::Colorize;
        match self.size {
            Some(size) => write!(f, "{} {}", self.action, size)?,
            None => write!(f, "{}", self.action)?,
        }
        write!(
            f,
            "{}",
            format!(
                " (confidence {:.2}, ev +{:.2}bb over next line)",
                self.confidence, self.ev_delta
            )
            .white()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::board::Board;
    use crate::cards::hole::Hole;

    #[test]
    fn transcript_carries_both_records() {
        let state = GameState {
            hero: Hole::try_from("As Ks").unwrap(),
            board: Board::empty(),
            history: vec![],
            stacks: vec![100, 100],
            pot: 3,
            sblind: 1,
            bblind: 2,
            hero_position: 0,
        };
        let recommendation = Recommendation {
            action: ActionKind::Call,
            size: None,
            confidence: 0.62,
            ev_delta: 0.4,
            rationale: vec![Factor {
                signal: Signal::Equity,
                value: 0.55,
            }],
            profile: Profile::Balanced,
        };
        let transcript = recommendation.transcript(&state);
        assert!(transcript.contains("recommendation"));
        assert!(transcript.contains("state"));
        assert!(transcript.contains("Call"));
    }

    #[test]
    fn degraded_flag_reads_from_rationale() {
        let mut recommendation = Recommendation {
            action: ActionKind::Fold,
            size: None,
            confidence: 0.8,
            ev_delta: 0.1,
            rationale: vec![],
            profile: Profile::Tight,
        };
        assert!(!recommendation.degraded());
        recommendation.rationale.push(Factor {
            signal: Signal::Degraded,
            value: 1.0,
        });
        assert!(recommendation.degraded());
    }
}
