use super::combo::Combo;
use crate::Probability;
use crate::cards::rank::Rank;
use crate::cards::ranking::Ranking;
use crate::cards::street::Street;
use crate::cards::strength::Strength;
use crate::gameplay::action::ActionEvent;
use crate::gameplay::state::GameState;

/// How consistent an observed action is with holding a given combo.
///
/// The contract the updater relies on: scores are in (0, 1], and under an
/// aggressive action a combo implying more hand strength never scores below
/// a combo implying less.
pub trait Likelihood {
    fn weight(&self, combo: Combo, event: &ActionEvent, state: &GameState) -> Probability;
}

const BUCKETS: usize = 5;

/// rows are strength buckets weak to nutted, columns follow
/// ActionKind::all(): fold, check, call, bet, raise.
/// raise/bet/call columns ascend and fold descends so the monotonicity
/// contract holds by construction.
#[rustfmt::skip]
const FREQUENCIES: [[Probability; 5]; BUCKETS] = [
    [0.95, 0.60, 0.25, 0.15, 0.08],
    [0.70, 0.60, 0.40, 0.20, 0.12],
    [0.40, 0.55, 0.60, 0.35, 0.25],
    [0.15, 0.45, 0.70, 0.65, 0.55],
    [0.05, 0.35, 0.75, 0.90, 0.90],
];

/// The shipped likelihood model: bucket a combo's implied hand strength,
/// read off how often that bucket takes the observed action, and lean the
/// aggressive columns toward the top buckets when the sizing is oversized.
pub struct StrengthBuckets;

impl StrengthBuckets {
    /// rough preflop strength in (0, 1); rank values averaged, with pocket
    /// pair and suited bonuses
    pub fn preflop(combo: Combo) -> Probability {
        let hi = Self::rank_strength(combo.hi().rank());
        let lo = Self::rank_strength(combo.lo().rank());
        let mut strength = (hi + lo) / 2.0;
        if combo.paired() {
            strength += 0.2;
        }
        if combo.suited() {
            strength += 0.05;
        }
        strength.min(0.99)
    }

    fn rank_strength(rank: Rank) -> Probability {
        match rank {
            Rank::Two => 0.05,
            Rank::Three => 0.08,
            Rank::Four => 0.11,
            Rank::Five => 0.14,
            Rank::Six => 0.18,
            Rank::Seven => 0.22,
            Rank::Eight => 0.26,
            Rank::Nine => 0.30,
            Rank::Ten => 0.36,
            Rank::Jack => 0.42,
            Rank::Queen => 0.50,
            Rank::King => 0.58,
            Rank::Ace => 0.68,
        }
    }

    /// strength bucket of a combo given the visible board
    pub fn bucket(combo: Combo, state: &GameState) -> usize {
        match state.street() {
            Ok(Street::Preflop) | Err(_) => match Self::preflop(combo) {
                s if s < 0.20 => 0,
                s if s < 0.35 => 1,
                s if s < 0.50 => 2,
                s if s < 0.65 => 3,
                _ => 4,
            },
            Ok(_) => {
                let made = combo.cards().merge(state.board.cards());
                match Strength::from(made).ranking() {
                    Ranking::HighCard(_) => 0,
                    Ranking::OnePair(pair) => match state.board.top_rank() {
                        Some(top) if pair < top => 1,
                        _ => 2,
                    },
                    Ranking::TwoPair(_, _) => 3,
                    _ => 4,
                }
            }
        }
    }

    /// pot size as the actor saw it, rebuilt from the earlier events
    fn pot_before(event: &ActionEvent, state: &GameState) -> crate::Chips {
        state.sblind
            + state.bblind
            + state
                .history
                .iter()
                .filter(|e| e.index < event.index)
                .map(|e| e.committed())
                .sum::<crate::Chips>()
    }
}

impl Likelihood for StrengthBuckets {
    fn weight(&self, combo: Combo, event: &ActionEvent, state: &GameState) -> Probability {
        let bucket = Self::bucket(combo, state);
        let base = FREQUENCIES[bucket][event.kind as usize];
        let shaped = match event.kind.is_aggressive() && event.size > Self::pot_before(event, state)
        {
            // overbets come from the top of the range
            true => base * (0.5 + 0.5 * bucket as Probability / (BUCKETS - 1) as Probability),
            false => base,
        };
        shaped.max(crate::LIKELIHOOD_SMOOTHING)
    }
}
