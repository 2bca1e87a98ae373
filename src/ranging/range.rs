use super::combo::Combo;
use super::likelihood::Likelihood;
use super::likelihood::StrengthBuckets;
use super::tendencies::Tendencies;
use crate::Probability;
use crate::cards::cards::Cards;
use crate::error::EngineError;
use crate::gameplay::action::ActionEvent;
use crate::gameplay::state::GameState;
use rand::Rng;
use std::collections::BTreeMap;

/// A probability-weighted set of combos one opponent might hold. Weights are
/// relative, not normalized; every transformation conserves the total so
/// that posterior mass is comparable across updates.
#[derive(Debug, Clone, PartialEq)]
pub struct Range(BTreeMap<Combo, Probability>);

impl Range {
    /// flat prior over every combo avoiding the dead cards
    pub fn uniform(dead: Cards) -> Self {
        Self(
            Combo::enumerate(dead)
                .into_iter()
                .map(|c| (c, 1.0))
                .collect(),
        )
    }

    /// prior shaped by an opponent's observed tendencies: combos outside
    /// their implied opening range are damped, raising-range combos are
    /// sharpened, and everything stays strictly positive
    pub fn baseline(dead: Cards, tendencies: &Tendencies) -> Self {
        let mut combos = Combo::enumerate(dead);
        combos.sort_by(|a, b| {
            StrengthBuckets::preflop(*b)
                .partial_cmp(&StrengthBuckets::preflop(*a))
                .expect("strengths are finite")
        });
        let n = combos.len();
        let opening = (n as Probability * tendencies.vpip).round() as usize;
        let raising = (n as Probability * tendencies.pfr).round() as usize;
        Self(
            combos
                .into_iter()
                .enumerate()
                .map(|(i, c)| match i {
                    i if i < raising => (c, crate::BASELINE_SHARPENING),
                    i if i < opening => (c, 1.0),
                    _ => (c, crate::BASELINE_DAMPING),
                })
                .collect(),
        )
    }

    pub fn combos(&self) -> &BTreeMap<Combo, Probability> {
        &self.0
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn total(&self) -> Probability {
        self.0.values().sum()
    }
    /// the only combo left, if the range has collapsed to one
    pub fn single(&self) -> Option<Combo> {
        match self.len() {
            1 => self.0.keys().next().copied(),
            _ => None,
        }
    }
    /// weight that survives an extra dead-card mask, without committing to it
    pub fn live(&self, dead: Cards) -> Probability {
        self.0
            .iter()
            .filter(|(c, _)| !c.overlaps(dead))
            .map(|(_, w)| w)
            .sum()
    }

    /// 1 - normalized entropy: 0 for a flat range, approaching 1 as the
    /// range collapses toward a single combo
    pub fn narrowness(&self) -> Probability {
        let n = self.len();
        if n <= 1 {
            return 1.0;
        }
        let total = self.total();
        let entropy = self
            .0
            .values()
            .map(|w| w / total)
            .filter(|p| *p > 0.0)
            .map(|p| -p * p.ln())
            .sum::<Probability>();
        1.0 - entropy / (n as Probability).ln()
    }

    /// weighted draw among combos that avoid the dead cards; None when the
    /// mask eliminates everything
    pub fn sample(&self, rng: &mut impl Rng, dead: Cards) -> Option<Combo> {
        let live = self.live(dead);
        if live < crate::RANGE_FLOOR {
            return None;
        }
        let mut ticket = rng.random::<Probability>() * live;
        let mut chosen = None;
        for (combo, weight) in self.0.iter().filter(|(c, _)| !c.overlaps(dead)) {
            chosen = Some(*combo);
            ticket -= weight;
            if ticket <= 0.0 {
                break;
            }
        }
        chosen
    }

    /// dead-card removal: drop combos overlapping the mask and hand their
    /// weight to the survivors pro rata. Idempotent, total-conserving.
    pub fn discard(&self, dead: Cards) -> Result<Self, EngineError> {
        let survivors = self
            .0
            .iter()
            .filter(|(c, _)| !c.overlaps(dead))
            .map(|(c, w)| (*c, *w))
            .collect::<BTreeMap<Combo, Probability>>();
        Self::rescaled(survivors, self.total())
    }

    /// Bayesian revision: reweight every combo by how consistent the
    /// observed action is with holding it, conserving total mass. Built
    /// fresh and returned whole so a failed update leaves no trace.
    pub fn observe(
        &self,
        event: &ActionEvent,
        state: &GameState,
        model: &dyn Likelihood,
    ) -> Result<Self, EngineError> {
        let posterior = self
            .0
            .iter()
            .map(|(c, w)| (*c, w * model.weight(*c, event, state)))
            .collect::<BTreeMap<Combo, Probability>>();
        Self::rescaled(posterior, self.total())
    }

    fn rescaled(
        weights: BTreeMap<Combo, Probability>,
        total: Probability,
    ) -> Result<Self, EngineError> {
        let mass = weights.values().sum::<Probability>();
        if mass < crate::RANGE_FLOOR {
            return Err(EngineError::RangeExhausted);
        }
        let scale = total / mass;
        Ok(Self(
            weights.into_iter().map(|(c, w)| (c, w * scale)).collect(),
        ))
    }
}

impl From<BTreeMap<Combo, Probability>> for Range {
    fn from(map: BTreeMap<Combo, Probability>) -> Self {
        Self(map)
    }
}

/// a range collapsed to one known holding
impl From<Combo> for Range {
    fn from(combo: Combo) -> Self {
        Self(std::iter::once((combo, 1.0)).collect())
    }
}

impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} combos, narrowness {:.3}", self.len(), self.narrowness())
    }
}
