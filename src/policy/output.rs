use crate::Probability;
use crate::Utility;
use crate::gameplay::action::ActionKind;
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-action logits and expected values, the lingua franca between the
/// policy model (or its fallback), the profile transform, and the
/// aggregator. Logits turn into probabilities through a softmax; expected
/// values stay in big blinds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyOutput {
    logits: BTreeMap<ActionKind, Utility>,
    values: BTreeMap<ActionKind, Utility>,
}

impl PolicyOutput {
    pub fn logit(&self, kind: ActionKind) -> Utility {
        self.logits.get(&kind).copied().unwrap_or(Utility::MIN)
    }
    pub fn value(&self, kind: ActionKind) -> Utility {
        self.values.get(&kind).copied().unwrap_or(0.0)
    }
    pub fn logits(&self) -> &BTreeMap<ActionKind, Utility> {
        &self.logits
    }
    pub fn values(&self) -> &BTreeMap<ActionKind, Utility> {
        &self.values
    }

    /// numerically stable softmax over the full action set
    pub fn distribution(&self) -> BTreeMap<ActionKind, Probability> {
        let top = self
            .logits
            .values()
            .copied()
            .fold(Utility::MIN, Utility::max);
        let unnormalized = self
            .logits
            .iter()
            .map(|(kind, logit)| (*kind, (logit - top).exp()))
            .collect::<BTreeMap<ActionKind, Probability>>();
        let mass = unnormalized.values().sum::<Probability>();
        unnormalized
            .into_iter()
            .map(|(kind, weight)| (kind, weight / mass))
            .collect()
    }

    /// highest-logit action; ties resolve to the earlier canonical action
    pub fn best(&self) -> ActionKind {
        self.logits
            .iter()
            .fold((ActionKind::Fold, Utility::MIN), |(ka, la), (k, l)| {
                if *l > la { (*k, *l) } else { (ka, la) }
            })
            .0
    }

    /// second-highest-logit action
    pub fn runner_up(&self) -> ActionKind {
        let best = self.best();
        self.logits
            .iter()
            .filter(|(k, _)| **k != best)
            .fold((ActionKind::Fold, Utility::MIN), |(ka, la), (k, l)| {
                if *l > la { (*k, *l) } else { (ka, la) }
            })
            .0
    }

    /// EV separation between the chosen action and its runner-up
    pub fn ev_delta(&self) -> Utility {
        self.value(self.best()) - self.value(self.runner_up())
    }
}

impl From<(BTreeMap<ActionKind, Utility>, BTreeMap<ActionKind, Utility>)> for PolicyOutput {
    fn from(
        (logits, values): (BTreeMap<ActionKind, Utility>, BTreeMap<ActionKind, Utility>),
    ) -> Self {
        Self { logits, values }
    }
}

/// logits then values, both in canonical fold/check/call/bet/raise order
impl From<([Utility; 5], [Utility; 5])> for PolicyOutput {
    fn from((logits, values): ([Utility; 5], [Utility; 5])) -> Self {
        Self {
            logits: ActionKind::all().into_iter().zip(logits).collect(),
            values: ActionKind::all().into_iter().zip(values).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output() -> PolicyOutput {
        PolicyOutput::from(([0.1, -3.0, 1.2, 0.4, -0.5], [0.0, 0.1, 2.0, 1.5, 0.8]))
    }

    #[test]
    fn distribution_sums_to_one() {
        let sum = output().distribution().values().sum::<Probability>();
        assert!((sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn argmax_and_runner_up() {
        let output = output();
        assert_eq!(output.best(), ActionKind::Call);
        assert_eq!(output.runner_up(), ActionKind::Bet);
        assert!((output.ev_delta() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn softmax_orders_by_logit() {
        let dist = output().distribution();
        assert!(dist[&ActionKind::Call] > dist[&ActionKind::Bet]);
        assert!(dist[&ActionKind::Bet] > dist[&ActionKind::Check]);
    }
}
