use super::output::PolicyOutput;
use crate::Probability;
use crate::Utility;
use crate::gameplay::action::ActionKind;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;

/// The caller-selected risk appetite. A closed set of pure transforms over
/// policy output: same input and profile, same output, no hidden state.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum Profile {
    Tight,
    #[default]
    Balanced,
    Aggressive,
}

impl Profile {
    pub const fn all() -> [Self; 3] {
        [Self::Tight, Self::Balanced, Self::Aggressive]
    }

    pub fn apply(&self, output: PolicyOutput) -> PolicyOutput {
        match self {
            Self::Balanced => output,
            Self::Tight => Self::tighten(output),
            Self::Aggressive => Self::sharpen(output),
        }
    }

    /// shift logit mass from aggression toward fold/call, unless the best
    /// action is so clearly +EV over folding that tightening would burn
    /// money
    fn tighten(output: PolicyOutput) -> PolicyOutput {
        let margin = output.value(output.best()) - output.value(ActionKind::Fold);
        if margin > crate::TIGHT_EV_OVERRIDE {
            return output;
        }
        let logits = output
            .logits()
            .iter()
            .map(|(kind, logit)| {
                let shifted = match kind {
                    ActionKind::Fold | ActionKind::Call => logit + crate::TIGHT_BIAS,
                    ActionKind::Bet | ActionKind::Raise => logit - crate::TIGHT_BIAS,
                    ActionKind::Check => *logit,
                };
                (*kind, shifted)
            })
            .collect::<BTreeMap<ActionKind, Utility>>();
        PolicyOutput::from((logits, output.values().clone()))
    }

    /// lower the temperature on aggressive logits, then hold bet/raise
    /// probabilities at a bluff floor so the profile never goes fully
    /// passive; re-derive logits as log-probabilities
    fn sharpen(output: PolicyOutput) -> PolicyOutput {
        let logits = output
            .logits()
            .iter()
            .map(|(kind, logit)| match kind.is_aggressive() {
                true => (*kind, logit / crate::AGGRESSIVE_TEMPERATURE),
                false => (*kind, *logit),
            })
            .collect::<BTreeMap<ActionKind, Utility>>();
        let sharpened = PolicyOutput::from((logits, output.values().clone()));
        let distribution = sharpened.distribution();
        let lifted = distribution
            .iter()
            .filter(|(kind, _)| kind.is_aggressive())
            .map(|(_, p)| p.max(crate::BLUFF_FLOOR))
            .sum::<Probability>();
        let passive = distribution
            .iter()
            .filter(|(kind, _)| !kind.is_aggressive())
            .map(|(_, p)| p)
            .sum::<Probability>();
        // floors stay exact; only the passive mass absorbs the difference
        let scale = (1.0 - lifted) / passive;
        let logits = distribution
            .into_iter()
            .map(|(kind, p)| match kind.is_aggressive() {
                true => (kind, p.max(crate::BLUFF_FLOOR).ln()),
                false => (kind, (p * scale).ln()),
            })
            .collect::<BTreeMap<ActionKind, Utility>>();
        PolicyOutput::from((logits, output.values().clone()))
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Tight => write!(f, "tight"),
            Self::Balanced => write!(f, "balanced"),
            Self::Aggressive => write!(f, "aggressive"),
        }
    }
}
